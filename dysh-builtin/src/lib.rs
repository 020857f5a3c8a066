use anyhow::Result;
use dysh_types::{Context, ExitStatus};

mod bg;
mod fg;
mod hello;
mod jobs;

/// Interface builtin commands use to reach back into the shell. Job-control
/// builtins cannot run against shell state directly without a circular
/// dependency between this crate and the interpreter, so they hand the
/// request to the shell through this trait instead.
pub trait ShellProxy {
    /// Dispatches a command to the shell's command execution system.
    fn dispatch(&mut self, ctx: &Context, cmd: &str, argv: Vec<String>) -> Result<()>;
}

/// The closed set of commands that run inside the interpreter process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Builtin {
    Hello,
    Jobs,
    Fg,
    Bg,
}

impl Builtin {
    /// Resolves a command name to a builtin kind.
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "hello" => Some(Builtin::Hello),
            "jobs" => Some(Builtin::Jobs),
            "fg" => Some(Builtin::Fg),
            "bg" => Some(Builtin::Bg),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Hello => "hello",
            Builtin::Jobs => "jobs",
            Builtin::Fg => "fg",
            Builtin::Bg => "bg",
        }
    }

    pub fn run(self, ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
        match self {
            Builtin::Hello => hello::command(ctx, argv, proxy),
            Builtin::Jobs => jobs::command(ctx, argv, proxy),
            Builtin::Fg => fg::command(ctx, argv, proxy),
            Builtin::Bg => bg::command(ctx, argv, proxy),
        }
    }
}
