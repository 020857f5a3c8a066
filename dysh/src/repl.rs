use crate::shell::Shell;
use anyhow::{Context as _, Result};
use dysh_types::Context;
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "dysh> ";

/// The interactive read-eval loop. One line per iteration; the reaper runs
/// between a completed evaluation and the next prompt.
pub struct Repl<'a> {
    pub shell: &'a mut Shell,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell) -> Self {
        Repl { shell }
    }

    pub fn run(&mut self, ctx: &mut Context) -> Result<()> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = std::io::stdout();

        loop {
            self.shell.poll_jobs();

            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;

            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .context("failed to read input")?;
            if read == 0 {
                // end of input
                writeln!(stdout, "\nSuccessfully exit dysh!")?;
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            debug!("input: {:?}", input);
            if let Err(err) = self.shell.eval_line(ctx, input) {
                eprintln!("dysh: {err:#}");
            }
            ctx.reset();
        }
        Ok(())
    }
}
