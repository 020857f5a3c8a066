use libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{isatty, Pid};
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::{FromRawFd, RawFd};
use thiserror::Error;

/// dysh specific error types
#[derive(Error, Debug)]
pub enum DyshError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("system call failed: {0}")]
    System(String),
}

pub type DyshResult<T> = std::result::Result<T, DyshError>;

/// Per-evaluation execution state threaded through the parser, the
/// orchestrator and the builtins. The file descriptors describe where the
/// *next* launched process (or inline builtin) reads and writes; they are
/// reset to the standard streams between prompt lines.
#[derive(Clone)]
pub struct Context {
    pub shell_pid: Pid,
    pub shell_pgid: Pid,
    pub foreground: bool,
    pub interactive: bool,
    pub infile: RawFd,
    pub outfile: RawFd,
    pub errfile: RawFd,
}

impl Context {
    pub fn new(shell_pid: Pid, shell_pgid: Pid, foreground: bool) -> Self {
        let interactive = isatty(STDIN_FILENO).unwrap_or(false);
        Context {
            shell_pid,
            shell_pgid,
            foreground,
            interactive,
            infile: STDIN_FILENO,
            outfile: STDOUT_FILENO,
            errfile: STDERR_FILENO,
        }
    }

    pub fn reset(&mut self) {
        self.foreground = true;
        self.infile = STDIN_FILENO;
        self.outfile = STDOUT_FILENO;
        self.errfile = STDERR_FILENO;
    }

    pub fn write_stdout(&self, msg: &str) -> DyshResult<()> {
        let mut file = unsafe { File::from_raw_fd(self.outfile) };
        writeln!(&mut file, "{msg}")?;
        mem::forget(file);
        Ok(())
    }

    pub fn write_stderr(&self, msg: &str) -> DyshResult<()> {
        let mut file = unsafe { File::from_raw_fd(self.errfile) };
        writeln!(&mut file, "{msg}")?;
        mem::forget(file);
        Ok(())
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Context")
            .field("shell_pid", &self.shell_pid)
            .field("shell_pgid", &self.shell_pgid)
            .field("foreground", &self.foreground)
            .field("interactive", &self.interactive)
            .field("infile", &self.infile)
            .field("outfile", &self.outfile)
            .field("errfile", &self.errfile)
            .finish()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    ExitedWith(i32),
    Running(Pid),
}
