use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::process::ExitCode;
use std::str::FromStr;

const USAGE: &str = "Usage: kill -SIG*** pid1 pid2 ...";

fn parse_signal(arg: &str) -> Option<Signal> {
    let name = arg.strip_prefix('-')?;
    if name.chars().all(|c| c.is_ascii_digit()) {
        let num: i32 = name.parse().ok()?;
        return Signal::try_from(num).ok();
    }
    Signal::from_str(name).ok()
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let Some(signal) = parse_signal(&args[0]) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut status = ExitCode::SUCCESS;
    for arg in &args[1..] {
        let Ok(pid) = arg.parse::<i32>() else {
            eprintln!("kill error: bad pid {arg}");
            status = ExitCode::FAILURE;
            continue;
        };
        if let Err(err) = kill(Pid::from_raw(pid), signal) {
            eprintln!("kill error: {pid}: {err}");
            status = ExitCode::FAILURE;
        }
    }
    status
}
