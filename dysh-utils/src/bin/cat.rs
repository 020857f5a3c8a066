use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(filename) = args.next() else {
        eprintln!("Usage: cat <file>");
        return ExitCode::FAILURE;
    };

    let buf = match std::fs::read(&filename) {
        Ok(buf) => buf,
        Err(_) => {
            eprintln!("file {filename} is not exist");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if stdout.write_all(&buf).and_then(|_| stdout.flush()).is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
