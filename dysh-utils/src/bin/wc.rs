use std::io::Read;
use std::process::ExitCode;

fn count_lines(buf: &[u8]) -> usize {
    buf.iter().filter(|&&b| b == b'\n').count()
}

fn main() -> ExitCode {
    let mut buf = Vec::new();
    if std::io::stdin().lock().read_to_end(&mut buf).is_err() {
        eprintln!("wc error: read stdin");
        return ExitCode::FAILURE;
    }

    let count = count_lines(&buf);
    println!("{} {}", count, if count > 1 { "lines" } else { "line" });
    ExitCode::SUCCESS
}
