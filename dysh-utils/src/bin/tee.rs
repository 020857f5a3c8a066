use anyhow::{Context as _, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::{Read, Write};

#[derive(Parser)]
#[command(about = "Read from stdin and write it to stdout and a file")]
struct Cli {
    /// Append to the file instead of truncating it
    #[arg(short = 'a')]
    append: bool,

    file: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(!cli.append)
        .append(cli.append)
        .open(&cli.file)
        .with_context(|| format!("tee error: open {}", cli.file))?;

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut buf = [0u8; 1024];
    loop {
        let read = stdin.read(&mut buf).context("tee error: read stdin")?;
        if read == 0 {
            break;
        }
        stdout.write_all(&buf[..read]).context("tee error: write stdout")?;
        file.write_all(&buf[..read]).context("tee error: write file")?;
    }
    stdout.flush().ok();
    Ok(())
}
