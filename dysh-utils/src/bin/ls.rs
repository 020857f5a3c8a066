use anyhow::{Context as _, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "List a directory or describe a file")]
struct Cli {
    /// Show hidden entries
    #[arg(short = 'a')]
    all: bool,

    path: Option<PathBuf>,
}

fn print_entry(name: &str, path: &std::path::Path) {
    if path.is_file() {
        println!("\t{}   {}", style("FILE:").white(), name);
    } else if path.is_dir() {
        println!("\t{}    {}", style("DIR:").cyan(), name);
    } else {
        println!("\t{}   {}", style("UNKW:").red(), name);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    if path.is_file() {
        print_entry(&path.display().to_string(), &path);
        return Ok(());
    }

    let entries = std::fs::read_dir(&path)
        .with_context(|| format!("ls error: open path {}", path.display()))?;
    for entry in entries {
        let entry = entry.context("ls error: read entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') && !cli.all {
            continue;
        }
        print_entry(&name, &entry.path());
    }
    Ok(())
}
