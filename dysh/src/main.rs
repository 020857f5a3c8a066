use anyhow::Result;
use clap::Parser;
use dysh::repl::Repl;
use dysh::shell::Shell;
use dysh_types::Context;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Run a single command line and exit
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let mut shell = Shell::new();
    let mut ctx = Context::new(shell.pid, shell.pgid, true);
    shell.set_signals();

    let result = match cli.command.as_deref() {
        Some(command) => {
            debug!("command mode: {:?}", command);
            shell.eval_line(&mut ctx, command)
        }
        None => {
            debug!("interactive mode");
            Repl::new(&mut shell).run(&mut ctx)
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dysh: {err:?}");
            ExitCode::FAILURE
        }
    }
}

/// Logging goes to a file, not the terminal: the terminal belongs to the
/// prompt and to foreground jobs. Enabled with e.g. `DYSH_LOG=debug`.
fn init_tracing() -> Result<()> {
    if std::env::var_os("DYSH_LOG").is_none() {
        return Ok(());
    }
    let log_file = std::sync::Arc::new(std::fs::File::create("./dysh.log")?);
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("DYSH_LOG"))
        .with_writer(log_file)
        .init();
    Ok(())
}
