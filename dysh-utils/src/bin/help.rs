use clap::Parser;
use console::style;
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Help for dysh operators and commands")]
struct Cli {
    /// Describe the line operators
    #[arg(short = 'o')]
    operators: bool,

    /// Describe the available commands
    #[arg(short = 'c')]
    commands: bool,
}

fn print_operator_help() {
    println!("\n\t{}", style("----- OPERATOR HELP -----").cyan());
    println!("\t{}     Pipe", style("|").yellow());
    println!("\t{}     Background Execution", style("&").yellow());
    println!("\t{}     Output Redirection", style(">").yellow());
    println!("\t{}    Append Output Redirection", style(">>").yellow());
    println!("\t{}     Input Redirection", style("<").yellow());
}

fn print_command_help() {
    println!("\n\t{}", style("----- COMMAND HELP -----").cyan());
    println!("\t{}  Print the content of input file", style("cat:").yellow());
    println!("\t{} Print a fixed greeting", style("hello:").yellow());
    println!("\t{}  Help for dysh command", style("help:").yellow());
    println!("\t{}  List the jobs running in background", style("jobs:").yellow());
    println!("\t{}    Bring a job to the foreground", style("fg:").yellow());
    println!("\t{}    Resume a job in the background", style("bg:").yellow());
    println!("\t{}  Send signal to specific process", style("kill:").yellow());
    println!("\t{}   List a directory", style("ls:").yellow());
    println!("\t{}   Read from stdin and write it to stdout and specific file", style("tee:").yellow());
    println!("\t{}    Calculate the total line count", style("wc:").yellow());
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.operators && !cli.commands {
        eprintln!("Usage: help -[o|c]");
        return ExitCode::FAILURE;
    }
    if cli.operators {
        print_operator_help();
    }
    if cli.commands {
        print_command_help();
    }
    ExitCode::SUCCESS
}
