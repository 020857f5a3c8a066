use dysh_builtin::Builtin;
use std::fs::{File, OpenOptions};
use tracing::debug;

/// One pipeline stage: an argument vector plus the redirection targets that
/// were opened while parsing it. The file handles are owned exclusively by
/// the Command until the orchestrator duplicates them onto a child's
/// standard streams; dropping the Command closes whatever was not consumed.
#[derive(Debug, Default)]
pub struct Command {
    pub argv: Vec<String>,
    pub stdin_redirect: Option<File>,
    pub stdout_redirect: Option<File>,
    pub builtin: Option<Builtin>,
}

impl Command {
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

/// Parse result for one input line. `commands` is empty for blank input; an
/// empty stage between pipes is kept as a zero-argv Command the orchestrator
/// skips.
#[derive(Debug, Default)]
pub struct Pipeline {
    pub commands: Vec<Command>,
    pub background: bool,
    pub display: String,
}

impl Pipeline {
    /// True when there is nothing to launch.
    pub fn is_empty(&self) -> bool {
        self.commands.iter().all(|cmd| cmd.argv.is_empty())
    }
}

/// Splits one raw input line into a Pipeline.
///
/// Redirection targets are opened here, eagerly, in the interpreter process.
/// An open failure is reported and that redirection is left unset; the rest
/// of the pipeline is still built.
pub fn parse_line(line: &str) -> Pipeline {
    let (line, background) = strip_background_marker(line);
    if line.trim().is_empty() {
        return Pipeline::default();
    }

    let commands: Vec<Command> = line.split('|').map(parse_stage).collect();
    let display = commands
        .iter()
        .filter(|cmd| !cmd.argv.is_empty())
        .map(|cmd| cmd.argv.join(" "))
        .collect::<Vec<_>>()
        .join(" | ");

    let disp = &display;
    debug!("parsed {:?} background:{}", disp, background);
    Pipeline {
        commands,
        background,
        display,
    }
}

/// Detects one trailing `&` (ignoring trailing spaces) shared by the whole
/// line and strips it.
fn strip_background_marker(line: &str) -> (&str, bool) {
    let trimmed = line.trim_end();
    match trimmed.strip_suffix('&') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    }
}

fn parse_stage(stage: &str) -> Command {
    let mut command = Command::default();
    let mut tokens = stage.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "<" | ">" | ">>" => {
                let Some(filename) = tokens.next() else {
                    eprintln!("dysh: expected a filename after `{token}`");
                    continue;
                };
                match open_redirect(token, filename) {
                    Ok(file) => {
                        if token == "<" {
                            command.stdin_redirect = Some(file);
                        } else {
                            command.stdout_redirect = Some(file);
                        }
                    }
                    Err(err) => eprintln!("dysh: {filename}: {err}"),
                }
            }
            _ => command.argv.push(token.to_string()),
        }
    }

    command.builtin = command.name().and_then(Builtin::lookup);
    command
}

fn open_redirect(op: &str, filename: &str) -> std::io::Result<File> {
    match op {
        "<" => File::open(filename),
        ">" => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(filename),
        ">>" => OpenOptions::new()
            .write(true)
            .create(true)
            .append(true)
            .open(filename),
        _ => unreachable!("not a redirection operator: {op}"),
    }
}
