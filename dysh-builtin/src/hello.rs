use super::ShellProxy;
use dysh_types::{Context, ExitStatus};

pub fn command(ctx: &Context, _argv: Vec<String>, _proxy: &mut dyn ShellProxy) -> ExitStatus {
    match ctx.write_stdout("Hello, World") {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(_) => ExitStatus::ExitedWith(1),
    }
}
