use std::process::ExitCode;

use clap::CommandFactory;
use knock_cli::commands::{ClientCommandLine, parse_or_exit};
use knock_cli::terminal::logging;
use knock_common::kprint;
use knock_core::client;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        let _ = ClientCommandLine::command().print_help();
        return ExitCode::SUCCESS;
    }

    let commands: ClientCommandLine = match parse_or_exit(std::env::args_os()) {
        Ok(commands) => commands,
        Err(code) => return code,
    };

    logging::init_logging(commands.verbose);
    let cfg = commands.into_config();

    match client::fetch_greeting(&cfg).await {
        Ok(reply) => {
            kprint!("client: received '{}'", reply.message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
