use std::process::ExitCode;

use knock_cli::commands::{ServerCommandLine, parse_or_exit};
use knock_cli::terminal::logging;
use knock_common::kprint;
use knock_core::server::Server;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands: ServerCommandLine = match parse_or_exit(std::env::args_os()) {
        Ok(commands) => commands,
        Err(code) => return code,
    };

    logging::init_logging(commands.verbose);
    let cfg = commands.into_config();

    let server = match Server::bind(&cfg).await {
        Ok(server) => server,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    kprint!("server: waiting for connections on {}...", server.local_addr());
    server.serve().await;
    ExitCode::SUCCESS
}
