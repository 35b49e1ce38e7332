use std::process::ExitCode;

use clap::{ArgAction, Args, Parser};
use knock_common::config::{
    ClientConfig, DEFAULT_BACKLOG, DEFAULT_GREETING, DEFAULT_PORT, MAX_DATA_SIZE, ServerConfig,
};
use knock_common::network::candidate::FamilyHint;
use knock_common::network::target::Target;

/// Exit status for malformed command lines.
pub const USAGE_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "knock-server", version)]
#[command(about = "Greets every TCP client with a fixed message, then hangs up.")]
pub struct ServerCommandLine {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Local address to bind (every local address when omitted)
    #[arg(short, long, value_name = "HOST")]
    pub bind: Option<Target>,

    #[command(flatten)]
    pub family: FamilyArgs,

    /// Length of the queue of connections waiting to be accepted
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: u32,

    /// Message sent to every client
    #[arg(short, long, default_value = DEFAULT_GREETING)]
    pub message: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[command(name = "knock-client", version)]
#[command(about = "Connects to a knock server and prints its greeting.")]
pub struct ClientCommandLine {
    /// Hostname or IP address of the server
    #[arg(value_name = "HOSTNAME", value_parser = Target::parse_remote)]
    pub hostname: Option<Target>,

    /// Hostname or IP address of the server, takes precedence over HOSTNAME
    #[arg(
        short = 'i',
        long = "server_hostname",
        value_name = "HOST",
        value_parser = Target::parse_remote
    )]
    pub server_hostname: Option<Target>,

    /// Port the server listens on
    #[arg(short = 'p', long = "server_port", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub server_port: u16,

    #[command(flatten)]
    pub family: FamilyArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FamilyArgs {
    /// Only use IPv4 addresses
    #[arg(short = '4', long = "ipv4", conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Only use IPv6 addresses
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,
}

impl FamilyArgs {
    pub fn hint(self) -> FamilyHint {
        match (self.ipv4, self.ipv6) {
            (true, _) => FamilyHint::Ipv4,
            (false, true) => FamilyHint::Ipv6,
            (false, false) => FamilyHint::Unspecified,
        }
    }
}

impl ServerCommandLine {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind.unwrap_or(Target::Wildcard),
            port: self.port,
            family: self.family.hint(),
            backlog: self.backlog,
            greeting: self.message,
        }
    }
}

impl ClientCommandLine {
    pub fn into_config(self) -> ClientConfig {
        ClientConfig {
            target: self
                .server_hostname
                .or(self.hostname)
                .unwrap_or(Target::ThisHost),
            port: self.server_port,
            family: self.family.hint(),
            max_data_size: MAX_DATA_SIZE,
        }
    }
}

/// Parses `args`, or prints help, version or the usage error and returns the exit status.
///
/// Help and version requests exit successfully; every other parse failure exits with
/// [`USAGE_EXIT_CODE`].
pub fn parse_or_exit<P, I, T>(args: I) -> Result<P, ExitCode>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    P::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::from(USAGE_EXIT_CODE)
        } else {
            ExitCode::SUCCESS
        }
    })
}
