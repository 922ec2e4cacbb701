use std::io;
use std::process::exit;

use clap::Parser;
use tlsfingerprint::{Config, OutputFormat, TLSFingerprintError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Print the MD5, SHA1 and SHA256 fingerprints of a host's TLS certificate.
///
/// The certificate is not validated; it is fetched so it can be compared
/// against a known-good pin.
#[derive(Parser, Debug)]
#[command(name = "tlsfingerprint", version, author, about, long_about = None)]
struct Cli {
    /// Hostname or IP address to connect to
    #[arg(long)]
    host: String,

    /// TCP port [default: 8883]
    #[arg(short, long)]
    port: Option<u16>,

    /// Connect and handshake timeout in seconds, 0 to wait forever [default: 30]
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Log diagnostics to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), TLSFingerprintError> {
    let settings = Config::default()
        .merge_with(Config::from_cli_args(
            Some(cli.host),
            cli.port,
            cli.timeout,
            cli.output,
        ))
        .validate()?;
    debug!(?settings, "resolved settings");

    let report = tlsfingerprint::inspect(&settings)?;
    report.write_to(&mut io::stdout().lock(), settings.output)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        debug!(kind = ?err.kind(), "run failed");
        eprintln!("Error: {}", err);
        exit(err.exit_code());
    }
}
