mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use tagsplice_frame::ScanConfig;

use crate::cmd::{Command, ScanLimitArg};
use crate::logging::{LogFormat, LogLevel, LogSettings};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tagsplice", version, about = "MP3 tag reader and editor")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "TAGSPLICE_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    /// Disable logging entirely.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// How far frame scans may walk.
    #[arg(long, value_name = "LIMIT", default_value = "fixed", global = true)]
    scan_limit: ScanLimitArg,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    LogSettings::new(cli.log_format, cli.log_level, cli.quiet).init();

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let scan = ScanConfig::from(cli.scan_limit);
    let result = cmd::run(cli.command, format, &scan);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
