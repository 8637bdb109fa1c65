//! nbprobe - non-blocking I/O capability probe
//!
//! Opens a reference path, sets `O_NONBLOCK` on it with `fcntl(F_SETFL)`,
//! and prints `STDIN_FILENO F_SETFL O_NONBLOCK` for a build script to read.

use clap::Parser;
use nbprobe_common::OutputFormat;
use nbprobe_core::config::{ProbeConfig, DEFAULT_REFERENCE_PATH};
use nbprobe_core::exit_codes::ExitCode;
use nbprobe_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use nbprobe_core::probe::run_probe;
use nbprobe_core::report::report;
use std::path::PathBuf;

/// Check that this host can open a file and make it non-blocking with fcntl
#[derive(Parser, Debug)]
#[command(name = "nbprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path opened read-only for the check
    #[arg(long, hide = true, default_value = DEFAULT_REFERENCE_PATH)]
    reference_path: PathBuf,

    /// Output format for the constants
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging entirely (the failure diagnostic is still printed)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log line format on stderr
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Omit timestamps from human-readable log lines
    #[arg(long)]
    no_timestamps: bool,
}

impl Cli {
    fn probe_config(&self) -> ProbeConfig {
        ProbeConfig::default()
            .with_reference_path(&self.reference_path)
            .with_format(self.format)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.verbose, cli.quiet),
        cli.log_format,
    )
    .with_timestamps(!cli.no_timestamps);
    init_logging(&log_config);

    let config = cli.probe_config();
    let result = run_probe(&config);

    let exit_code: ExitCode = report(
        &result,
        config.format,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );

    std::process::exit(exit_code.as_i32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_default_probe() {
        let cli = Cli::try_parse_from(["nbprobe"]).unwrap();
        assert_eq!(cli.probe_config(), ProbeConfig::default());
        assert_eq!(LogLevel::from_verbosity(cli.verbose, cli.quiet), None);
    }

    #[test]
    fn test_reference_path_and_format() {
        let cli = Cli::try_parse_from([
            "nbprobe",
            "--reference-path",
            "/tmp/x",
            "--format",
            "rust",
        ])
        .unwrap();
        let config = cli.probe_config();
        assert_eq!(config.reference_path, PathBuf::from("/tmp/x"));
        assert_eq!(config.format, OutputFormat::Rust);
    }

    #[test]
    fn test_no_timestamps_flag() {
        let cli = Cli::try_parse_from(["nbprobe"]).unwrap();
        assert!(!cli.no_timestamps);
        let cli = Cli::try_parse_from(["nbprobe", "--no-timestamps"]).unwrap();
        assert!(cli.no_timestamps);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["nbprobe", "-q", "-v"]).is_err());
    }
}
