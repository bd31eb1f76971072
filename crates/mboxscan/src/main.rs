mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mboxscan", version, about = "Streaming mbox splitter")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        env = "MBOXSCAN_LOG_FORMAT",
        default_value = "text",
        global = true
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr); `off` silences diagnostics.
    #[arg(
        long,
        value_name = "LEVEL",
        env = "MBOXSCAN_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    /// Largest message to buffer (e.g. 4MiB, 512KiB, 1048576).
    #[arg(
        long,
        value_name = "BYTES",
        env = "MBOXSCAN_MAX_MESSAGE_SIZE",
        default_value = "4MiB",
        global = true
    )]
    max_message_size: String,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::parse_size(&cli.max_message_size)
        .and_then(|max| cmd::run(cli.command, format, cmd::mbox_config(max)));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_split_subcommand() {
        let cli = Cli::try_parse_from(["mboxscan", "split", "inbox.mbox", "--out", "/tmp/out"])
            .expect("split args should parse");

        match cli.command {
            Command::Split(args) => {
                assert_eq!(args.path, std::path::PathBuf::from("inbox.mbox"));
                assert_eq!(args.out, std::path::PathBuf::from("/tmp/out"));
                assert!(!args.keep_separator);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn split_requires_out_dir() {
        let err = Cli::try_parse_from(["mboxscan", "split", "inbox.mbox"])
            .expect_err("missing --out should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mboxscan",
            "count",
            "-",
            "--max-message-size",
            "64KiB",
            "--format",
            "json",
        ])
        .expect("count args should parse");

        assert!(matches!(cli.command, Command::Count(_)));
        assert_eq!(cli.max_message_size, "64KiB");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }

    #[test]
    fn log_level_off_parses() {
        let cli = Cli::try_parse_from(["mboxscan", "--log-level", "off", "version"])
            .expect("off should parse");
        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["mboxscan", "--format", "xml", "list", "-"])
            .expect_err("unknown format should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
