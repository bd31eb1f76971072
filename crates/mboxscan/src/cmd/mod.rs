use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use mboxscan_mbox::{MboxConfig, MboxReader};
use mboxscan_scanner::ReaderSource;

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod count;
pub mod list;
pub mod split;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count the messages in an archive.
    Count(CountArgs),
    /// List index, offset, size and envelope of each message.
    List(ListArgs),
    /// Write each message to its own file.
    Split(SplitArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: MboxConfig) -> CliResult<i32> {
    match command {
        Command::Count(args) => count::run(args, format, config),
        Command::List(args) => list::run(args, format, config),
        Command::Split(args) => split::run(args, format, config),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Archive to read, or `-` for stdin.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Archive to read, or `-` for stdin.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Archive to read, or `-` for stdin.
    pub path: PathBuf,
    /// Output directory; created if missing.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: PathBuf,
    /// Keep the `From ` separator line in each written file.
    #[arg(long)]
    pub keep_separator: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub type Input = Box<dyn Read>;

/// Open `path` for reading; `-` is stdin.
pub fn open_reader(path: &Path, config: MboxConfig) -> CliResult<MboxReader<ReaderSource<Input>>> {
    let input: Input = if path == Path::new("-") {
        Box::new(std::io::stdin())
    } else {
        let file = File::open(path)
            .map_err(|err| io_error(&format!("cannot open {}", path.display()), err))?;
        Box::new(file)
    };
    Ok(MboxReader::with_config(ReaderSource::new(input), config))
}

pub fn mbox_config(max_message_size: usize) -> MboxConfig {
    MboxConfig { max_message_size }
}

/// Parse a byte size: plain digits, or with a `KiB`, `MiB` or `GiB` suffix
/// (`K`, `M`, `G` are accepted as the same binary units).
pub fn parse_size(input: &str) -> CliResult<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "size must not be empty"));
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: usize = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid size value: {input}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "size must be greater than zero"));
    }

    let multiplier: usize = match unit.trim() {
        "" | "B" => 1,
        "K" | "KiB" => 1 << 10,
        "M" | "MiB" => 1 << 20,
        "G" | "GiB" => 1 << 30,
        other => {
            return Err(CliError::new(
                USAGE,
                format!("unsupported size unit: {other}"),
            ))
        }
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| CliError::new(USAGE, format!("size out of range: {input}")))
}
