use std::fs;
use std::path::Path;

use mboxscan_mbox::{MboxConfig, Message};
use serde::Serialize;
use tracing::{debug, info};

use crate::cmd::{open_reader, SplitArgs};
use crate::exit::{io_error, scan_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct SplitOutput {
    schema_id: &'static str,
    messages: usize,
    out_dir: String,
}

pub fn run(args: SplitArgs, format: OutputFormat, config: MboxConfig) -> CliResult<i32> {
    fs::create_dir_all(&args.out).map_err(|err| {
        io_error(&format!("cannot create {}", args.out.display()), err)
    })?;

    let mut reader = open_reader(&args.path, config)?;
    for message in reader.by_ref() {
        let message = message.map_err(|err| scan_error("scan failed", err))?;
        write_message(&args.out, &message, args.keep_separator)?;
    }

    let out = SplitOutput {
        schema_id: "https://schemas.3leaps.dev/mboxscan/cli/v1/split-result.schema.json",
        messages: reader.messages_read(),
        out_dir: args.out.display().to_string(),
    };
    info!(messages = out.messages, out_dir = %out.out_dir, "split complete");

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Wrote {} messages to {}", out.messages, out.out_dir);
        }
        OutputFormat::Raw => println!("{}", out.messages),
    }
    Ok(SUCCESS)
}

fn write_message(dir: &Path, message: &Message, keep_separator: bool) -> CliResult<()> {
    let path = dir.join(file_name(message.index()));
    let result = if keep_separator {
        fs::write(&path, message.as_bytes())
    } else {
        fs::write(&path, message.content())
    };
    result.map_err(|err| io_error(&format!("cannot write {}", path.display()), err))?;
    debug!(path = %path.display(), size = message.len(), "wrote message");
    Ok(())
}

fn file_name(index: usize) -> String {
    format!("{index:06}.eml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(file_name(0), "000000.eml");
        assert_eq!(file_name(42), "000042.eml");
        assert_eq!(file_name(1_234_567), "1234567.eml");
    }
}
