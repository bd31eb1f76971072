use mboxscan_mbox::MboxConfig;
use serde::Serialize;
use tracing::info;

use crate::cmd::{open_reader, CountArgs};
use crate::exit::{scan_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct CountOutput {
    schema_id: &'static str,
    messages: usize,
    bytes: u64,
}

pub fn run(args: CountArgs, format: OutputFormat, config: MboxConfig) -> CliResult<i32> {
    let mut reader = open_reader(&args.path, config)?;

    let mut bytes = 0u64;
    for message in reader.by_ref() {
        let message = message.map_err(|err| scan_error("scan failed", err))?;
        bytes += message.len() as u64;
    }

    let out = CountOutput {
        schema_id: "https://schemas.3leaps.dev/mboxscan/cli/v1/message-count.schema.json",
        messages: reader.messages_read(),
        bytes,
    };
    info!(messages = out.messages, bytes = out.bytes, "count complete");

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Messages: {}", out.messages);
            println!("Bytes:    {}", out.bytes);
        }
        OutputFormat::Raw => println!("{}", out.messages),
    }
    Ok(SUCCESS)
}
