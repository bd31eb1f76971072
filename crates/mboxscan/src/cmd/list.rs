use mboxscan_mbox::MboxConfig;

use crate::cmd::{open_reader, ListArgs};
use crate::exit::{scan_error, CliResult, SUCCESS};
use crate::output::{EntryPrinter, MessageEntry, OutputFormat};

pub fn run(args: ListArgs, format: OutputFormat, config: MboxConfig) -> CliResult<i32> {
    let reader = open_reader(&args.path, config)?;
    let mut printer = EntryPrinter::new(format);

    for message in reader {
        match message {
            Ok(message) => printer.print(&MessageEntry::from_message(&message), &message),
            Err(err) => {
                // Rows already read are still shown before the error.
                printer.finish();
                return Err(scan_error("scan failed", err));
            }
        }
    }

    printer.finish();
    Ok(SUCCESS)
}
