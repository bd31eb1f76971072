use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mboxscan_mbox::Message;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One row of `list` output.
#[derive(Serialize, Debug)]
pub struct MessageEntry {
    pub schema_id: &'static str,
    pub index: usize,
    pub offset: u64,
    pub size: usize,
    pub sender: Option<String>,
    pub date: Option<String>,
}

impl MessageEntry {
    pub fn from_message(message: &Message) -> Self {
        Self {
            schema_id: "https://schemas.3leaps.dev/mboxscan/cli/v1/message-entry.schema.json",
            index: message.index(),
            offset: message.offset(),
            size: message.len(),
            sender: message.sender().map(lossy),
            date: message
                .date()
                .map(|date| date.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.offset.to_string(),
            self.size.to_string(),
            self.sender.clone().unwrap_or_default(),
            self.date.clone().unwrap_or_default(),
        ]
    }
}

/// Streams `list` rows; table output is buffered until [`finish`](Self::finish).
pub struct EntryPrinter {
    format: OutputFormat,
    table: Option<Table>,
}

impl EntryPrinter {
    pub fn new(format: OutputFormat) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INDEX", "OFFSET", "SIZE", "SENDER", "DATE"]);
            table
        });
        Self { format, table }
    }

    pub fn print(&mut self, entry: &MessageEntry, message: &Message) {
        match self.format {
            OutputFormat::Json => print_json(entry),
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(entry.cells());
                }
            }
            OutputFormat::Pretty => {
                println!(
                    "#{} offset={} size={} sender={} date={}",
                    entry.index,
                    entry.offset,
                    entry.size,
                    entry.sender.as_deref().unwrap_or("-"),
                    entry.date.as_deref().unwrap_or("-"),
                );
            }
            OutputFormat::Raw => {
                print_raw(message.separator_line());
                print_raw(b"\n");
            }
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_from_message() {
        let message = Message::new(
            2,
            4096,
            &b"From alice@example.org Mon Apr 20 02:27:10 2015\nSubject: x\n\n"[..],
        );
        let entry = MessageEntry::from_message(&message);

        assert_eq!(entry.index, 2);
        assert_eq!(entry.offset, 4096);
        assert_eq!(entry.size, message.len());
        assert_eq!(entry.sender.as_deref(), Some("alice@example.org"));
        assert_eq!(entry.date.as_deref(), Some("2015-04-20T02:27:10"));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("message-entry.schema.json"));
        assert!(json.contains("\"offset\":4096"));
    }
}
