use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use logdemux_frame::{channel_name, LogMessage};
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

#[derive(Serialize)]
struct MessageOutput<'a> {
    index: u64,
    channel: u8,
    channel_name: &'a str,
    payload_size: usize,
    payload: String,
}

/// Prints one record per message. Table output is collected and emitted by
/// [`finish`](Self::finish) so all rows share one table.
pub struct MessagePrinter {
    format: OutputFormat,
    table: Option<Table>,
}

impl MessagePrinter {
    pub fn new(format: OutputFormat) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "CHANNEL", "SIZE", "PAYLOAD"]);
            table
        });
        Self { format, table }
    }

    pub fn print(&mut self, index: u64, message: &LogMessage) {
        match self.format {
            OutputFormat::Json => println!("{}", json_line(index, message)),
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![
                        index.to_string(),
                        channel_label(message),
                        message.len().to_string(),
                        payload_preview(message.payload()),
                    ]);
                }
            }
            OutputFormat::Pretty => {
                println!(
                    "#{index} channel={} ({}) size={} payload={}",
                    message.channel().id(),
                    channel_name(message.channel()),
                    message.len(),
                    payload_preview(message.payload())
                );
            }
            OutputFormat::Raw => print_raw(message.payload()),
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn json_line(index: u64, message: &LogMessage) -> String {
    let out = MessageOutput {
        index,
        channel: message.channel().id(),
        channel_name: channel_name(message.channel()),
        payload_size: message.len(),
        payload: payload_preview(message.payload()),
    };
    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
}

fn channel_label(message: &LogMessage) -> String {
    message.channel().to_string()
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.trim_end_matches('\n').to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

#[cfg(test)]
mod tests {
    use logdemux_frame::Channel;

    use super::*;

    #[test]
    fn json_line_describes_message() {
        let message = LogMessage::new(Channel::Stderr, &b"disk full\n"[..]);
        let value: serde_json::Value =
            serde_json::from_str(&json_line(4, &message)).expect("valid json");

        assert_eq!(value["index"], 4);
        assert_eq!(value["channel"], 2);
        assert_eq!(value["channel_name"], "STDERR");
        assert_eq!(value["payload_size"], 10);
        assert_eq!(value["payload"], "disk full");
    }

    #[test]
    fn binary_payload_is_summarised() {
        assert_eq!(payload_preview(&[0xFF, 0xFE, 0x00]), "<binary 3 bytes>");
    }

    #[test]
    fn unknown_channel_label_keeps_id() {
        let message = LogMessage::new(Channel::Unknown(9), Vec::new());
        assert_eq!(channel_label(&message), "UNKNOWN(9)");
    }
}
