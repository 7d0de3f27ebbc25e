use logdemux_frame::{LogReader, ReaderConfig};

use crate::cmd::InspectArgs;
use crate::exit::{demux_error, CliResult, SUCCESS};
use crate::input::open_input;
use crate::output::{MessagePrinter, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let source = open_input(&args.input)?;
    let config = ReaderConfig {
        max_payload_size: args.max_payload,
        ..ReaderConfig::default()
    };

    let mut printer = MessagePrinter::new(format);
    let result = LogReader::scope_with_config(source, config, |reader| {
        let mut printed = 0u64;
        let mut index = 0u64;

        while let Some(message) = reader.next_message()? {
            index += 1;
            if let Some(channels) = &args.channels {
                if !channels.contains(&message.channel().id()) {
                    continue;
                }
            }

            printer.print(index, &message);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    break;
                }
            }
        }
        Ok(printed)
    });

    // Rows decoded before a failure are still worth showing.
    printer.finish();
    let printed = result.map_err(|err| demux_error("inspect failed", err))?;
    tracing::debug!(printed, "inspect finished");

    Ok(SUCCESS)
}
