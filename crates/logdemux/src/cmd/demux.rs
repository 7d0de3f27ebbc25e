use logdemux_frame::{copy_to, LogReader, ReaderConfig};

use crate::cmd::DemuxArgs;
use crate::exit::{demux_error, CliResult, SUCCESS};
use crate::input::open_input;

pub fn run(args: DemuxArgs) -> CliResult<i32> {
    let source = open_input(&args.input)?;
    let config = ReaderConfig {
        max_payload_size: args.max_payload,
        ..ReaderConfig::default()
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let stats = LogReader::scope_with_config(source, config, |reader| {
        copy_to(reader, &mut stdout.lock(), &mut stderr.lock())
    })
    .map_err(|err| demux_error("demux failed", err))?;

    tracing::info!(
        messages = stats.messages,
        stdout_bytes = stats.stdout_bytes,
        stderr_bytes = stats.stderr_bytes,
        skipped = stats.skipped,
        "stream demultiplexed"
    );

    Ok(SUCCESS)
}
