//! Routing demultiplexed messages to per-channel writers.

use std::io::{Read, Write};

use tracing::warn;

use crate::channel::Channel;
use crate::error::Result;
use crate::reader::LogReader;

/// Totals from a [`copy_to`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub messages: u64,
    pub stdout_bytes: u64,
    pub stderr_bytes: u64,
    /// Frames on unknown channels, which are not written anywhere.
    pub skipped: u64,
}

/// Copy every remaining message to `stdout` or `stderr` by channel.
///
/// Stdin frames go to `stdout`, matching how the engine echoes attached input.
/// Unknown channels are skipped and counted. Stops at end of stream; the
/// reader is left open so the caller decides when to close it.
pub fn copy_to<R, O, E>(
    reader: &mut LogReader<R>,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<RouteStats>
where
    R: Read,
    O: Write,
    E: Write,
{
    let mut stats = RouteStats::default();

    while let Some(message) = reader.next_message()? {
        stats.messages += 1;
        let size = message.len() as u64;
        match message.channel() {
            Channel::Stdout | Channel::Stdin => {
                stdout.write_all(message.payload())?;
                stats.stdout_bytes += size;
            }
            Channel::Stderr => {
                stderr.write_all(message.payload())?;
                stats.stderr_bytes += size;
            }
            Channel::Unknown(id) => {
                warn!(channel = id, size, "skipping frame on unknown channel");
                stats.skipped += 1;
            }
        }
    }

    stdout.flush()?;
    stderr.flush()?;
    Ok(stats)
}
