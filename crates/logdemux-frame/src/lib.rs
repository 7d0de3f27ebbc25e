//! Demultiplexer for container engine attach/log streams.
//!
//! Without a TTY, the engine interleaves stdout and stderr on one connection.
//! Every frame is:
//! - A 1-byte channel ID (0 stdin, 1 stdout, 2 stderr)
//! - 3 reserved bytes
//! - A 4-byte big-endian payload length
//!
//! [`LogReader`] turns such a stream back into one [`LogMessage`] per frame.
//! It reads only what the current frame needs and drains the source on close
//! so a pooled connection can be reused.

pub mod channel;
pub mod codec;
pub mod error;
pub mod message;
pub mod reader;
pub mod route;

pub use channel::{channel_name, Channel, STDERR, STDIN, STDOUT};
pub use codec::{FrameHeader, HEADER_SIZE, LENGTH_OFFSET};
pub use error::{DemuxError, IntoInnerError, Result};
pub use message::LogMessage;
pub use reader::{LogReader, ReaderConfig};
pub use route::{copy_to, RouteStats};
