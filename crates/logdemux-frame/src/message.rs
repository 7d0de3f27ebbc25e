use bytes::Bytes;

use crate::channel::Channel;
use crate::codec::HEADER_SIZE;

/// One demultiplexed frame: the channel it arrived on and its payload.
///
/// The payload is opaque; it is neither decoded nor split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    channel: Channel,
    payload: Bytes,
}

impl LogMessage {
    /// Create a new message.
    pub fn new(channel: Channel, payload: impl Into<Bytes>) -> Self {
        Self {
            channel,
            payload: payload.into(),
        }
    }

    /// The channel this message arrived on.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The payload bytes, exactly as framed.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the message and return the payload.
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true for a zero-length frame.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The size this message occupied on the wire (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}
