use crate::channel::Channel;

/// Frame header: channel (1) + reserved (3) + length (4) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Offset of the big-endian payload length inside the header.
pub const LENGTH_OFFSET: usize = 4;

/// A decoded frame header.
///
/// Wire format:
/// ```text
/// ┌──────────┬────────────┬──────────────┬────────────────┐
/// │ Channel  │ Reserved   │ Length       │ Payload        │
/// │ (1B)     │ (3B)       │ (4B BE)      │ (Length bytes) │
/// └──────────┴────────────┴──────────────┴────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// The channel the following payload belongs to.
    pub channel: Channel,
    /// Number of payload bytes that follow the header.
    pub payload_len: u32,
}

impl FrameHeader {
    /// Decode a header. Total over every 8-byte input; reserved bytes are ignored.
    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> Self {
        let len = &bytes[LENGTH_OFFSET..];
        let payload_len = (u32::from(len[0]) << 24)
            | (u32::from(len[1]) << 16)
            | (u32::from(len[2]) << 8)
            | u32::from(len[3]);

        Self {
            channel: Channel::from(bytes[0]),
            payload_len,
        }
    }

    /// The total wire size of the frame this header introduces.
    pub fn frame_size(&self) -> u64 {
        HEADER_SIZE as u64 + u64::from(self.payload_len)
    }
}
