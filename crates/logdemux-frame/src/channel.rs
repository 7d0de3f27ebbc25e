//! Channel IDs carried in byte 0 of every frame header.
//!
//! Ids 0-2 are the standard streams of the attached process. Any other byte is
//! relayed as [`Channel::Unknown`] so producers speaking a newer protocol do not
//! break the consumer.

use std::fmt;

/// Standard input, echoed back by the engine when stdin is attached.
pub const STDIN: u8 = 0;

/// Standard output of the container process.
pub const STDOUT: u8 = 1;

/// Standard error of the container process.
pub const STDERR: u8 = 2;

/// Logical stream a frame's payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Stdin,
    Stdout,
    Stderr,
    /// Any id outside 0-2, kept verbatim.
    Unknown(u8),
}

impl Channel {
    /// The raw id as it appears on the wire.
    pub fn id(self) -> u8 {
        match self {
            Channel::Stdin => STDIN,
            Channel::Stdout => STDOUT,
            Channel::Stderr => STDERR,
            Channel::Unknown(id) => id,
        }
    }

    /// Returns true for the three standard streams.
    pub fn is_known(self) -> bool {
        !matches!(self, Channel::Unknown(_))
    }
}

impl From<u8> for Channel {
    fn from(id: u8) -> Self {
        match id {
            STDIN => Channel::Stdin,
            STDOUT => Channel::Stdout,
            STDERR => Channel::Stderr,
            other => Channel::Unknown(other),
        }
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.id()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Unknown(id) => write!(f, "UNKNOWN({id})"),
            known => f.write_str(channel_name(*known)),
        }
    }
}

/// Returns a human-readable name for a channel.
pub fn channel_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Stdin => "STDIN",
        Channel::Stdout => "STDOUT",
        Channel::Stderr => "STDERR",
        Channel::Unknown(_) => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_map_to_standard_streams() {
        assert_eq!(Channel::from(0), Channel::Stdin);
        assert_eq!(Channel::from(1), Channel::Stdout);
        assert_eq!(Channel::from(2), Channel::Stderr);
    }

    #[test]
    fn every_id_survives_conversion() {
        for id in 0..=u8::MAX {
            assert_eq!(Channel::from(id).id(), id);
            assert_eq!(u8::from(Channel::from(id)), id);
        }
    }

    #[test]
    fn unrecognized_ids_are_relayed() {
        let channel = Channel::from(7);
        assert_eq!(channel, Channel::Unknown(7));
        assert!(!channel.is_known());
        assert_eq!(channel_name(channel), "UNKNOWN");
        assert_eq!(channel.to_string(), "UNKNOWN(7)");
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(Channel::Stdout.to_string(), "STDOUT");
        assert_eq!(Channel::Stderr.to_string(), "STDERR");
        assert!(Channel::Stdin.is_known());
    }
}
