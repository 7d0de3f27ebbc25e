//! Split container engine attach/log streams into stdout and stderr.
//!
//! A non-TTY container multiplexes its standard streams over one connection
//! using 8-byte frame headers. logdemux reads such a stream from any
//! `std::io::Read` source and hands back one message per frame.
//!
//! # Crate Structure
//!
//! - [`frame`] — Header codec, [`frame::LogReader`], and channel routing
//!
//! The `logdemux` binary (behind the `cli` feature) demultiplexes captured
//! streams from files or stdin.

/// Re-export frame types.
pub mod frame {
    pub use logdemux_frame::*;
}
