//! Tools for working with HDLC UI-framed byte streams.
//!
//! The codec itself lives in [`codec`]; this crate adds tracing setup and the `hdlc`
//! command-line tool.

pub use codec;
pub use codec::{
    build_frame,
    Frame,
    FrameDecoder,
    FrameStatus,
    HdlcCodec,
};
pub use util::build;

pub mod trace;

/// One line of human-readable output per frame.
pub fn describe(frame: &Frame) -> String {
    match frame.address() {
        Some(_) => frame.to_string(),
        None => format!("{frame} ({} bytes)", frame.raw_encoded().len()),
    }
}
