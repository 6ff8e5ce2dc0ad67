//! HDLC UI-frame codec: flag-delimited, byte-stuffed frames with a variable-length address
//! and a CRC-32 frame check sequence.
//!
//! On the wire a frame is
//!
//! ```text
//! FLAG | escaped(address | 0x03 | payload | crc32_le(address | 0x03 | payload)) | FLAG
//! ```

pub use ::tokio_util::codec as tokio_codec;

pub mod address;
mod codec;
pub mod decoder;
pub mod encoder;
pub mod fcs;
mod frame;
pub mod protocol;

pub use self::{
    address::{
        decode_address,
        encode_address,
    },
    codec::{
        Error,
        HdlcCodec,
    },
    decoder::FrameDecoder,
    encoder::{
        build_frame,
        write_frame,
    },
    fcs::frame_check_sequence,
    frame::{
        Frame,
        FrameStatus,
    },
};
