use std::fmt::{
    Display,
    Formatter,
};

use bytes::Bytes;

use crate::{
    address::decode_address,
    protocol::FCS_LEN,
};

/// Outcome of recognizing a frame on the wire.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, derive_more::Display)]
pub enum FrameStatus {
    #[display(fmt = "ok")]
    Ok,

    #[display(fmt = "frame check sequence failure")]
    FcsMismatch,

    #[display(fmt = "framing error")]
    FramingError,

    #[display(fmt = "bad address")]
    BadAddress,
}

/// A frame recognized by the decoder.
///
/// Only frames with [`FrameStatus::Ok`] are guaranteed to carry an address, control byte
/// and payload. Other frames keep the bytes they were built from for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    raw_encoded: Bytes,
    raw_decoded: Bytes,
    status:      FrameStatus,
    address:     Option<u64>,
    control:     Option<u8>,
    data:        Bytes,
}

impl Frame {
    /// Build a frame from the bytes seen between two flags.
    ///
    /// `Ok` and `FcsMismatch` frames have their header parsed. If the address cannot be
    /// decoded, or leaves no room for the control byte, the status becomes
    /// [`FrameStatus::BadAddress`].
    pub fn new(raw_encoded: Bytes, raw_decoded: Bytes, status: FrameStatus) -> Self {
        let mut frame = Self {
            raw_encoded,
            raw_decoded,
            status,
            address: None,
            control: None,
            data: Bytes::new(),
        };

        if !matches!(status, FrameStatus::Ok | FrameStatus::FcsMismatch) {
            return frame;
        }

        let body_len = frame.raw_decoded.len().saturating_sub(FCS_LEN);

        match decode_address(&frame.raw_decoded[..body_len]) {
            Some((address, len)) if len < body_len => {
                frame.address = Some(address);
                frame.control = Some(frame.raw_decoded[len]);
                frame.data = frame.raw_decoded.slice(len + 1..body_len);
            },
            _ => frame.status = FrameStatus::BadAddress,
        }

        frame
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.status == FrameStatus::Ok
    }

    #[inline]
    pub fn status(&self) -> FrameStatus {
        self.status
    }

    /// Escaped bytes as received, without the delimiting flags.
    #[inline]
    pub fn raw_encoded(&self) -> &Bytes {
        &self.raw_encoded
    }

    /// Unescaped bytes, including address, control and FCS.
    #[inline]
    pub fn raw_decoded(&self) -> &Bytes {
        &self.raw_decoded
    }

    #[inline]
    pub fn address(&self) -> Option<u64> {
        self.address
    }

    #[inline]
    pub fn control(&self) -> Option<u8> {
        self.control
    }

    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.address, self.control) {
            (Some(address), Some(control)) => write!(
                f,
                "[{}] address {address}, control 0x{control:02x}, data: {}",
                self.status,
                hex::encode(&self.data)
            ),
            _ => write!(f, "[{}] raw: {}", self.status, hex::encode(&self.raw_encoded)),
        }
    }
}
