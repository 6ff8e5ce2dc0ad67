//! Wire constants for HDLC UI framing.

/// Frame delimiter.
pub const FLAG: u8 = 0x7e;

/// Introduces an escaped byte.
pub const ESCAPE: u8 = 0x7d;

/// XOR mask applied to escaped bytes.
pub const ESCAPE_CONSTANT: u8 = 0x20;

/// The only values that may follow [`ESCAPE`]: escaped [`ESCAPE`] and [`FLAG`].
pub const VALID_ESCAPED_BYTES: [u8; 2] = [escape(ESCAPE), escape(FLAG)];

/// Control byte of an unnumbered-information frame.
pub const UI_FRAME_CONTROL: u8 = 0x03;

/// Length of the trailing frame check sequence.
pub const FCS_LEN: usize = 4;

/// One address byte, the control byte and the FCS.
pub const MIN_FRAME_LEN: usize = 1 + 1 + FCS_LEN;

/// Escape or unescape a single byte. The operation is its own inverse.
#[inline]
pub const fn escape(byte: u8) -> u8 {
    byte ^ ESCAPE_CONSTANT
}

#[inline]
pub(crate) fn is_valid_escaped(byte: u8) -> bool {
    VALID_ESCAPED_BYTES.contains(&byte)
}
