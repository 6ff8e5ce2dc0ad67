//! Frame check sequence: standard CRC-32 (the zlib/PKZIP variant), stored little-endian.

use crc::{
    Crc,
    CRC_32_ISO_HDLC,
};

use crate::protocol::FCS_LEN;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

#[inline]
pub fn fcs(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

#[inline]
pub fn frame_check_sequence(data: &[u8]) -> [u8; FCS_LEN] {
    fcs(data).to_le_bytes()
}

/// Split `decoded` into its body and trailing FCS and check that they agree.
///
/// Returns `false` if `decoded` is too short to carry an FCS at all.
pub(crate) fn verify(decoded: &[u8]) -> bool {
    let Some(split) = decoded.len().checked_sub(FCS_LEN) else {
        return false;
    };

    let (body, expected) = decoded.split_at(split);
    frame_check_sequence(body) == expected
}
