//! Variable-length frame addresses.
//!
//! Addresses are written least-significant group first, seven value bits per byte, stored
//! in the upper seven bits. Bit 0 is set only on the final byte.

use smallvec::SmallVec;

/// Bytes needed to encode [`u64::MAX`].
pub const MAX_ADDRESS_LEN: usize = 10;

pub type EncodedAddress = SmallVec<[u8; MAX_ADDRESS_LEN]>;

const TERMINATOR: u8 = 0x01;
const GROUP_BITS: u32 = 7;
const GROUP_MASK: u64 = 0x7f;

/// Encode `address`. At least one byte is always produced.
pub fn encode_address(mut address: u64) -> EncodedAddress {
    let mut out = EncodedAddress::new();

    loop {
        out.push(((address & GROUP_MASK) as u8) << 1);
        address >>= GROUP_BITS;

        if address == 0 {
            break;
        }
    }

    if let Some(last) = out.last_mut() {
        *last |= TERMINATOR;
    }

    out
}

/// Decode an address from the front of `src`, returning its value and encoded length.
///
/// Returns `None` if `src` ends before a terminated byte or if the value does not fit in
/// 64 bits.
pub fn decode_address(src: &[u8]) -> Option<(u64, usize)> {
    let mut result = 0u64;

    for (i, &b) in src.iter().enumerate() {
        let bits = u64::from(b >> 1);
        let shift = i as u64 * u64::from(GROUP_BITS);

        if bits != 0 {
            if shift >= u64::from(u64::BITS) || u64::from(bits.leading_zeros()) < shift {
                return None;
            }

            result |= bits << shift;
        }

        if b & TERMINATOR != 0 {
            return Some((result, i + 1));
        }
    }

    None
}
