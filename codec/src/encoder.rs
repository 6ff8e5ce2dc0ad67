use bytes::{
    BufMut,
    Bytes,
    BytesMut,
};

use crate::{
    address::encode_address,
    fcs::frame_check_sequence,
    protocol::{
        escape,
        ESCAPE,
        FCS_LEN,
        FLAG,
        UI_FRAME_CONTROL,
    },
};

const ESCAPES: [(u8, &[u8]); 2] = [
    (ESCAPE, &[ESCAPE, escape(ESCAPE)]),
    (FLAG, &[ESCAPE, escape(FLAG)]),
];

/// Encode a complete UI frame, including both delimiting flags.
pub fn build_frame(address: u64, payload: impl AsRef<[u8]>) -> Bytes {
    let mut out = BytesMut::new();
    write_frame(address, payload, &mut out);

    out.freeze()
}

/// Append an encoded UI frame to `dst`.
#[tracing::instrument(level = "trace", skip(payload, dst))]
pub fn write_frame(address: u64, payload: impl AsRef<[u8]>, dst: &mut BytesMut) {
    let payload = payload.as_ref();
    let address = encode_address(address);

    let mut unescaped = util::concat([&address[..], &[UI_FRAME_CONTROL][..], payload]);
    let fcs = frame_check_sequence(&unescaped);
    unescaped.extend_from_slice(&fcs);

    // worst case every byte is escaped
    dst.reserve(2 * (address.len() + 1 + payload.len() + FCS_LEN) + 2);

    dst.put_u8(FLAG);
    util::substitute(&unescaped, dst, &ESCAPES);
    dst.put_u8(FLAG);
}
