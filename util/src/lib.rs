//! Byte-buffer helpers shared by the codec and the command-line tool.

use bytes::{
    BufMut,
    BytesMut,
};

pub mod build;
mod macros;

/// Concatenate `parts` into a single buffer, allocating once.
pub fn concat<I, T>(parts: I) -> BytesMut
where
    I: IntoIterator<Item = T>,
    I::IntoIter: Clone,
    T: AsRef<[u8]>,
{
    let parts = parts.into_iter();
    let len = parts.clone().map(|p| p.as_ref().len()).sum();

    let mut out = BytesMut::with_capacity(len);
    for part in parts {
        out.extend_from_slice(part.as_ref());
    }

    out
}

/// Copy `src` into `dst`, replacing every byte that has an entry in `table` with its
/// substitution.
///
/// This is a single pass over `src`: substituted output is never scanned again, so a
/// replacement may itself contain bytes that appear as keys in `table`.
pub fn substitute<B>(src: &[u8], dst: &mut B, table: &[(u8, &[u8])])
where
    B: BufMut,
{
    for &b in src {
        match table.iter().find(|(from, _)| *from == b) {
            Some((_, to)) => dst.put_slice(to),
            None => dst.put_u8(b),
        }
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn concat_empty() {
        let parts: [&[u8]; 0] = [];
        assert!(concat(parts).is_empty());
    }

    #[test]
    fn concat_parts() {
        let parts: [&[u8]; 3] = [&[1, 2], &[], &[3]];
        let out = concat(parts);
        assert_eq!(&out[..], &[1, 2, 3]);
    }

    #[test]
    fn substitute_does_not_rescan() {
        let table: [(u8, &[u8]); 2] = [(0x7d, &[0x7d, 0x5d]), (0x7e, &[0x7d, 0x5e])];

        let mut out = BytesMut::new();
        substitute(&[0x7d, 0x7e, 0x01], &mut out, &table);

        assert_eq!(&out[..], &[0x7d, 0x5d, 0x7d, 0x5e, 0x01]);
    }

    #[test]
    fn substitute_into_vec() {
        let mut out = vec![0xff];
        substitute(b"abc", &mut out, &[(b'b', &[][..])]);

        assert_eq!(out, vec![0xff, b'a', b'c']);
    }

    proptest! {
        #[test]
        fn substitute_identity(src in any::<Vec<u8>>()) {
            let mut out = BytesMut::new();
            substitute(&src, &mut out, &[]);

            prop_assert_eq!(&out[..], &src[..]);
        }

        #[test]
        fn concat_matches_flatten(parts in any::<Vec<Vec<u8>>>()) {
            let expect = parts.iter().flatten().copied().collect::<Vec<u8>>();

            prop_assert_eq!(&concat(&parts)[..], &expect[..]);
        }
    }
}
