use bytes::{
    Buf,
    BytesMut,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::{
    decoder::report_invalid,
    encoder::write_frame,
    Frame,
    FrameDecoder,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Frames a byte stream as HDLC UI frames.
///
/// Decoding never fails: malformed input is reported through [`Frame::status`]. The only
/// errors come from the underlying transport.
#[derive(Debug, Default)]
pub struct HdlcCodec {
    decoder:    FrameDecoder,
    valid_only: bool,
}

impl HdlcCodec {
    /// A codec yielding every recognized frame, valid or not.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec yielding only valid frames. Invalid frames are logged and dropped.
    #[inline]
    pub fn valid_only() -> Self {
        Self {
            decoder:    FrameDecoder::new(),
            valid_only: true,
        }
    }

    #[inline]
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }
}

impl Decoder for HdlcCodec {
    type Error = Error;
    type Item = Frame;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut consumed = 0;
        let mut result = None;

        for &b in src.iter() {
            consumed += 1;

            match self.decoder.push_byte(b) {
                Some(frame) if !self.valid_only || report_invalid(&frame) => {
                    result = Some(frame);
                    break;
                },
                _ => {},
            }
        }

        src.advance(consumed);
        Ok(result)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let result @ Some(_) = self.decode(buf)? {
            return Ok(result);
        }

        let pending = self.decoder.pending();
        if pending != 0 {
            tracing::debug!(pending, "stream ended inside a frame, discarding");
            self.decoder = FrameDecoder::new();
        }

        Ok(None)
    }
}

impl<T> Encoder<(u64, T)> for HdlcCodec
where
    T: AsRef<[u8]>,
{
    type Error = Error;

    fn encode(
        &mut self,
        (address, payload): (u64, T),
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        write_frame(address, payload, dst);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use futures::prelude::*;
    use itertools::Itertools;
    use tokio_util::codec::{
        FramedRead,
        FramedWrite,
    };

    use super::*;
    use crate::{
        build_frame,
        FrameStatus,
    };

    async fn read_all(codec: HdlcCodec, src: &[u8]) -> eyre::Result<Vec<Frame>> {
        let frames = FramedRead::new(src, codec).try_collect::<Vec<_>>().await?;

        Ok(frames)
    }

    fn stream() -> Vec<u8> {
        let mut data = vec![0x55, 0x66];
        data.extend_from_slice(&build_frame(1, b"first"));
        data.extend_from_slice(&[0x01, 0x03, crate::protocol::FLAG]);
        data.extend_from_slice(&build_frame(300, b"second")[1..]);

        data
    }

    #[tokio::test]
    async fn test_read_all_frames() -> eyre::Result<()> {
        let frames = read_all(HdlcCodec::new(), &stream()).await?;

        assert_eq!(frames.iter().map(Frame::status).collect_vec(), vec![
            FrameStatus::FramingError,
            FrameStatus::Ok,
            FrameStatus::FramingError,
            FrameStatus::Ok,
        ]);
        assert_eq!(frames[3].address(), Some(300));

        Ok(())
    }

    #[tokio::test]
    async fn test_read_valid_only() -> eyre::Result<()> {
        let frames = read_all(HdlcCodec::valid_only(), &stream()).await?;

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0].data()[..], b"first");
        assert_eq!(&frames[1].data()[..], b"second");

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_frame_at_eof() -> eyre::Result<()> {
        let encoded = build_frame(4, b"cut short");
        let mut data = build_frame(2, b"whole").to_vec();
        data.extend_from_slice(&encoded[1..encoded.len() - 3]);

        let frames = read_all(HdlcCodec::new(), &data).await?;

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0].data()[..], b"whole");

        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_read() -> eyre::Result<()> {
        let mut out = vec![];

        {
            let mut sink = FramedWrite::new(&mut out, HdlcCodec::new());
            sink.send((0u64, vec![0x7du8, 0x7e])).await?;
            sink.send((u64::MAX, Vec::<u8>::new())).await?;
        }

        let frames = read_all(HdlcCodec::new(), &out).await?;

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].address(), Some(0));
        assert_eq!(&frames[0].data()[..], &[0x7d, 0x7e]);
        assert_eq!(frames[1].address(), Some(u64::MAX));
        assert!(frames[1].data().is_empty());

        Ok(())
    }

    #[test]
    fn test_decode_consumes_up_to_frame() -> eyre::Result<()> {
        let mut codec = HdlcCodec::new();

        let mut src = BytesMut::from(&build_frame(1, b"a")[..]);
        let tail = build_frame(2, b"b");
        src.extend_from_slice(&tail);

        let first = codec.decode(&mut src)?.ok_or_else(|| eyre::eyre!("no frame"))?;
        assert_eq!(first.address(), Some(1));
        assert_eq!(&src[..], &tail[..]);

        let second = codec.decode(&mut src)?.ok_or_else(|| eyre::eyre!("no frame"))?;
        assert_eq!(second.address(), Some(2));
        assert!(src.is_empty());

        assert!(codec.decode(&mut src)?.is_none());

        Ok(())
    }

    #[test]
    fn test_eof_discards_pending() -> eyre::Result<()> {
        let mut codec = HdlcCodec::new();

        let encoded = build_frame(4, b"cut short");
        let mut src = BytesMut::from(&encoded[..encoded.len() - 1]);

        assert!(codec.decode(&mut src)?.is_none());
        assert!(src.is_empty());
        assert_eq!(codec.decoder().pending(), encoded.len() - 2);
        assert_eq!(codec.decoder().state(), crate::decoder::State::Frame);

        assert!(codec.decode_eof(&mut src)?.is_none());
        assert_eq!(codec.decoder().pending(), 0);
        assert_eq!(codec.decoder().state(), crate::decoder::State::Interframe);

        Ok(())
    }
}
