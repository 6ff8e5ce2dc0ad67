use bytes::{
    BufMut,
    BytesMut,
};

use crate::{
    fcs,
    protocol::{
        escape,
        is_valid_escaped,
        ESCAPE,
        FLAG,
        MIN_FRAME_LEN,
    },
    Frame,
    FrameStatus,
};

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, derive_more::Display)]
pub enum State {
    Interframe,
    Frame,
    FrameEscape,
}

/// What a decoder does with its buffers after a transition.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond recording the raw byte.
    Idle,

    /// Append an unescaped byte to the frame.
    Push(u8),

    /// A flag closed the current frame: validate and emit it, if any.
    Close,

    /// A flag interrupted a malformed frame: emit a framing error.
    Abort,

    /// A flag arrived between frames: emit a framing error if noise preceded it.
    Flush,
}

impl State {
    /// The transition taken on `byte`.
    pub fn step(self, byte: u8) -> (State, Action) {
        match (self, byte) {
            (State::Interframe, FLAG) => (State::Frame, Action::Flush),
            (State::Interframe, _) => (State::Interframe, Action::Idle),

            (State::Frame, FLAG) => (State::Frame, Action::Close),
            (State::Frame, ESCAPE) => (State::FrameEscape, Action::Idle),
            (State::Frame, b) => (State::Frame, Action::Push(b)),

            (State::FrameEscape, FLAG) => (State::Frame, Action::Abort),
            (State::FrameEscape, b) if is_valid_escaped(b) => {
                (State::Frame, Action::Push(escape(b)))
            },

            // the partial frame is kept and reported at the next flag
            (State::FrameEscape, _) => (State::Interframe, Action::Idle),
        }
    }
}

/// Streaming HDLC frame decoder.
///
/// Bytes may be delivered in chunks of any size; state carries over between calls. A
/// partially received frame is discarded when the decoder is dropped.
#[derive(Debug)]
pub struct FrameDecoder {
    state:        State,
    decoded_data: BytesMut,
    raw_data:     BytesMut,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self {
            state:        State::Interframe,
            decoded_data: BytesMut::new(),
            raw_data:     BytesMut::new(),
        }
    }
}

impl FrameDecoder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Wire bytes held for the frame in progress.
    #[inline]
    pub fn pending(&self) -> usize {
        self.raw_data.len()
    }

    /// Feed a single byte, returning a frame if this byte completed one.
    pub fn push_byte(&mut self, byte: u8) -> Option<Frame> {
        if byte != FLAG {
            self.raw_data.put_u8(byte);
        }

        let (next, action) = self.state.step(byte);
        self.state = next;

        let frame = match action {
            Action::Idle => None,
            Action::Push(b) => {
                self.decoded_data.put_u8(b);
                None
            },
            Action::Close if self.decoded_data.is_empty() => {
                self.reset();
                None
            },
            Action::Close => {
                let status = check_frame(&self.decoded_data);
                Some(self.finish(status))
            },
            Action::Abort => Some(self.finish(FrameStatus::FramingError)),
            Action::Flush if self.raw_data.is_empty() => None,
            Action::Flush => Some(self.finish(FrameStatus::FramingError)),
        };

        if let Some(ref frame) = frame {
            tracing::trace!(%frame, "decoded frame");
        }

        frame
    }

    /// Decode every frame completed by `data`.
    ///
    /// Frames are produced lazily; bytes after the last yielded frame are only consumed if
    /// the iterator is driven to completion.
    pub fn process<'a>(&'a mut self, data: &'a [u8]) -> impl Iterator<Item = Frame> + 'a {
        data.iter().filter_map(move |&b| self.push_byte(b))
    }

    /// As [`FrameDecoder::process`], but only yields valid frames. Discarded frames are
    /// logged.
    pub fn process_valid_frames<'a>(
        &'a mut self,
        data: &'a [u8],
    ) -> impl Iterator<Item = Frame> + 'a {
        self.process(data).filter(report_invalid)
    }

    fn finish(&mut self, status: FrameStatus) -> Frame {
        let raw_encoded = self.raw_data.split().freeze();
        let raw_decoded = self.decoded_data.split().freeze();

        Frame::new(raw_encoded, raw_decoded, status)
    }

    fn reset(&mut self) {
        self.raw_data.clear();
        self.decoded_data.clear();
    }
}

fn check_frame(decoded: &[u8]) -> FrameStatus {
    if decoded.len() < MIN_FRAME_LEN {
        return FrameStatus::FramingError;
    }

    if !fcs::verify(decoded) {
        return FrameStatus::FcsMismatch;
    }

    FrameStatus::Ok
}

/// Log `frame` if it is invalid; returns whether it should be kept.
pub(crate) fn report_invalid(frame: &Frame) -> bool {
    if frame.is_valid() {
        return true;
    }

    tracing::warn!(
        status = %frame.status(),
        discarded = frame.raw_encoded().len(),
        "failed to decode frame"
    );
    tracing::debug!(raw = %hex::encode(frame.raw_encoded()), "discarded frame bytes");

    false
}
