//! Metadata frame assembly
//!
//! An ICY stream interleaves `metaint` bytes of audio, one length byte, then
//! `length * 16` bytes of metadata text. The assembler accumulates raw bytes
//! from any transport and slices out the metadata frame once the prefix is
//! long enough to be decidable.

use tracing::warn;

use crate::config::meta::{META_LENGTH_UNIT, META_MAX_LENGTH};
use crate::error::{Result, TitleError};

/// Outcome of feeding bytes to the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendStatus {
    /// More bytes are needed before the frame can be decoded
    NeedMoreData,
    /// The frame has been decoded; see [`FrameAssembler::frame`]
    FrameReady,
}

/// Accumulates stream bytes until the metadata frame can be sliced out.
///
/// One assembler decodes one frame. After [`AppendStatus::FrameReady`],
/// further appends are ignored; call [`FrameAssembler::reset`] to decode
/// the next frame.
pub struct FrameAssembler {
    offset: usize,
    meta_max_length: usize,
    buffer: Vec<u8>,
    frame: Option<Vec<u8>>,
}

impl FrameAssembler {
    /// Create an assembler for a stream with the given byte stride.
    ///
    /// Fails when `offset` is zero or `meta_max_length` falls outside
    /// `1..=4080` (one length byte in units of 16 cannot declare more).
    pub fn new(offset: usize, meta_max_length: usize) -> Result<Self> {
        if offset == 0 {
            return Err(TitleError::InvalidArgument(
                "offset must be greater than 0".to_string(),
            ));
        }
        if meta_max_length == 0 || meta_max_length > META_MAX_LENGTH {
            return Err(TitleError::InvalidArgument(format!(
                "meta_max_length must be between 1 and {META_MAX_LENGTH}"
            )));
        }
        Ok(Self {
            offset,
            meta_max_length,
            buffer: Vec::new(),
            frame: None,
        })
    }

    /// Total bytes required before the frame is decidable
    pub fn required_len(&self) -> usize {
        self.offset + self.meta_max_length
    }

    /// Bytes accumulated so far
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Append a chunk of stream bytes.
    ///
    /// Accumulation is capped at exactly `offset + meta_max_length` bytes;
    /// anything past that in `chunk` is ignored, which keeps the decoded
    /// frame independent of how the byte sequence was split into chunks.
    ///
    /// Once the cap is reached, the byte at index `offset` is read as the
    /// declared length (in units of 16 bytes) and the frame is sliced
    /// starting at `offset + 1` — the length byte itself is not part of the
    /// frame. A declared length of zero yields an empty frame (no title
    /// change announced). A declared length running past the accumulated
    /// prefix is clamped to what is available; this can only happen when the
    /// declaration reaches the configured maximum.
    pub fn append(&mut self, chunk: &[u8]) -> AppendStatus {
        if self.frame.is_some() {
            return AppendStatus::FrameReady;
        }

        let wanted = self.required_len() - self.buffer.len();
        self.buffer.extend_from_slice(&chunk[..chunk.len().min(wanted)]);
        if self.buffer.len() < self.required_len() {
            return AppendStatus::NeedMoreData;
        }

        let declared = self.buffer[self.offset] as usize * META_LENGTH_UNIT;
        if declared == 0 {
            self.frame = Some(Vec::new());
            return AppendStatus::FrameReady;
        }

        let start = self.offset + 1;
        let end = (start + declared).min(self.buffer.len());
        if end < start + declared {
            warn!(
                declared,
                available = end - start,
                "metadata block clamped to buffered bytes"
            );
        }
        self.frame = Some(self.buffer[start..end].to_vec());
        AppendStatus::FrameReady
    }

    /// The last assembled frame, if any. An empty slice is a decoded empty
    /// metadata block, not an absence.
    pub fn frame(&self) -> Option<&[u8]> {
        self.frame.as_deref()
    }

    /// Discard accumulated state so the assembler can decode another frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.frame = None;
    }
}
