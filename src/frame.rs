//! Splitting of outgoing frames into bus-sized writes.
//!
//! The device expects every frame to be preceded by [`WRITE_MARKER`]. Some
//! controllers cannot write more than [`CHUNK_SIZE`] bytes in one go, so the
//! marked frame is cut into chunks of at most that size. Chunks are assembled
//! on the stack; no allocator is needed.

use crate::consts::{CHUNK_SIZE, WRITE_MARKER};

/// One bus write worth of bytes.
pub type Chunk = heapless::Vec<u8, CHUNK_SIZE>;

/// Iterator over the chunks of `[WRITE_MARKER] ++ frame`, in bus order.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    frame: &'a [u8],
    // position in the marked frame, marker included
    offset: usize,
}

/// Chunks of `frame` once prefixed with the write marker.
///
/// An empty frame still produces one chunk holding the marker alone.
pub fn chunks(frame: &[u8]) -> Chunks<'_> {
    Chunks { frame, offset: 0 }
}

impl Chunks<'_> {
    fn marked_len(&self) -> usize {
        self.frame.len() + 1
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let total = self.marked_len();
        if self.offset >= total {
            return None;
        }
        let end = total.min(self.offset + CHUNK_SIZE);

        let mut chunk = Chunk::new();
        if self.offset == 0 {
            chunk.extend(core::iter::once(WRITE_MARKER));
            chunk.extend(self.frame[..end - 1].iter().copied());
        } else {
            chunk.extend(self.frame[self.offset - 1..end - 1].iter().copied());
        }
        self.offset = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.marked_len().saturating_sub(self.offset);
        let n = remaining.div_ceil(CHUNK_SIZE);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl core::iter::FusedIterator for Chunks<'_> {}
