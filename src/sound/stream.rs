//! In-memory audio streams
//!
//! Everything a player consumes is one of these: a byte buffer wrapped as
//! `Read + Seek`, decoded PCM, PCM looped forever, or silence. All of them are
//! backed by memory, so `close` never has anything to release.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;
use std::time::Duration;

use super::formats::PcmFormat;

/// A readable, seekable stream that can be closed.
pub trait ReadSeekClose: Read + Seek {
    fn close(&mut self) -> io::Result<()>;
}

/// Resolve a `SeekFrom` against the current position and stream length.
fn seek_target(pos: u64, len: u64, from: SeekFrom) -> io::Result<u64> {
    let (base, offset) = match from {
        SeekFrom::Start(n) => return Ok(n),
        SeekFrom::Current(n) => (pos, n),
        SeekFrom::End(n) => (len, n),
    };
    base.checked_add_signed(offset).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid seek to a negative or overflowing position",
        )
    })
}

// ============================================================================
// ByteStream
// ============================================================================

/// Raw asset bytes exposed as a stream, handed to the decoders.
#[derive(Debug, Clone)]
pub struct ByteStream {
    inner: Cursor<Arc<[u8]>>,
}

impl ByteStream {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            inner: Cursor::new(data.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for ByteStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl ReadSeekClose for ByteStream {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// PcmStream
// ============================================================================

/// Decoded PCM, read as interleaved little-endian i16 bytes.
///
/// Clones share the sample data and keep their own position.
#[derive(Debug, Clone)]
pub struct PcmStream {
    format: PcmFormat,
    data: Arc<[u8]>,
    pos: u64,
}

impl PcmStream {
    pub fn new(format: PcmFormat, samples: &[i16]) -> Self {
        let data: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::from_bytes(format, data)
    }

    /// Wrap bytes that are already little-endian i16 PCM.
    pub fn from_bytes(format: PcmFormat, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            format,
            data: data.into(),
            pos: 0,
        }
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Length in bytes
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn duration(&self) -> Duration {
        self.format.duration_of(self.len())
    }
}

impl Read for PcmStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.len();
        if self.pos >= len {
            return Ok(0);
        }
        let start = self.pos as usize;
        let n = buf.len().min((len - self.pos) as usize);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for PcmStream {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        self.pos = seek_target(self.pos, self.len(), from)?;
        Ok(self.pos)
    }
}

impl ReadSeekClose for PcmStream {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// LoopStream
// ============================================================================

/// PCM that restarts from the beginning every time it reaches `length` bytes.
///
/// Reads never report end of stream unless the loop is empty. Seek positions
/// wrap modulo the loop length.
#[derive(Debug, Clone)]
pub struct LoopStream {
    inner: PcmStream,
    length: u64,
}

impl LoopStream {
    /// Loop over the whole of `inner`.
    pub fn new(inner: PcmStream) -> Self {
        let length = inner.len();
        Self::with_length(inner, length)
    }

    /// Loop over the first `length` bytes of `inner`, rounded down to a
    /// whole frame.
    pub fn with_length(inner: PcmStream, length: u64) -> Self {
        let frame = inner.format().bytes_per_frame().max(1) as u64;
        let length = length.min(inner.len()) / frame * frame;
        Self { inner, length }
    }

    pub fn format(&self) -> PcmFormat {
        self.inner.format()
    }

    /// Bytes in one pass of the loop
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl Read for LoopStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.length == 0 {
            return Ok(0);
        }
        if self.inner.pos >= self.length {
            self.inner.pos = 0;
        }
        let remaining = (self.length - self.inner.pos) as usize;
        let n = buf.len().min(remaining);
        self.inner.read(&mut buf[..n])
    }
}

impl Seek for LoopStream {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let target = seek_target(self.inner.pos, self.length, from)?;
        self.inner.pos = if self.length == 0 {
            0
        } else {
            target % self.length
        };
        Ok(self.inner.pos)
    }
}

impl ReadSeekClose for LoopStream {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// SilentStream
// ============================================================================

/// Endless silence, substituted for music that failed to decode.
///
/// Reads always fill the whole buffer with zeros; seeks always land on 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentStream {
    format: PcmFormat,
}

impl SilentStream {
    pub fn new(format: PcmFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }
}

impl Read for SilentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        buf.fill(0);
        Ok(buf.len())
    }
}

impl Seek for SilentStream {
    fn seek(&mut self, _from: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

impl ReadSeekClose for SilentStream {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// SoundStream
// ============================================================================

/// Which kind of stream a sound was loaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Looping,
    Pcm,
    Silent,
}

/// A playable stream, as produced by decoder selection.
#[derive(Debug, Clone)]
pub enum SoundStream {
    /// Music, repeating over its full length
    Looping(LoopStream),
    /// One-shot PCM, used for effects
    Pcm(PcmStream),
    /// Placeholder for music that could not be decoded
    Silent(SilentStream),
}

impl SoundStream {
    pub fn kind(&self) -> StreamKind {
        match self {
            SoundStream::Looping(_) => StreamKind::Looping,
            SoundStream::Pcm(_) => StreamKind::Pcm,
            SoundStream::Silent(_) => StreamKind::Silent,
        }
    }

    pub fn format(&self) -> PcmFormat {
        match self {
            SoundStream::Looping(s) => s.format(),
            SoundStream::Pcm(s) => s.format(),
            SoundStream::Silent(s) => s.format(),
        }
    }

    pub fn position(&self) -> u64 {
        match self {
            SoundStream::Looping(s) => s.position(),
            SoundStream::Pcm(s) => s.position(),
            SoundStream::Silent(_) => 0,
        }
    }

    /// Length of a one-shot stream; `None` for streams that never end.
    pub fn total_duration(&self) -> Option<Duration> {
        match self {
            SoundStream::Pcm(s) => Some(s.duration()),
            SoundStream::Looping(s) if s.length() == 0 => Some(Duration::ZERO),
            SoundStream::Looping(_) | SoundStream::Silent(_) => None,
        }
    }

    /// A copy of this stream positioned at its start.
    pub fn rewound(&self) -> SoundStream {
        let mut stream = self.clone();
        match &mut stream {
            SoundStream::Looping(s) => s.inner.pos = 0,
            SoundStream::Pcm(s) => s.pos = 0,
            SoundStream::Silent(_) => {}
        }
        stream
    }
}

impl Read for SoundStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SoundStream::Looping(s) => s.read(buf),
            SoundStream::Pcm(s) => s.read(buf),
            SoundStream::Silent(s) => s.read(buf),
        }
    }
}

impl Seek for SoundStream {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        match self {
            SoundStream::Looping(s) => s.seek(from),
            SoundStream::Pcm(s) => s.seek(from),
            SoundStream::Silent(s) => s.seek(from),
        }
    }
}

impl ReadSeekClose for SoundStream {
    fn close(&mut self) -> io::Result<()> {
        match self {
            SoundStream::Looping(s) => s.close(),
            SoundStream::Pcm(s) => s.close(),
            SoundStream::Silent(s) => s.close(),
        }
    }
}
