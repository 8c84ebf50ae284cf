//! Container and sample format definitions

use std::time::Duration;

/// Container format of a sound asset, selected by filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundFormat {
    /// Ogg Vorbis (`.ogg`), used for music
    Vorbis,
    /// RIFF WAVE (`.wav`), used for effects
    Wav,
}

impl SoundFormat {
    /// Select a format from a filename suffix.
    ///
    /// Returns `None` for anything other than `.ogg` and `.wav`.
    pub fn from_filename(filename: &str) -> Option<SoundFormat> {
        if filename.ends_with(".ogg") {
            Some(SoundFormat::Vorbis)
        } else if filename.ends_with(".wav") {
            Some(SoundFormat::Wav)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SoundFormat::Vorbis => "ogg",
            SoundFormat::Wav => "wav",
        }
    }
}

/// Bytes in one i16 sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Layout of decoded PCM data: interleaved little-endian i16 samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

impl PcmFormat {
    /// Output rate of the game's audio context.
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    /// Bytes per sample frame (one sample for every channel)
    pub fn bytes_per_frame(&self) -> usize {
        self.channels as usize * BYTES_PER_SAMPLE
    }

    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Play time of `len` bytes of PCM in this format.
    pub fn duration_of(&self, len: u64) -> Duration {
        let frame = self.bytes_per_frame() as u64;
        if frame == 0 || self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64((len / frame) as f64 / self.sample_rate as f64)
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::new(2, Self::DEFAULT_SAMPLE_RATE)
    }
}
