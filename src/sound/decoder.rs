//! Decoder selection
//!
//! Turns raw asset bytes into a playable `SoundStream`. Music (Ogg Vorbis) is
//! decoded with `lewton` and looped forever; a track that fails to decode is
//! replaced with silence so one bad file cannot keep the game from starting.
//! Effects (WAV) are decoded with rodio's WAV decoder and must succeed.

use std::io::{Read, Seek};
use std::sync::Arc;

use lewton::inside_ogg::OggStreamReader;
use rodio::Source;

use super::formats::{PcmFormat, SoundFormat};
use super::stream::{ByteStream, LoopStream, PcmStream, SilentStream, SoundStream};

/// Error type for decoder operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Ogg Vorbis decode failed: {0}")]
    Vorbis(String),

    #[error("WAV decode failed: {0}")]
    Wav(String),
}

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decode `data` as the container format implied by `filename`.
///
/// # Panics
/// If `filename` has neither an `.ogg` nor a `.wav` suffix. The asset list is
/// fixed at compile time, so this only happens on a programming error.
pub fn decode_file(filename: &str, data: impl Into<Arc<[u8]>>) -> DecodeResult<SoundStream> {
    let format = SoundFormat::from_filename(filename)
        .unwrap_or_else(|| panic!("invalid sound file name: {}", filename));
    decode(format, data)
}

/// Decode `data` as `format`.
///
/// Vorbis failures never surface as errors; they produce
/// `SoundStream::Silent`. WAV failures are returned to the caller.
pub fn decode(format: SoundFormat, data: impl Into<Arc<[u8]>>) -> DecodeResult<SoundStream> {
    let bytes = ByteStream::new(data);
    match format {
        SoundFormat::Vorbis => match decode_vorbis(bytes) {
            Ok(pcm) => {
                log::debug!(
                    "Decoded Ogg Vorbis: {} Hz, {} ch, {:.2}s",
                    pcm.format().sample_rate,
                    pcm.format().channels,
                    pcm.duration().as_secs_f32()
                );
                Ok(SoundStream::Looping(LoopStream::new(pcm)))
            }
            Err(e) => {
                log::warn!("{}; substituting silence", e);
                Ok(SoundStream::Silent(SilentStream::default()))
            }
        },
        SoundFormat::Wav => decode_wav(bytes).map(SoundStream::Pcm),
    }
}

/// Decode a complete Ogg Vorbis stream into PCM.
pub fn decode_vorbis<R: Read + Seek>(reader: R) -> DecodeResult<PcmStream> {
    let mut ogg = OggStreamReader::new(reader)
        .map_err(|e| DecodeError::Vorbis(format!("failed to open Ogg stream: {:?}", e)))?;

    let format = PcmFormat::new(
        u16::from(ogg.ident_hdr.audio_channels),
        ogg.ident_hdr.audio_sample_rate,
    );

    let mut samples = Vec::new();
    while let Some(packet) = ogg
        .read_dec_packet_itl()
        .map_err(|e| DecodeError::Vorbis(format!("packet error: {:?}", e)))?
    {
        samples.extend_from_slice(&packet);
    }

    Ok(PcmStream::new(format, &samples))
}

/// Decode a complete WAV file into PCM.
pub fn decode_wav<R>(reader: R) -> DecodeResult<PcmStream>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let decoder = rodio::Decoder::new_wav(reader).map_err(|e| DecodeError::Wav(e.to_string()))?;

    let format = PcmFormat::new(decoder.channels(), decoder.sample_rate());
    if format.channels == 0 || format.sample_rate == 0 {
        return Err(DecodeError::Wav(format!(
            "unsupported layout: {} ch at {} Hz",
            format.channels, format.sample_rate
        )));
    }

    let samples: Vec<i16> = decoder.collect();
    Ok(PcmStream::new(format, &samples))
}
