//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use ino_audio::resource::MemoryAssets;
use ino_audio::sound::{
    AudioEngine, NullEngine, NullPlayer, Player, PlayerError, PlayerResult, SoundFormat,
    SoundName, SoundStream, StreamKind,
};

/// Build a 16-bit mono PCM WAV file in memory.
pub fn wav_bytes(samples: &[i16]) -> Vec<u8> {
    let channels: u16 = 1;
    let sample_rate: u32 = 22050;
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Bytes for `name`: a short valid WAV for effects, garbage for music.
pub fn asset_bytes(name: SoundName) -> Vec<u8> {
    match name.format() {
        SoundFormat::Wav => wav_bytes(&[100; 256]),
        SoundFormat::Vorbis => b"this is not an ogg file".to_vec(),
    }
}

/// Every sound present; music is corrupt and will load as silence.
pub fn all_assets() -> MemoryAssets {
    let mut assets = MemoryAssets::new();
    for name in SoundName::ALL {
        assets.insert(name.asset_path(), asset_bytes(name));
    }
    assets
}

/// Operations a `FlakyPlayer` can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Play,
    Pause,
    Rewind,
    Close,
}

type FailSet = Arc<Mutex<HashSet<(u32, Op)>>>;

/// Null engine whose players fail chosen operations.
///
/// Player ids follow load order, so `SoundName::index()` is the id.
#[derive(Default)]
pub struct FlakyEngine {
    inner: NullEngine,
    failures: FailSet,
    fail_create_at: Option<usize>,
    created: Mutex<usize>,
}

impl FlakyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail creating the player for `name`.
    pub fn failing_create(name: SoundName) -> Self {
        Self {
            fail_create_at: Some(name.index()),
            ..Self::default()
        }
    }

    pub fn fail(&self, name: SoundName, op: Op) {
        self.failures.lock().insert((name.index() as u32, op));
    }

    pub fn log(&self) -> ino_audio::sound::EventLog {
        self.inner.log()
    }
}

impl AudioEngine for FlakyEngine {
    type Player = FlakyPlayer;

    fn name(&self) -> &'static str {
        "Flaky"
    }

    fn new_player(&self, stream: SoundStream) -> PlayerResult<FlakyPlayer> {
        let mut created = self.created.lock();
        if self.fail_create_at == Some(*created) {
            return Err(PlayerError::Device("no free voices".to_string()));
        }
        *created += 1;
        Ok(FlakyPlayer {
            inner: self.inner.new_player(stream)?,
            failures: self.failures.clone(),
        })
    }
}

pub struct FlakyPlayer {
    pub inner: NullPlayer,
    failures: FailSet,
}

impl FlakyPlayer {
    fn check(&self, op: Op) -> PlayerResult<()> {
        if self.failures.lock().contains(&(self.inner.id(), op)) {
            Err(PlayerError::Device(format!("{:?} failed on player {}", op, self.inner.id())))
        } else {
            Ok(())
        }
    }

    pub fn stream_kind(&self) -> StreamKind {
        self.inner.stream_kind()
    }
}

impl Player for FlakyPlayer {
    fn play(&mut self) -> PlayerResult<()> {
        self.check(Op::Play)?;
        self.inner.play()
    }

    fn pause(&mut self) -> PlayerResult<()> {
        self.check(Op::Pause)?;
        self.inner.pause()
    }

    fn rewind(&mut self) -> PlayerResult<()> {
        self.check(Op::Rewind)?;
        self.inner.rewind()
    }

    fn set_volume(&mut self, volume: f64) {
        self.inner.set_volume(volume)
    }

    fn volume(&self) -> f64 {
        self.inner.volume()
    }

    fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    fn close(&mut self) -> PlayerResult<()> {
        self.check(Op::Close)?;
        self.inner.close()
    }
}
