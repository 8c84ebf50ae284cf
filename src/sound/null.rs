//! Null (headless) engine
//!
//! Players that track play state, volume and stream position without ever
//! touching an audio device. Used with `--sound none`, on machines without an
//! output device, and by the tests. Every call is appended to a shared
//! `EventLog` so callers can check the exact order of engine commands.

use std::io::{Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::engine::{clamp_volume, AudioEngine, Player, PlayerError, PlayerResult};
use super::stream::{ReadSeekClose, SoundStream, StreamKind};

/// One command received by a null player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Created(u32, StreamKind),
    Play(u32),
    Pause(u32),
    Rewind(u32),
    SetVolume(u32, f64),
    Close(u32),
}

/// Shared, append-only record of player commands.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<PlayerEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: PlayerEvent) {
        self.events.lock().push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Engine producing `NullPlayer`s.
#[derive(Debug, Default)]
pub struct NullEngine {
    log: EventLog,
    next_id: AtomicU32,
}

impl NullEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event log shared by every player this engine creates
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl AudioEngine for NullEngine {
    type Player = NullPlayer;

    fn name(&self) -> &'static str {
        "Null"
    }

    fn new_player(&self, stream: SoundStream) -> PlayerResult<NullPlayer> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.log.push(PlayerEvent::Created(id, stream.kind()));
        Ok(NullPlayer {
            id,
            stream,
            playing: false,
            volume: 1.0,
            closed: false,
            log: self.log.clone(),
        })
    }
}

/// Player that consumes its stream only when told to via `advance`.
#[derive(Debug)]
pub struct NullPlayer {
    id: u32,
    stream: SoundStream,
    playing: bool,
    volume: f64,
    closed: bool,
    log: EventLog,
}

impl NullPlayer {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn stream_kind(&self) -> StreamKind {
        self.stream.kind()
    }

    /// Current byte offset into the stream
    pub fn position(&self) -> u64 {
        self.stream.position()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Simulate output pulling up to `bytes` bytes from the stream.
    ///
    /// Does nothing while paused. A one-shot stream that runs dry stops
    /// playing. Returns the number of bytes consumed.
    pub fn advance(&mut self, bytes: usize) -> usize {
        if !self.is_playing() {
            return 0;
        }
        let mut scratch = [0u8; 512];
        let mut consumed = 0;
        while consumed < bytes {
            let want = (bytes - consumed).min(scratch.len());
            match self.stream.read(&mut scratch[..want]) {
                Ok(0) | Err(_) => {
                    self.playing = false;
                    break;
                }
                Ok(n) => consumed += n,
            }
        }
        consumed
    }

    fn check_open(&self) -> PlayerResult<()> {
        if self.closed {
            Err(PlayerError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Player for NullPlayer {
    fn play(&mut self) -> PlayerResult<()> {
        self.check_open()?;
        self.log.push(PlayerEvent::Play(self.id));
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> PlayerResult<()> {
        self.check_open()?;
        self.log.push(PlayerEvent::Pause(self.id));
        self.playing = false;
        Ok(())
    }

    fn rewind(&mut self) -> PlayerResult<()> {
        self.check_open()?;
        self.log.push(PlayerEvent::Rewind(self.id));
        self.stream.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_volume(volume);
        self.log.push(PlayerEvent::SetVolume(self.id, self.volume));
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn is_playing(&self) -> bool {
        self.playing && !self.closed
    }

    fn close(&mut self) -> PlayerResult<()> {
        self.check_open()?;
        self.log.push(PlayerEvent::Close(self.id));
        self.closed = true;
        self.playing = false;
        self.stream.close()?;
        Ok(())
    }
}
