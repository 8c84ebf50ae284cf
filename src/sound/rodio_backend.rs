//! Rodio-based audio engine
//!
//! rodio's `OutputStream` is not `Send`, so the device lives on a dedicated
//! audio thread. Players are lightweight handles (an id plus a command
//! sender); every command that can fail waits for the thread's reply.
//!
//! Each player owns one `Sink`. Rewinding replaces the sink with a fresh one
//! fed from the start of the player's stream, keeping volume and pause state.

use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::engine::{clamp_volume, AudioEngine, Player, PlayerError, PlayerResult};
use super::formats::PcmFormat;
use super::stream::SoundStream;

// =============================================================================
// Source adapter
// =============================================================================

/// Feeds a `SoundStream` to rodio one i16 sample at a time.
pub struct StreamSource {
    stream: SoundStream,
    format: PcmFormat,
}

impl StreamSource {
    pub fn new(stream: SoundStream) -> Self {
        let format = stream.format();
        Self { stream, format }
    }
}

impl Iterator for StreamSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        let mut sample = [0u8; 2];
        self.stream.read_exact(&mut sample).ok()?;
        Some(i16::from_le_bytes(sample))
    }
}

impl Source for StreamSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.format.channels
    }

    fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        self.stream.total_duration()
    }
}

// =============================================================================
// Audio thread
// =============================================================================

type Reply<T> = Sender<PlayerResult<T>>;

/// Commands sent to the audio thread
enum AudioCmd {
    Create(SoundStream, Reply<u32>),
    Play(u32, Reply<()>),
    Pause(u32, Reply<()>),
    Rewind(u32, Reply<()>),
    SetVolume(u32, f32),
    IsPlaying(u32, Sender<bool>),
    Close(u32, Reply<()>),
    Shutdown,
}

/// Per-player state owned by the audio thread
struct Voice {
    sink: Sink,
    stream: SoundStream,
}

impl Voice {
    fn new(handle: &OutputStreamHandle, stream: SoundStream) -> PlayerResult<Self> {
        Ok(Self::with_sink(new_sink(handle)?, stream))
    }

    /// Attach `stream` to `sink`, paused at the start.
    fn with_sink(sink: Sink, stream: SoundStream) -> Self {
        sink.pause();
        sink.append(StreamSource::new(stream.rewound()));
        Self { sink, stream }
    }

    fn rewind(&mut self, handle: &OutputStreamHandle) -> PlayerResult<()> {
        self.replace_sink(new_sink(handle)?);
        Ok(())
    }

    /// Stop the current sink and continue on `sink` from the start of the
    /// stream. Volume and pause state carry over.
    fn replace_sink(&mut self, sink: Sink) {
        sink.set_volume(self.sink.volume());
        if self.sink.is_paused() {
            sink.pause();
        }
        sink.append(StreamSource::new(self.stream.rewound()));
        self.sink.stop();
        self.sink = sink;
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }
}

fn new_sink(handle: &OutputStreamHandle) -> PlayerResult<Sink> {
    Sink::try_new(handle).map_err(|e| PlayerError::Device(e.to_string()))
}

fn with_voice<T>(
    voices: &mut HashMap<u32, Voice>,
    id: u32,
    f: impl FnOnce(&mut Voice) -> PlayerResult<T>,
) -> PlayerResult<T> {
    match voices.get_mut(&id) {
        Some(voice) => f(voice),
        None => Err(PlayerError::Closed),
    }
}

fn audio_thread_main(rx: Receiver<AudioCmd>, ready: Sender<PlayerResult<()>>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to open audio output: {}", e);
            let _ = ready.send(Err(PlayerError::Device(e.to_string())));
            return;
        }
    };
    log::info!("Audio output opened");
    let _ = ready.send(Ok(()));

    let mut voices: HashMap<u32, Voice> = HashMap::new();
    let mut next_id: u32 = 1;

    while let Ok(cmd) = rx.recv() {
        match cmd {
            AudioCmd::Create(stream, reply) => {
                let result = Voice::new(&handle, stream).map(|voice| {
                    let id = next_id;
                    next_id += 1;
                    voices.insert(id, voice);
                    id
                });
                let _ = reply.send(result);
            }
            AudioCmd::Play(id, reply) => {
                let _ = reply.send(with_voice(&mut voices, id, |v| {
                    v.sink.play();
                    Ok(())
                }));
            }
            AudioCmd::Pause(id, reply) => {
                let _ = reply.send(with_voice(&mut voices, id, |v| {
                    v.sink.pause();
                    Ok(())
                }));
            }
            AudioCmd::Rewind(id, reply) => {
                let _ = reply.send(with_voice(&mut voices, id, |v| v.rewind(&handle)));
            }
            AudioCmd::SetVolume(id, volume) => {
                if let Some(voice) = voices.get(&id) {
                    voice.sink.set_volume(volume);
                }
            }
            AudioCmd::IsPlaying(id, reply) => {
                let _ = reply.send(voices.get(&id).is_some_and(Voice::is_playing));
            }
            AudioCmd::Close(id, reply) => {
                let result = match voices.remove(&id) {
                    Some(voice) => {
                        voice.sink.stop();
                        Ok(())
                    }
                    None => Err(PlayerError::Closed),
                };
                let _ = reply.send(result);
            }
            AudioCmd::Shutdown => break,
        }
    }

    for (_, voice) in voices.drain() {
        voice.sink.stop();
    }
    log::info!("Audio thread exited");
}

fn request<T>(
    sender: &Sender<AudioCmd>,
    make: impl FnOnce(Reply<T>) -> AudioCmd,
) -> PlayerResult<T> {
    let (tx, rx) = mpsc::channel();
    sender
        .send(make(tx))
        .map_err(|_| PlayerError::EngineUnavailable)?;
    rx.recv().map_err(|_| PlayerError::EngineUnavailable)?
}

// =============================================================================
// Engine and player handles
// =============================================================================

/// Engine playing through the default output device.
pub struct RodioEngine {
    sender: Sender<AudioCmd>,
    thread: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Spawn the audio thread and open the default output device.
    pub fn new() -> PlayerResult<Self> {
        let (tx, rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("ino-audio".to_string())
            .spawn(move || audio_thread_main(rx, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                sender: tx,
                thread: Some(thread),
            }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(PlayerError::EngineUnavailable)
            }
        }
    }
}

impl AudioEngine for RodioEngine {
    type Player = RodioPlayer;

    fn name(&self) -> &'static str {
        "rodio"
    }

    fn new_player(&self, stream: SoundStream) -> PlayerResult<RodioPlayer> {
        let id = request(&self.sender, |reply| AudioCmd::Create(stream, reply))?;
        Ok(RodioPlayer {
            id,
            sender: self.sender.clone(),
            volume: 1.0,
            closed: false,
        })
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.sender.send(AudioCmd::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Audio thread panicked during shutdown");
            }
        }
    }
}

/// Handle to one sink on the audio thread.
pub struct RodioPlayer {
    id: u32,
    sender: Sender<AudioCmd>,
    volume: f64,
    closed: bool,
}

impl RodioPlayer {
    fn command(&self, make: impl FnOnce(u32, Reply<()>) -> AudioCmd) -> PlayerResult<()> {
        if self.closed {
            return Err(PlayerError::Closed);
        }
        request(&self.sender, |reply| make(self.id, reply))
    }
}

impl Player for RodioPlayer {
    fn play(&mut self) -> PlayerResult<()> {
        self.command(AudioCmd::Play)
    }

    fn pause(&mut self) -> PlayerResult<()> {
        self.command(AudioCmd::Pause)
    }

    fn rewind(&mut self) -> PlayerResult<()> {
        self.command(AudioCmd::Rewind)
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_volume(volume);
        if !self.closed {
            let _ = self
                .sender
                .send(AudioCmd::SetVolume(self.id, self.volume as f32));
        }
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn is_playing(&self) -> bool {
        if self.closed {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        if self.sender.send(AudioCmd::IsPlaying(self.id, tx)).is_err() {
            return false;
        }
        rx.recv().unwrap_or(false)
    }

    fn close(&mut self) -> PlayerResult<()> {
        let result = self.command(AudioCmd::Close);
        self.closed = true;
        result
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        if !self.closed {
            let (tx, _rx) = mpsc::channel();
            let _ = self.sender.send(AudioCmd::Close(self.id, tx));
        }
    }
}
