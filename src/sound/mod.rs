//! Sound playback for the game
//!
//! Loads the fixed set of sound assets, decodes them, and exposes BGM and SE
//! playback controls.
//!
//! # Architecture
//!
//! - `names` defines the closed set of sounds and the `Bgm` / `Se` subsets
//! - `stream` provides the in-memory streams players consume
//! - `decoder` selects a decoder by format and produces a `SoundStream`
//! - `engine` defines the `Player` / `AudioEngine` traits
//! - `rodio_backend` plays through the output device on a dedicated thread
//! - `null` is a headless engine that records every command
//! - `registry` owns one player per sound; `control` adds the playback API

pub mod control;
pub mod decoder;
pub mod engine;
pub mod formats;
pub mod names;
pub mod null;
pub mod registry;
pub mod rodio_backend;
pub mod stream;

pub use decoder::{decode, decode_file, DecodeError, DecodeResult};
pub use engine::{AudioEngine, Player, PlayerError, PlayerResult};
pub use formats::{PcmFormat, SoundFormat};
pub use names::{Bgm, Se, SoundName, SOUND_DIR};
pub use null::{EventLog, NullEngine, NullPlayer, PlayerEvent};
pub use registry::{AudioError, SoundPlayers};
pub use rodio_backend::{RodioEngine, RodioPlayer};
pub use stream::{
    ByteStream, LoopStream, PcmStream, ReadSeekClose, SilentStream, SoundStream, StreamKind,
};
