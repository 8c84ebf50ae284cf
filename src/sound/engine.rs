//! Player engine interface
//!
//! The registry never talks to an audio device directly. It asks an
//! `AudioEngine` for one `Player` per sound and forwards commands to it.
//! `RodioEngine` drives real output; `NullEngine` runs headless.

use std::io;

use super::stream::SoundStream;

/// Error type for player operations
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player already closed")]
    Closed,

    #[error("Audio engine is not running")]
    EngineUnavailable,

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Stream I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Playback control for one decoded stream.
pub trait Player: Send {
    /// Start or continue playback from the current position.
    fn play(&mut self) -> PlayerResult<()>;

    /// Stop advancing; pausing a paused player is a no-op.
    fn pause(&mut self) -> PlayerResult<()>;

    /// Seek back to the start of the stream without changing play state.
    fn rewind(&mut self) -> PlayerResult<()>;

    /// Set the output volume; values are clamped to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    fn volume(&self) -> f64;

    /// True while the player is unpaused and has audio left to produce.
    fn is_playing(&self) -> bool;

    /// Release the player. Every other call fails with `Closed` afterwards.
    fn close(&mut self) -> PlayerResult<()>;
}

/// Creates players bound to decoded streams.
pub trait AudioEngine {
    type Player: Player;

    fn name(&self) -> &'static str;

    /// Create a paused player at full volume positioned at the start of `stream`.
    fn new_player(&self, stream: SoundStream) -> PlayerResult<Self::Player>;
}

/// Clamp a requested volume into the range players accept.
pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(0.5), 0.5);
        assert_eq!(clamp_volume(-1.0), 0.0);
        assert_eq!(clamp_volume(3.0), 1.0);
        assert_eq!(clamp_volume(f64::NAN), 0.0);
    }

    #[test]
    fn test_player_error_display() {
        assert_eq!(PlayerError::Closed.to_string(), "Player already closed");
        let err = PlayerError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "Stream I/O error: boom");
    }

    #[test]
    fn test_player_error_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<PlayerError>();
    }
}
