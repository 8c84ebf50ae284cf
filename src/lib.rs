// Ino audio library
// Sound asset loading and BGM/SE playback for the game

pub mod cli;
pub mod config;
pub mod logging;
pub mod resource;
pub mod sound;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
pub use sound::{Bgm, Se, SoundPlayers};
