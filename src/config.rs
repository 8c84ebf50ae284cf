use std::path::Path;

use anyhow::{Context, Result};

use crate::logging::LogLevel;
use crate::resource::PropertyFile;

/// Config file read from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "ino.cfg";

/// Options that can be set via CLI or config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub content_dir: Option<String>,
    pub sound_driver: Option<SoundDriver>,
    pub music_volume: Option<f32>,
    pub sfx_volume: Option<f32>,
    pub log_level: Option<LogLevel>,
}

impl Options {
    pub fn music_level(&self) -> f64 {
        f64::from(self.music_volume.unwrap_or(1.0))
    }

    pub fn sfx_level(&self) -> f64 {
        f64::from(self.sfx_volume.unwrap_or(1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundDriver {
    /// Output through the default device
    #[default]
    Rodio,
    /// No output; playback state is tracked but nothing is heard
    None,
}

impl SoundDriver {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rodio" => Ok(SoundDriver::Rodio),
            "none" => Ok(SoundDriver::None),
            other => anyhow::bail!("Unknown sound driver: {} (expected rodio or none)", other),
        }
    }
}

/// Load options from a property file.
///
/// With no explicit path, `ino.cfg` in the working directory is used if it
/// exists and defaults are returned otherwise. An explicit path must exist.
pub fn load_config(config_file: Option<&Path>) -> Result<Options> {
    let props = match config_file {
        Some(path) => PropertyFile::from_file(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if !path.is_file() {
                return Ok(Options::default());
            }
            PropertyFile::from_file(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?
        }
    };
    options_from_props(&props)
}

/// Build options from parsed key/value pairs.
pub fn options_from_props(props: &PropertyFile) -> Result<Options> {
    let mut opts = Options::default();

    if let Some(dir) = props.get("contentdir").filter(|d| !d.is_empty()) {
        opts.content_dir = Some(dir.to_string());
    }
    if let Some(driver) = props.get("sound") {
        opts.sound_driver = Some(SoundDriver::parse(driver)?);
    }
    if let Some(vol) = props.get("musicvol") {
        let int_vol: i32 = vol.parse().context("Invalid musicvol value")?;
        opts.music_volume = Some(parse_volume(int_vol));
    }
    if let Some(vol) = props.get("sfxvol") {
        let int_vol: i32 = vol.parse().context("Invalid sfxvol value")?;
        opts.sfx_volume = Some(parse_volume(int_vol));
    }
    if let Some(level) = props.get("loglevel") {
        opts.log_level = Some(parse_log_level(level)?);
    }

    Ok(opts)
}

/// Parse a volume value (0-100) to a float (0.0-1.0)
pub fn parse_volume(vol: i32) -> f32 {
    if vol < 0 {
        return 0.0;
    }
    if vol > 100 {
        return 1.0;
    }
    vol as f32 / 100.0
}

pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    LogLevel::parse(s).with_context(|| format!("Invalid log level: {}", s))
}
