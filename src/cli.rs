use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{parse_log_level, parse_volume, Options, SoundDriver};
use crate::logging::LogLevel;

/// Ino sound player - plays the game's music and effects
#[derive(Parser, Debug)]
#[command(name = "ino-audio")]
#[command(version)]
#[command(about = "Play the game's background music and sound effects", long_about = None)]
pub struct Cli {
    /// Content directory holding resources/sound/
    #[arg(short, long, value_name = "CONTENTDIR")]
    pub contentdir: Option<String>,

    /// Config file (defaults to ./ino.cfg when present)
    #[arg(long, value_name = "FILE")]
    pub configfile: Option<PathBuf>,

    /// Sound driver (rodio, none)
    #[arg(long, value_name = "DRIVER")]
    pub sound: Option<String>,

    /// Music volume (0-100)
    #[arg(long, value_name = "VOLUME")]
    pub musicvol: Option<String>,

    /// Sound effects volume (0-100)
    #[arg(long, value_name = "VOLUME")]
    pub sfxvol: Option<String>,

    /// Log level (0-6 or nothing, user, error, warning, info, debug, all)
    #[arg(short, long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Background music track to play (0 or 1)
    #[arg(short, long, default_value_t = 0)]
    pub bgm: usize,

    /// Sound effect to fire, once per second in turn (can be repeated)
    #[arg(long, value_name = "EFFECT")]
    pub se: Vec<String>,

    /// How long to play, in seconds
    #[arg(short, long, default_value_t = 5)]
    pub seconds: u64,
}

impl Cli {
    /// Log level from `--loglevel`, or the default when not given.
    ///
    /// Used to install the logger before the config file is read.
    pub fn log_level(&self) -> Result<LogLevel> {
        match self.loglevel {
            Some(ref level) => parse_log_level(level),
            None => Ok(LogLevel::default()),
        }
    }

    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref content_dir) = self.contentdir {
            opts.content_dir = Some(content_dir.clone());
        }

        if let Some(ref driver) = self.sound {
            opts.sound_driver = Some(SoundDriver::parse(driver)?);
        }

        if let Some(ref vol) = self.musicvol {
            let int_vol: i32 = vol.parse().context("Invalid music volume")?;
            opts.music_volume = Some(parse_volume(int_vol));
        }

        if let Some(ref vol) = self.sfxvol {
            let int_vol: i32 = vol.parse().context("Invalid SFX volume")?;
            opts.sfx_volume = Some(parse_volume(int_vol));
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = Some(parse_log_level(level)?);
        }

        Ok(opts)
    }
}
