use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ino_audio::config::{self, Options, SoundDriver};
use ino_audio::logging;
use ino_audio::resource::DirAssets;
use ino_audio::sound::{AudioEngine, Bgm, NullEngine, RodioEngine, Se, SoundPlayers};
use ino_audio::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Must precede load_config, which logs malformed lines
    logging::init(cli.log_level()?).context("Failed to install logger")?;

    let options = config::load_config(cli.configfile.as_deref())?;
    let options = cli.merge_into_options(options)?;
    logging::set_level(options.log_level.unwrap_or_default());

    let content_dir = options.content_dir.as_deref().unwrap_or(".");
    log::info!("Content dir: {}", content_dir);
    let assets = DirAssets::new(Path::new(content_dir));

    match options.sound_driver.unwrap_or_default() {
        SoundDriver::Rodio => match RodioEngine::new() {
            Ok(engine) => run(&engine, &assets, &cli, &options),
            Err(e) => {
                log::warn!("Audio output unavailable ({}); continuing without sound", e);
                run(&NullEngine::new(), &assets, &cli, &options)
            }
        },
        SoundDriver::None => run(&NullEngine::new(), &assets, &cli, &options),
    }
}

fn run<E: AudioEngine>(engine: &E, assets: &DirAssets, cli: &Cli, options: &Options) -> Result<()> {
    let bgm = Bgm::from_index(cli.bgm).with_context(|| format!("No such BGM track: {}", cli.bgm))?;
    let effects = cli
        .se
        .iter()
        .map(|name| Se::from_name(name).with_context(|| format!("No such sound effect: {}", name)))
        .collect::<Result<Vec<_>>>()?;

    let mut sounds = SoundPlayers::load(engine, assets).context("Failed to load sounds")?;
    sounds.set_levels(options.music_level(), options.sfx_level());

    sounds.play_bgm(bgm)?;
    log::info!("Playing {:?} for {}s", bgm, cli.seconds);

    for second in 0..cli.seconds {
        if !effects.is_empty() {
            let se = effects[second as usize % effects.len()];
            sounds.play_se(se)?;
            log::debug!("Fired {:?}", se);
        }
        if second == cli.seconds / 2 && second > 0 {
            sounds.pause_bgm()?;
            thread::sleep(Duration::from_millis(500));
            sounds.resume_bgm(bgm)?;
        }
        thread::sleep(Duration::from_secs(1));
    }

    for step in (0..10).rev() {
        sounds.set_bgm_volume(f64::from(step) / 10.0);
        thread::sleep(Duration::from_millis(50));
    }
    sounds.pause_bgm()?;

    sounds.close().context("Failed to close sound players")?;
    Ok(())
}
