//! Player registry
//!
//! `SoundPlayers` owns exactly one player per `SoundName`, stored in a slot
//! array indexed by the name's ordinal. It is built once by `load`, handed to
//! whatever drives the game loop, and consumed by `close` at shutdown.

use crate::resource::{AssetError, AssetSource};

use super::decoder::{decode, DecodeError};
use super::engine::{clamp_volume, AudioEngine, Player, PlayerError, PlayerResult};
use super::names::{Se, SoundName};
use super::stream::StreamKind;

/// Error type for registry construction
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to fetch {sound}: {source}")]
    Asset {
        sound: SoundName,
        #[source]
        source: AssetError,
    },

    #[error("Failed to decode {sound}: {source}")]
    Decode {
        sound: SoundName,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to create player for {sound}: {source}")]
    Player {
        sound: SoundName,
        #[source]
        source: PlayerError,
    },
}

impl AudioError {
    /// The sound whose load step failed
    pub fn sound(&self) -> SoundName {
        match self {
            AudioError::Asset { sound, .. }
            | AudioError::Decode { sound, .. }
            | AudioError::Player { sound, .. } => *sound,
        }
    }
}

/// One ready-to-play player for every sound.
pub struct SoundPlayers<P: Player> {
    players: Vec<P>,
    kinds: [StreamKind; SoundName::COUNT],
    pub(super) music_level: f64,
    pub(super) sfx_level: f64,
}

impl<P: Player> SoundPlayers<P> {
    /// Fetch, decode and create a player for every sound, in load order.
    ///
    /// Any asset error, WAV decode error, or player creation error aborts the
    /// load. Players created before the failure are closed and dropped.
    pub fn load<E, A>(engine: &E, assets: &A) -> Result<Self, AudioError>
    where
        E: AudioEngine<Player = P>,
        A: AssetSource + ?Sized,
    {
        let mut players = Vec::with_capacity(SoundName::COUNT);
        let mut kinds = [StreamKind::Silent; SoundName::COUNT];

        for name in SoundName::ALL {
            match load_one(engine, assets, name) {
                Ok((player, kind)) => {
                    kinds[name.index()] = kind;
                    players.push(player);
                }
                Err(e) => {
                    log::error!("{}", e);
                    for player in players.iter_mut() {
                        if let Err(close_err) = player.close() {
                            log::warn!("Closing partially loaded player: {}", close_err);
                        }
                    }
                    return Err(e);
                }
            }
        }

        let silent = kinds.iter().filter(|k| **k == StreamKind::Silent).count();
        log::info!(
            "Loaded {} sounds with the {} engine ({} silent)",
            players.len(),
            engine.name(),
            silent
        );

        Ok(Self {
            players,
            kinds,
            music_level: 1.0,
            sfx_level: 1.0,
        })
    }

    /// Close every player, continuing past failures.
    ///
    /// Returns the first error encountered.
    pub fn close(mut self) -> PlayerResult<()> {
        let mut first_error = None;
        for (name, player) in SoundName::ALL.into_iter().zip(self.players.iter_mut()) {
            if let Err(e) = player.close() {
                log::warn!("Failed to close {}: {}", name, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                log::info!("Closed {} sound players", self.players.len());
                Ok(())
            }
        }
    }

    pub fn player(&self, name: impl Into<SoundName>) -> &P {
        &self.players[name.into().index()]
    }

    pub fn player_mut(&mut self, name: impl Into<SoundName>) -> &mut P {
        &mut self.players[name.into().index()]
    }

    /// Which stream variant the sound was loaded as.
    pub fn stream_kind(&self, name: impl Into<SoundName>) -> StreamKind {
        self.kinds[name.into().index()]
    }

    /// All players in load order
    pub fn iter(&self) -> impl Iterator<Item = (SoundName, &P)> {
        SoundName::ALL.into_iter().zip(self.players.iter())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn music_level(&self) -> f64 {
        self.music_level
    }

    pub fn sfx_level(&self) -> f64 {
        self.sfx_level
    }

    /// Set the music and effect levels from configuration.
    ///
    /// The music level is what "full volume" means for BGM and scales
    /// `set_bgm_volume`. The effect level is applied to every effect player
    /// immediately.
    pub fn set_levels(&mut self, music: f64, sfx: f64) {
        if music.is_nan() || sfx.is_nan() {
            log::warn!("Ignoring NaN volume level (music {}, sfx {})", music, sfx);
        }
        self.music_level = clamp_volume(music);
        self.sfx_level = clamp_volume(sfx);
        for se in Se::ALL {
            let level = self.sfx_level;
            self.player_mut(se).set_volume(level);
        }
    }
}

fn load_one<E, A>(engine: &E, assets: &A, name: SoundName) -> Result<(E::Player, StreamKind), AudioError>
where
    E: AudioEngine,
    A: AssetSource + ?Sized,
{
    let data = assets
        .fetch(&name.asset_path())
        .map_err(|source| AudioError::Asset { sound: name, source })?;
    let stream = decode(name.format(), data)
        .map_err(|source| AudioError::Decode { sound: name, source })?;
    let kind = stream.kind();
    let player = engine
        .new_player(stream)
        .map_err(|source| AudioError::Player { sound: name, source })?;
    log::debug!("Loaded {} as {:?}", name, kind);
    Ok((player, kind))
}
