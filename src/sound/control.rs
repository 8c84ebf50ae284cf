//! Playback control
//!
//! Named operations gameplay code calls each frame. Each looks up the
//! relevant players and forwards commands; the first engine error is
//! returned as-is and nothing is retried.

use super::engine::{Player, PlayerResult};
use super::names::{Bgm, Se};
use super::registry::SoundPlayers;

impl<P: Player> SoundPlayers<P> {
    /// Start `bgm` from the beginning at full volume, pausing any other track.
    ///
    /// Nothing is played if pausing or rewinding fails.
    pub fn play_bgm(&mut self, bgm: Bgm) -> PlayerResult<()> {
        self.pause_bgm()?;
        let level = self.music_level;
        let player = self.player_mut(bgm);
        player.set_volume(level);
        player.rewind()?;
        player.play()
    }

    /// Continue `bgm` from where it was paused, at full volume.
    pub fn resume_bgm(&mut self, bgm: Bgm) -> PlayerResult<()> {
        self.pause_bgm()?;
        let level = self.music_level;
        let player = self.player_mut(bgm);
        player.set_volume(level);
        player.play()
    }

    /// Pause every BGM track, stopping at the first failure.
    pub fn pause_bgm(&mut self) -> PlayerResult<()> {
        for bgm in Bgm::ALL {
            self.player_mut(bgm).pause()?;
        }
        Ok(())
    }

    /// Set the volume of the BGM track that is playing, if any.
    ///
    /// Tracks are checked in `Bgm::ALL` order and only the first playing one
    /// is changed; `play_bgm` and `resume_bgm` keep at most one playing.
    pub fn set_bgm_volume(&mut self, volume: f64) {
        let level = self.music_level;
        for bgm in Bgm::ALL {
            let player = self.player_mut(bgm);
            if !player.is_playing() {
                continue;
            }
            player.set_volume(volume * level);
            return;
        }
    }

    /// The BGM track currently playing, if any.
    pub fn playing_bgm(&self) -> Option<Bgm> {
        Bgm::ALL.into_iter().find(|bgm| self.player(*bgm).is_playing())
    }

    /// Restart `se` from the beginning.
    ///
    /// Each effect has a single player, so triggering an effect that is
    /// already playing cuts it off and starts it over.
    pub fn play_se(&mut self, se: Se) -> PlayerResult<()> {
        let player = self.player_mut(se);
        player.rewind()?;
        player.play()
    }
}
