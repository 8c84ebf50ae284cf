//! Sound identifiers
//!
//! Every sound the game ships with is named here. `SoundName` is the closed
//! set used to index the player registry; `Bgm` and `Se` are the two disjoint
//! subsets exposed to gameplay code.

use std::fmt;

use super::formats::SoundFormat;

/// Directory prefix for sound assets inside the asset source.
pub const SOUND_DIR: &str = "resources/sound/";

/// One embedded sound asset.
///
/// Variants are declared in load order; the discriminant doubles as the
/// registry slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoundName {
    Damage,
    Heal,
    Ino1,
    Ino2,
    ItemGet,
    ItemGet2,
    Jump,
}

impl SoundName {
    /// Number of sounds, and therefore registry slots.
    pub const COUNT: usize = 7;

    /// All sounds in load order.
    pub const ALL: [SoundName; Self::COUNT] = [
        SoundName::Damage,
        SoundName::Heal,
        SoundName::Ino1,
        SoundName::Ino2,
        SoundName::ItemGet,
        SoundName::ItemGet2,
        SoundName::Jump,
    ];

    pub fn filename(self) -> &'static str {
        match self {
            SoundName::Damage => "damage.wav",
            SoundName::Heal => "heal.wav",
            SoundName::Ino1 => "ino1.ogg",
            SoundName::Ino2 => "ino2.ogg",
            SoundName::ItemGet => "itemget.wav",
            SoundName::ItemGet2 => "itemget2.wav",
            SoundName::Jump => "jump.wav",
        }
    }

    /// Logical path handed to the asset source.
    pub fn asset_path(self) -> String {
        format!("{}{}", SOUND_DIR, self.filename())
    }

    pub fn format(self) -> SoundFormat {
        match self {
            SoundName::Ino1 | SoundName::Ino2 => SoundFormat::Vorbis,
            SoundName::Damage
            | SoundName::Heal
            | SoundName::ItemGet
            | SoundName::ItemGet2
            | SoundName::Jump => SoundFormat::Wav,
        }
    }

    /// Registry slot for this sound.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_filename(filename: &str) -> Option<SoundName> {
        Self::ALL.into_iter().find(|n| n.filename() == filename)
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

/// Background music track. At most one is expected to be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bgm {
    Bgm0,
    Bgm1,
}

impl Bgm {
    /// Fixed priority order used when looking for the playing track.
    pub const ALL: [Bgm; 2] = [Bgm::Bgm0, Bgm::Bgm1];

    pub fn sound(self) -> SoundName {
        match self {
            Bgm::Bgm0 => SoundName::Ino1,
            Bgm::Bgm1 => SoundName::Ino2,
        }
    }

    /// Parse a track number as given on the command line.
    pub fn from_index(index: usize) -> Option<Bgm> {
        Self::ALL.get(index).copied()
    }
}

impl From<Bgm> for SoundName {
    fn from(bgm: Bgm) -> Self {
        bgm.sound()
    }
}

/// Sound effect. Each trigger restarts the effect from the beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Se {
    Damage,
    Heal,
    ItemGet,
    ItemGet2,
    Jump,
}

impl Se {
    pub const ALL: [Se; 5] = [Se::Damage, Se::Heal, Se::ItemGet, Se::ItemGet2, Se::Jump];

    pub fn sound(self) -> SoundName {
        match self {
            Se::Damage => SoundName::Damage,
            Se::Heal => SoundName::Heal,
            Se::ItemGet => SoundName::ItemGet,
            Se::ItemGet2 => SoundName::ItemGet2,
            Se::Jump => SoundName::Jump,
        }
    }

    /// Parse an effect name such as `jump` or `itemget2`.
    pub fn from_name(name: &str) -> Option<Se> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|se| se.sound().filename().strip_suffix(".wav") == Some(name.as_str()))
    }
}

impl From<Se> for SoundName {
    fn from(se: Se) -> Self {
        se.sound()
    }
}
