//! Registry and playback control integration tests
//!
//! These run the full load path (asset source, decoder selection, engine)
//! against the null engine and check the playback rules gameplay relies on.

mod common;

use common::{all_assets, wav_bytes, FlakyEngine, Op};
use ino_audio::sound::{
    AudioError, Bgm, NullEngine, Player, PlayerError, PlayerEvent, Se, SoundName, SoundPlayers,
    StreamKind,
};

#[test]
fn test_load_creates_one_player_per_sound() {
    let engine = NullEngine::new();
    let sounds = SoundPlayers::load(&engine, &all_assets()).expect("load failed");

    assert_eq!(sounds.len(), SoundName::COUNT);
    let names: Vec<SoundName> = sounds.iter().map(|(name, _)| name).collect();
    assert_eq!(names, SoundName::ALL.to_vec());

    let created = engine
        .log()
        .events()
        .into_iter()
        .filter(|e| matches!(e, PlayerEvent::Created(..)))
        .count();
    assert_eq!(created, SoundName::COUNT);

    for se in Se::ALL {
        assert_eq!(sounds.stream_kind(se), StreamKind::Pcm);
        assert!(!sounds.player(se).is_playing());
    }
}

#[test]
fn test_corrupt_ogg_loads_as_silence() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();

    for bgm in Bgm::ALL {
        assert_eq!(sounds.stream_kind(bgm), StreamKind::Silent);
    }

    sounds.play_bgm(Bgm::Bgm0).unwrap();
    let player = sounds.player_mut(Bgm::Bgm0);
    assert_eq!(player.advance(1 << 16), 1 << 16);
    assert!(player.is_playing());
    player.rewind().unwrap();
    assert_eq!(player.position(), 0);
    sounds.pause_bgm().unwrap();
    sounds.resume_bgm(Bgm::Bgm0).unwrap();
    assert!(sounds.player(Bgm::Bgm0).is_playing());
}

#[test]
fn test_corrupt_wav_aborts_load() {
    let mut assets = all_assets();
    assets.insert(SoundName::ItemGet.asset_path(), b"RIFF\0\0\0\0junk".to_vec());

    let engine = NullEngine::new();
    let err = SoundPlayers::load(&engine, &assets).err().expect("load should fail");
    assert!(matches!(err, AudioError::Decode { sound: SoundName::ItemGet, .. }));

    // Damage, Heal, Ino1 and Ino2 were created before ItemGet failed
    let events = engine.log().events();
    let closed: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            PlayerEvent::Close(id) => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(closed, vec![0, 1, 2, 3]);
}

#[test]
fn test_missing_asset_aborts_load() {
    let mut assets = all_assets();
    assets.remove(&SoundName::Jump.asset_path());

    let engine = NullEngine::new();
    let err = SoundPlayers::load(&engine, &assets).err().expect("load should fail");
    assert_eq!(err.sound(), SoundName::Jump);
    assert!(matches!(err, AudioError::Asset { .. }));
}

#[test]
fn test_missing_music_aborts_load() {
    let mut assets = all_assets();
    assets.remove(&SoundName::Ino2.asset_path());

    let engine = NullEngine::new();
    let err = SoundPlayers::load(&engine, &assets).err().expect("load should fail");
    assert!(matches!(err, AudioError::Asset { sound: SoundName::Ino2, .. }));
}

#[test]
fn test_player_creation_failure_aborts_load() {
    let engine = FlakyEngine::failing_create(SoundName::ItemGet2);
    let err = SoundPlayers::load(&engine, &all_assets()).err().expect("load should fail");
    assert!(matches!(
        err,
        AudioError::Player {
            sound: SoundName::ItemGet2,
            source: PlayerError::Device(_),
        }
    ));
}

#[test]
fn test_play_bgm_is_mutually_exclusive() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();

    sounds.play_bgm(Bgm::Bgm0).unwrap();
    assert!(sounds.player(Bgm::Bgm0).is_playing());

    sounds.play_bgm(Bgm::Bgm1).unwrap();
    assert!(sounds.player(Bgm::Bgm1).is_playing());
    assert!(!sounds.player(Bgm::Bgm0).is_playing());
}

#[test]
fn test_play_se_restarts_long_effect() {
    let mut assets = all_assets();
    assets.insert(SoundName::Jump.asset_path(), wav_bytes(&[1; 1024]));

    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &assets).unwrap();
    sounds.play_se(Se::Jump).unwrap();
    sounds.player_mut(Se::Jump).advance(300);
    assert_eq!(sounds.player(Se::Jump).position(), 300);
    sounds.play_se(Se::Jump).unwrap();
    assert_eq!(sounds.player(Se::Jump).position(), 0);
}

#[test]
fn test_set_bgm_volume_targets_playing_track() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();

    sounds.play_bgm(Bgm::Bgm0).unwrap();
    sounds.set_bgm_volume(0.5);
    assert_eq!(sounds.player(Bgm::Bgm0).volume(), 0.5);
    assert_eq!(sounds.player(Bgm::Bgm1).volume(), 1.0);

    sounds.play_bgm(Bgm::Bgm1).unwrap();
    sounds.set_bgm_volume(0.25);
    assert_eq!(sounds.player(Bgm::Bgm1).volume(), 0.25);
    assert_eq!(sounds.player(Bgm::Bgm0).volume(), 0.5);
}

#[test]
fn test_set_bgm_volume_with_nothing_playing_is_noop() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.log().clear();

    sounds.set_bgm_volume(0.5);
    assert!(engine.log().is_empty());
    for bgm in Bgm::ALL {
        assert_eq!(sounds.player(bgm).volume(), 1.0);
    }
}

#[test]
fn test_play_bgm_resets_volume() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    sounds.play_bgm(Bgm::Bgm0).unwrap();
    sounds.set_bgm_volume(0.1);
    sounds.play_bgm(Bgm::Bgm0).unwrap();
    assert_eq!(sounds.player(Bgm::Bgm0).volume(), 1.0);
}

#[test]
fn test_play_se_twice_restarts() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();

    sounds.play_se(Se::Jump).unwrap();
    sounds.player_mut(Se::Jump).advance(64);
    sounds.play_se(Se::Jump).unwrap();

    let jump = sounds.player(Se::Jump);
    assert_eq!(jump.position(), 0);
    assert!(jump.is_playing());

    let id = jump.id();
    let rewinds = engine
        .log()
        .events()
        .into_iter()
        .filter(|e| *e == PlayerEvent::Rewind(id))
        .count();
    assert_eq!(rewinds, 2);
}

#[test]
fn test_play_se_after_finish_plays_again() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();

    sounds.play_se(Se::Damage).unwrap();
    sounds.player_mut(Se::Damage).advance(usize::MAX >> 1);
    assert!(!sounds.player(Se::Damage).is_playing());

    sounds.play_se(Se::Damage).unwrap();
    assert!(sounds.player(Se::Damage).is_playing());
}

#[test]
fn test_effects_do_not_touch_music() {
    let engine = NullEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    sounds.play_bgm(Bgm::Bgm1).unwrap();
    for se in Se::ALL {
        sounds.play_se(se).unwrap();
    }
    assert_eq!(sounds.playing_bgm(), Some(Bgm::Bgm1));
}

#[test]
fn test_play_bgm_fails_when_pause_fails() {
    let engine = FlakyEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.fail(SoundName::Ino1, Op::Pause);
    engine.log().clear();

    let result = sounds.play_bgm(Bgm::Bgm1);
    assert!(matches!(result, Err(PlayerError::Device(_))));
    assert!(!sounds.player(Bgm::Bgm1).is_playing());
    // Pausing stops at the first failure, so nothing reached the engine
    assert!(engine.log().is_empty());
}

#[test]
fn test_play_bgm_does_not_play_when_rewind_fails() {
    let engine = FlakyEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.fail(SoundName::Ino2, Op::Rewind);

    assert!(sounds.play_bgm(Bgm::Bgm1).is_err());
    assert!(!sounds.player(Bgm::Bgm1).is_playing());

    // Resume does not rewind, so it still works
    sounds.resume_bgm(Bgm::Bgm1).unwrap();
    assert!(sounds.player(Bgm::Bgm1).is_playing());
}

#[test]
fn test_pause_bgm_stops_at_first_error() {
    let engine = FlakyEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    sounds.play_bgm(Bgm::Bgm1).unwrap();
    engine.fail(SoundName::Ino1, Op::Pause);

    assert!(sounds.pause_bgm().is_err());
    // Bgm1 was never reached
    assert!(sounds.player(Bgm::Bgm1).is_playing());
}

#[test]
fn test_play_se_error_is_returned() {
    let engine = FlakyEngine::new();
    let mut sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.fail(SoundName::Heal, Op::Play);

    let err = sounds.play_se(Se::Heal).unwrap_err();
    assert_eq!(err.to_string(), "Audio device error: Play failed on player 1");
    sounds.play_se(Se::Jump).unwrap();
}

#[test]
fn test_close_closes_every_player() {
    let engine = NullEngine::new();
    let sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.log().clear();

    sounds.close().unwrap();
    let closed = engine
        .log()
        .events()
        .into_iter()
        .filter(|e| matches!(e, PlayerEvent::Close(_)))
        .count();
    assert_eq!(closed, SoundName::COUNT);
}

#[test]
fn test_close_continues_after_failure_and_reports_first() {
    let engine = FlakyEngine::new();
    let sounds = SoundPlayers::load(&engine, &all_assets()).unwrap();
    engine.fail(SoundName::Heal, Op::Close);
    engine.fail(SoundName::ItemGet2, Op::Close);
    engine.log().clear();

    let err = sounds.close().unwrap_err();
    assert_eq!(err.to_string(), "Audio device error: Close failed on player 1");

    let closed: Vec<u32> = engine
        .log()
        .events()
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::Close(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(closed, vec![0, 2, 3, 4, 6]);
}
