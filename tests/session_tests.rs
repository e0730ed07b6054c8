//! Tests for the game session, scoreboard and match storage

use deathroll::engine::{RngSource, RollEngine, ScriptedSource};
use deathroll::game3d::{
    AppSettings, ColorSetting, GameDatabase, MatchHistory, MatchRecord, SceneConfig, Scoreboard,
};

#[test]
fn test_scoreboard_follows_a_scripted_game() {
    let engine = RollEngine::default();
    let mut state = engine.new_game();
    let mut source = ScriptedSource::new([250, 1]);

    engine.roll(&mut state, &mut source).unwrap();
    let board = Scoreboard::from_state(&state);
    assert_eq!(board.player_panels[0], "Player 1: 250\nLast Roll: 250");
    assert_eq!(board.ceiling, "Rolling out of 250");
    assert_eq!(board.turn, "Turn: Player 2");
    assert_eq!(board.result, "Player 1 rolled out of 500 and got 250");

    engine.roll(&mut state, &mut source).unwrap();
    let board = Scoreboard::from_state(&state);
    assert_eq!(board.player_panels[1], "Player 2: 1\nLast Roll: 1");
    assert_eq!(board.turn, "Player 2 loses!");
    assert_eq!(
        board.result,
        "Player 2 rolled out of 250 and got 1. Player 2 loses!"
    );
    assert!(!board.show_roll);
    assert!(board.show_restart);

    engine.reset(&mut state);
    let board = Scoreboard::from_state(&state);
    assert_eq!(board.ceiling, "Rolling out of 500");
    assert!(board.show_roll);
}

#[test]
fn test_session_rejects_rolls_after_loss() {
    let mut session = deathroll::game3d::DeathrollSession::new(
        RollEngine::with_starting_ceiling(1).unwrap(),
        RngSource::seeded(1),
    );
    let outcome = session.roll().unwrap();
    assert!(outcome.game_over);

    let err = session.roll().unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(session.state().turns(), 1);

    session.reset();
    assert!(!session.state().is_over());
    assert_eq!(session.state().ceiling(), 1);
}

#[test]
fn test_history_persists_finished_games() {
    let db = GameDatabase::open_in_memory().unwrap();
    let engine = RollEngine::with_starting_ceiling(30).unwrap();
    let mut source = RngSource::seeded(5);

    for _ in 0..3 {
        let mut state = engine.new_game();
        engine.play_out(&mut state, &mut source).unwrap();
        db.record_match(&state).unwrap();
    }

    let history = MatchHistory::new(Some(db));
    assert_eq!(history.tally.games, 3);
    assert_eq!(
        history.tally.player_one_losses + history.tally.player_two_losses,
        3
    );

    let records: Vec<MatchRecord> = history
        .db
        .as_ref()
        .unwrap()
        .recent_matches(2)
        .unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.starting_ceiling, 30);
        assert_eq!(record.rolls.last(), Some(&1));
        assert_eq!(record.rolls.len() as u32, record.turns);
    }
}

#[test]
fn test_settings_feed_scene_config() {
    let db = GameDatabase::open_in_memory().unwrap();
    let settings = AppSettings {
        starting_ceiling: 100,
        physics_enabled: true,
        background_color: ColorSetting::parse("navy").unwrap(),
        particle_count: 250,
        ..Default::default()
    };
    settings.save_to_db(&db).unwrap();

    let loaded = AppSettings::load_from_db(&db);
    assert_eq!(loaded.starting_ceiling, 100);

    let config = SceneConfig::from_settings(&loaded);
    assert!(config.physics_enabled);
    assert_eq!(config.particle_count, 250);
    assert_eq!(config.background_color.to_hex(), "#000080");
}
