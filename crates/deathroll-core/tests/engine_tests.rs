//! Tests for turn resolution and the game lifecycle

use deathroll_core::{
    DeathrollError, GameState, Phase, Player, RandomSourceError, RngSource, RollEngine,
    ScriptedSource, DEFAULT_CEILING,
};

fn assert_initial(state: &GameState) {
    assert_eq!(state.ceiling(), DEFAULT_CEILING);
    assert_eq!(state.active_player(), Player::Player1);
    assert!(!state.is_over());
    assert_eq!(state.loser(), None);
    assert_eq!(state.last_roll(Player::Player1), None);
    assert_eq!(state.last_roll(Player::Player2), None);
    assert!(state.history().is_empty());
}

#[test]
fn test_first_roll_of_one_finishes_for_player_one() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();

    let outcome = engine
        .roll(&mut state, &mut ScriptedSource::new([1]))
        .unwrap();

    assert_eq!(outcome.roll, 1);
    assert_eq!(outcome.player, Player::Player1);
    assert!(outcome.game_over);
    assert_eq!(outcome.next_ceiling, None);
    assert_eq!(state.loser(), Some(Player::Player1));
    assert_eq!(
        state.phase(),
        Phase::Finished {
            loser: Player::Player1
        }
    );
}

#[test]
fn test_roll_lowers_ceiling_and_passes_turn() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();

    let outcome = engine
        .roll(&mut state, &mut ScriptedSource::new([37]))
        .unwrap();

    assert_eq!(outcome.roll, 37);
    assert_eq!(outcome.player, Player::Player1);
    assert_eq!(outcome.rolled_from, 500);
    assert!(!outcome.game_over);
    assert_eq!(outcome.next_ceiling, Some(37));
    assert_eq!(state.ceiling(), 37);
    assert_eq!(state.active_player(), Player::Player2);
    assert_eq!(state.last_roll(Player::Player1), Some(37));
}

#[test]
fn test_two_turns_player_two_loses() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    let mut source = ScriptedSource::new([250, 1]);

    let first = engine.roll(&mut state, &mut source).unwrap();
    assert_eq!(first.rolled_from, 500);
    assert_eq!(state.ceiling(), 250);
    assert_eq!(state.active_player(), Player::Player2);

    let second = engine.roll(&mut state, &mut source).unwrap();
    assert_eq!(second.rolled_from, 250);
    assert_eq!(second.player, Player::Player2);
    assert!(second.game_over);
    assert_eq!(
        state.phase(),
        Phase::Finished {
            loser: Player::Player2
        }
    );
    assert_eq!(state.history(), &[first, second]);
}

#[test]
fn test_reset_after_finish_returns_to_initial_state() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    engine
        .roll(&mut state, &mut ScriptedSource::new([1]))
        .unwrap();
    assert!(state.is_over());

    engine.reset(&mut state);

    assert_initial(&state);
    assert_eq!(
        state.phase(),
        Phase::InProgress {
            active: Player::Player1,
            ceiling: 500
        }
    );
}

#[test]
fn test_reset_mid_game_returns_to_initial_state() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    engine
        .roll(&mut state, &mut ScriptedSource::new([420, 99, 42]))
        .unwrap();

    engine.reset(&mut state);
    assert_initial(&state);
}

#[test]
fn test_roll_after_finish_is_rejected_until_reset() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    let mut source = ScriptedSource::new([1, 77, 88]);
    engine.roll(&mut state, &mut source).unwrap();
    let finished = state.clone();

    for _ in 0..3 {
        let err = engine.roll(&mut state, &mut source).unwrap_err();
        assert_eq!(
            err,
            DeathrollError::InvalidState {
                loser: Player::Player1
            }
        );
        assert!(err.is_invalid_state());
    }
    // Rejected rolls neither change the state nor consume draws.
    assert_eq!(state, finished);
    assert_eq!(source.remaining(), 2);

    engine.reset(&mut state);
    let outcome = engine.roll(&mut state, &mut source).unwrap();
    assert_eq!(outcome.roll, 77);
}

#[test]
fn test_loaded_finished_game_still_rejects_rolls() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    engine
        .play_out(&mut state, &mut ScriptedSource::new([40, 1]))
        .unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let mut loaded: GameState = serde_json::from_str(&json).unwrap();
    let mut source = ScriptedSource::new([7]);
    let err = engine.roll(&mut loaded, &mut source).unwrap_err();
    assert_eq!(
        err,
        DeathrollError::InvalidState {
            loser: Player::Player2
        }
    );
    assert_eq!(source.remaining(), 1);
}

#[test]
fn test_saved_game_marked_over_without_loser_is_refused() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    engine.roll(&mut state, &mut ScriptedSource::new([40])).unwrap();

    let mut json = serde_json::to_value(&state).unwrap();
    json["is_over"] = true.into();
    assert!(serde_json::from_value::<GameState>(json).is_err());

    let fresh = r#"{"active_player":"Player2","ceiling":0,"last_roll":[null,null],
        "is_over":false,"loser":null,"starting_ceiling":0,"history":[]}"#;
    assert!(serde_json::from_str::<GameState>(fresh).is_err());
}

#[test]
fn test_exhausted_source_leaves_state_untouched_and_can_retry() {
    let engine = RollEngine::new();
    let mut state = engine.new_game();
    let mut source = ScriptedSource::default();

    let err = engine.roll(&mut state, &mut source).unwrap_err();
    assert_eq!(err, DeathrollError::RandomSource(RandomSourceError::Exhausted));
    assert_initial(&state);

    source.push(10);
    assert_eq!(engine.roll(&mut state, &mut source).unwrap().roll, 10);
}

#[test]
fn test_random_games_hold_ceiling_and_turn_invariants() {
    let engine = RollEngine::new();
    let mut source = RngSource::seeded(2024);

    for _ in 0..200 {
        let mut state = engine.new_game();
        let mut previous_ceiling = state.ceiling();
        let mut previous_player: Option<Player> = None;

        loop {
            let active = state.active_player();
            if let Some(prev) = previous_player {
                assert_eq!(active, prev.other(), "turns must alternate");
            }

            let outcome = engine.roll(&mut state, &mut source).unwrap();
            assert_eq!(outcome.player, active);
            assert_eq!(outcome.rolled_from, previous_ceiling);
            assert!(outcome.roll >= 1 && outcome.roll <= previous_ceiling);

            if outcome.game_over {
                assert_eq!(outcome.roll, 1);
                assert_eq!(state.loser(), Some(active));
                break;
            }

            assert_eq!(state.ceiling(), outcome.roll);
            assert!(state.ceiling() <= previous_ceiling);
            previous_ceiling = state.ceiling();
            previous_player = Some(active);
        }
    }
}

#[test]
fn test_seeded_games_are_reproducible() {
    let engine = RollEngine::new();
    let play = |seed| {
        let mut state = engine.new_game();
        engine
            .play_out(&mut state, &mut RngSource::seeded(seed))
            .unwrap();
        state
    };

    assert_eq!(play(11), play(11));
}

#[test]
fn test_custom_starting_ceiling() {
    let engine = RollEngine::with_starting_ceiling(20).unwrap();
    let mut state = engine.new_game();
    assert_eq!(state.ceiling(), 20);
    assert_eq!(state.starting_ceiling(), 20);

    // 21 is legal against the default ceiling but not here.
    assert!(engine
        .roll(&mut state, &mut ScriptedSource::new([21]))
        .is_err());

    engine
        .roll(&mut state, &mut ScriptedSource::new([20]))
        .unwrap();
    engine.reset(&mut state);
    assert_eq!(state.ceiling(), 20);
}
