//! End-to-end lockstep runs built from config and input files.

use std::sync::atomic::Ordering;

use simwall_core::{AutomatonKind, GridError, Heading, Rgba, RuleError};
use simwall_engine::{
    Command, ConfigError, RestockConfig, SimulationClock, SimulationConfig, StepError,
};
use simwall_pattern::PatternError;
use simwall_test_utils::{ant_file, glider, pattern_file, temp_file, CountingRule, FailingRule};

fn seeded(kind: AutomatonKind, w: u32, h: u32) -> SimulationConfig {
    SimulationConfig {
        seed: Some(77),
        ..SimulationConfig::new(kind, w, h)
    }
}

// ── Patterns ────────────────────────────────────────────────────

#[test]
fn glider_pattern_travels_diagonally() {
    let file = pattern_file(&glider());
    let config = SimulationConfig {
        pattern_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::GameOfLife, 20, 20)
    };
    let mut clock = SimulationClock::new(config).unwrap();
    let start = clock.grid().clone();
    assert_eq!(start.get(9, 8), Some(1));

    for _ in 0..4 {
        clock.step().unwrap();
    }
    // Same shape, one cell down and right.
    for y in 0..19 {
        for x in 0..19 {
            assert_eq!(clock.grid().get(x + 1, y + 1), start.get(x, y), "({x}, {y})");
        }
    }
}

#[test]
fn pattern_larger_than_grid_is_rejected() {
    let file = temp_file("1111111\n");
    let config = SimulationConfig {
        pattern_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::GameOfLife, 5, 5)
    };
    assert!(matches!(
        SimulationClock::new(config),
        Err(ConfigError::Grid(GridError::PatternTooLarge { .. }))
    ));
}

#[test]
fn pattern_tags_must_suit_the_automaton() {
    let file = temp_file("012\n");
    let gol = SimulationConfig {
        pattern_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::GameOfLife, 5, 5)
    };
    assert!(matches!(
        SimulationClock::new(gol),
        Err(ConfigError::Grid(GridError::TagOutOfRange { value: 2, .. }))
    ));

    let bb = SimulationConfig {
        pattern_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::BriansBrain, 5, 5)
    };
    assert!(SimulationClock::new(bb).is_ok());
}

#[test]
fn missing_pattern_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimulationConfig {
        pattern_path: Some(dir.path().join("nope.txt")),
        ..seeded(AutomatonKind::Seeds, 5, 5)
    };
    assert!(matches!(
        SimulationClock::new(config),
        Err(ConfigError::Pattern(PatternError::Io { .. }))
    ));
}

#[test]
fn start_empty_ignores_pattern() {
    let file = pattern_file(&glider());
    let config = SimulationConfig {
        pattern_path: Some(file.path().to_path_buf()),
        restock: RestockConfig {
            start_empty: true,
            ..RestockConfig::default()
        },
        ..seeded(AutomatonKind::GameOfLife, 10, 10)
    };
    let clock = SimulationClock::new(config).unwrap();
    assert_eq!(clock.grid().count(1), 0);
}

// ── Determinism ─────────────────────────────────────────────────

#[test]
fn seeds_runs_replay_with_same_seed() {
    let run = || {
        let mut clock = SimulationClock::new(seeded(AutomatonKind::Seeds, 40, 30)).unwrap();
        let mut history = Vec::new();
        for _ in 0..250 {
            history.push(clock.step().unwrap().frame.grid.clone());
        }
        (history, clock.restock_state())
    };
    let (a, state_a) = run();
    let (b, state_b) = run();
    assert_eq!(a, b);
    assert_eq!(state_a, state_b);
    // Two full Seeds periods fit in 250 ticks.
    assert_eq!(state_a.restocks, 2);
}

#[test]
fn seed_is_reported() {
    let clock = SimulationClock::new(seeded(AutomatonKind::GameOfLife, 8, 8)).unwrap();
    assert_eq!(clock.seed(), 77);
}

// ── Langton's Ant ───────────────────────────────────────────────

#[test]
fn ant_file_drives_multiple_ants() {
    let file = ant_file("RLR", &[(2, 2, 0), (7, 7, 2)]);
    let config = SimulationConfig {
        ant_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::LangtonsAnt, 10, 10)
    };
    let mut clock = SimulationClock::new(config).unwrap();
    assert_eq!(clock.rule().state_count(), 3);
    assert_eq!(clock.frame().palette.len(), 3);

    clock.step().unwrap();
    let ants = clock.agents().as_slice();
    assert_eq!((ants[0].x, ants[0].y, ants[0].heading), (3, 2, Heading::Right));
    assert_eq!((ants[1].x, ants[1].y, ants[1].heading), (6, 7, Heading::Left));
    assert_eq!(clock.grid().get(2, 2), Some(1));
    assert_eq!(clock.grid().get(7, 7), Some(1));
    assert_eq!(clock.frame().color_at(3, 2), Some(Rgba::RED));
}

#[test]
fn ant_off_the_grid_fails_startup() {
    let file = ant_file("RL", &[(1, 1, 0), (10, 3, 0)]);
    let config = SimulationConfig {
        ant_path: Some(file.path().to_path_buf()),
        ..seeded(AutomatonKind::LangtonsAnt, 10, 10)
    };
    assert!(matches!(
        SimulationClock::new(config),
        Err(ConfigError::Agents(RuleError::AgentOutOfBounds { index: 1, .. }))
    ));
}

#[test]
fn bad_default_ruleset_fails_startup() {
    let config = SimulationConfig {
        ant_rules: "RXL".into(),
        ..seeded(AutomatonKind::LangtonsAnt, 10, 10)
    };
    assert!(matches!(
        SimulationClock::new(config),
        Err(ConfigError::Ruleset(_))
    ));
}

#[test]
fn ant_board_is_never_restocked() {
    let mut clock = SimulationClock::new(seeded(AutomatonKind::LangtonsAnt, 16, 16)).unwrap();
    for _ in 0..400 {
        assert!(clock.step().unwrap().restocked.is_none());
    }
    assert_eq!(clock.restock_state().restocks, 0);
    clock.apply(Command::Restock).unwrap();
    assert_eq!(clock.restock_state().restocks, 0);
}

// ── Custom rules ────────────────────────────────────────────────

#[test]
fn custom_rule_is_called_once_per_unpaused_tick() {
    let (rule, calls) = CountingRule::with_counter();
    let mut clock =
        SimulationClock::with_rule(seeded(AutomatonKind::GameOfLife, 6, 6), Box::new(rule))
            .unwrap();
    clock.step().unwrap();
    clock.apply(Command::Pause).unwrap();
    clock.step().unwrap();
    clock.apply(Command::Resume).unwrap();
    clock.step().unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn rule_failure_leaves_state_untouched() {
    let mut clock = SimulationClock::with_rule(
        seeded(AutomatonKind::GameOfLife, 6, 6),
        Box::new(FailingRule::new(2)),
    )
    .unwrap();
    clock.step().unwrap();
    clock.step().unwrap();
    let before = clock.grid().clone();

    let err = clock.step().unwrap_err();
    assert!(matches!(
        err,
        StepError::RuleFailed { ref rule, source: RuleError::InvalidGrid(_) } if rule == "failing"
    ));
    assert_eq!(clock.tick_count(), 2);
    assert_eq!(clock.grid(), &before);
}

#[test]
fn resizing_rule_is_caught() {
    let mut clock = SimulationClock::with_rule(
        seeded(AutomatonKind::GameOfLife, 6, 6),
        Box::new(simwall_test_utils::ResizingRule),
    )
    .unwrap();
    assert!(matches!(
        clock.step(),
        Err(StepError::RuleFailed {
            source: RuleError::DimensionsChanged { .. },
            ..
        })
    ));
}
