//! Scoring tests - published values of the point, level and speed rules

use blockfall::core::{compute_speed, points_for_clear, should_level_up, ScoreState};
use blockfall::types::BASE_SPEED_MS;

#[test]
fn test_points_for_clear() {
    assert_eq!(points_for_clear(1, 1), 40);
    assert_eq!(points_for_clear(4, 3), 3600);
    assert_eq!(points_for_clear(2, 2), 200);
    assert_eq!(points_for_clear(3, 10), 3000);
}

#[test]
fn test_should_level_up() {
    assert!(should_level_up(10, 1));
    assert!(!should_level_up(9, 1));
    assert!(should_level_up(20, 2));
}

#[test]
fn test_speed_multiplier_is_linear() {
    for level in [1, 5, 12] {
        let neutral = compute_speed(BASE_SPEED_MS, 0.0, level);
        let slow = compute_speed(BASE_SPEED_MS, 1.0, level);
        let fast = compute_speed(BASE_SPEED_MS, -1.0, level);
        assert!((slow - neutral * 1.2).abs() < 1e-9);
        assert!((fast - neutral * 0.8).abs() < 1e-9);
    }
}

#[test]
fn test_initial_state() {
    let score = ScoreState::new(BASE_SPEED_MS, 0.0);
    assert_eq!(score.points(), 0);
    assert_eq!(score.cleared_rows(), 0);
    assert_eq!(score.level(), 1);
    assert_eq!(score.speed(), 1000.0);
}

#[test]
fn test_clears_accumulate_at_current_level() {
    let mut score = ScoreState::default();
    score.record_clear(4);
    score.record_clear(4);
    score.record_clear(2);
    assert!(score.check_level_up());
    assert_eq!(score.points(), 2500);
    // Level 2 now: a single is worth 80
    assert_eq!(score.record_clear(1), 80);
    assert_eq!(score.cleared_rows(), 11);
}
