//! Scheduler tests: play/pause, speed cycling and deadline handling.

use empire_core::{
    config::SchedulerConfig,
    scheduler::{PlayState, Scheduler},
};

#[test]
fn starts_paused_at_normal_speed() {
    let s = Scheduler::default();
    assert_eq!(s.state(), PlayState::Paused);
    assert_eq!(s.speed(), 1);
    assert_eq!(s.interval_ms(), 3_000);
    assert_eq!(s.next_due(), None);
    assert!(s.allows_manual_step());
}

#[test]
fn speed_cycles_one_two_four() {
    let mut s = Scheduler::default();
    let mut seen = vec![s.speed()];
    let mut intervals = vec![s.interval_ms()];
    for _ in 0..3 {
        seen.push(s.cycle_speed(0));
        intervals.push(s.interval_ms());
    }
    assert_eq!(seen, vec![1, 2, 4, 1]);
    assert_eq!(intervals, vec![3_000, 1_500, 750, 3_000]);
}

#[test]
fn playing_fires_once_per_interval() {
    let mut s = Scheduler::default();
    s.play(0);
    assert!(!s.allows_manual_step());
    assert!(!s.poll(2_999));
    assert!(s.poll(3_000));
    assert!(!s.poll(3_001));
    assert!(s.poll(6_000));
    assert_eq!(s.time_until_due(7_000), Some(2_000));
}

#[test]
fn pausing_at_speed_two_stops_everything() {
    let mut s = Scheduler::default();
    s.cycle_speed(0);
    s.play(0);
    assert_eq!(s.speed(), 2);
    assert!(s.poll(1_500));

    // Pause just before the next deadline.
    s.pause();
    assert_eq!(s.state(), PlayState::Paused);
    assert_eq!(s.time_until_due(2_999), None);
    for t in [2_999, 3_000, 3_001, 60_000, 1_000_000] {
        assert!(!s.poll(t), "poll fired at {t} after pause");
    }
}

#[test]
fn speed_change_keeps_play_state() {
    let mut s = Scheduler::default();
    s.cycle_speed(100);
    assert_eq!(s.state(), PlayState::Paused);
    assert_eq!(s.next_due(), None);

    s.play(1_000);
    assert_eq!(s.next_due(), Some(2_500));
    s.cycle_speed(2_000);
    assert_eq!(s.state(), PlayState::Playing);
    // Re-armed from the change at the 4x interval.
    assert_eq!(s.next_due(), Some(2_750));
}

#[test]
fn toggle_flips_state() {
    let mut s = Scheduler::default();
    assert_eq!(s.toggle(0), PlayState::Playing);
    assert_eq!(s.toggle(10), PlayState::Paused);
    assert_eq!(s.toggle(20), PlayState::Playing);
    assert_eq!(s.next_due(), Some(3_020));
}

#[test]
fn play_while_playing_keeps_the_deadline() {
    let mut s = Scheduler::default();
    s.play(0);
    s.play(2_000);
    assert_eq!(s.next_due(), Some(3_000));
}

#[test]
fn missed_deadlines_are_dropped_not_replayed() {
    let mut s = Scheduler::default();
    s.play(0);
    assert!(s.poll(10_000));
    assert!(!s.poll(10_000));
    assert_eq!(s.next_due(), Some(13_000));
}

#[test]
fn custom_speeds_and_interval() {
    let mut s = Scheduler::new(SchedulerConfig {
        base_interval_ms: 1_000,
        speeds: vec![1, 10],
    });
    assert_eq!(s.interval_ms(), 1_000);
    assert_eq!(s.cycle_speed(0), 10);
    assert_eq!(s.interval_ms(), 100);
    assert_eq!(s.cycle_speed(0), 1);
}
