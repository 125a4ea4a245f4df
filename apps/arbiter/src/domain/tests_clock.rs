use crate::domain::clock::{ClockState, TickOutcome};
use crate::domain::state::Side;

#[test]
fn fresh_clock_is_stopped_with_full_time() {
    let clock = ClockState::new(600);
    assert!(!clock.is_running());
    assert_eq!(clock.remaining(Side::White), 600);
    assert_eq!(clock.remaining(Side::Black), 600);
    assert_eq!(clock.side_to_move(), Side::White);
}

#[test]
fn ticks_only_decrement_the_running_side() {
    let mut clock = ClockState::new(10);
    let generation = clock.start(Side::White);

    assert_eq!(
        clock.tick(generation),
        TickOutcome::Running { white: 9, black: 10 }
    );
    assert_eq!(
        clock.tick(generation),
        TickOutcome::Running { white: 8, black: 10 }
    );
    assert_eq!(clock.remaining(Side::Black), 10);
}

#[test]
fn switch_side_keeps_stored_remaining_time() {
    let mut clock = ClockState::new(10);
    let generation = clock.start(Side::White);
    clock.tick(generation);
    clock.tick(generation);

    let generation = clock.switch_side();
    assert_eq!(clock.side_to_move(), Side::Black);
    assert_eq!(
        clock.tick(generation),
        TickOutcome::Running { white: 8, black: 9 }
    );

    // Back to White: resumes at 8, not reset.
    let generation = clock.switch_side();
    assert_eq!(
        clock.tick(generation),
        TickOutcome::Running { white: 7, black: 9 }
    );
}

#[test]
fn stale_generation_tick_is_a_no_op() {
    let mut clock = ClockState::new(10);
    let old = clock.start(Side::White);
    let _new = clock.switch_side();

    assert_eq!(clock.tick(old), TickOutcome::Stale);
    assert_eq!(clock.remaining(Side::White), 10);
    assert_eq!(clock.remaining(Side::Black), 10);
}

#[test]
fn tick_while_stopped_is_a_no_op() {
    let mut clock = ClockState::new(10);
    let generation = clock.start(Side::White);
    clock.stop();

    assert_eq!(clock.tick(generation), TickOutcome::Stale);
    assert_eq!(clock.remaining(Side::White), 10);
}

#[test]
fn expiry_names_the_other_side_in_the_same_tick() {
    let mut clock = ClockState::new(2);
    let generation = clock.start(Side::Black);

    assert_eq!(
        clock.tick(generation),
        TickOutcome::Running { white: 2, black: 1 }
    );
    assert_eq!(
        clock.tick(generation),
        TickOutcome::Expired { winner: Side::White }
    );
    assert!(!clock.is_running());

    // No extra tick is granted and nothing moves after expiry.
    assert_eq!(clock.tick(generation), TickOutcome::Stale);
    assert_eq!(clock.remaining(Side::Black), 0);
    assert_eq!(clock.remaining(Side::White), 2);
}

#[test]
fn reset_restores_full_time_stopped() {
    let mut clock = ClockState::new(5);
    let generation = clock.start(Side::White);
    clock.tick(generation);
    clock.tick(generation);
    clock.reset();

    assert!(!clock.is_running());
    assert_eq!(clock.remaining(Side::White), 5);
    assert_eq!(clock.remaining(Side::Black), 5);
}
