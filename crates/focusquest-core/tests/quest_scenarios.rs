//! End-to-end quest scenarios driving the public API the way the
//! presentation layer does: one tick per simulated second, coordination
//! through `Quest`.

use focusquest_core::{
    CompanionProfile, Durations, Event, Quest, TimerMode, TimerState,
};

fn quest() -> Quest {
    let mut q = Quest::new(Durations::default(), CompanionProfile::default());
    q.seed_messages(99);
    q
}

#[test]
fn full_pomodoro_session_chains_into_break() {
    let mut q = quest();
    q.start().unwrap();

    let mut completion = None;
    for _ in 0..1500 {
        if let Some(done) = q.tick() {
            completion = Some(done);
        }
    }

    let (event, _message) = completion.expect("1500 ticks complete a 25-minute session");
    match event {
        Event::SessionCompleted {
            mode,
            completed_cycles,
            ..
        } => {
            assert_eq!(mode, TimerMode::Pomodoro);
            assert_eq!(completed_cycles, 1);
        }
        other => panic!("expected SessionCompleted, got {other:?}"),
    }
    assert_eq!(q.engine().state(), TimerState::Completed);

    // Grace period elapses, the presentation layer re-arms.
    q.rearm().expect("completed session re-arms");
    assert_eq!(q.engine().mode(), TimerMode::Break);
    assert_eq!(q.engine().state(), TimerState::Idle);
    assert_eq!(q.engine().remaining_secs(), 300);
}

#[test]
fn break_chains_back_and_cycles_accumulate() {
    let mut q = quest();

    for expected_cycles in 1..=3u32 {
        q.start().unwrap();
        for _ in 0..q.engine().total_secs() {
            q.tick();
        }
        assert_eq!(q.engine().completed_cycles(), expected_cycles);
        q.rearm().unwrap();
        assert_eq!(q.engine().mode(), TimerMode::Break);

        q.start().unwrap();
        for _ in 0..q.engine().total_secs() {
            q.tick();
        }
        // Break completions never touch the tally.
        assert_eq!(q.engine().completed_cycles(), expected_cycles);
        q.rearm().unwrap();
        assert_eq!(q.engine().mode(), TimerMode::Pomodoro);
    }
}

#[test]
fn treasure_hunt_scenario() {
    let mut q = quest();
    let id = q.add_treasure("Reply to emails").unwrap();
    q.start_treasure_hunt(&id, 120).unwrap();
    q.start().unwrap();

    let mut completed = false;
    for _ in 0..120 {
        if q.tick().is_some() {
            completed = true;
        }
    }
    assert!(completed, "120 ticks complete a 120-second hunt");
    assert_eq!(q.engine().state(), TimerState::Completed);

    let (_, message) = q.complete_active_treasure().unwrap();
    assert!(!message.is_empty());

    let treasure = q
        .ledger()
        .treasures()
        .iter()
        .find(|t| t.id == id)
        .expect("treasure still owned by the ledger");
    assert_eq!(treasure.sessions_spent, 1);
    assert!(treasure.is_completed);
    assert!(q.active_treasure().is_none());
    assert_eq!(q.ledger().active_treasures().count(), 0);
    assert_eq!(q.ledger().completed_treasures().count(), 1);

    assert_eq!(q.engine().mode(), TimerMode::Pomodoro);
    assert_eq!(q.engine().state(), TimerState::Idle);
}

#[test]
fn pause_freezes_time_and_resume_continues() {
    let mut q = quest();
    q.switch_mode(TimerMode::Custom, Some(10)).unwrap();
    q.start().unwrap();
    q.tick();
    q.tick();
    q.pause().unwrap();

    // A stopped ticker never advances a paused session.
    for _ in 0..50 {
        assert!(q.tick().is_none());
    }
    assert_eq!(q.engine().remaining_secs(), 8);

    q.start().unwrap();
    for _ in 0..8 {
        q.tick();
    }
    assert_eq!(q.engine().state(), TimerState::Completed);
}

#[test]
fn dropping_the_tick_source_corrupts_nothing() {
    let mut q = quest();
    q.start().unwrap();
    q.tick();
    q.tick();
    let frozen = q.engine().remaining_secs();

    // Teardown: the ticker simply stops firing. State stays coherent
    // and the session resumes from exactly where it stopped.
    assert_eq!(q.engine().remaining_secs(), frozen);
    assert_eq!(q.engine().state(), TimerState::Running);
    q.pause().unwrap();
    q.start().unwrap();
    q.tick();
    assert_eq!(q.engine().remaining_secs(), frozen - 1);
}

#[test]
fn mode_switch_mid_run_discards_progress() {
    let mut q = quest();
    q.start().unwrap();
    for _ in 0..100 {
        q.tick();
    }
    q.switch_mode(TimerMode::Quickwin, None).unwrap();
    assert_eq!(q.engine().state(), TimerState::Idle);
    assert_eq!(q.engine().remaining_secs(), 120);
    assert_eq!(q.engine().total_secs(), 120);
    // The cycle tally survives mode switches within the process.
    assert_eq!(q.engine().completed_cycles(), 0);
}
