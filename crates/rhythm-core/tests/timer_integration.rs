//! Integration tests for nudge timers driven through the session.

use chrono::NaiveDate;
use proptest::prelude::*;
use rhythm_core::{Command, Dispatcher, Event, NudgeTimer, Session, TimerState};

fn started(duration_secs: u32) -> Dispatcher {
    let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
    let mut dispatcher = Dispatcher::new(Session::new(today));
    dispatcher.dispatch_all([
        Command::CompleteOnboarding {
            focus: "seasonal".into(),
        },
        Command::CompleteConsent,
        Command::StartTimer {
            duration_secs,
            action_id: None,
        },
    ]);
    dispatcher
}

fn scheduled_tick(dispatcher: &Dispatcher) -> Command {
    Command::Tick {
        run_id: dispatcher.session().timer_run(),
    }
}

#[test]
fn five_minute_nudge_completes_once() {
    let mut dispatcher = started(300);
    let mut completions = 0;
    for _ in 0..300 {
        let tick = scheduled_tick(&dispatcher);
        completions += dispatcher
            .dispatch(tick)
            .iter()
            .filter(|e| matches!(e, Event::TimerCompleted { .. }))
            .count();
    }
    assert_eq!(completions, 1);
    let timer = dispatcher.session().timer().unwrap();
    assert_eq!(timer.state(), TimerState::Completed);

    dispatcher.dispatch(Command::DismissTimer);
    let timer = dispatcher.session().timer().unwrap();
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.remaining_secs(), 300);
}

#[test]
fn pause_after_ten_ticks_resumes_from_290() {
    let mut dispatcher = started(300);
    for _ in 0..10 {
        let tick = scheduled_tick(&dispatcher);
        dispatcher.dispatch(tick);
    }
    dispatcher.dispatch(Command::PauseTimer);
    let events = dispatcher.dispatch(Command::StartTimer {
        duration_secs: 300,
        action_id: None,
    });
    assert!(matches!(
        events.as_slice(),
        [Event::TimerStarted {
            remaining_secs: 290,
            ..
        }]
    ));
    assert_eq!(dispatcher.session().timer().unwrap().remaining_secs(), 290);
}

#[test]
fn tick_scheduled_before_pause_is_dropped() {
    let mut dispatcher = started(120);
    let pending = scheduled_tick(&dispatcher);
    dispatcher.dispatch(Command::PauseTimer);
    dispatcher.dispatch(Command::StartTimer {
        duration_secs: 120,
        action_id: None,
    });
    dispatcher.dispatch(pending);
    assert_eq!(dispatcher.session().timer().unwrap().remaining_secs(), 120);
}

#[test]
fn dismiss_while_running_emits_dismissed_not_completed() {
    let mut dispatcher = started(60);
    let tick = scheduled_tick(&dispatcher);
    dispatcher.dispatch(tick);
    let events = dispatcher.dispatch(Command::DismissTimer);
    assert!(matches!(
        events.as_slice(),
        [Event::TimerDismissed {
            duration_secs: 60,
            ..
        }]
    ));
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Dismiss,
    Tick,
    StaleTick,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Dismiss),
        4 => Just(Op::Tick),
        1 => Just(Op::StaleTick),
    ]
}

proptest! {
    #[test]
    fn remaining_never_increases_while_running(
        duration in 1u32..30,
        ops in prop::collection::vec(arb_op(), 0..80),
    ) {
        let mut timer = NudgeTimer::new(duration).unwrap();
        let mut last_seen_run = None;
        for op in ops {
            let before = timer.remaining_secs();
            let was_running = timer.state() == TimerState::Running;
            let restarted = matches!(op, Op::Dismiss);
            match op {
                Op::Start => {
                    timer.start();
                }
                Op::Pause => {
                    timer.pause();
                }
                Op::Dismiss => {
                    timer.dismiss();
                }
                Op::Tick => {
                    if let Some(run) = timer.run_id() {
                        timer.tick(run);
                    }
                }
                Op::StaleTick => {
                    if let Some(run) = last_seen_run {
                        if Some(run) != timer.run_id() {
                            timer.tick(run);
                            prop_assert_eq!(timer.remaining_secs(), before);
                        }
                    }
                }
            }
            if let Some(run) = timer.run_id() {
                last_seen_run = Some(run);
            }
            if was_running && !restarted {
                prop_assert!(timer.remaining_secs() <= before);
            }
            prop_assert!(timer.remaining_secs() <= timer.duration_secs());
            if timer.state() == TimerState::Completed {
                prop_assert_eq!(timer.remaining_secs(), 0);
            }
        }
    }

    #[test]
    fn completion_fires_once_per_run(duration in 1u32..50, extra in 0u32..20) {
        let mut timer = NudgeTimer::new(duration).unwrap();
        timer.start();
        let run = timer.run_id().unwrap();
        let completions = (0..duration + extra).filter_map(|_| timer.tick(run)).count();
        prop_assert_eq!(completions, 1);
    }
}
