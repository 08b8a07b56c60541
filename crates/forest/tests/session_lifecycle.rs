use std::rc::Rc;
use std::time::Duration;

use forest::prelude::*;

fn store() -> FocusForest {
    let config = ForestConfig {
        language: "en".into(),
        ..ForestConfig::default()
    };
    FocusForest::with_parts(
        &config,
        Rc::new(ManualClock::new(1_700_000_000_000)),
        bundled_catalog(),
    )
    .unwrap()
}

#[test]
fn blank_task_labels_are_rejected_without_side_effects() {
    let app = store();
    for label in ["", "   "] {
        assert_eq!(
            app.start_session(label),
            Err(FocusError::Validation(ValidationError::EmptyTask))
        );
        assert_eq!(app.session_status(), SessionStatus::Idle);
        assert_eq!(app.elapsed_seconds(), 0);
    }
}

#[test]
fn five_ticks_read_as_five_seconds() {
    let app = store();
    app.start_session("Read paper").unwrap();
    assert_eq!(app.session_status(), SessionStatus::Running);
    for _ in 0..5 {
        assert!(app.tick());
    }
    assert_eq!(app.elapsed_seconds(), 5);
    assert_eq!(app.formatted_time(), "00:00:05");
}

#[test]
fn finishing_plants_exactly_one_tree_and_resets() {
    let app = store();
    let before = app.forest_count();
    app.start_session("Read paper").unwrap();
    let entry = app.finish_session().unwrap();

    assert_eq!(app.forest_count(), before + 1);
    assert_eq!(entry.task_label(), "Read paper");
    assert_eq!(app.forest().last(), Some(&entry));
    assert_eq!(app.session_status(), SessionStatus::Idle);
    assert_eq!(app.elapsed_seconds(), 0);
    assert_eq!(app.task_label(), "");
}

#[test]
fn finishing_while_idle_is_rejected() {
    let app = store();
    assert_eq!(
        app.finish_session(),
        Err(FocusError::Transition(TransitionError::NotRunning))
    );
    assert_eq!(app.forest_count(), 0);
}

#[test]
fn starting_twice_is_rejected() {
    let app = store();
    app.start_session("one").unwrap();
    assert_eq!(
        app.start_session("two"),
        Err(FocusError::Transition(TransitionError::AlreadyRunning))
    );
    assert_eq!(app.task_label(), "one");
}

#[test]
fn stale_tick_fired_after_finish_changes_nothing() {
    let app = store();
    app.start_session("Read paper").unwrap();
    let in_flight = app.schedule_tick().unwrap();
    app.finish_session().unwrap();

    assert!(!in_flight.fire());
    assert_eq!(app.session_status(), SessionStatus::Idle);
    assert_eq!(app.elapsed_seconds(), 0);
}

#[test]
fn host_driven_cadence_counts_elapsed_seconds() {
    let app = store();
    let start = Instant::now();
    app.start_session_at("Deep work", start).unwrap();
    assert_eq!(app.advance_to(start + Duration::from_secs(61)), 61);
    assert_eq!(app.formatted_time(), "00:01:01");
    app.finish_session().unwrap();
    assert_eq!(app.advance_to(start + Duration::from_secs(120)), 0);
}

#[test]
fn sequence_ids_increase_across_sessions() {
    let app = store();
    for task in ["a", "b", "c", "d"] {
        app.start_session(task).unwrap();
        app.finish_session().unwrap();
    }
    let ids: Vec<u64> = app.forest().iter().map(CompletedEntry::sequence_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn task_label_is_locked_while_running() {
    let app = store();
    app.edit_task_label("Draft chapter").unwrap();
    app.start_session(&app.task_label()).unwrap();
    assert_eq!(
        app.edit_task_label("something else"),
        Err(FocusError::Transition(TransitionError::LabelLocked))
    );
    app.finish_session().unwrap();
    app.edit_task_label("next").unwrap();
    assert_eq!(app.task_label(), "next");
}
