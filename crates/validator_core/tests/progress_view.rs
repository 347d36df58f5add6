use validator_core::{format_eta, ProgressView, StatusSnapshot, TaskStatus, PLACEHOLDER};

fn snapshot() -> StatusSnapshot {
    StatusSnapshot {
        status: TaskStatus::Running,
        ..StatusSnapshot::default()
    }
}

#[test]
fn eta_under_a_minute_renders_seconds() {
    assert_eq!(format_eta(Some(45.0)), "45 sec");
    assert_eq!(format_eta(Some(59.9)), "59 sec");
    assert_eq!(format_eta(Some(1.0)), "1 sec");
}

#[test]
fn eta_of_a_minute_or_more_renders_minutes_and_seconds() {
    assert_eq!(format_eta(Some(125.0)), "2 min 5 sec");
    assert_eq!(format_eta(Some(60.0)), "1 min 0 sec");
    assert_eq!(format_eta(Some(3599.0)), "59 min 59 sec");
}

#[test]
fn unknown_eta_renders_the_placeholder() {
    assert_eq!(format_eta(None), PLACEHOLDER);
    assert_eq!(format_eta(Some(0.0)), PLACEHOLDER);
    assert_eq!(format_eta(Some(-3.0)), PLACEHOLDER);
}

#[test]
fn zero_total_blanks_counts_and_percent_regardless_of_other_fields() {
    let view = ProgressView::from_snapshot(&StatusSnapshot {
        progress: 42.0,
        processed: 7,
        total: 0,
        ..snapshot()
    });

    assert_eq!(view.counts_label, PLACEHOLDER);
    assert_eq!(view.percent_label, PLACEHOLDER);
    // The raw percent still drives the bar width.
    assert_eq!(view.percent, 42.0);
}

#[test]
fn known_total_renders_counts_and_percent() {
    let view = ProgressView::from_snapshot(&StatusSnapshot {
        progress: 30.0,
        processed: 3,
        total: 10,
        ..snapshot()
    });

    assert_eq!(view.counts_label, "3 of 10");
    assert_eq!(view.percent_label, "30.0%");
}

#[test]
fn out_of_range_percent_passes_through_verbatim() {
    let view = ProgressView::from_snapshot(&StatusSnapshot {
        progress: 150.0,
        processed: 15,
        total: 10,
        ..snapshot()
    });

    assert_eq!(view.percent, 150.0);
    assert_eq!(view.percent_label, "150.0%");
}

#[test]
fn message_and_current_file_carry_over() {
    let view = ProgressView::from_snapshot(&StatusSnapshot {
        message: "processing list.csv".to_owned(),
        current_file: Some("list.csv".to_owned()),
        eta_seconds: Some(90.0),
        processed: 1,
        total: 2,
        progress: 50.0,
        ..snapshot()
    });

    assert_eq!(view.message, "processing list.csv");
    assert_eq!(view.current_file.as_deref(), Some("list.csv"));
    assert_eq!(view.eta_label, "1 min 30 sec");
}
