use std::path::PathBuf;

use validator_core::{
    update, AppState, Effect, LifecycleEvent, Msg, Severity, MSG_UNSUPPORTED_FORMAT,
};

fn choose(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            path: PathBuf::from(name),
        },
    )
}

#[test]
fn accepts_allowed_extensions_case_insensitively() {
    for name in ["emails.xlsx", "emails.XLSX", "old.xls", "list.csv", "a.CsV"] {
        let (mut state, effects) = choose(AppState::default(), name);
        let view = state.view();

        assert!(view.can_submit, "expected {name} to be accepted");
        assert_eq!(view.selected_file.as_deref(), Some(name));
        assert_eq!(
            effects,
            vec![Effect::Notify(LifecycleEvent::FileAccepted {
                name: name.to_owned(),
            })]
        );
        assert!(state.consume_dirty());
    }
}

#[test]
fn rejects_unknown_extensions_and_keeps_previous_selection() {
    let (state, _effects) = choose(AppState::default(), "emails.xlsx");

    for name in ["notes.pdf", "emails.txt", "noextension", "archive.xlsx.zip"] {
        let (state, effects) = choose(state.clone(), name);
        let view = state.view();

        assert!(effects.is_empty(), "{name} must produce no effects");
        assert_eq!(view.selected_file.as_deref(), Some("emails.xlsx"));
        assert!(view.can_submit);
        let notice = view.notice.expect("rejection surfaces a notice");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.text, MSG_UNSUPPORTED_FORMAT);
    }
}

#[test]
fn rejection_without_prior_selection_leaves_submit_disabled() {
    let (state, effects) = choose(AppState::default(), "report.docx");
    let view = state.view();

    assert!(effects.is_empty());
    assert!(!view.can_submit);
    assert!(view.selected_file.is_none());
}

#[test]
fn clearing_disables_submission() {
    let (state, _effects) = choose(AppState::default(), "emails.csv");
    assert!(state.view().can_submit);

    let (state, effects) = update(state, Msg::FileCleared);

    assert!(effects.is_empty());
    assert!(!state.view().can_submit);
    assert!(state.view().selected_file.is_none());
}

#[test]
fn submit_without_accepted_file_is_defensively_blocked() {
    let (state, effects) = update(AppState::default(), Msg::SubmitClicked);
    let view = state.view();

    assert!(effects.is_empty());
    let notice = view.notice.expect("defensive check surfaces a notice");
    assert_eq!(notice.severity, Severity::Error);
}
