use shared::domain::ApplicationId;
use shared::protocol::{BaseCandidate, CandidateData};

use crate::state::{CandidateState, Store};

#[test]
fn base_container_starts_with_empty_candidate() {
    let state = CandidateState::default();
    let base = state.base.get();
    assert_eq!(base.current_application, ApplicationId(0));
    assert!(base.applications.is_empty());
    assert_eq!(base.personal_id_number, "");
    assert!(!base.details_filled);
    assert_eq!(base.encrypted_by, None);
}

#[test]
fn details_container_starts_with_empty_form() {
    let state = CandidateState::default();
    assert_eq!(state.details.get(), CandidateData::default());
}

#[test]
fn set_then_get_returns_the_exact_value() {
    let store = Store::new(BaseCandidate::default());
    let written = BaseCandidate {
        current_application: ApplicationId(103_152),
        applications: vec![ApplicationId(103_152), ApplicationId(101_152)],
        personal_id_number: "0553152345".into(),
        details_filled: true,
        encrypted_by: None,
    };

    store.set(written.clone());
    assert_eq!(store.get(), written);
}

#[test]
fn last_write_wins() {
    let store = Store::new(0u32);
    store.set(1);
    store.set(2);
    assert_eq!(store.get(), 2);
}

#[test]
fn update_mutates_in_place() {
    let store = Store::new(CandidateData::default());
    store.update(|data| data.candidate.name = "Jana".into());
    assert_eq!(store.get().candidate.name, "Jana");
}

#[tokio::test]
async fn subscribers_observe_replacements() {
    let store = Store::new(BaseCandidate::default());
    let mut rx = store.subscribe();

    store.set(BaseCandidate {
        details_filled: true,
        ..BaseCandidate::default()
    });

    rx.changed().await.unwrap();
    assert!(rx.borrow().details_filled);
}

#[tokio::test]
async fn reset_restores_defaults_and_notifies() {
    let state = CandidateState::default();
    let mut base_rx = state.base.subscribe();

    state.base.update(|base| {
        base.current_application = ApplicationId(102_001);
        base.details_filled = true;
    });
    base_rx.changed().await.unwrap();

    state.reset();
    base_rx.changed().await.unwrap();
    assert_eq!(state.base.get(), BaseCandidate::default());
    assert_eq!(state.details.get(), CandidateData::default());
}

#[test]
fn stores_work_without_any_subscriber() {
    let store = Store::new(CandidateData::default());
    drop(store.subscribe());
    store.set(CandidateData::default());
    assert_eq!(store.get(), CandidateData::default());
}
