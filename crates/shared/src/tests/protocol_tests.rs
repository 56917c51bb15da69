use chrono::TimeZone;

use crate::domain::{AdminId, ApplicationId, CandidateId, School};
use crate::protocol::*;

#[test]
fn school_json_expands_one_school_per_field() {
    let wire: SchoolJson = serde_json::from_str(r#"{"n":"Gymnasium X","f":["Math","CS"]}"#).unwrap();
    assert_eq!(
        wire.expand(),
        vec![
            School {
                name: "Gymnasium X".into(),
                field: "Math".into(),
            },
            School {
                name: "Gymnasium X".into(),
                field: "CS".into(),
            },
        ]
    );
}

#[test]
fn school_json_expand_is_lossless_for_empty_field_list() {
    let wire = SchoolJson {
        n: "Gymnasium X".into(),
        f: Vec::new(),
    };
    assert!(wire.expand().is_empty());
}

#[test]
fn base_candidate_default_matches_portal_initial_state() {
    let base = BaseCandidate::default();
    assert_eq!(base.current_application, ApplicationId(0));
    assert!(base.applications.is_empty());
    assert_eq!(base.personal_id_number, "");
    assert!(!base.details_filled);
    assert_eq!(base.encrypted_by, None);
}

#[test]
fn base_candidate_wire_keys_mix_camel_and_snake() {
    let json = serde_json::to_string(&BaseCandidate::default()).unwrap();
    assert_eq!(
        json,
        r#"{"currentApplication":0,"applications":[],"personal_id_number":"","detailsFilled":false}"#
    );

    let with_encryptor = BaseCandidate {
        encrypted_by: Some(AdminId(3)),
        ..BaseCandidate::default()
    };
    let json = serde_json::to_string(&with_encryptor).unwrap();
    assert!(json.ends_with(r#""encryptedBy":3}"#));
}

#[test]
fn candidate_data_default_is_fully_empty() {
    let data = CandidateData::default();
    assert_eq!(data.candidate.name, "");
    assert_eq!(data.candidate.birthdate, "");
    assert_eq!(data.candidate.test_language, "");
    assert!(data.candidate.grades.is_empty());
    assert_eq!(data.candidate.first_school, School::default());
    assert_eq!(data.candidate.second_school, School::default());
    assert!(data.parents.is_empty());
}

#[test]
fn candidate_details_keys_follow_the_form_contract() {
    let json = serde_json::to_value(CandidateDetails::default()).unwrap();
    let object = json.as_object().unwrap();
    for key in [
        "name",
        "surname",
        "birthSurname",
        "birthplace",
        "birthdate",
        "address",
        "letterAddress",
        "telephone",
        "citizenship",
        "email",
        "sex",
        "personal_id_number",
        "schoolName",
        "healthInsurance",
        "grades",
        "firstSchool",
        "secondSchool",
        "testLanguage",
    ] {
        assert!(object.contains_key(key), "missing wire key {key}");
    }
}

#[test]
fn candidate_details_birthdate_parses_when_well_formed() {
    let mut details = CandidateDetails::default();
    assert_eq!(details.birthdate_parsed(), None);

    details.birthdate = "2008-03-21".into();
    let parsed = details.birthdate_parsed().unwrap();
    assert_eq!(parsed.format(NAIVE_DATE_FMT).to_string(), "2008-03-21");

    details.birthdate = "21. 3. 2008".into();
    assert_eq!(details.birthdate_parsed(), None);
}

#[test]
fn candidate_data_round_trips_unchanged() {
    let mut data = CandidateData::default();
    data.candidate.name = "Jana".into();
    data.candidate.first_school = School {
        name: "ZŠ Kolín".into(),
        field: "Math".into(),
    };
    data.parents.push(ParentDetails {
        name: "Petr".into(),
        surname: "Novák".into(),
        telephone: "+420123456789".into(),
        email: "petr@example.com".into(),
    });

    let json = serde_json::to_string(&data).unwrap();
    let back: CandidateData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);
}

#[test]
fn candidate_login_uses_camel_case() {
    let login = CandidateLogin {
        application_id: ApplicationId(103_152),
        password: "hunter2".into(),
    };
    assert_eq!(
        serde_json::to_string(&login).unwrap(),
        r#"{"applicationId":103152,"password":"hunter2"}"#
    );
}

#[test]
fn create_candidate_login_always_starts_without_applications() {
    let payload = CreateCandidateLogin::new(ApplicationId(101_001), "0101011234", "G", "pw");
    assert!(payload.applications.is_empty());

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["applications"], serde_json::json!([]));
    assert_eq!(json["fieldOfStudy"], "G");
    assert_eq!(json["personal_id_number"], "0101011234");
}

#[test]
fn candidate_preview_tolerates_partial_rows() {
    let row: CandidatePreview =
        serde_json::from_str(r#"{"application_id":103152,"surname":"Nováková"}"#).unwrap();
    assert_eq!(row.application_id, Some(ApplicationId(103_152)));
    assert_eq!(row.surname.as_deref(), Some("Nováková"));
    assert_eq!(row.candidate_id, None);
    assert_eq!(row.created_at, None);

    // Absent fields do not reappear on serialize.
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"{"application_id":103152,"surname":"Nováková"}"#);
}

#[test]
fn candidate_preview_parses_rfc3339_created_at() {
    let row: CandidatePreview =
        serde_json::from_str(r#"{"candidate_id":7,"created_at":"2026-02-01T09:30:00Z"}"#).unwrap();
    assert_eq!(row.candidate_id, Some(CandidateId(7)));
    assert_eq!(
        row.created_at,
        Some(chrono::Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap())
    );
}

#[test]
fn whoami_response_flattens_base_candidate() {
    let response: NewCandidateResponse = serde_json::from_str(
        r#"{
            "currentApplication": 103152,
            "applications": [103152, 101152],
            "personal_id_number": "0553152345",
            "detailsFilled": true,
            "encryptedBy": 2,
            "fieldOfStudy": "KB"
        }"#,
    )
    .unwrap();

    assert_eq!(response.base.current_application, ApplicationId(103_152));
    assert_eq!(response.base.applications.len(), 2);
    assert!(response.base.details_filled);
    assert_eq!(response.base.encrypted_by, Some(AdminId(2)));
    assert_eq!(response.field_of_study, "KB");
}
