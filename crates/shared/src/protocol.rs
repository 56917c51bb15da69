use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AdminId, ApplicationId, CandidateId, GradeList, School};

/// Date format the portal uses for birthdates on the wire.
pub const NAIVE_DATE_FMT: &str = "%Y-%m-%d";

/// Abbreviated school record as emitted by the school-register feed. One
/// entry carries the school name and every field of study it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolJson {
    pub n: String,
    pub f: Vec<String>,
}

impl SchoolJson {
    /// Expands into one `School` per offered field, preserving the name.
    pub fn expand(&self) -> Vec<School> {
        self.f
            .iter()
            .map(|field| School {
                name: self.n.clone(),
                field: field.clone(),
            })
            .collect()
    }
}

/// Personal identity section of the application form. Every field starts
/// empty and is only as filled-in as the candidate left it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetails {
    pub name: String,
    pub surname: String,
    pub birth_surname: String,
    pub birthplace: String,
    pub birthdate: String,
    pub address: String,
    pub letter_address: String,
    pub telephone: String,
    pub citizenship: String,
    pub email: String,
    pub sex: String,
    #[serde(rename = "personal_id_number")]
    pub personal_id_number: String,
    pub school_name: String,
    pub health_insurance: String,
    pub grades: GradeList,
    pub first_school: School,
    pub second_school: School,
    pub test_language: String,
}

impl CandidateDetails {
    /// Birthdate is carried as a form string; parses it when well-formed.
    pub fn birthdate_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.birthdate, NAIVE_DATE_FMT).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDetails {
    pub name: String,
    pub surname: String,
    pub telephone: String,
    pub email: String,
}

/// The whole application form: the candidate section plus any number of
/// guardian records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateData {
    pub candidate: CandidateDetails,
    pub parents: Vec<ParentDetails>,
}

/// Overall application state of a logged-in candidate: which application is
/// active, every application they hold, and whether details were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCandidate {
    pub current_application: ApplicationId,
    pub applications: Vec<ApplicationId>,
    #[serde(rename = "personal_id_number")]
    pub personal_id_number: String,
    pub details_filled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_by: Option<AdminId>,
}

impl Default for BaseCandidate {
    fn default() -> Self {
        Self {
            current_application: ApplicationId(0),
            applications: Vec::new(),
            personal_id_number: String::new(),
            details_filled: false,
            encrypted_by: None,
        }
    }
}

/// `whoami` payload: the base candidate state plus the field of study the
/// current application belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidateResponse {
    #[serde(flatten)]
    pub base: BaseCandidate,
    pub field_of_study: String,
}

/// Listing projection returned by the admin candidate search. Every field is
/// optional; rows are as denormalized as the query left them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePreview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<CandidateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_applications: Option<Vec<ApplicationId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Credential pair a candidate signs in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLogin {
    pub application_id: ApplicationId,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLogin {
    pub admin_id: AdminId,
    pub password: String,
}

/// Minimal identity needed to register a new candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidate {
    pub application_id: ApplicationId,
    pub personal_id_number: String,
}

/// Admin-side response to candidate creation, including the one-time
/// generated password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateResponse {
    pub application_id: ApplicationId,
    pub field_of_study: String,
    pub applications: Vec<ApplicationId>,
    #[serde(rename = "personal_id_number")]
    pub personal_id_number: String,
    pub password: String,
}

impl CreateCandidateResponse {
    /// Builds the login-provisioning payload for this freshly created record.
    /// Related applications are linked later; the payload starts without any.
    pub fn login_payload(&self) -> CreateCandidateLogin {
        CreateCandidateLogin::new(
            self.application_id,
            self.personal_id_number.clone(),
            self.field_of_study.clone(),
            self.password.clone(),
        )
    }
}

/// Payload to provision a candidate login. Related applications are linked
/// server-side later; the list always starts empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateLogin {
    pub application_id: ApplicationId,
    #[serde(rename = "personal_id_number")]
    pub personal_id_number: String,
    pub applications: Vec<ApplicationId>,
    pub field_of_study: String,
    pub password: String,
}

impl CreateCandidateLogin {
    pub fn new(
        application_id: ApplicationId,
        personal_id_number: impl Into<String>,
        field_of_study: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            application_id,
            personal_id_number: personal_id_number.into(),
            applications: Vec::new(),
            field_of_study: field_of_study.into(),
            password: password.into(),
        }
    }
}
