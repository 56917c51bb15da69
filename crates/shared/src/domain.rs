use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i32);
    };
}

id_newtype!(ApplicationId);
id_newtype!(CandidateId);
id_newtype!(AdminId);

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unknown field of study: {0}")]
    UnknownFieldOfStudy(String),
    #[error("application id {0} does not map to a field of study")]
    UnknownFieldOfStudyId(i32),
    #[error("unknown semester: {0}")]
    UnknownSemester(String),
}

/// A prior school attended by the candidate, with the field studied there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub name: String,
    pub field: String,
}

/// Study programmes the portal admits into. The numeric application-id
/// prefix (101/102/103) and the official programme labels both map here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOfStudy {
    G,
    IT,
    KB,
}

impl FieldOfStudy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::G => "G",
            Self::IT => "IT",
            Self::KB => "KB",
        }
    }

    pub fn id_prefix(&self) -> i32 {
        match self {
            Self::G => 101,
            Self::IT => 102,
            Self::KB => 103,
        }
    }
}

impl TryFrom<ApplicationId> for FieldOfStudy {
    type Error = DomainError;

    fn try_from(id: ApplicationId) -> Result<Self, Self::Error> {
        match id.0 / 1000 {
            101 => Ok(Self::G),
            102 => Ok(Self::IT),
            103 => Ok(Self::KB),
            _ => Err(DomainError::UnknownFieldOfStudyId(id.0)),
        }
    }
}

impl TryFrom<&str> for FieldOfStudy {
    type Error = DomainError;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        match label {
            "7941K41-Gymnázium" => Ok(Self::G),
            "1820M01-Informační technologie" => Ok(Self::IT),
            "1820M01-Informační technologie - Kybernetická bezpečnost" => Ok(Self::KB),
            _ => Err(DomainError::UnknownFieldOfStudy(label.to_string())),
        }
    }
}

/// Semesters a grade can be reported for: half-years of the 8th and 9th class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    #[serde(rename = "1/8")]
    FirstEighth,
    #[serde(rename = "2/8")]
    SecondEighth,
    #[serde(rename = "1/9")]
    FirstNinth,
    #[serde(rename = "2/9")]
    SecondNinth,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstEighth => "1/8",
            Self::SecondEighth => "2/8",
            Self::FirstNinth => "1/9",
            Self::SecondNinth => "2/9",
        }
    }
}

impl std::str::FromStr for Semester {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1/8" => Ok(Self::FirstEighth),
            "2/8" => Ok(Self::SecondEighth),
            "1/9" => Ok(Self::FirstNinth),
            "2/9" => Ok(Self::SecondNinth),
            _ => Err(DomainError::UnknownSemester(s.to_string())),
        }
    }
}

/// One report-card entry from the candidate's prior school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub subject: String,
    pub semester: Semester,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeList(pub Vec<Grade>);

impl GradeList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Splits the list into the four reported semesters, in order.
    pub fn group_by_semester(&self) -> (GradeList, GradeList, GradeList, GradeList) {
        let mut first = GradeList::default();
        let mut second = GradeList::default();
        let mut third = GradeList::default();
        let mut fourth = GradeList::default();

        for grade in &self.0 {
            match grade.semester {
                Semester::FirstEighth => first.0.push(grade.clone()),
                Semester::SecondEighth => second.0.push(grade.clone()),
                Semester::FirstNinth => third.0.push(grade.clone()),
                Semester::SecondNinth => fourth.0.push(grade.clone()),
            }
        }

        (first, second, third, fourth)
    }
}

impl From<Vec<Grade>> for GradeList {
    fn from(grades: Vec<Grade>) -> Self {
        Self(grades)
    }
}
