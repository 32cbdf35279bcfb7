use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workflows::jobs::JobId;
use crate::workflows::validation::{ErrorMap, FieldSpec, Payload, Rule, Schema};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const JOB_TITLE_FALLBACK: &str = "Job Title Not Available";

/// Stored resume reference: fixed at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRef {
    pub url: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
}

/// A submitted application as returned by the application collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume: ResumeRef,
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl Application {
    pub fn job_title(&self) -> &str {
        self.job_title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(JOB_TITLE_FALLBACK)
    }
}

/// A file picked locally for upload as a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFile {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size: content.len() as u64,
            content,
        }
    }
}

/// Text inputs of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationField {
    Name,
    Email,
    Phone,
    Address,
    CoverLetter,
}

impl ApplicationField {
    pub const ALL: [ApplicationField; 5] = [
        ApplicationField::Name,
        ApplicationField::Email,
        ApplicationField::Phone,
        ApplicationField::Address,
        ApplicationField::CoverLetter,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ApplicationField::Name => "name",
            ApplicationField::Email => "email",
            ApplicationField::Phone => "phone",
            ApplicationField::Address => "address",
            ApplicationField::CoverLetter => "coverLetter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Name of the attachment slot in the error map and the multipart body.
pub const RESUME_FIELD: &str = "resume";

pub const APPLICATION_SCHEMA: Schema = Schema {
    name: "application",
    fields: &[
        FieldSpec::required("name", "Name is required"),
        FieldSpec::required("email", "Email is required").with_rule(Rule::Email),
        FieldSpec::required("phone", "Phone number is required").with_rule(Rule::Phone),
        FieldSpec::required("address", "Address is required"),
        FieldSpec::required("coverLetter", "Cover letter is required"),
        FieldSpec::required(RESUME_FIELD, "Resume is required"),
    ],
};

/// In-progress application form with its field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume: Option<ResumeFile>,
    pub errors: ErrorMap,
}

impl ApplicationDraft {
    pub fn get(&self, field: ApplicationField) -> &str {
        match field {
            ApplicationField::Name => &self.name,
            ApplicationField::Email => &self.email,
            ApplicationField::Phone => &self.phone,
            ApplicationField::Address => &self.address,
            ApplicationField::CoverLetter => &self.cover_letter,
        }
    }

    pub(crate) fn set(&mut self, field: ApplicationField, value: String) {
        let slot = match field {
            ApplicationField::Name => &mut self.name,
            ApplicationField::Email => &mut self.email,
            ApplicationField::Phone => &mut self.phone,
            ApplicationField::Address => &mut self.address,
            ApplicationField::CoverLetter => &mut self.cover_letter,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Payload for ApplicationDraft {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        if field == RESUME_FIELD {
            return self.resume.as_ref().map(|_| Cow::Borrowed("attached"));
        }
        ApplicationField::from_name(field).map(|field| Cow::Borrowed(self.get(field)))
    }
}

/// Multipart body sent to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume: ResumeFile,
    pub job_id: JobId,
}

impl ApplicationSubmission {
    /// Text parts in form order; the resume travels as the `resume` file part.
    pub fn text_parts(&self) -> [(&'static str, &str); 6] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("coverLetter", &self.cover_letter),
            ("phone", &self.phone),
            ("address", &self.address),
            ("jobId", &self.job_id.0),
        ]
    }
}
