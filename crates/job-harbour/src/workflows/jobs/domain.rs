use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::validation::{FieldError, FieldSpec, Payload, Rule, Schema};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    Development,
    Design,
    Marketing,
    Sales,
    Other,
}

impl JobCategory {
    pub const ALL: [JobCategory; 5] = [
        JobCategory::Development,
        JobCategory::Design,
        JobCategory::Marketing,
        JobCategory::Sales,
        JobCategory::Other,
    ];
    pub const LABELS: [&'static str; 5] = ["Development", "Design", "Marketing", "Sales", "Other"];

    pub const fn label(self) -> &'static str {
        match self {
            JobCategory::Development => "Development",
            JobCategory::Design => "Design",
            JobCategory::Marketing => "Marketing",
            JobCategory::Sales => "Sales",
            JobCategory::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|category| category.label() == raw)
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkLocation {
    Remote,
    #[serde(rename = "On-site")]
    OnSite,
    Hybrid,
}

impl WorkLocation {
    pub const ALL: [WorkLocation; 3] = [WorkLocation::Remote, WorkLocation::OnSite, WorkLocation::Hybrid];
    pub const LABELS: [&'static str; 3] = ["Remote", "On-site", "Hybrid"];

    pub const fn label(self) -> &'static str {
        match self {
            WorkLocation::Remote => "Remote",
            WorkLocation::OnSite => "On-site",
            WorkLocation::Hybrid => "Hybrid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|location| location.label() == raw)
    }
}

/// Rules shared by new postings and in-place edits.
pub const JOB_SCHEMA: Schema = Schema {
    name: "job",
    fields: &[
        FieldSpec::required("title", "Title is required"),
        FieldSpec::required("description", "Description is required"),
        FieldSpec::required("category", "Category is required").with_rule(Rule::OneOf {
            options: &JobCategory::LABELS,
            message: "Please select a valid category",
        }),
        FieldSpec::required("country", "Country is required"),
        FieldSpec::required("city", "City is required"),
        FieldSpec::required("location", "Location type is required").with_rule(Rule::OneOf {
            options: &WorkLocation::LABELS,
            message: "Please select a valid location type",
        }),
        FieldSpec::required("fixedSalary", "Salary is required").with_rule(Rule::PositiveNumber),
    ],
};

/// Lifecycle status derived from the expiry flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobStatus {
    Active,
    Expired,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Expired => "Expired",
        }
    }
}

/// A posting as returned by the job collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub category: JobCategory,
    pub country: String,
    pub city: String,
    pub location: WorkLocation,
    pub fixed_salary: f64,
    #[serde(default)]
    pub expired: bool,
    pub posted_on: DateTime<Utc>,
}

impl Job {
    pub fn status(&self) -> JobStatus {
        if self.expired {
            JobStatus::Expired
        } else {
            JobStatus::Active
        }
    }

    pub(crate) fn apply(&mut self, value: JobFieldValue) {
        match value {
            JobFieldValue::Title(title) => self.title = title,
            JobFieldValue::Description(description) => self.description = description,
            JobFieldValue::Category(category) => self.category = category,
            JobFieldValue::Country(country) => self.country = country,
            JobFieldValue::City(city) => self.city = city,
            JobFieldValue::Location(location) => self.location = location,
            JobFieldValue::FixedSalary(salary) => self.fixed_salary = salary,
        }
    }
}

impl Payload for Job {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        let value = match JobField::from_name(field)? {
            JobField::Title => Cow::Borrowed(self.title.as_str()),
            JobField::Description => Cow::Borrowed(self.description.as_str()),
            JobField::Category => Cow::Borrowed(self.category.label()),
            JobField::Country => Cow::Borrowed(self.country.as_str()),
            JobField::City => Cow::Borrowed(self.city.as_str()),
            JobField::Location => Cow::Borrowed(self.location.label()),
            JobField::FixedSalary => Cow::Owned(self.fixed_salary.to_string()),
        };
        Some(value)
    }
}

/// Editable job fields, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Description,
    Category,
    Country,
    City,
    Location,
    FixedSalary,
}

impl JobField {
    pub const ALL: [JobField; 7] = [
        JobField::Title,
        JobField::Description,
        JobField::Category,
        JobField::Country,
        JobField::City,
        JobField::Location,
        JobField::FixedSalary,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Description => "description",
            JobField::Category => "category",
            JobField::Country => "country",
            JobField::City => "city",
            JobField::Location => "location",
            JobField::FixedSalary => "fixedSalary",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Typed replacement value for one field of a job in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum JobFieldValue {
    Title(String),
    Description(String),
    Category(JobCategory),
    Country(String),
    City(String),
    Location(WorkLocation),
    FixedSalary(f64),
}

impl JobFieldValue {
    pub fn field(&self) -> JobField {
        match self {
            JobFieldValue::Title(_) => JobField::Title,
            JobFieldValue::Description(_) => JobField::Description,
            JobFieldValue::Category(_) => JobField::Category,
            JobFieldValue::Country(_) => JobField::Country,
            JobFieldValue::City(_) => JobField::City,
            JobFieldValue::Location(_) => JobField::Location,
            JobFieldValue::FixedSalary(_) => JobField::FixedSalary,
        }
    }

    /// Parse raw input for `field`. Text fields accept anything; blanks are caught on commit.
    pub fn parse(field: JobField, raw: &str) -> Result<Self, FieldError> {
        let value = match field {
            JobField::Title => JobFieldValue::Title(raw.to_string()),
            JobField::Description => JobFieldValue::Description(raw.to_string()),
            JobField::Country => JobFieldValue::Country(raw.to_string()),
            JobField::City => JobFieldValue::City(raw.to_string()),
            JobField::Category => JobCategory::parse(raw)
                .map(JobFieldValue::Category)
                .ok_or_else(|| FieldError::invalid_format("Please select a valid category"))?,
            JobField::Location => WorkLocation::parse(raw)
                .map(JobFieldValue::Location)
                .ok_or_else(|| FieldError::invalid_format("Please select a valid location type"))?,
            JobField::FixedSalary => raw
                .trim()
                .parse::<f64>()
                .map(JobFieldValue::FixedSalary)
                .map_err(|_| FieldError::invalid_format("Please enter a valid salary amount"))?,
        };
        Ok(value)
    }
}

/// Validated payload for a new posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category: JobCategory,
    pub country: String,
    pub city: String,
    pub location: WorkLocation,
    pub fixed_salary: f64,
}

/// Raw post-job form values, kept as entered until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub city: String,
    pub location: String,
    pub fixed_salary: String,
}

impl JobPostDraft {
    pub fn set(&mut self, field: JobField, value: String) {
        let slot = match field {
            JobField::Title => &mut self.title,
            JobField::Description => &mut self.description,
            JobField::Category => &mut self.category,
            JobField::Country => &mut self.country,
            JobField::City => &mut self.city,
            JobField::Location => &mut self.location,
            JobField::FixedSalary => &mut self.fixed_salary,
        };
        *slot = value;
    }

    fn get(&self, field: JobField) -> &str {
        match field {
            JobField::Title => &self.title,
            JobField::Description => &self.description,
            JobField::Category => &self.category,
            JobField::Country => &self.country,
            JobField::City => &self.city,
            JobField::Location => &self.location,
            JobField::FixedSalary => &self.fixed_salary,
        }
    }

    /// Typed payload, or `None` if any field would fail [`JOB_SCHEMA`].
    pub fn to_new_job(&self) -> Option<NewJob> {
        let fixed_salary = self
            .fixed_salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|salary| salary.is_finite() && *salary > 0.0)?;
        let required = [&self.title, &self.description, &self.country, &self.city];
        if required.iter().any(|value| value.trim().is_empty()) {
            return None;
        }

        Some(NewJob {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: JobCategory::parse(&self.category)?,
            country: self.country.trim().to_string(),
            city: self.city.trim().to_string(),
            location: WorkLocation::parse(&self.location)?,
            fixed_salary,
        })
    }
}

impl Payload for JobPostDraft {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        JobField::from_name(field).map(|field| Cow::Borrowed(self.get(field)))
    }
}

/// Reply to a post-job call. `success = false` is a rejection even without a transport error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostJobReceipt {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub job: Option<Job>,
}
