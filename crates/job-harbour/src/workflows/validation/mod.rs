//! Schema-driven field validation shared by the job and application workflows.
//!
//! A [`Schema`] lists the fields a payload must carry together with an optional format
//! [`Rule`]. The same engine checks new job postings, in-place job edits, and application
//! drafts, so no workflow carries its own copy of the rules.

mod attachment;
mod rules;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

pub use attachment::{
    AttachmentError, AttachmentPolicy, ACCEPTED_RESUME_TYPES, DEFAULT_MAX_RESUME_BYTES,
};

/// Category of a single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
    TooLarge,
    UnsupportedType,
}

impl FieldErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            FieldErrorKind::Required => "required",
            FieldErrorKind::InvalidFormat => "invalid_format",
            FieldErrorKind::TooLarge => "too_large",
            FieldErrorKind::UnsupportedType => "unsupported_type",
        }
    }
}

/// Failure attached to one field, with the message shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn required(message: &str) -> Self {
        Self {
            kind: FieldErrorKind::Required,
            message: message.to_string(),
        }
    }

    pub fn invalid_format(message: &str) -> Self {
        Self {
            kind: FieldErrorKind::InvalidFormat,
            message: message.to_string(),
        }
    }
}

/// Field name to failure. An empty map means the payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<&'static str, FieldError>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|error| error.message.as_str())
    }

    pub fn kind(&self, field: &str) -> Option<FieldErrorKind> {
        self.0.get(field).map(|error| error.kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.0.remove(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

/// Format check applied once a required field is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Some `x@y.z` run appears in the value.
    Email,
    /// Exactly ten ASCII digits, nothing else.
    Phone,
    /// Parses as a finite number above zero.
    PositiveNumber,
    /// One of a closed set of labels.
    OneOf {
        options: &'static [&'static str],
        message: &'static str,
    },
}

impl Rule {
    fn check(self, value: &str) -> Result<(), &'static str> {
        match self {
            Rule::Email if !rules::is_email_shaped(value) => Err("Invalid email format"),
            Rule::Phone if !rules::is_ten_digit_phone(value) => Err("Invalid phone number"),
            Rule::PositiveNumber if !rules::is_positive_number(value) => {
                Err("Please enter a valid salary amount")
            }
            Rule::OneOf { options, message }
                if !options.iter().any(|option| *option == value.trim()) =>
            {
                Err(message)
            }
            _ => Ok(()),
        }
    }
}

/// One entry of a [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required_message: &'static str,
    pub rule: Option<Rule>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, required_message: &'static str) -> Self {
        Self {
            name,
            required_message,
            rule: None,
        }
    }

    pub const fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }
}

/// Ordered set of field rules for one payload type.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// Read access to the raw field values of a candidate payload.
pub trait Payload {
    /// Value currently held for `field`, `None` when nothing was supplied.
    fn value(&self, field: &str) -> Option<Cow<'_, str>>;
}

/// Check `payload` against every field of `schema`.
///
/// Blank (empty or whitespace-only) values fail as `required`. Format rules only run on
/// present values, so a field reports at most one error.
pub fn validate<P: Payload + ?Sized>(payload: &P, schema: &Schema) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for spec in schema.fields {
        let value = payload.value(spec.name);
        let Some(raw) = value.as_deref().filter(|raw| !raw.trim().is_empty()) else {
            errors.insert(spec.name, FieldError::required(spec.required_message));
            continue;
        };

        if let Some(rule) = spec.rule {
            if let Err(message) = rule.check(raw) {
                errors.insert(spec.name, FieldError::invalid_format(message));
            }
        }
    }

    errors
}
