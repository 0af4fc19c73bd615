//! Job domain entities for Jobly
//!
//! Stored rows, read models, and the declared shapes of create/update
//! request bodies. Body shapes reject unknown fields, so attempts to set
//! `id` (or `companyHandle` on update) fail before reaching storage.

use jobly_common::{Field, FieldKind, RequestSchema};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Job posting as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Fraction of the company offered, in [0, 1]; serialized as a decimal string
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job joined with the name of the company it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobWithCompany {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub job: Job,
    pub company_name: String,
}

/// Body of `POST /jobs`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(range(min = 0))]
    pub salary: Option<i32>,

    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,

    #[validate(length(min = 1))]
    pub company_handle: String,
}

/// Body of `PATCH /jobs/{id}`
///
/// Outer `None` leaves a field untouched; `Some(None)` (explicit `null`)
/// clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "present")]
    #[validate(range(min = 0))]
    pub salary: Option<Option<i32>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    /// True when the body names no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }

    /// Apply this update to a stored job
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        if let Some(equity) = self.equity {
            job.equity = equity;
        }
    }
}

impl RequestSchema for NewJob {
    const FIELDS: &'static [Field] = &[
        Field::required("title", FieldKind::String),
        Field::nullable("salary", FieldKind::Integer),
        Field::nullable("equity", FieldKind::Decimal),
        Field::required("companyHandle", FieldKind::String),
    ];
}

impl RequestSchema for JobUpdate {
    const FIELDS: &'static [Field] = &[
        Field::optional("title", FieldKind::String),
        Field::nullable("salary", FieldKind::Integer),
        Field::nullable("equity", FieldKind::Decimal),
    ];
}

/// Optional field that must not be `null` when present
fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Marks a field as present even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if equity.is_sign_negative() || *equity > Decimal::ONE {
        return Err(ValidationError::new("equity").with_message("must be between 0 and 1".into()));
    }
    Ok(())
}
