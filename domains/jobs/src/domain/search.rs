//! Job search filters
//!
//! Query strings arrive as untyped pairs. `JobFilters::from_query` is the
//! single, total coercion step: every input either becomes a typed filter
//! or a message in the returned error list.

use jobly_common::validation_messages;
use validator::Validate;

/// Typed filters for `GET /jobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct JobFilters {
    /// Only jobs paying at least this much
    #[validate(range(min = 0))]
    pub min_salary: Option<i64>,

    /// Only jobs offering non-zero equity
    pub has_equity: bool,

    /// Case-insensitive partial match on title
    #[validate(length(min = 1))]
    pub title: Option<String>,
}

impl JobFilters {
    /// Coerce raw query pairs into filters.
    ///
    /// - `minSalary` must parse as an integer ≥ 0
    /// - `hasEquity` is true only for the literal `"true"`; any other value is false
    /// - `title` must be non-empty
    /// - any other key is rejected
    ///
    /// Repeated keys: the last occurrence wins.
    pub fn from_query<K, V>(pairs: &[(K, V)]) -> Result<Self, Vec<String>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = JobFilters::default();
        let mut errors = Vec::new();

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "minSalary" => match value.trim().parse::<i64>() {
                    Ok(min) => filters.min_salary = Some(min),
                    Err(_) => {
                        filters.min_salary = None;
                        errors.push("instance.minSalary is not of a type(s) integer".to_string());
                    }
                },
                "hasEquity" => filters.has_equity = value == "true",
                "title" => filters.title = Some(value.to_string()),
                other => errors.push(format!(
                    "instance is not allowed to have the additional property \"{}\"",
                    other
                )),
            }
        }

        if let Err(e) = filters.validate() {
            errors.extend(validation_messages(&e));
        }

        if errors.is_empty() {
            Ok(filters)
        } else {
            Err(errors)
        }
    }

    /// True when no filter restricts the result set
    pub fn is_empty(&self) -> bool {
        self.min_salary.is_none() && !self.has_equity && self.title.is_none()
    }
}
