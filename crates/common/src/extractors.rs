//! Custom axum extractors for Jobly

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::schema::{self, RequestSchema};
use crate::Error;

/// JSON extractor that checks the body's shape and validates its values.
///
/// Replaces `Json<T>` + manual `.validate()` calls in handlers.
/// Requires `T: DeserializeOwned + Validate + RequestSchema`.
///
/// Structural problems (missing, unknown, or mistyped fields) and value
/// problems from `validator` are reported together in one 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for `ValidatedJson`:
/// - unreadable JSON → 400 (via `Error::BadRequest`)
/// - shape or value errors → 400 (via `Error::BadRequest`)
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => Error::bad_request(e.body_text()).into_response(),
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + RequestSchema,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        let checked = schema::check(raw, T::FIELDS);
        let mut messages = checked.errors;

        // The repaired body carries only well-typed fields, so values can
        // be validated even when the shape was wrong.
        match serde_json::from_value::<T>(checked.repaired) {
            Ok(value) => {
                if let Err(e) = value.validate() {
                    messages.extend(validation_messages(&e));
                }
                if messages.is_empty() {
                    return Ok(ValidatedJson(value));
                }
            }
            Err(e) => messages.push(format!("instance {}", e)),
        }

        Err(ValidatedJsonRejection::Validation(Error::BadRequest(messages)))
    }
}

/// Path extractor whose rejection uses the JSON error envelope
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::bad_request(e.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Flatten validator errors into human-readable messages, one per failure.
///
/// Field names are reported in their wire (camelCase) form. The output is
/// sorted so responses are stable.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field: &str = &field;
        let wire_name = camel_case(field);
        for error in field_errors.iter() {
            messages.push(describe(&wire_name, error));
        }
    }
    messages.sort();
    messages
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("instance.{} {}", field, message);
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match error.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), _) => format!("instance.{} does not meet minimum length of {}", field, min),
            (None, Some(max)) => format!("instance.{} does not meet maximum length of {}", field, max),
            _ => format!("instance.{} has an invalid length", field),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), None) => {
                format!("instance.{} must be greater than or equal to {}", field, min)
            }
            (None, Some(max)) => format!("instance.{} must be less than or equal to {}", field, max),
            (Some(min), Some(max)) => {
                format!("instance.{} must be between {} and {}", field, min, max)
            }
            _ => format!("instance.{} is out of range", field),
        },
        code => format!("instance.{} failed {} validation", field, code),
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
