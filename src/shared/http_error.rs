use std::collections::BTreeMap;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
  pub message: String,
  /// Field name (camelCase) to the first message reported for that field.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<BTreeMap<String, String>>,
}

impl From<&str> for HttpError {
  fn from(message: &str) -> Self {
    Self {
      message: String::from(message),
      errors: None,
    }
  }
}

impl HttpError {
  pub fn validation(validation_errors: &ValidationErrors) -> Self {
    let errors = validation_errors
      .field_errors()
      .into_iter()
      .filter_map(|(field, errors)| {
        let first = errors.first()?;
        let message = first
          .message
          .as_ref()
          .map(|message| message.to_string())
          .unwrap_or_else(|| format!("{} is invalid", first.code));
        Some((to_camel_case(&field), message))
      })
      .collect();
    Self {
      message: String::from("Validation failed"),
      errors: Some(errors),
    }
  }

  pub fn conflict(field: &str) -> Self {
    let field = to_camel_case(field);
    let message = format!("{} already exists", field);
    Self {
      errors: Some(BTreeMap::from([(field, message.clone())])),
      message,
    }
  }
}

pub fn to_camel_case(field: &str) -> String {
  let mut camel = String::with_capacity(field.len());
  let mut upper_next = false;
  for ch in field.chars() {
    if ch == '_' {
      upper_next = true;
    } else if upper_next {
      camel.extend(ch.to_uppercase());
      upper_next = false;
    } else {
      camel.push(ch);
    }
  }
  camel
}

pub fn bad_request(error: HttpError) -> HttpResponse {
  HttpResponse::BadRequest()
    .content_type("application/json")
    .json(error)
}

pub fn not_found(message: &str) -> HttpResponse {
  HttpResponse::NotFound()
    .content_type("application/json")
    .json(HttpError::from(message))
}

pub fn conflict(field: &str) -> HttpResponse {
  HttpResponse::Conflict()
    .content_type("application/json")
    .json(HttpError::conflict(field))
}

pub fn internal_server_error() -> HttpResponse {
  HttpResponse::InternalServerError()
    .content_type("application/json")
    .json(HttpError::from("Internal server error"))
}
