use serde::Serialize;
use serde_json::Value;
use log::debug;
use thiserror::Error;

use crate::shared::role::Role;

/// Any HTTP response, successful or not, with its JSON body (`Null` if none).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status: u16,
  pub body: Value,
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Request failed: {0}")]
  Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<Role>,
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
  /// Email address or username.
  pub email: String,
  pub password: String,
}

pub trait ClinicApi {
  async fn register(
    &self,
    request: &RegisterRequest,
  ) -> Result<ApiResponse, ApiError>;
  async fn login(&self, request: &LoginRequest)
    -> Result<ApiResponse, ApiError>;
}

pub struct HttpClinicApi {
  client: reqwest::Client,
  base_url: String,
}

impl HttpClinicApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
    }
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn post_json<T: Serialize>(
    &self,
    path: &str,
    body: &T,
  ) -> Result<ApiResponse, ApiError> {
    let response = self.client.post(self.url(path)).json(body).send().await?;
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    debug!("POST {} -> {}", path, status);
    Ok(ApiResponse { status, body })
  }
}

impl ClinicApi for HttpClinicApi {
  async fn register(
    &self,
    request: &RegisterRequest,
  ) -> Result<ApiResponse, ApiError> {
    self.post_json("/register", request).await
  }

  async fn login(
    &self,
    request: &LoginRequest,
  ) -> Result<ApiResponse, ApiError> {
    self.post_json("/login", request).await
  }
}

#[cfg(test)]
pub mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;

  /// Answers every call with a canned status/body and counts the calls.
  pub struct MockClinicApi {
    pub status: u16,
    pub body: Value,
    pub calls: Cell<usize>,
    pub last_register: RefCell<Option<RegisterRequest>>,
  }

  impl MockClinicApi {
    pub fn new(status: u16, body: Value) -> Self {
      Self {
        status,
        body,
        calls: Cell::new(0),
        last_register: RefCell::new(None),
      }
    }

    fn respond(&self) -> Result<ApiResponse, ApiError> {
      self.calls.set(self.calls.get() + 1);
      Ok(ApiResponse {
        status: self.status,
        body: self.body.clone(),
      })
    }
  }

  impl ClinicApi for MockClinicApi {
    async fn register(
      &self,
      request: &RegisterRequest,
    ) -> Result<ApiResponse, ApiError> {
      *self.last_register.borrow_mut() = Some(request.clone());
      self.respond()
    }

    async fn login(
      &self,
      _request: &LoginRequest,
    ) -> Result<ApiResponse, ApiError> {
      self.respond()
    }
  }

  #[test]
  fn test_url_joins_base_and_path() {
    let api = HttpClinicApi::new("http://localhost:8080/");
    assert_eq!(api.url("/register"), "http://localhost:8080/register");
  }

  #[test]
  fn test_register_request_wire_format() {
    let request = RegisterRequest {
      first_name: String::from("A"),
      last_name: String::from("B"),
      email: String::from("a@b.com"),
      phone: String::from("1234567890"),
      role: Some(Role::Patient),
      username: String::from("abcd"),
      password: String::from("password1"),
    };

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["firstName"], "A");
    assert_eq!(json["role"], "Patient");
    assert!(json.get("confirmPassword").is_none());
  }

  #[actix_rt::test]
  async fn test_unreachable_server_is_transport_error() {
    let api = HttpClinicApi::new("http://127.0.0.1:1");
    let request = LoginRequest {
      email: String::from("abcd"),
      password: String::from("password1"),
    };

    let result = api.login(&request).await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
  }
}
