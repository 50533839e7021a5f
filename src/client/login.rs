use log::warn;
use serde::Serialize;
use validator::Validate;
use validator_derive::Validate;

use crate::client::api::{ApiError, ApiResponse, ClinicApi, LoginRequest};
use crate::client::form::{FormField, FormState, SubmitRejected};

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_SUCCESS: &str = "Logged in successfully";
pub const WRONG_CREDENTIALS: &str = "Wrong Credentials. Please try again.";
pub const UNEXPECTED_ERROR: &str =
  "An unexpected error occurred. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
  Email,
  Password,
}

impl FormField for LoginField {
  const ALL: &'static [Self] = &[LoginField::Email, LoginField::Password];

  fn name(&self) -> &'static str {
    match self {
      LoginField::Email => "email",
      LoginField::Password => "password",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct LoginValues {
  /// Email address or username.
  #[validate(length(
    min = 1,
    code = "required",
    message = "Email or username is required"
  ))]
  pub email: String,
  #[validate(length(min = 1, code = "required", message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
  Rejected(SubmitRejected),
  /// Credentials accepted; the caller should route to `to`.
  Navigate { to: &'static str },
  Failed,
}

#[derive(Debug, Default)]
pub struct LoginForm {
  values: LoginValues,
  state: FormState<LoginField>,
}

impl LoginForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn values(&self) -> &LoginValues {
    &self.values
  }

  pub fn set_value(&mut self, field: LoginField, value: impl Into<String>) {
    let value = value.into();
    match field {
      LoginField::Email => self.values.email = value,
      LoginField::Password => self.values.password = value,
    }
    self.validate();
  }

  pub fn blur(&mut self, field: LoginField) {
    self.state.touch(field);
    self.validate();
  }

  pub fn error(&self, field: LoginField) -> Option<&str> {
    self.state.error(field)
  }

  pub fn visible_error(&self, field: LoginField) -> Option<&str> {
    self.state.visible_error(field)
  }

  /// Banner shown above the form after a failed or successful attempt.
  pub fn status_message(&self) -> Option<&str> {
    self.state.status()
  }

  pub fn is_submitting(&self) -> bool {
    self.state.is_submitting()
  }

  pub fn submit_label(&self) -> &'static str {
    if self.is_submitting() {
      "Signing In..."
    } else {
      "Sign In"
    }
  }

  fn validate(&mut self) {
    self.state.set_validation_result(self.values.validate());
  }

  /// Validates and, when valid, marks the form as submitting.
  pub fn begin_submit(&mut self) -> Result<LoginRequest, SubmitRejected> {
    if self.state.is_submitting() {
      return Err(SubmitRejected::Busy);
    }
    self.state.touch_all();
    self.validate();
    if self.state.has_errors() {
      return Err(SubmitRejected::Invalid);
    }
    self.state.set_status(None);
    self.state.set_submitting(true);
    Ok(LoginRequest {
      email: self.values.email.clone(),
      password: self.values.password.clone(),
    })
  }

  pub fn finish_submit(
    &mut self,
    result: Result<ApiResponse, ApiError>,
  ) -> LoginOutcome {
    self.state.set_submitting(false);
    match result {
      Ok(response) if response.status == 200 => {
        self.state.set_status(Some(LOGIN_SUCCESS));
        LoginOutcome::Navigate { to: DASHBOARD_PATH }
      }
      Ok(response) if response.status == 401 || response.status == 400 => {
        self.state.set_status(Some(WRONG_CREDENTIALS));
        LoginOutcome::Failed
      }
      Ok(_) => {
        self.state.set_status(Some(UNEXPECTED_ERROR));
        LoginOutcome::Failed
      }
      Err(error) => {
        warn!("Login request failed: {}", error);
        self.state.set_status(Some(UNEXPECTED_ERROR));
        LoginOutcome::Failed
      }
    }
  }

  pub async fn submit<A: ClinicApi>(&mut self, api: &A) -> LoginOutcome {
    let request = match self.begin_submit() {
      Ok(request) => request,
      Err(rejected) => return LoginOutcome::Rejected(rejected),
    };
    let result = api.login(&request).await;
    self.finish_submit(result)
  }
}
