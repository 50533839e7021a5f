use std::borrow::Cow;

use log::warn;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationError};
use validator_derive::Validate;

use crate::client::api::{ApiError, ApiResponse, ClinicApi, RegisterRequest};
use crate::client::form::{FormField, FormState, SubmitRejected};
use crate::shared::role::Role;

pub const REGISTRATION_SUCCESS: &str = "Successfully Registered";
pub const REGISTRATION_FAILED: &str =
  "Registration failed. Please check the details and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
  FirstName,
  LastName,
  Email,
  Phone,
  Role,
  Username,
  Password,
  ConfirmPassword,
}

impl FormField for RegistrationField {
  const ALL: &'static [Self] = &[
    RegistrationField::FirstName,
    RegistrationField::LastName,
    RegistrationField::Email,
    RegistrationField::Phone,
    RegistrationField::Role,
    RegistrationField::Username,
    RegistrationField::Password,
    RegistrationField::ConfirmPassword,
  ];

  fn name(&self) -> &'static str {
    match self {
      RegistrationField::FirstName => "firstName",
      RegistrationField::LastName => "lastName",
      RegistrationField::Email => "email",
      RegistrationField::Phone => "phone",
      RegistrationField::Role => "role",
      RegistrationField::Username => "username",
      RegistrationField::Password => "password",
      RegistrationField::ConfirmPassword => "confirmPassword",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationValues {
  #[validate(
    length(min = 1, code = "required", message = "First name is required"),
    custom(function = "at_most_50_chars")
  )]
  pub first_name: String,
  #[validate(
    length(min = 1, code = "required", message = "Last name is required"),
    custom(function = "at_most_50_chars")
  )]
  pub last_name: String,
  #[validate(
    length(min = 1, code = "required", message = "Email is required"),
    email(message = "Invalid email address")
  )]
  pub email: String,
  #[validate(
    length(min = 1, code = "required", message = "Phone number is required"),
    custom(function = "phone_digits")
  )]
  pub phone: String,
  #[validate(
    length(min = 1, code = "required", message = "Role is required"),
    custom(function = "known_role")
  )]
  pub role: String,
  #[validate(
    length(min = 1, code = "required", message = "Username is required"),
    custom(function = "username_length")
  )]
  pub username: String,
  #[validate(
    length(min = 1, code = "required", message = "Password is required"),
    custom(function = "password_length")
  )]
  pub password: String,
  #[validate(
    length(
      min = 1,
      code = "required",
      message = "Confirming your password is required"
    ),
    must_match(other = "password", message = "Passwords must match")
  )]
  pub confirm_password: String,
}

impl Default for RegistrationValues {
  fn default() -> Self {
    Self {
      first_name: String::new(),
      last_name: String::new(),
      email: String::new(),
      phone: String::new(),
      role: Role::Patient.to_string(),
      username: String::new(),
      password: String::new(),
      confirm_password: String::new(),
    }
  }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
  ValidationError::new(code).with_message(Cow::Borrowed(message))
}

// Empty values pass the rules below; the `required` rule reports them.

fn at_most_50_chars(value: &str) -> Result<(), ValidationError> {
  if value.chars().count() > 50 {
    return Err(invalid("length", "Must be 50 characters or less"));
  }
  Ok(())
}

fn phone_digits(value: &str) -> Result<(), ValidationError> {
  if value.is_empty() {
    return Ok(());
  }
  if !value.chars().all(|ch| ch.is_ascii_digit()) {
    return Err(invalid("digits", "Must be only digits"));
  }
  match value.len() {
    len if len < 10 => Err(invalid("length", "Must be at least 10 digits")),
    len if len > 15 => Err(invalid("length", "Must be 15 digits or less")),
    _ => Ok(()),
  }
}

fn known_role(value: &str) -> Result<(), ValidationError> {
  if value.is_empty() || value.parse::<Role>().is_ok() {
    return Ok(());
  }
  Err(invalid("role", "Invalid role selected"))
}

fn username_length(value: &str) -> Result<(), ValidationError> {
  if !value.is_empty() && value.chars().count() < 4 {
    return Err(invalid(
      "length",
      "Username must be at least 4 characters",
    ));
  }
  Ok(())
}

fn password_length(value: &str) -> Result<(), ValidationError> {
  if !value.is_empty() && value.chars().count() < 8 {
    return Err(invalid(
      "length",
      "Password must be at least 8 characters",
    ));
  }
  Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
  Rejected(SubmitRejected),
  /// The account was created and the form has been reset.
  Registered,
  Failed,
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
  values: RegistrationValues,
  state: FormState<RegistrationField>,
}

impl RegistrationForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn values(&self) -> &RegistrationValues {
    &self.values
  }

  pub fn set_value(
    &mut self,
    field: RegistrationField,
    value: impl Into<String>,
  ) {
    let value = value.into();
    let slot = match field {
      RegistrationField::FirstName => &mut self.values.first_name,
      RegistrationField::LastName => &mut self.values.last_name,
      RegistrationField::Email => &mut self.values.email,
      RegistrationField::Phone => &mut self.values.phone,
      RegistrationField::Role => &mut self.values.role,
      RegistrationField::Username => &mut self.values.username,
      RegistrationField::Password => &mut self.values.password,
      RegistrationField::ConfirmPassword => &mut self.values.confirm_password,
    };
    *slot = value;
    self.validate();
  }

  pub fn blur(&mut self, field: RegistrationField) {
    self.state.touch(field);
    self.validate();
  }

  pub fn error(&self, field: RegistrationField) -> Option<&str> {
    self.state.error(field)
  }

  pub fn visible_error(&self, field: RegistrationField) -> Option<&str> {
    self.state.visible_error(field)
  }

  pub fn status_message(&self) -> Option<&str> {
    self.state.status()
  }

  pub fn is_submitting(&self) -> bool {
    self.state.is_submitting()
  }

  pub fn submit_label(&self) -> &'static str {
    if self.is_submitting() {
      "Creating Account..."
    } else {
      "Create Account"
    }
  }

  fn validate(&mut self) {
    self.state.set_validation_result(self.values.validate());
  }

  pub fn begin_submit(&mut self) -> Result<RegisterRequest, SubmitRejected> {
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
    Ok(RegisterRequest {
      first_name: self.values.first_name.clone(),
      last_name: self.values.last_name.clone(),
      email: self.values.email.clone(),
      phone: self.values.phone.clone(),
      role: self.values.role.parse().ok(),
      username: self.values.username.clone(),
      password: self.values.password.clone(),
    })
  }

  pub fn finish_submit(
    &mut self,
    result: Result<ApiResponse, ApiError>,
  ) -> RegistrationOutcome {
    self.state.set_submitting(false);
    match result {
      Ok(response) if response.status == 200 || response.status == 201 => {
        self.values = RegistrationValues::default();
        self.state.reset();
        self.state.set_status(Some(REGISTRATION_SUCCESS));
        RegistrationOutcome::Registered
      }
      Ok(response) => {
        self.state.set_status(Some(REGISTRATION_FAILED));
        if let Some(Value::Object(errors)) = response.body.get("errors") {
          self.state.set_field_errors(errors.iter().filter_map(
            |(field, message)| Some((field.as_str(), message.as_str()?)),
          ));
        }
        RegistrationOutcome::Failed
      }
      Err(error) => {
        warn!("Registration request failed: {}", error);
        self.state.set_status(Some(REGISTRATION_FAILED));
        RegistrationOutcome::Failed
      }
    }
  }

  pub async fn submit<A: ClinicApi>(&mut self, api: &A) -> RegistrationOutcome {
    let request = match self.begin_submit() {
      Ok(request) => request,
      Err(rejected) => return RegistrationOutcome::Rejected(rejected),
    };
    let result = api.register(&request).await;
    self.finish_submit(result)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::client::api::tests::MockClinicApi;

  fn filled_form() -> RegistrationForm {
    let mut form = RegistrationForm::new();
    form.set_value(RegistrationField::FirstName, "A");
    form.set_value(RegistrationField::LastName, "B");
    form.set_value(RegistrationField::Email, "a@b.com");
    form.set_value(RegistrationField::Phone, "1234567890");
    form.set_value(RegistrationField::Username, "abcd");
    form.set_value(RegistrationField::Password, "password1");
    form.set_value(RegistrationField::ConfirmPassword, "password1");
    form
  }

  #[test]
  fn test_filled_form_is_valid() {
    let form = filled_form();
    for field in RegistrationField::ALL {
      assert_eq!(form.error(*field), None, "{}", field.name());
    }
    assert_eq!(form.values().role, "Patient");
  }

  #[actix_rt::test]
  async fn test_non_digit_phone_blocks_submission() {
    let api = MockClinicApi::new(201, json!({}));
    let mut form = filled_form();
    form.set_value(RegistrationField::Phone, "12-345");

    let outcome = form.submit(&api).await;

    assert_eq!(
      outcome,
      RegistrationOutcome::Rejected(SubmitRejected::Invalid)
    );
    assert_eq!(
      form.visible_error(RegistrationField::Phone),
      Some("Must be only digits")
    );
    assert_eq!(api.calls.get(), 0);
  }

  #[test]
  fn test_phone_rules() {
    let mut form = filled_form();

    form.set_value(RegistrationField::Phone, "");
    assert_eq!(
      form.error(RegistrationField::Phone),
      Some("Phone number is required")
    );
    form.set_value(RegistrationField::Phone, "12345");
    assert_eq!(
      form.error(RegistrationField::Phone),
      Some("Must be at least 10 digits")
    );
    form.set_value(RegistrationField::Phone, "1234567890123456");
    assert_eq!(
      form.error(RegistrationField::Phone),
      Some("Must be 15 digits or less")
    );
    form.set_value(RegistrationField::Phone, "123456789012345");
    assert_eq!(form.error(RegistrationField::Phone), None);
  }

  #[test]
  fn test_field_rules() {
    let mut form = filled_form();

    form.set_value(RegistrationField::FirstName, "x".repeat(51));
    form.set_value(RegistrationField::LastName, "");
    form.set_value(RegistrationField::Email, "not-an-email");
    form.set_value(RegistrationField::Role, "Nurse");
    form.set_value(RegistrationField::Username, "abc");
    form.set_value(RegistrationField::Password, "short");
    form.set_value(RegistrationField::ConfirmPassword, "different");

    assert_eq!(
      form.error(RegistrationField::FirstName),
      Some("Must be 50 characters or less")
    );
    assert_eq!(
      form.error(RegistrationField::LastName),
      Some("Last name is required")
    );
    assert_eq!(
      form.error(RegistrationField::Email),
      Some("Invalid email address")
    );
    assert_eq!(
      form.error(RegistrationField::Role),
      Some("Invalid role selected")
    );
    assert_eq!(
      form.error(RegistrationField::Username),
      Some("Username must be at least 4 characters")
    );
    assert_eq!(
      form.error(RegistrationField::Password),
      Some("Password must be at least 8 characters")
    );
    assert_eq!(
      form.error(RegistrationField::ConfirmPassword),
      Some("Passwords must match")
    );
  }

  #[test]
  fn test_empty_confirmation_reports_required_first() {
    let mut form = filled_form();
    form.set_value(RegistrationField::ConfirmPassword, "");

    assert_eq!(
      form.error(RegistrationField::ConfirmPassword),
      Some("Confirming your password is required")
    );
  }

  #[actix_rt::test]
  async fn test_successful_registration_resets_form() {
    let api = MockClinicApi::new(201, json!({ "uuid": "abc" }));
    let mut form = filled_form();
    form.set_value(RegistrationField::Role, "Doctor");

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, RegistrationOutcome::Registered);
    assert_eq!(form.status_message(), Some(REGISTRATION_SUCCESS));
    assert_eq!(form.values(), &RegistrationValues::default());
    assert_eq!(form.visible_error(RegistrationField::FirstName), None);
    assert!(!form.is_submitting());

    let sent = api.last_register.borrow().clone().unwrap();
    assert_eq!(sent.role, Some(Role::Doctor));
    assert_eq!(sent.username, "abcd");
  }

  #[actix_rt::test]
  async fn test_server_field_errors_are_mapped() {
    let api = MockClinicApi::new(
      409,
      json!({
        "message": "email already exists",
        "errors": { "email": "email already exists", "firstName": 7 }
      }),
    );
    let mut form = filled_form();

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, RegistrationOutcome::Failed);
    assert_eq!(form.status_message(), Some(REGISTRATION_FAILED));
    assert_eq!(
      form.visible_error(RegistrationField::Email),
      Some("email already exists")
    );
    assert_eq!(form.visible_error(RegistrationField::FirstName), None);
    assert_eq!(form.values().email, "a@b.com");
  }

  #[actix_rt::test]
  async fn test_failure_without_field_errors() {
    let api = MockClinicApi::new(500, json!({ "message": "Internal server error" }));
    let mut form = filled_form();

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, RegistrationOutcome::Failed);
    assert_eq!(form.status_message(), Some(REGISTRATION_FAILED));
    assert_eq!(api.calls.get(), 1);
    assert_eq!(form.submit_label(), "Create Account");
  }
}
