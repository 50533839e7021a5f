use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use validator::ValidationErrors;

use crate::shared::http_error::to_camel_case;

/// Identifies one input of a form by its wire (camelCase) name.
pub trait FormField: Copy + Eq + Hash + 'static {
  const ALL: &'static [Self];

  fn name(&self) -> &'static str;

  /// Accepts either the camelCase wire name or the snake_case struct name.
  fn from_key(key: &str) -> Option<Self> {
    let key = to_camel_case(key);
    Self::ALL.iter().copied().find(|field| field.name() == key)
  }
}

/// Why a submission never reached the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
  /// At least one field failed validation.
  Invalid,
  /// A previous submission from this form is still in flight.
  Busy,
}

#[derive(Debug, Clone)]
pub struct FormState<F: FormField> {
  touched: HashSet<F>,
  errors: HashMap<F, String>,
  is_submitting: bool,
  status: Option<String>,
}

impl<F: FormField> Default for FormState<F> {
  fn default() -> Self {
    Self {
      touched: HashSet::new(),
      errors: HashMap::new(),
      is_submitting: false,
      status: None,
    }
  }
}

impl<F: FormField> FormState<F> {
  pub fn error(&self, field: F) -> Option<&str> {
    self.errors.get(&field).map(String::as_str)
  }

  /// Errors are only displayed once the user has left the field or submitted.
  pub fn visible_error(&self, field: F) -> Option<&str> {
    if self.is_touched(field) {
      self.error(field)
    } else {
      None
    }
  }

  pub fn is_touched(&self, field: F) -> bool {
    self.touched.contains(&field)
  }

  pub fn touch(&mut self, field: F) {
    self.touched.insert(field);
  }

  pub fn touch_all(&mut self) {
    self.touched.extend(F::ALL.iter().copied());
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  pub fn is_submitting(&self) -> bool {
    self.is_submitting
  }

  pub fn set_submitting(&mut self, is_submitting: bool) {
    self.is_submitting = is_submitting;
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }

  pub fn set_status(&mut self, status: Option<&str>) {
    self.status = status.map(String::from);
  }

  pub fn set_validation_result(&mut self, result: Result<(), ValidationErrors>) {
    self.errors = match result {
      Ok(()) => HashMap::new(),
      Err(validation_errors) => first_errors(&validation_errors),
    };
  }

  /// Attaches server-reported messages to their fields; unknown keys are ignored.
  pub fn set_field_errors<'a>(
    &mut self,
    errors: impl IntoIterator<Item = (&'a str, &'a str)>,
  ) {
    for (key, message) in errors {
      if let Some(field) = F::from_key(key) {
        self.errors.insert(field, message.to_string());
        self.touched.insert(field);
      }
    }
  }

  pub fn reset(&mut self) {
    self.touched.clear();
    self.errors.clear();
    self.is_submitting = false;
  }
}

/// One message per field; a failed `required` rule wins over any other rule.
fn first_errors<F: FormField>(
  validation_errors: &ValidationErrors,
) -> HashMap<F, String> {
  validation_errors
    .field_errors()
    .into_iter()
    .filter_map(|(key, errors)| {
      let field = F::from_key(&key)?;
      let error = errors
        .iter()
        .find(|error| error.code == "required")
        .or_else(|| errors.first())?;
      let message = error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| format!("{} is invalid", field.name()));
      Some((field, message))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::ValidationError;

  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  enum Field {
    FirstName,
    Email,
  }

  impl FormField for Field {
    const ALL: &'static [Self] = &[Field::FirstName, Field::Email];

    fn name(&self) -> &'static str {
      match self {
        Field::FirstName => "firstName",
        Field::Email => "email",
      }
    }
  }

  #[test]
  fn test_from_key_accepts_both_spellings() {
    assert_eq!(Field::from_key("firstName"), Some(Field::FirstName));
    assert_eq!(Field::from_key("first_name"), Some(Field::FirstName));
    assert_eq!(Field::from_key("phone"), None);
  }

  #[test]
  fn test_required_error_takes_precedence() {
    let mut validation_errors = ValidationErrors::new();
    validation_errors.add(
      "email",
      ValidationError::new("email").with_message("Invalid email address".into()),
    );
    validation_errors.add(
      "email",
      ValidationError::new("required").with_message("Email is required".into()),
    );

    let mut state = FormState::<Field>::default();
    state.set_validation_result(Err(validation_errors));

    assert_eq!(state.error(Field::Email), Some("Email is required"));
    assert_eq!(state.error(Field::FirstName), None);
  }

  #[test]
  fn test_errors_hidden_until_touched() {
    let mut validation_errors = ValidationErrors::new();
    validation_errors.add(
      "first_name",
      ValidationError::new("required").with_message("First name is required".into()),
    );
    let mut state = FormState::<Field>::default();
    state.set_validation_result(Err(validation_errors));

    assert_eq!(state.visible_error(Field::FirstName), None);
    state.touch(Field::FirstName);
    assert_eq!(
      state.visible_error(Field::FirstName),
      Some("First name is required")
    );
  }

  #[test]
  fn test_server_field_errors_are_attached() {
    let mut state = FormState::<Field>::default();
    state.set_field_errors([
      ("email", "email already exists"),
      ("unknown", "ignored"),
    ]);

    assert_eq!(state.visible_error(Field::Email), Some("email already exists"));
    assert!(state.has_errors());
  }
}
