use actix_web::{
  dev::Payload, error::InternalError, web, Error, FromRequest, HttpRequest,
};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::shared::http_error::{bad_request, HttpError};

/// JSON body that has been deserialized and passed `Validate`.
/// Either failure short-circuits with a 400 carrying an `HttpError` body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> FromRequest for ValidatedJson<T>
where
  T: DeserializeOwned + Validate + 'static,
{
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    let json = web::Json::<T>::from_request(req, payload);
    Box::pin(async move {
      let web::Json(value) = json.await.map_err(|error| {
        let message = error.to_string();
        InternalError::from_response(
          message.clone(),
          bad_request(HttpError::from(message.as_str())),
        )
      })?;
      value.validate().map_err(|errors| {
        let response = bad_request(HttpError::validation(&errors));
        InternalError::from_response(errors, response)
      })?;
      Ok(ValidatedJson(value))
    })
  }
}
