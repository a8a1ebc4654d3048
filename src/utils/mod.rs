use actix_web::{FromRequest, web};
use futures_util::future::LocalBoxFuture;
use std::borrow::Cow;
use validator::{Validate, ValidationErrors};

use crate::api::error;

/// First human-readable message attached to a validation failure.
fn validation_message(errors: &ValidationErrors) -> Cow<'static, str> {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.clone())
        .unwrap_or_else(|| errors.to_string().into())
}

pub struct ValidatedPath<T>(pub T);

impl<T> FromRequest for ValidatedPath<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Path::<T>::from_request(req, payload);

        Box::pin(async move {
            let path = fut.await.map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            let model = path.into_inner();
            if let Err(e) = model.validate() {
                log::debug!("Rejected path parameters: {}", e);
                return Err(error::Error::BadRequest(validation_message(&e)));
            }
            Ok(ValidatedPath(model))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::file::schema::FilenamePath;

    #[test]
    fn test_validation_message_uses_field_message() {
        let path = FilenamePath { filename: "a/b".to_string() };
        let errors = path.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "invalid filename");
    }
}
