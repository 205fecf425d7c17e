//! Body extractor accepting either JSON or an HTML form post.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Deserializes `application/x-www-form-urlencoded` bodies as a form and
/// everything else as JSON.
///
/// Rejections become `AppError::BadRequest` carrying axum's rejection text.
///
/// # Example
///
/// ```rust,ignore
/// use account_api::api::extractors::FormOrJson;
/// use account_api::domain::Credentials;
///
/// async fn login(FormOrJson(credentials): FormOrJson<Credentials>) {
///     // credentials came from either body encoding
/// }
/// ```
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            return Ok(FormOrJson(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        Ok(FormOrJson(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}
