//! Request body extraction shared by the board routes.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body extractor accepting either `application/json` or
/// `application/x-www-form-urlencoded`, so HTML forms and API clients can
/// post to the same routes.
///
/// Malformed bodies are rejected as [`ApiError::BadRequest`].
pub struct BoardForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for BoardForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e.body_text())))?;
            Ok(BoardForm(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("Invalid form body: {}", e.body_text())))?;
            Ok(BoardForm(value))
        }
    }
}

/// Treats an absent field and an empty string the same way.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_empty() {
        assert_eq!(required(None), None);
        assert_eq!(required(Some(String::new())), None);
        assert_eq!(required(Some(" ".to_string())), Some(" ".to_string()));
        assert_eq!(required(Some("p".to_string())), Some("p".to_string()));
    }
}
