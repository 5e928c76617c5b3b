//! JSON body extractor that runs `validator` rules before the handler.

use axum::async_trait;
use axum::extract::{FromRequest, Json, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(IntoResponse::into_response)?;
        data.validate().map_err(validation_response)?;
        Ok(ValidatedJson(data))
    }
}

/// 400 with `details: {field: [{code, message}]}`.
pub fn validation_response(errors: ValidationErrors) -> Response {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let list: Vec<serde_json::Value> = errs
                .iter()
                .map(|err| serde_json::json!({"code": err.code, "message": err.message}))
                .collect();
            (field.to_string(), serde_json::Value::Array(list))
        })
        .collect::<serde_json::Map<_, _>>();
    let body = serde_json::json!({
        "error": "Bad Request",
        "message": "Request validation failed",
        "details": details,
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
