use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

/// Request body that is either json or url-encoded form data, picked by the
/// content type. Anything that isn't json is read as a form, whatever its
/// content type says.
///
/// A body that can't be decoded is a 400 with the decoder's message.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .map_or(false, |mime| {
            mime.subtype() == mime::JSON || mime.suffix().map_or(false, |s| s == mime::JSON)
        })
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            let value = serde_urlencoded::from_bytes(&body)
                .map_err(|e| bad_request(format!("Failed to deserialize form body: {e}")))?;
            Ok(Self(value))
        }
    }
}
