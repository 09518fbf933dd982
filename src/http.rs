use actix_web::{
    dev::Payload, error::ResponseError, http::StatusCode, web::Bytes, FromRequest, HttpRequest,
};
use futures::future::{FutureExt, LocalBoxFuture};

/// JSON request body, decoded without looking at `Content-Type`.
#[derive(Debug, Clone)]
pub struct Webhook<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("failed reading request data: {0}")]
    ActixError(#[from] actix_web::Error),
    #[error("Error decoding JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::JsonError(_) => StatusCode::BAD_REQUEST,
            WebhookError::ActixError(err) => err.as_response_error().status_code(),
        }
    }
}

impl<T> FromRequest for Webhook<T>
where
    T: serde::de::DeserializeOwned + 'static,
{
    type Error = WebhookError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        Box::pin(Bytes::from_request(req, payload).map(
            |bytes| -> Result<Self, Self::Error> {
                let bytes = bytes?;
                // Only the first JSON value counts, trailing data is ignored.
                let first = serde_json::Deserializer::from_slice(&bytes)
                    .into_iter::<T>()
                    .next()
                    .unwrap_or_else(|| serde_json::from_slice(&bytes));
                first.map(Self).map_err(|err| {
                    tracing::warn!("Rejected webhook payload: {}", err);
                    err.into()
                })
            },
        ))
    }
}
