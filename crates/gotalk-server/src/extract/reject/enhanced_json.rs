//! JSON extractor with `bad_request` rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Longest rejection detail echoed back to the client.
const MAX_DETAIL_CHARS: usize = 200;

/// [`axum::Json`] whose rejection is a `bad_request` [`Error`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        let (message, detail) = match &rejection {
            JsonRejection::JsonSyntaxError(_) => ("Request body is not valid JSON", None),
            JsonRejection::JsonDataError(_) => {
                ("Request body does not match the expected shape", None)
            }
            JsonRejection::MissingJsonContentType(_) => (
                "Unsupported content type",
                Some("expected `application/json`".to_owned()),
            ),
            _ => ("Request body could not be read", None),
        };

        let detail = detail.unwrap_or_else(|| truncate_detail(&rejection.body_text()));
        ErrorKind::BadRequest.with_message(message).with_context(detail)
    }
}

/// Flattens a rejection body onto one line of bounded length.
fn truncate_detail(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_DETAIL_CHARS)
        .collect()
}
