use {
    axum::{Json, http::StatusCode, response::IntoResponse},
    manifest::LookupError,
    serde::Serialize,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("contract call failed: {0:#}")]
    Chain(anyhow::Error),
}

#[derive(Serialize)]
struct Body {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Self::Lookup(LookupError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::Chain(err) => {
                tracing::warn!(?err, "curve read failed");
                StatusCode::BAD_GATEWAY
            }
        };
        (
            status,
            Json(Body {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
