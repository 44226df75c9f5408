use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("missing field `{field}` in {context} record")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },
    #[error("unexpected response shape for {context}: expected {expected}")]
    UnexpectedShape {
        context: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
