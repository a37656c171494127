use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectError {
    #[error("failed to convert the value into a document: {0}")]
    Serialize(#[from] serde_json::Error),
}
