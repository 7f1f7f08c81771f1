use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwmError {
    #[error("OwmError::Http: {0}")]
    Http(String),
    #[error("OwmError::Document: {0}")]
    Document(String),
}

impl From<ureq::Error> for OwmError {
    fn from(e: ureq::Error) -> Self { OwmError::Http(e.to_string()) }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> Self { OwmError::Document(e.to_string()) }
}
