//! Typed failures shared across the pipeline crates.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompError {
    #[error("workbook directory not found: {0}")]
    WorkbookDirMissing(PathBuf),
    #[error("unknown seniority tier: {0}")]
    UnknownSeniority(String),
}

pub type Result<T> = std::result::Result<T, CompError>;

#[cfg(test)]
mod tests {
    use super::CompError;
    use std::path::PathBuf;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CompError::WorkbookDirMissing(PathBuf::from("/tmp/missing"));
        assert_eq!(err.to_string(), "workbook directory not found: /tmp/missing");

        let err = CompError::UnknownSeniority("Principal".to_string());
        assert_eq!(err.to_string(), "unknown seniority tier: Principal");
    }
}
