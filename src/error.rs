use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,

    #[error("invalid character {ch:?} at position {index}")]
    InvalidChar { ch: char, index: usize },

    #[error("slug must not start or end with a hyphen")]
    EdgeHyphen,

    #[error("consecutive hyphens at position {index}")]
    DoubleHyphen { index: usize },

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlugError {
    /// True for errors produced by slug validation rather than I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SlugError::Empty
                | SlugError::InvalidChar { .. }
                | SlugError::EdgeHyphen
                | SlugError::DoubleHyphen { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SlugError>;
