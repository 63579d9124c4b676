use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),
}
