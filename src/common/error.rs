#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to access account store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("account store is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
