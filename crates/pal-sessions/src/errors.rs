use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid account ID")]
    InvalidAccountId,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid algorithm: found {found:?}, expected HS256")]
    InvalidAlgorithm { found: String },

    #[error("Invalid audience")]
    InvalidAudience,

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),

    #[error("JWT encoding error: {0}")]
    JwtEncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Account error: {0}")]
    Account(#[from] pal_accounts::AccountError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
