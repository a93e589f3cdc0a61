use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use store::{RegistryError, UnitsError};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),

    #[error("quote service error: {0}")]
    QuoteService(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wallet not ready: {0}")]
    WalletNotReady(&'static str),

    #[error("cannot swap an asset for itself")]
    SameAsset,

    #[error("no quote available yet")]
    NoQuote,

    #[error("failed to decode swap transaction: {0}")]
    TransactionDecode(String),

    #[error("signature declined: {0}")]
    SignatureDeclined(String),

    #[error("broadcast failed: {0}")]
    BroadcastFailure(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("swap pipeline is not running")]
    ServiceUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Error::SameAsset | Error::NoQuote | Error::WalletNotReady(_) => StatusCode::CONFLICT,
            Error::SignatureDeclined(_) => StatusCode::FORBIDDEN,
            Error::QuoteService(_)
            | Error::Http(_)
            | Error::TransactionDecode(_)
            | Error::BroadcastFailure(_) => StatusCode::BAD_GATEWAY,
            Error::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Registry(_) | Error::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
