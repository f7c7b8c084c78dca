use reqwest::StatusCode;
use thiserror::Error;

/// Credential exchange against the directory token endpoint failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse token response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Adoptable-animal search failed.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("animal search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("directory returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse directory response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DirectoryError {
    /// Plain-language message safe to show directly to a user. The
    /// technical detail belongs in logs, not on screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            DirectoryError::Auth(_) => {
                "We couldn't sign in to the adoption directory right now. Please try again later."
            }
            _ => "We couldn't load adoptable cats for that location right now. Please try again later.",
        }
    }
}

/// Weather provider failure. Never surfaces to callers: the weather service
/// absorbs every variant into the synthetic fallback.
#[derive(Debug, Error)]
pub(crate) enum WeatherError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
