use anyhow::{anyhow, Context};
use serde_json::json;

/// Errors reported by the server in `{"error": "<code>"}` bodies, plus
/// malformed data received from it
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Couldn't find post")]
    CouldntFindPost,

    #[error("Couldn't find community")]
    CouldntFindCommunity,

    #[error("Couldn't find comment")]
    CouldntFindComment,

    #[error("Rate limited")]
    RateLimit,

    #[error("Invalid comment path {0:?}")]
    InvalidCommentPath(String),
}

impl Error {
    pub fn code(&self) -> &str {
        match self {
            Error::Unknown(code) => code,
            Error::NotLoggedIn => "not_logged_in",
            Error::CouldntFindPost => "couldnt_find_post",
            Error::CouldntFindCommunity => "couldnt_find_community",
            Error::CouldntFindComment => "couldnt_find_comment",
            Error::RateLimit => "rate_limit_error",
            Error::InvalidCommentPath(_) => "invalid_comment_path",
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&json!({ "error": self.code() })).expect("serializing error")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let code = data
            .get("error")
            .and_then(|e| e.as_str())
            .ok_or_else(|| anyhow!("error code is not a string"))?;
        Ok(match code {
            "not_logged_in" => Error::NotLoggedIn,
            "couldnt_find_post" => Error::CouldntFindPost,
            "couldnt_find_community" => Error::CouldntFindCommunity,
            "couldnt_find_comment" => Error::CouldntFindComment,
            "rate_limit_error" => Error::RateLimit,
            // the server never sends this one, it is detected client-side
            "invalid_comment_path" => return Err(anyhow!("server sent a client-side error code")),
            other => Error::Unknown(String::from(other)),
        })
    }
}
