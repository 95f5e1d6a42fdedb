use crate::api::Error as ApiError;

/// Failure of the network collaborator while fetching a page
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Display text is meant to be shown to the user as-is
    #[error("Problem fetching {what}. Please try again.")]
    Fetch {
        what: &'static str,
        #[source]
        source: TransportError,
    },
}

impl Error {
    pub fn transport(&self) -> &TransportError {
        match self {
            Error::Fetch { source, .. } => source,
        }
    }
}
