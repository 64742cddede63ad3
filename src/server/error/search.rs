use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure talking to the search engine.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Engine answered with a non-success status.
    #[error("Search engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Engine response could not be interpreted.
    #[error("Malformed search engine response: {0}")]
    Malformed(String),
}
