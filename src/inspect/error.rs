#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode inspect document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no numeric `pid` key found in inspect document")]
    MissingPid,
}

pub type Result<T> = std::result::Result<T, Error>;
