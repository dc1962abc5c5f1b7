use crate::model::SurveyId;

#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error("survey not found: {0}")]
    SurveyNotFound(SurveyId),
    #[error("admin password rejected")]
    Unauthorized,
    #[error("invalid input: {0}")]
    MalformedInput(String),
    #[error("failed to create data directory: {0}")]
    DataDirCreation(std::io::Error),
    #[error("failed to read collection document: {0}")]
    CollectionRead(std::io::Error),
    #[error("failed to write collection document: {0}")]
    CollectionWrite(std::io::Error),
    #[error("failed to replace collection document: {0}")]
    CollectionReplace(std::io::Error),
    #[error("failed to serialise collection: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialise collection: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to decode image payload: {0}")]
    ImageDecode(base64::DecodeError),
    #[error("image store error: {0}")]
    Images(#[from] kiosk_images::ImagesError),
}

pub type KioskResult<T> = std::result::Result<T, KioskError>;
