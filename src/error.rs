use thiserror::Error;

/// Errors from classifying raw marker payloads and from loading marker schemas.
///
/// Incomplete correlations (a network load without a STOP, an IPC message without
/// all of its phases) are not errors; they produce markers flagged as incomplete.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MarkerError {
    #[error("Unrecognized marker payload type {0:?}")]
    UnrecognizedPayloadKind(String),

    #[error("The marker payload has no \"type\" field")]
    MissingPayloadKind,

    #[error("The marker payload is not a JSON object")]
    PayloadNotAnObject,

    #[error("Could not read {kind} marker payload: {source}")]
    MalformedPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid marker schema: {0}")]
    InvalidSchema(#[source] serde_json::Error),

    #[error("The marker schema list is not a JSON array")]
    SchemaListNotAnArray,
}
