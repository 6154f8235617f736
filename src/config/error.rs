use thiserror::Error;

/// Rejection of a write to a [`TransportSettings`](super::TransportSettings) field.
///
/// Every variant is raised before the field is touched, so the settings keep
/// their previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("`{value}` is not a valid {type_name} value")]
    InvalidEnumerationValue {
        type_name: &'static str,
        value: String,
    },
    #[error("{field} is out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        #[source]
        reason: SubProtocolError,
    },
}

/// Why a sub-protocol string is not a single valid token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubProtocolError {
    #[error("sub-protocol must not be empty")]
    Empty,
    #[error("`{value}` names more than one sub-protocol (separator `{separator}`)")]
    MultipleProtocols { value: String, separator: char },
    #[error("`{value}` contains the invalid character {character:?}")]
    InvalidCharacter { value: String, character: char },
}
