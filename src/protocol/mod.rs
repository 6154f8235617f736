//! Wire-level tokens of the WebSocket transport.

pub mod constants;

pub use constants::{
    BINARY_ENCODER_TRANSFER_MODE_HEADER, BINARY_MESSAGE_RECEIVED_ACTION,
    CONNECTION_OPENED_ACTION, SOAP_CONTENT_TYPE_HEADER, TEXT_MESSAGE_RECEIVED_ACTION,
};
