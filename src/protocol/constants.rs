//! Message-action and header tokens shared with the surrounding transport stack.
//!
//! Remote peers and co-located components key on these exact byte sequences.

/// Action of the notification message raised when a WebSocket connection opens.
pub const CONNECTION_OPENED_ACTION: &str = "http://schemas.microsoft.com/2011/02/session/onopen";

/// Action stamped on messages that arrived as binary WebSocket frames.
pub const BINARY_MESSAGE_RECEIVED_ACTION: &str =
    "http://schemas.microsoft.com/2011/02/websockets/onbinarymessage";

/// Action stamped on messages that arrived as text WebSocket frames.
pub const TEXT_MESSAGE_RECEIVED_ACTION: &str =
    "http://schemas.microsoft.com/2011/02/websockets/ontextmessage";

/// Header carrying the content type of the enclosed envelope.
pub const SOAP_CONTENT_TYPE_HEADER: &str = "soap-content-type";

/// Header announcing the transfer mode used by the binary encoder.
pub const BINARY_ENCODER_TRANSFER_MODE_HEADER: &str = "microsoft-binary-transfer-mode";

/// Method token the connection implementation uses on the wire.
pub const WEBSOCKET_METHOD: &str = "WEBSOCKET";

/// Sub-protocol tag the listener negotiates when no explicit sub-protocol is configured.
pub const SOAP_SUB_PROTOCOL: &str = "soap";
