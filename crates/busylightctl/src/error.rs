//! Error types for busylightctl

use busylight_hid_protocol::ProtocolError;
use busylight_hid_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Checksum mismatch: buffer stores {stored:#06X}, contents sum to {computed:#06X}")]
    ChecksumMismatch { stored: u16, computed: u16 },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transport error: {0}")]
    Transport(TransportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl From<TransportError> for CliError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::DeviceNotFound(msg) => Self::DeviceNotFound(msg),
            other => Self::Transport(other),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceNotFound(_) => 2,
            Self::ValidationError(_)
            | Self::ChecksumMismatch { .. }
            | Self::Protocol(_)
            | Self::JsonError(_)
            | Self::YamlError(_) => 4,
            Self::Transport(_) | Self::IoError(_) => 1,
        }
    }
}
