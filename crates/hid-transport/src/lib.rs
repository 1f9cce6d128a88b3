//! HID transport for kuando Busylight devices.
//!
//! This crate delivers buffers assembled by `busylight-hid-protocol` to a
//! device. [`SpecWriter`] is the seam: [`HidApiWriter`] talks to hardware
//! through `hidapi`, [`mock::MockSpecWriter`] records writes in memory.
//!
//! Sends are single-shot and blocking; there is no retry.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod hidapi_writer;
pub mod ids;
pub mod mock;
pub mod writer;

pub use hidapi_writer::{HidApiWriter, OUTPUT_REPORT_LEN, REPORT_ID, output_report};
pub use ids::{
    BusylightModel, KNOWN_DEVICES, KUANDO_VENDOR_ID, MICROCHIP_VENDOR_ID, is_busylight_device,
    product_ids,
};
pub use writer::{SpecWriter, send_spec};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Short write: device accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Device disconnected")]
    Disconnected,
}

pub type TransportResult<T> = Result<T, TransportError>;
