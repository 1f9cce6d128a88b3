//! kuando Busylight USB HID protocol (v2): step records, buffer assembly and
//! byte encoders.
//!
//! A Busylight is driven by a single 64-byte output report describing up to
//! seven behaviour steps plus a configuration record. This crate builds that
//! report and nothing else: it is I/O-free, so every layout and checksum rule
//! can be tested without hardware. Writing the buffer to a device lives in
//! `busylight-hid-transport`.
//!
//! # Example
//!
//! ```
//! use busylight_hid_protocol::encode::{Color, Command, Duration, Repeat, Tone};
//! use busylight_hid_protocol::{BusylightSpec, Step, verify_checksum};
//!
//! # fn main() -> Result<(), busylight_hid_protocol::ProtocolError> {
//! let blink_blue = Step::builder()
//!     .command(Command::jump(0))
//!     .repeat(Repeat::times(3))
//!     .color(Color::OFF, Color::OFF, Color::intensity(20))
//!     .timing(Duration::seconds(0.5), Duration::seconds(0.5))
//!     .tone(Tone::off())
//!     .build();
//!
//! let spec = BusylightSpec::builder().append(blink_blue)?.build()?;
//! let buffer = spec.to_bytes();
//! assert_eq!(buffer.len(), 64);
//! assert!(verify_checksum(&buffer));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod encode;
pub mod spec;
pub mod step;
pub mod step_byte;
pub mod tuning;

pub use spec::{
    BUFFER_LEN, BusylightSpec, CHECKSUM_OFFSET, CONFIG_SLOT, ConfigField, RESERVED_BYTE,
    SPEC_STEPS, SpecBuilder, USER_STEPS, checksum_of, verify_checksum,
};
pub use step::{STEP_LEN, Step, StepBuilder, StepField};
pub use step_byte::StepByte;
pub use tuning::DeviceTuning;

use thiserror::Error;

/// Errors raised while assembling a Busylight buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("max steps reached: only {capacity} slots are available to append")]
    CapacityExceeded { capacity: usize },

    #[error("index {index} is out of range [0, {max}]")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("invalid binary byte representation: {0:?}")]
    InvalidBinary(String),

    #[error("{field} value {value} is out of range [{min}, {max}]")]
    InvalidTuning {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}

/// Convenience result alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
