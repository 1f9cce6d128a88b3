//! Writer abstraction for delivering assembled buffers to a device.

#![deny(static_mut_refs)]

use busylight_hid_protocol::{BUFFER_LEN, BusylightSpec};
use tracing::{debug, warn};

use crate::{TransportError, TransportResult};

/// Sink for 64-byte Busylight command buffers.
///
/// Implementations must be `Send` but are not required to be `Sync`.
pub trait SpecWriter: Send {
    /// Write one buffer and return how many payload bytes were accepted.
    fn write_buffer(&mut self, buffer: &[u8; BUFFER_LEN]) -> TransportResult<usize>;
}

/// Serialize `spec` and write it through `writer`.
///
/// # Errors
///
/// Propagates writer failures and reports [`TransportError::ShortWrite`]
/// when fewer than 64 bytes were accepted.
pub fn send_spec(writer: &mut dyn SpecWriter, spec: &BusylightSpec) -> TransportResult<()> {
    let buffer = spec.to_bytes();
    debug!(checksum = spec.checksum(), "sending busylight buffer");

    let written = writer.write_buffer(&buffer)?;
    if written != BUFFER_LEN {
        warn!(written, expected = BUFFER_LEN, "short busylight write");
        return Err(TransportError::ShortWrite {
            written,
            expected: BUFFER_LEN,
        });
    }
    Ok(())
}
