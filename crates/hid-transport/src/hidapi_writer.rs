//! `hidapi`-backed writer for real hardware.

#![deny(static_mut_refs)]

use busylight_hid_protocol::BUFFER_LEN;
use hidapi::{HidApi, HidDevice};
use tracing::{debug, info};

use crate::ids::{BusylightModel, KNOWN_DEVICES};
use crate::writer::SpecWriter;
use crate::{TransportError, TransportResult};

/// Busylights use unnumbered reports; hidapi still expects a leading ID byte.
pub const REPORT_ID: u8 = 0x00;

/// Bytes handed to hidapi per write: report ID plus the 64-byte buffer.
pub const OUTPUT_REPORT_LEN: usize = 1 + BUFFER_LEN;

/// An open Busylight HID handle.
pub struct HidApiWriter {
    device: HidDevice,
    vendor_id: u16,
    product_id: u16,
}

impl HidApiWriter {
    /// Open the first connected device from [`KNOWN_DEVICES`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::OpenError`] when hidapi cannot initialise and
    /// [`TransportError::DeviceNotFound`] when no known device opens.
    pub fn acquire() -> TransportResult<Self> {
        let api = HidApi::new().map_err(|e| TransportError::OpenError(e.to_string()))?;
        for (vendor_id, product_id) in KNOWN_DEVICES {
            match api.open(vendor_id, product_id) {
                Ok(device) => {
                    info!(
                        model = BusylightModel::from_ids(vendor_id, product_id).display_name(),
                        "acquired busylight 0x{vendor_id:04X}:0x{product_id:04X}"
                    );
                    return Ok(Self {
                        device,
                        vendor_id,
                        product_id,
                    });
                }
                Err(e) => {
                    debug!("0x{vendor_id:04X}:0x{product_id:04X} not available: {e}");
                }
            }
        }
        Err(TransportError::DeviceNotFound(
            "no known Busylight is connected".to_string(),
        ))
    }

    /// Open a specific VID/PID pair.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::OpenError`] when hidapi fails to initialise
    /// or to open the device.
    pub fn open(vendor_id: u16, product_id: u16) -> TransportResult<Self> {
        let api = HidApi::new().map_err(|e| TransportError::OpenError(e.to_string()))?;
        let device = api.open(vendor_id, product_id).map_err(|e| {
            TransportError::OpenError(format!("0x{vendor_id:04X}:0x{product_id:04X}: {e}"))
        })?;
        Ok(Self {
            device,
            vendor_id,
            product_id,
        })
    }

    pub fn model(&self) -> BusylightModel {
        BusylightModel::from_ids(self.vendor_id, self.product_id)
    }

    pub fn ids(&self) -> (u16, u16) {
        (self.vendor_id, self.product_id)
    }
}

/// Prefix `buffer` with [`REPORT_ID`].
pub fn output_report(buffer: &[u8; BUFFER_LEN]) -> [u8; OUTPUT_REPORT_LEN] {
    let mut report = [REPORT_ID; OUTPUT_REPORT_LEN];
    for (dst, src) in report.iter_mut().skip(1).zip(buffer) {
        *dst = *src;
    }
    report
}

impl SpecWriter for HidApiWriter {
    fn write_buffer(&mut self, buffer: &[u8; BUFFER_LEN]) -> TransportResult<usize> {
        let report = output_report(buffer);
        let written = self
            .device
            .write(&report)
            .map_err(|e| TransportError::WriteError(e.to_string()))?;
        Ok(written.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_report_prefixes_report_id() {
        let mut buffer = [0u8; BUFFER_LEN];
        for (i, b) in buffer.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let report = output_report(&buffer);

        assert_eq!(report.len(), 65);
        assert_eq!(report.first(), Some(&REPORT_ID));
        assert_eq!(report.get(1..), Some(&buffer[..]));
    }
}
