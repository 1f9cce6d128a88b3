//! Device tuning carried by the configuration record.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ProtocolResult};

/// Firmware default for the trigger sensitivity.
pub const DEFAULT_SENSITIVITY: u8 = 0;
/// Firmware default for the timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u8 = 31;
/// Firmware default for the trigger interval, in 250 ms units.
pub const DEFAULT_TRIGGER_TIME: u8 = 250;

/// Highest accepted sensitivity.
pub const MAX_SENSITIVITY: u8 = 31;
/// Accepted timeout range in seconds.
pub const TIMEOUT_RANGE_SECS: core::ops::RangeInclusive<u8> = 1..=31;

/// Values written to bytes 0-2 of the configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceTuning {
    /// Trigger sensitivity, 0-31.
    pub sensitivity: u8,
    /// Timeout in seconds, 1-31.
    pub timeout_secs: u8,
    /// Trigger interval in units of 250 ms.
    pub trigger_time: u8,
}

impl DeviceTuning {
    /// Check the documented firmware ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTuning`] naming the first offending field.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.sensitivity > MAX_SENSITIVITY {
            return Err(ProtocolError::InvalidTuning {
                field: "sensitivity",
                value: self.sensitivity,
                min: 0,
                max: MAX_SENSITIVITY,
            });
        }
        if !TIMEOUT_RANGE_SECS.contains(&self.timeout_secs) {
            return Err(ProtocolError::InvalidTuning {
                field: "timeout_secs",
                value: self.timeout_secs,
                min: *TIMEOUT_RANGE_SECS.start(),
                max: *TIMEOUT_RANGE_SECS.end(),
            });
        }
        Ok(())
    }
}

impl Default for DeviceTuning {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            trigger_time: DEFAULT_TRIGGER_TIME,
        }
    }
}
