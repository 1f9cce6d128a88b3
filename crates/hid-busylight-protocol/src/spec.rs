//! Busylight v2 command buffer assembly.
//!
//! A buffer is 8 step records of 8 bytes each. Slots 0-6 carry caller steps
//! (or empty steps); slot 7 is always the configuration record:
//!
//! ```text
//! Byte 0: sensitivity (0-31)
//! Byte 1: timeout (1-31 s)
//! Byte 2: trigger time (units of 250 ms)
//! Byte 3-5: reserved (0xFF)
//! Byte 6-7: checksum, big-endian
//! ```
//!
//! The checksum is the sum of all 64 unsigned bytes, truncated to 16 bits,
//! computed while bytes 62-63 still hold zero. The firmware expects exactly
//! this ordering, so the checksum never covers its own value.

#![deny(static_mut_refs)]

use core::fmt;

use tracing::{debug, warn};

use crate::step::{STEP_LEN, Step};
use crate::step_byte::StepByte;
use crate::tuning::DeviceTuning;
use crate::{ProtocolError, ProtocolResult};

/// Step records per buffer.
pub const SPEC_STEPS: usize = 8;

/// Wire size of an assembled buffer.
pub const BUFFER_LEN: usize = SPEC_STEPS * STEP_LEN;

/// Slot that always holds the configuration record.
pub const CONFIG_SLOT: usize = SPEC_STEPS - 1;

/// Slots available to sequential [`SpecBuilder::append`] calls.
pub const USER_STEPS: usize = CONFIG_SLOT;

/// Value of the three reserved configuration bytes.
pub const RESERVED_BYTE: u8 = 0xFF;

/// Offset of the checksum MSB inside the full buffer.
pub const CHECKSUM_OFFSET: usize = BUFFER_LEN - 2;

/// Position of each field inside the configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConfigField {
    Sensitivity = 0,
    Timeout = 1,
    TriggerTime = 2,
    Reserved0 = 3,
    Reserved1 = 4,
    Reserved2 = 5,
    ChecksumMsb = 6,
    ChecksumLsb = 7,
}

impl ConfigField {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Keep the low 16 bits of a running byte sum.
fn truncate16(total: u32) -> u16 {
    let [_, _, high, low] = total.to_be_bytes();
    u16::from_be_bytes([high, low])
}

/// Sum `bytes` as unsigned values, truncated to 16 bits.
pub fn checksum_of(bytes: &[u8]) -> u16 {
    truncate16(bytes.iter().copied().map(u32::from).sum())
}

/// Check the trailing big-endian checksum of a raw 64-byte buffer.
pub fn verify_checksum(buffer: &[u8; BUFFER_LEN]) -> bool {
    let [body @ .., msb, lsb] = buffer;
    checksum_of(body) == u16::from_be_bytes([*msb, *lsb])
}

fn config_record(tuning: &DeviceTuning) -> Step {
    Step::from_bytes([
        StepByte::new("sensitivity", tuning.sensitivity),
        StepByte::new("timeout", tuning.timeout_secs),
        StepByte::new("trigger_time", tuning.trigger_time),
        StepByte::new("reserved", RESERVED_BYTE),
        StepByte::new("reserved", RESERVED_BYTE),
        StepByte::new("reserved", RESERVED_BYTE),
        StepByte::new("checksum_msb", 0),
        StepByte::new("checksum_lsb", 0),
    ])
}

fn slot_mut(steps: &mut [Step; SPEC_STEPS], index: usize) -> ProtocolResult<&mut Step> {
    steps.get_mut(index).ok_or(ProtocolError::IndexOutOfRange {
        index,
        max: SPEC_STEPS - 1,
    })
}

/// Accumulates step records and finalizes them into a [`BusylightSpec`].
///
/// Every slot starts as [`Step::empty`]. Slot 7 is reserved for the
/// configuration record: [`append`](Self::append) never reaches it, and a
/// step [`place`](Self::place)d there is replaced when the buffer is built.
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    steps: [Step; SPEC_STEPS],
    appended: usize,
    tuning: DeviceTuning,
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self {
            steps: [Step::empty(); SPEC_STEPS],
            appended: 0,
            tuning: DeviceTuning::default(),
        }
    }

    /// Use non-default values for the configuration record.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTuning`] when a value is outside its
    /// firmware range.
    pub fn with_tuning(mut self, tuning: DeviceTuning) -> ProtocolResult<Self> {
        tuning.validate()?;
        self.tuning = tuning;
        Ok(self)
    }

    /// Put `step` in the next sequential slot, starting at 0.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::CapacityExceeded`] once slots 0-6 have been
    /// filled by earlier appends.
    pub fn append(mut self, step: Step) -> ProtocolResult<Self> {
        if self.appended >= USER_STEPS {
            return Err(ProtocolError::CapacityExceeded {
                capacity: USER_STEPS,
            });
        }
        *slot_mut(&mut self.steps, self.appended)? = step;
        self.appended += 1;
        Ok(self)
    }

    /// Put `step` at an explicit slot, replacing whatever was there.
    ///
    /// Slot 7 is accepted but overwritten by the configuration record at
    /// build time.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IndexOutOfRange`] when `index` is not in `[0, 7]`.
    pub fn place(mut self, step: Step, index: usize) -> ProtocolResult<Self> {
        *slot_mut(&mut self.steps, index)? = step;
        if index == CONFIG_SLOT {
            warn!(
                slot = CONFIG_SLOT,
                "step placed in the configuration slot will be replaced at build time"
            );
        }
        Ok(self)
    }

    /// Number of successful [`append`](Self::append) calls so far.
    pub fn appended(&self) -> usize {
        self.appended
    }

    pub fn tuning(&self) -> &DeviceTuning {
        &self.tuning
    }

    /// Install the configuration record and write the checksum.
    ///
    /// # Errors
    ///
    /// Propagates [`ProtocolError::IndexOutOfRange`] from the configuration
    /// record writes; with the fixed slot layout this does not occur.
    pub fn build(self) -> ProtocolResult<BusylightSpec> {
        let mut steps = self.steps;
        *slot_mut(&mut steps, CONFIG_SLOT)? = config_record(&self.tuning);

        let checksum = truncate16(steps.iter().map(Step::checksum_contribution).sum());
        let [msb, lsb] = checksum.to_be_bytes();

        let config = slot_mut(&mut steps, CONFIG_SLOT)?;
        config.overwrite(
            StepByte::new("checksum_msb", msb),
            ConfigField::ChecksumMsb.index(),
        )?;
        config.overwrite(
            StepByte::new("checksum_lsb", lsb),
            ConfigField::ChecksumLsb.index(),
        )?;

        debug!(
            appended = self.appended,
            checksum,
            "assembled busylight spec"
        );

        Ok(BusylightSpec { steps, checksum })
    }
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finalized, immutable 64-byte Busylight command buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusylightSpec {
    steps: [Step; SPEC_STEPS],
    checksum: u16,
}

impl BusylightSpec {
    pub fn builder() -> SpecBuilder {
        SpecBuilder::new()
    }

    pub fn steps(&self) -> &[Step; SPEC_STEPS] {
        &self.steps
    }

    /// Step at `index`, or `None` outside `[0, 7]`.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The configuration record in slot 7.
    pub fn config(&self) -> &Step {
        let [.., config] = &self.steps;
        config
    }

    /// Checksum written into bytes 62-63.
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// The wire buffer.
    pub fn to_bytes(&self) -> [u8; BUFFER_LEN] {
        let mut out = [0u8; BUFFER_LEN];
        for (chunk, step) in out.chunks_exact_mut(STEP_LEN).zip(self.steps.iter()) {
            chunk.copy_from_slice(&step.raw_bytes());
        }
        out
    }

    /// One line of hex per step record.
    pub fn hex_dump(&self) -> String {
        self.steps
            .iter()
            .map(Step::hex_dump)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for BusylightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_dump())
    }
}
