//! Step records: the 8-byte behavioural unit of a Busylight buffer.
//!
//! An ordinary step tells the firmware what to do for one phase of a pattern:
//!
//! ```text
//! Byte 0: command / next-step jump
//! Byte 1: repeat count
//! Byte 2-4: red, green, blue PWM
//! Byte 5-6: on-duration, off-duration
//! Byte 7: tone
//! ```
//!
//! Steps are built once through [`StepBuilder`] and are immutable afterwards.
//! The only mutation is crate-internal: [`SpecBuilder`](crate::SpecBuilder)
//! writes checksum bytes into the configuration record after it has been
//! built.

#![deny(static_mut_refs)]

use crate::encode::Light;
use crate::step_byte::StepByte;
use crate::{ProtocolError, ProtocolResult};

/// Bytes per step record.
pub const STEP_LEN: usize = 8;

/// Position of each field inside an ordinary step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StepField {
    Command = 0,
    Repeat = 1,
    Red = 2,
    Green = 3,
    Blue = 4,
    OnTime = 5,
    OffTime = 6,
    Tone = 7,
}

impl StepField {
    /// All fields in wire order.
    pub const ALL: [Self; STEP_LEN] = [
        Self::Command,
        Self::Repeat,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::OnTime,
        Self::OffTime,
        Self::Tone,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Repeat => "repeat",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::OnTime => "on_time",
            Self::OffTime => "off_time",
            Self::Tone => "tone",
        }
    }
}

/// One 8-byte record of a Busylight command buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    bytes: [StepByte; STEP_LEN],
}

impl Step {
    /// A step whose every position holds [`StepByte::EMPTY`].
    pub const fn empty() -> Self {
        Self {
            bytes: [StepByte::EMPTY; STEP_LEN],
        }
    }

    pub fn builder() -> StepBuilder {
        StepBuilder::new()
    }

    pub(crate) const fn from_bytes(bytes: [StepByte; STEP_LEN]) -> Self {
        Self { bytes }
    }

    /// Labelled bytes in position order.
    pub fn bytes(&self) -> &[StepByte; STEP_LEN] {
        &self.bytes
    }

    /// Byte at `index`, or `None` outside `[0, 7]`.
    pub fn get(&self, index: usize) -> Option<StepByte> {
        self.bytes.get(index).copied()
    }

    pub fn field(&self, field: StepField) -> StepByte {
        self.get(field.index()).unwrap_or(StepByte::EMPTY)
    }

    pub fn command(&self) -> StepByte {
        self.field(StepField::Command)
    }

    pub fn repeat(&self) -> StepByte {
        self.field(StepField::Repeat)
    }

    pub fn red(&self) -> StepByte {
        self.field(StepField::Red)
    }

    pub fn green(&self) -> StepByte {
        self.field(StepField::Green)
    }

    pub fn blue(&self) -> StepByte {
        self.field(StepField::Blue)
    }

    pub fn on_time(&self) -> StepByte {
        self.field(StepField::OnTime)
    }

    pub fn off_time(&self) -> StepByte {
        self.field(StepField::OffTime)
    }

    pub fn tone(&self) -> StepByte {
        self.field(StepField::Tone)
    }

    /// Raw wire bytes in position order.
    pub fn raw_bytes(&self) -> [u8; STEP_LEN] {
        self.bytes.map(|b| b.value())
    }

    /// Unreduced sum of the unsigned readings of all 8 bytes.
    pub fn checksum_contribution(&self) -> u32 {
        self.bytes.iter().map(StepByte::to_u32).sum()
    }

    /// Replace the byte at `index`.
    ///
    /// Only `SpecBuilder::build` uses this, to place checksum bytes into an
    /// already-built configuration record.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IndexOutOfRange`] when `index` is not in `[0, 7]`.
    pub(crate) fn overwrite(&mut self, value: StepByte, index: usize) -> ProtocolResult<()> {
        let slot = self
            .bytes
            .get_mut(index)
            .ok_or(ProtocolError::IndexOutOfRange {
                index,
                max: STEP_LEN - 1,
            })?;
        *slot = value;
        Ok(())
    }

    /// Space-separated hex of the 8 bytes, e.g. `10 03 00 00 14 05 05 80`.
    pub fn hex_dump(&self) -> String {
        self.bytes
            .iter()
            .map(StepByte::hex)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builder for [`Step`]. Every position starts as [`StepByte::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBuilder {
    bytes: [StepByte; STEP_LEN],
}

impl StepBuilder {
    pub const fn new() -> Self {
        Self {
            bytes: [StepByte::EMPTY; STEP_LEN],
        }
    }

    /// Set the byte at a raw position.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IndexOutOfRange`] when `index` is not in `[0, 7]`.
    pub fn set(mut self, index: usize, value: StepByte) -> ProtocolResult<Self> {
        let slot = self
            .bytes
            .get_mut(index)
            .ok_or(ProtocolError::IndexOutOfRange {
                index,
                max: STEP_LEN - 1,
            })?;
        *slot = value;
        Ok(self)
    }

    /// Set a named field.
    pub fn field(mut self, field: StepField, value: StepByte) -> Self {
        if let Some(slot) = self.bytes.get_mut(field.index()) {
            *slot = value;
        }
        self
    }

    pub fn command(self, command: StepByte) -> Self {
        self.field(StepField::Command, command)
    }

    pub fn repeat(self, repeat: StepByte) -> Self {
        self.field(StepField::Repeat, repeat)
    }

    pub fn color(self, red: StepByte, green: StepByte, blue: StepByte) -> Self {
        self.field(StepField::Red, red)
            .field(StepField::Green, green)
            .field(StepField::Blue, blue)
    }

    /// Apply a full-intensity color preset.
    pub fn light(self, light: Light) -> Self {
        let [red, green, blue] = light.rgb();
        self.color(red, green, blue)
    }

    pub fn timing(self, on: StepByte, off: StepByte) -> Self {
        self.field(StepField::OnTime, on)
            .field(StepField::OffTime, off)
    }

    pub fn tone(self, tone: StepByte) -> Self {
        self.field(StepField::Tone, tone)
    }

    pub fn build(self) -> Step {
        Step::from_bytes(self.bytes)
    }
}

impl Default for StepBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn empty_step_is_all_zero() {
        let step = Step::empty();
        assert_eq!(step.raw_bytes(), [0u8; STEP_LEN]);
        assert_eq!(step.checksum_contribution(), 0);
        assert_eq!(step.hex_dump(), "00 00 00 00 00 00 00 00");
        assert_eq!(Step::builder().build(), step);
    }

    #[test]
    fn named_setters_land_on_fixed_positions() {
        let step = Step::builder()
            .command(StepByte::new("command", 0x11))
            .repeat(StepByte::new("repeat", 0x03))
            .color(
                StepByte::new("red", 0x0A),
                StepByte::new("green", 0x0B),
                StepByte::new("blue", 0x0C),
            )
            .timing(StepByte::new("on", 0x05), StepByte::new("off", 0x06))
            .tone(StepByte::new("tone", 0x80))
            .build();

        assert_eq!(
            step.raw_bytes(),
            [0x11, 0x03, 0x0A, 0x0B, 0x0C, 0x05, 0x06, 0x80]
        );
        assert_eq!(step.command().label(), "command");
        assert_eq!(step.red().value(), 0x0A);
        assert_eq!(step.green().value(), 0x0B);
        assert_eq!(step.blue().value(), 0x0C);
        assert_eq!(step.on_time().value(), 0x05);
        assert_eq!(step.off_time().value(), 0x06);
        assert_eq!(step.tone().value(), 0x80);
        assert_eq!(step.repeat().value(), 0x03);
    }

    #[test]
    fn positional_set_accepts_every_index() -> TestResult {
        let mut builder = StepBuilder::new();
        for i in 0..STEP_LEN {
            builder = builder.set(i, StepByte::from_unsigned("n", (i + 1) as u32))?;
        }
        assert_eq!(builder.build().raw_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn positional_set_rejects_index_eight() {
        let result = StepBuilder::new().set(8, StepByte::EMPTY);
        assert_eq!(
            result,
            Err(ProtocolError::IndexOutOfRange { index: 8, max: 7 })
        );
        assert!(StepBuilder::new().set(usize::MAX, StepByte::EMPTY).is_err());
    }

    #[test]
    fn later_writes_win() {
        let step = Step::builder()
            .tone(StepByte::new("tone", 1))
            .tone(StepByte::new("tone", 2))
            .build();
        assert_eq!(step.tone().value(), 2);
    }

    #[test]
    fn checksum_contribution_is_not_reduced() {
        let step = Step::builder()
            .color(
                StepByte::new("r", 0xFF),
                StepByte::new("g", 0xFF),
                StepByte::new("b", 0xFF),
            )
            .timing(StepByte::new("on", 0xFF), StepByte::new("off", 0xFF))
            .build();
        assert_eq!(step.checksum_contribution(), 5 * 255);
    }

    #[test]
    fn overwrite_replaces_one_position() -> TestResult {
        let mut step = Step::empty();
        step.overwrite(StepByte::new("checksum_msb", 0x04), 6)?;
        step.overwrite(StepByte::new("checksum_lsb", 0x16), 7)?;
        assert_eq!(step.raw_bytes(), [0, 0, 0, 0, 0, 0, 0x04, 0x16]);
        Ok(())
    }

    #[test]
    fn overwrite_rejects_out_of_range() {
        let mut step = Step::empty();
        assert_eq!(
            step.overwrite(StepByte::EMPTY, 8),
            Err(ProtocolError::IndexOutOfRange { index: 8, max: 7 })
        );
        assert_eq!(step, Step::empty());
    }

    #[test]
    fn field_index_round_trips() {
        for (i, field) in StepField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(StepField::from_index(i), Some(*field));
        }
        assert_eq!(StepField::from_index(STEP_LEN), None);
    }

    #[test]
    fn field_names_follow_wire_order() {
        let names: Vec<&str> = StepField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "command", "repeat", "red", "green", "blue", "on_time", "off_time", "tone"
            ]
        );
    }

    #[test]
    fn light_preset_sets_rgb_only() {
        let step = Step::builder().light(Light::Magenta).build();
        assert_eq!(step.raw_bytes(), [0, 0, 100, 0, 100, 0, 0, 0]);
    }
}
