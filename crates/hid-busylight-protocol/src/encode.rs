//! Semantic encoders: domain parameters in, one labelled byte out.
//!
//! Bit layouts follow the public Busylight v2 protocol description:
//!
//! | Byte | Encoding |
//! |------|----------|
//! | command | high nibble opcode (`0x1` jump, `0x8` keep-alive), low nibble argument |
//! | repeat | plain count, 0-255 |
//! | red/green/blue | PWM duty in percent, 0-100 |
//! | on/off time | tenths of a second, 0-255 |
//! | tone | bit 7 update flag, bits 6-3 ringtone, bits 2-0 volume |
//!
//! All encoders clamp instead of failing; out-of-range domain values
//! saturate to the nearest encodable byte.

#![deny(static_mut_refs)]

use crate::step_byte::StepByte;

/// Step-command encoders (byte 0).
pub struct Command;

impl Command {
    const JUMP: u8 = 0x10;
    const KEEP_ALIVE: u8 = 0x80;

    /// No-op command.
    pub const fn none() -> StepByte {
        StepByte::new("command", 0)
    }

    /// Continue with step `target` (0-7) once this step finishes.
    pub fn jump(target: u8) -> StepByte {
        StepByte::new("next_step", Self::JUMP | target.min(7))
    }

    /// Keep the device alive for `seconds` (0-15) without further traffic.
    pub fn keep_alive(seconds: u8) -> StepByte {
        StepByte::new("keep_alive", Self::KEEP_ALIVE | seconds.min(0x0F))
    }
}

/// Repeat-count encoder (byte 1).
pub struct Repeat;

impl Repeat {
    pub fn times(count: u32) -> StepByte {
        StepByte::from_unsigned("repeat", count)
    }
}

/// Color-channel encoder (bytes 2-4).
pub struct Color;

impl Color {
    /// Maximum PWM duty accepted by the firmware.
    pub const MAX_INTENSITY: u8 = 100;

    pub const OFF: StepByte = StepByte::new("color", 0);

    /// PWM duty for one channel, in percent.
    pub fn intensity(percent: u8) -> StepByte {
        StepByte::new("color", percent.min(Self::MAX_INTENSITY))
    }
}

/// Full-intensity color presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
}

impl Light {
    /// Red, green and blue bytes for this preset.
    pub fn rgb(self) -> [StepByte; 3] {
        let full = Color::intensity(Color::MAX_INTENSITY);
        let off = Color::OFF;
        match self {
            Self::Off => [off, off, off],
            Self::Red => [full, off, off],
            Self::Green => [off, full, off],
            Self::Blue => [off, off, full],
            Self::Yellow => [full, full, off],
            Self::Magenta => [full, off, full],
            Self::Cyan => [off, full, full],
            Self::White => [full, full, full],
        }
    }
}

/// On/off duration encoder (bytes 5-6).
pub struct Duration;

impl Duration {
    /// Longest encodable duration in seconds.
    pub const MAX_SECS: f32 = 25.5;

    /// Duration in seconds, rounded to the nearest tenth.
    ///
    /// Negative and NaN inputs encode as zero.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0..=255 tenths before the cast"
    )]
    pub fn seconds(secs: f32) -> StepByte {
        let tenths = if secs.is_nan() {
            0.0
        } else {
            (secs.clamp(0.0, Self::MAX_SECS) * 10.0).round()
        };
        StepByte::new("duration", tenths as u8)
    }

    /// Duration already expressed in tenths of a second.
    pub fn tenths(tenths: u8) -> StepByte {
        StepByte::new("duration", tenths)
    }
}

/// Tone encoder (byte 7).
pub struct Tone;

impl Tone {
    const UPDATE: u8 = 0x80;

    /// Highest ringtone index.
    pub const MAX_RINGTONE: u8 = 15;
    /// Highest volume level.
    pub const MAX_VOLUME: u8 = 7;

    /// Leave whatever tone is playing untouched.
    pub const fn none() -> StepByte {
        StepByte::new("tone", 0)
    }

    /// Stop any tone.
    pub const fn off() -> StepByte {
        StepByte::new("tone", Self::UPDATE)
    }

    /// Play `ringtone` (0-15) at `volume` (0-7).
    pub fn settings(ringtone: u8, volume: u8) -> StepByte {
        let ringtone = ringtone.min(Self::MAX_RINGTONE);
        let volume = volume.min(Self::MAX_VOLUME);
        StepByte::new("tone", Self::UPDATE | (ringtone << 3) | volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_sets_opcode_and_target() {
        assert_eq!(Command::jump(0).value(), 0x10);
        assert_eq!(Command::jump(2).value(), 0x12);
        assert_eq!(Command::jump(7).value(), 0x17);
        assert_eq!(Command::jump(200).value(), 0x17);
    }

    #[test]
    fn keep_alive_clamps_seconds() {
        assert_eq!(Command::keep_alive(5).value(), 0x85);
        assert_eq!(Command::keep_alive(99).value(), 0x8F);
        assert_eq!(Command::none().value(), 0);
    }

    #[test]
    fn repeat_saturates() {
        assert_eq!(Repeat::times(3).value(), 3);
        assert_eq!(Repeat::times(1000).value(), 255);
    }

    #[test]
    fn color_intensity_caps_at_100() {
        assert_eq!(Color::intensity(20).value(), 20);
        assert_eq!(Color::intensity(100).value(), 100);
        assert_eq!(Color::intensity(255).value(), 100);
        assert_eq!(Color::OFF.value(), 0);
    }

    #[test]
    fn light_presets_expand_to_rgb() {
        let values = |l: Light| l.rgb().map(|b| b.value());
        assert_eq!(values(Light::Off), [0, 0, 0]);
        assert_eq!(values(Light::Red), [100, 0, 0]);
        assert_eq!(values(Light::Yellow), [100, 100, 0]);
        assert_eq!(values(Light::White), [100, 100, 100]);
    }

    #[test]
    fn duration_is_tenths_of_a_second() {
        assert_eq!(Duration::seconds(0.5).value(), 5);
        assert_eq!(Duration::seconds(1.5).value(), 15);
        assert_eq!(Duration::seconds(10.0).value(), 100);
        assert_eq!(Duration::seconds(0.0).value(), 0);
        assert_eq!(Duration::seconds(-3.0).value(), 0);
        assert_eq!(Duration::seconds(f32::NAN).value(), 0);
        assert_eq!(Duration::seconds(60.0).value(), 255);
        assert_eq!(Duration::tenths(42).value(), 42);
    }

    #[test]
    fn tone_bit_layout() {
        assert_eq!(Tone::none().value(), 0x00);
        assert_eq!(Tone::off().value(), 0x80);
        assert_eq!(Tone::settings(13, 7).value(), 0xEF);
        assert_eq!(Tone::settings(1, 0).value(), 0x88);
        assert_eq!(Tone::settings(99, 99).value(), 0xFF);
    }
}
