//! Pattern files: a YAML or JSON description of a Busylight program.
//!
//! ```yaml
//! tuning:
//!   timeout_secs: 10
//! steps:
//!   - color: red
//!     on_secs: 0.5
//!     off_secs: 0.5
//!     repeat: 3
//!     tone: "off"
//!     next_step: 1
//!   - color: { red: 0, green: 0, blue: 40 }
//!     on_secs: 1.0
//!     tone: { play: { ringtone: 13, volume: 5 } }
//!     next_step: 0
//! ```

use std::path::Path;

use busylight_hid_protocol::encode::{Color, Command, Duration, Light, Repeat, Tone};
use busylight_hid_protocol::{BusylightSpec, DeviceTuning, Step, USER_STEPS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    #[serde(default)]
    pub tuning: DeviceTuning,
    #[serde(default)]
    pub steps: Vec<PatternStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternStep {
    pub color: ColorSpec,
    pub on_secs: f32,
    pub off_secs: f32,
    pub repeat: u32,
    pub tone: ToneSpec,
    /// Step to continue with once this one finishes. `None` stops after it.
    pub next_step: Option<u8>,
}

impl Default for PatternStep {
    fn default() -> Self {
        Self {
            color: ColorSpec::Preset(Preset::Off),
            on_secs: 0.0,
            off_secs: 0.0,
            repeat: 1,
            tone: ToneSpec::None,
            next_step: None,
        }
    }
}

/// Either a named preset or explicit channel percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Preset(Preset),
    Rgb(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
}

impl From<Preset> for Light {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Off => Light::Off,
            Preset::Red => Light::Red,
            Preset::Green => Light::Green,
            Preset::Blue => Light::Blue,
            Preset::Yellow => Light::Yellow,
            Preset::Magenta => Light::Magenta,
            Preset::Cyan => Light::Cyan,
            Preset::White => Light::White,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneSpec {
    None,
    Off,
    Play { ringtone: u8, volume: u8 },
}

impl Pattern {
    /// Load a pattern, choosing the parser from the file extension.
    ///
    /// `.json` files are parsed as JSON; everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let pattern = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        debug!("loaded pattern from {}", path.display());
        Ok(pattern)
    }

    /// The three-step pattern shown by `busylightctl demo`.
    pub fn demo() -> Self {
        Self {
            tuning: DeviceTuning::default(),
            steps: vec![
                PatternStep {
                    color: ColorSpec::Rgb(Rgb {
                        red: 0,
                        green: 0,
                        blue: 20,
                    }),
                    on_secs: 0.5,
                    off_secs: 0.5,
                    repeat: 3,
                    tone: ToneSpec::Off,
                    next_step: Some(1),
                },
                PatternStep {
                    color: ColorSpec::Rgb(Rgb {
                        red: 80,
                        green: 0,
                        blue: 0,
                    }),
                    on_secs: 1.5,
                    off_secs: 0.5,
                    repeat: 5,
                    tone: ToneSpec::None,
                    next_step: Some(2),
                },
                PatternStep {
                    color: ColorSpec::Rgb(Rgb {
                        red: 0,
                        green: 0,
                        blue: 100,
                    }),
                    on_secs: 10.0,
                    off_secs: 0.0,
                    repeat: 1,
                    tone: ToneSpec::Play {
                        ringtone: 13,
                        volume: 7,
                    },
                    next_step: Some(0),
                },
            ],
        }
    }

    /// Validate every step and assemble the device buffer.
    pub fn to_spec(&self) -> Result<BusylightSpec, CliError> {
        let mut builder = BusylightSpec::builder().with_tuning(self.tuning)?;
        debug!(tuning = ?builder.tuning(), steps = self.steps.len(), "assembling pattern");
        for (index, step) in self.steps.iter().enumerate() {
            let step = step
                .to_step(self.steps.len())
                .map_err(|msg| CliError::ValidationError(format!("step {index}: {msg}")))?;
            builder = builder.append(step)?;
        }
        Ok(builder.build()?)
    }
}

impl PatternStep {
    fn to_step(&self, step_count: usize) -> Result<Step, String> {
        let [red, green, blue] = match self.color {
            ColorSpec::Preset(preset) => Light::from(preset).rgb(),
            ColorSpec::Rgb(rgb) => {
                for (name, value) in [("red", rgb.red), ("green", rgb.green), ("blue", rgb.blue)] {
                    if value > Color::MAX_INTENSITY {
                        return Err(format!(
                            "{name} intensity {value} exceeds {}%",
                            Color::MAX_INTENSITY
                        ));
                    }
                }
                [
                    Color::intensity(rgb.red),
                    Color::intensity(rgb.green),
                    Color::intensity(rgb.blue),
                ]
            }
        };

        for (name, secs) in [("on_secs", self.on_secs), ("off_secs", self.off_secs)] {
            if !(0.0..=Duration::MAX_SECS).contains(&secs) {
                return Err(format!(
                    "{name} {secs} is outside 0-{} seconds",
                    Duration::MAX_SECS
                ));
            }
        }

        if self.repeat > u32::from(u8::MAX) {
            return Err(format!("repeat {} exceeds {}", self.repeat, u8::MAX));
        }

        let tone = match self.tone {
            ToneSpec::None => Tone::none(),
            ToneSpec::Off => Tone::off(),
            ToneSpec::Play { ringtone, volume } => {
                if ringtone > Tone::MAX_RINGTONE {
                    return Err(format!(
                        "ringtone {ringtone} exceeds {}",
                        Tone::MAX_RINGTONE
                    ));
                }
                if volume > Tone::MAX_VOLUME {
                    return Err(format!("volume {volume} exceeds {}", Tone::MAX_VOLUME));
                }
                Tone::settings(ringtone, volume)
            }
        };

        let command = match self.next_step {
            None => Command::none(),
            Some(target) if usize::from(target) < step_count.min(USER_STEPS) => {
                Command::jump(target)
            }
            Some(target) => {
                return Err(format!(
                    "next_step {target} does not name a step in this pattern"
                ));
            }
        };

        Ok(Step::builder()
            .command(command)
            .repeat(Repeat::times(self.repeat))
            .color(red, green, blue)
            .timing(Duration::seconds(self.on_secs), Duration::seconds(self.off_secs))
            .tone(tone)
            .build())
    }
}
