use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

/// RGBA color with 8-bit channels and a unit-interval alpha.
///
/// Serialized as CSS text (`#rrggbb` or `rgba(r, g, b, a)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ScenarioResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(ScenarioError::InvalidData(
                "color alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(..)`, `rgba(..)` or a supported color name.
    pub fn parse(input: &str) -> ScenarioResult<Self> {
        let text = input.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(input));
        }
        if let Some(body) = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).ok_or_else(|| invalid_color(input));
        }
        named_color(&text.to_ascii_lowercase()).ok_or_else(|| invalid_color(input))
    }
}

fn invalid_color(input: &str) -> ScenarioError {
    ScenarioError::InvalidData(format!("unsupported color `{input}`"))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let nibble = ch.to_digit(16)? as u8;
                *slot = nibble * 17;
            }
            Some(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Some(Color::rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let (rgb, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 1.0),
        [r, g, b, a] => ([*r, *g, *b], a.parse::<f64>().ok()?),
        _ => return None,
    };
    let mut channels = [0u8; 3];
    for (slot, raw) in channels.iter_mut().zip(rgb) {
        *slot = raw.parse::<u8>().ok()?;
    }
    let color = Color::rgba(channels[0], channels[1], channels[2], alpha);
    color.validate().ok()?;
    Some(color)
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "black" => Color::rgb(0, 0, 0),
        "white" => Color::rgb(255, 255, 255),
        "transparent" => Color::rgba(0, 0, 0, 0.0),
        _ => return None,
    };
    Some(color)
}

impl FromStr for Color {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}
