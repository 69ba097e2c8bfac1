//! Metallic tint effect
//!
//! Rewrites the blue channel from the inverted green channel scaled by a
//! coefficient: `blue = narrow((255 - green) * coefficient)`. Red, green and
//! alpha are left untouched.

use crate::{
    Effect, Error, Result,
    buffer::{self, BLUE, GREEN, Image},
};
use derivative::Derivative;
use derive_setters::Setters;
use ndarray::Axis;
use std::borrow::Cow;

/// How an `f64` tint value is brought back into the `u8` sample range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    /// `clamp(round(value), 0, 255)`, rounding half away from zero.
    /// `NaN` becomes 0.
    Saturating,
    /// `floor(value) mod 256`, Euclidean so negative values wrap upwards.
    /// Non-finite values become 0.
    Wrapping,
}

impl Narrowing {
    pub fn narrow(self, value: f64) -> u8 {
        match self {
            Narrowing::Saturating => {
                if value.is_nan() {
                    0
                } else {
                    value.round().clamp(0.0, 255.0) as u8
                }
            }
            Narrowing::Wrapping => {
                if !value.is_finite() {
                    0
                } else {
                    value.floor().rem_euclid(256.0) as u8
                }
            }
        }
    }
}

/// Metallic tint effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ChannelTintConfig {
    #[derivative(Default(value = "1.0"))]
    coefficient: f64,
    #[derivative(Default(value = "Narrowing::Saturating"))]
    narrowing: Narrowing,
}

impl ChannelTintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn narrowing(&self) -> Narrowing {
        self.narrowing
    }
}

impl Effect for ChannelTintConfig {
    fn apply(&self, image: &mut Image) -> Result<()> {
        let channels = buffer::channels(image);
        if channels <= BLUE {
            return Err(Error::Shape(channels));
        }

        log::debug!(
            "tinting {}x{}x{} image, coefficient {}, {:?}",
            buffer::height(image),
            buffer::width(image),
            channels,
            self.coefficient,
            self.narrowing
        );

        for mut pixel in image.lanes_mut(Axis(2)) {
            let inverted = 255.0 - f64::from(pixel[GREEN]);
            pixel[BLUE] = self.narrowing.narrow(inverted * self.coefficient);
        }

        Ok(())
    }
}

/// Applies the tint with the saturating policy.
pub fn transform(image: &mut Image, coefficient: f64) -> Result<()> {
    ChannelTintConfig::new()
        .with_coefficient(coefficient)
        .apply(image)
}

/// Parses the coefficient argument. Surrounding whitespace is ignored,
/// `inf`/`nan` spellings are accepted and single underscores between digits
/// are treated as separators (`1_000`). Hex and other radix prefixes are not.
pub fn parse_coefficient(input: &str) -> Result<f64> {
    strip_digit_separators(input.trim())
        .parse::<f64>()
        .map_err(|source| Error::Parse {
            input: input.to_string(),
            source,
        })
}

/// Drops underscores that sit between two ASCII digits. Any other underscore
/// is kept so the float parser rejects it.
fn strip_digit_separators(text: &str) -> Cow<'_, str> {
    if !text.contains('_') {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let stripped = text
        .char_indices()
        .filter(|&(i, ch)| {
            let between_digits = i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            !(ch == '_' && between_digits)
        })
        .map(|(_, ch)| ch)
        .collect();

    Cow::Owned(stripped)
}
