use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A color with red, green, blue and alpha components in `0.0..=1.0`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Neutral gray used for meanings without a configured color.
    pub const FALLBACK: Rgba = Rgba([0.5, 0.5, 0.5, 1.0]);

    pub fn red(&self) -> f32 {
        self.0[0]
    }

    pub fn green(&self) -> f32 {
        self.0[1]
    }

    pub fn blue(&self) -> f32 {
        self.0[2]
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// The `(min, max)` value range a gauge is scaled to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Maps `value` linearly onto `0.0..=full`, `0.0` at `min` and `full` at `max`.
    ///
    /// Values outside of the range are not clamped. Returns `None` for an empty range.
    pub fn scale(&self, value: f64, full: f64) -> Option<f64> {
        let span = self.span();
        if span == 0.0 || !span.is_finite() {
            return None;
        }
        Some(full * (value - self.min) / span)
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<ValueRange> for (f64, f64) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}

/// Presentation settings of one sensor meaning.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MeaningSettings {
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub color: Rgba,
    #[serde(default)]
    pub range: Option<ValueRange>,
}

/// Static mapping from a sensor meaning to its unit, color and value range.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct SettingsRegistry {
    meanings: HashMap<String, MeaningSettings>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the settings of `meaning`.
    pub fn insert(&mut self, meaning: impl Into<String>, settings: MeaningSettings) {
        self.meanings.insert(meaning.into(), settings);
    }

    /// Builder flavoured variant of [`SettingsRegistry::insert`].
    pub fn with(mut self, meaning: impl Into<String>, settings: MeaningSettings) -> Self {
        self.insert(meaning, settings);
        self
    }

    pub fn get(&self, meaning: &str) -> Option<&MeaningSettings> {
        self.meanings.get(meaning)
    }

    /// Unit of `meaning`, or an empty string if the meaning is unknown.
    pub fn unit(&self, meaning: &str) -> &str {
        self.get(meaning).map(|s| s.unit.as_str()).unwrap_or("")
    }

    /// Color of `meaning`, or [`Rgba::FALLBACK`] if the meaning is unknown.
    pub fn color(&self, meaning: &str) -> Rgba {
        self.get(meaning).map(|s| s.color).unwrap_or(Rgba::FALLBACK)
    }

    pub fn range(&self, meaning: &str) -> Option<ValueRange> {
        self.get(meaning).and_then(|s| s.range)
    }

    pub fn len(&self) -> usize {
        self.meanings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meanings.is_empty()
    }
}
