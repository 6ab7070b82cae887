use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{elapsed_secs, Rgba, SettingsRegistry, ValueRange};

/// One history entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

/// How many samples a [`History`] keeps around.
///
/// Both limits are optional. The age limit is applied first and drops every expired
/// sample wherever it sits. The count limit then drops the oldest samples in arrival
/// order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct HistoryRetention {
    pub max_samples: Option<usize>,
    pub max_age_secs: Option<u64>,
}

impl HistoryRetention {
    pub const DEFAULT_MAX_SAMPLES: usize = 500;

    pub fn unbounded() -> Self {
        Self {
            max_samples: None,
            max_age_secs: None,
        }
    }

    fn apply(&self, samples: &mut VecDeque<Sample>, now: i64) {
        if let Some(max_age) = self.max_age_secs {
            let max_age_ms = i64::try_from(max_age.saturating_mul(1000)).unwrap_or(i64::MAX);
            samples.retain(|sample| now.saturating_sub(sample.timestamp) <= max_age_ms);
        }
        if let Some(max_samples) = self.max_samples {
            while samples.len() > max_samples {
                samples.pop_front();
            }
        }
    }
}

impl Default for HistoryRetention {
    fn default() -> Self {
        Self {
            max_samples: Some(Self::DEFAULT_MAX_SAMPLES),
            max_age_secs: None,
        }
    }
}

/// A point of the strip chart: seconds relative to now on x, the sample value on y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Scrolling history of one sensor meaning of a device.
#[derive(Clone, Debug)]
pub struct History {
    meaning: String,
    unit: String,
    color: Rgba,
    range: Option<ValueRange>,
    retention: HistoryRetention,
    samples: VecDeque<Sample>,
    last_plot: ChartView,
}

impl History {
    pub fn new(
        meaning: impl Into<String>,
        registry: &SettingsRegistry,
        retention: HistoryRetention,
    ) -> Self {
        let meaning = meaning.into();
        let mut history = Self {
            unit: registry.unit(&meaning).to_string(),
            color: registry.color(&meaning),
            range: registry.range(&meaning),
            meaning,
            retention,
            samples: VecDeque::new(),
            last_plot: ChartView::default(),
        };
        let (y_min, y_max) = history.y_bounds();
        history.last_plot = ChartView {
            meaning: history.meaning.clone(),
            y_label: history.unit.clone(),
            y_min,
            y_max,
            color: history.color,
            ..ChartView::default()
        };
        history
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends a sample, applies the retention policy and replots relative to `now`.
    pub fn append(&mut self, value: f64, timestamp: i64, now: i64) -> &ChartView {
        self.samples.push_back(Sample { timestamp, value });
        self.retention.apply(&mut self.samples, now);
        self.last_plot = self.plot(now);
        &self.last_plot
    }

    /// The chart as computed by the latest [`History::append`].
    pub fn last_plot(&self) -> &ChartView {
        &self.last_plot
    }

    /// Y axis bounds: the configured range, or the data extent if none is configured.
    pub fn y_bounds(&self) -> (f64, f64) {
        if let Some(range) = self.range {
            return (range.min, range.max);
        }
        let mut values = self.samples.iter().map(|sample| sample.value);
        match values.next() {
            Some(first) => values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))),
            None => (0.0, 1.0),
        }
    }

    /// Recomputes all points relative to `now`.
    ///
    /// Every sample is placed at the negative whole seconds elapsed since it was
    /// recorded, so the chart scrolls left as time passes even without new samples.
    pub fn plot(&self, now: i64) -> ChartView {
        let points: Vec<PlotPoint> = self
            .samples
            .iter()
            .map(|sample| PlotPoint {
                x: -(elapsed_secs(sample.timestamp, now) as f64),
                y: sample.value,
            })
            .collect();

        let (x_min, x_max) = match (points.first(), points.last()) {
            (Some(oldest), Some(newest)) => (oldest.x, newest.x + 1.0),
            _ => (-1.0, 0.0),
        };
        let (y_min, y_max) = self.y_bounds();

        ChartView {
            meaning: self.meaning.clone(),
            y_label: self.unit.clone(),
            y_min,
            y_max,
            color: self.color,
            x_min,
            x_max,
            points,
        }
    }
}

/// Everything a strip chart widget needs to draw a [`History`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartView {
    pub meaning: String,
    pub y_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub color: Rgba,
    /// Visible x window, `x_min` inclusive and `x_max` exclusive.
    pub x_min: f64,
    pub x_max: f64,
    pub points: Vec<PlotPoint>,
}

impl ChartView {
    /// SVG polyline commands of the chart in a `width` x `height` viewbox.
    ///
    /// The y axis points down as in SVG, `y_max` maps to the top edge.
    pub fn line_path(&self, width: f64, height: f64) -> String {
        let x_span = self.x_max - self.x_min;
        let (y_min, y_span) = if self.y_max > self.y_min {
            (self.y_min, self.y_max - self.y_min)
        } else {
            (self.y_min - 1.0, 2.0)
        };
        if x_span <= 0.0 {
            return String::new();
        }

        let mut commands = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let x = width * (point.x - self.x_min) / x_span;
            let y = height * (1.0 - (point.y - y_min) / y_span);
            let verb = if i == 0 { 'M' } else { 'L' };
            if !commands.is_empty() {
                commands.push(' ');
            }
            commands.push_str(&format!("{verb} {x:.2} {y:.2}"));
        }
        commands
    }
}
