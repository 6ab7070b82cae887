use crate::{elapsed_secs, AngleTransition, MeaningSettings, Rgba, SettingsRegistry, ValueRange};

/// Angle shown by gauges whose meaning has no configured value range.
pub const FULL_CIRCLE: f64 = 360.0;

/// Latest reading of one sensor of a device.
#[derive(Clone, Debug)]
pub struct Sensor {
    meaning: String,
    settings: Option<MeaningSettings>,
    value: f64,
    timestamp: i64,
    angle: AngleTransition,
}

impl Sensor {
    pub fn new(meaning: impl Into<String>, registry: &SettingsRegistry) -> Self {
        let meaning = meaning.into();
        let settings = registry.get(&meaning).cloned();
        let mut sensor = Self {
            meaning,
            settings,
            value: 0.0,
            timestamp: 0,
            angle: AngleTransition::default(),
        };
        if sensor.range().is_none() {
            sensor.angle = AngleTransition::settled(FULL_CIRCLE);
        }
        sensor
    }

    /// Stores a new reading and starts easing the angle towards its new target.
    ///
    /// The timestamp is stored before the value so the recompute sees both.
    pub fn record(&mut self, value: f64, recorded: i64, now: i64) {
        self.timestamp = recorded;
        self.value = value;
        self.retarget(now);
    }

    fn retarget(&mut self, now: i64) {
        let target = self.target_angle();
        self.angle = if self.range().is_some() {
            AngleTransition::new(
                self.angle.sample(now),
                target,
                now,
                AngleTransition::DEFAULT_DURATION_MS,
            )
        } else {
            AngleTransition::settled(target)
        };
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn unit(&self) -> &str {
        self.settings.as_ref().map(|s| s.unit.as_str()).unwrap_or("")
    }

    pub fn color(&self) -> Rgba {
        self.settings.as_ref().map(|s| s.color).unwrap_or(Rgba::FALLBACK)
    }

    pub fn range(&self) -> Option<ValueRange> {
        self.settings.as_ref().and_then(|s| s.range)
    }

    /// The angle the gauge settles at for the current value.
    pub fn target_angle(&self) -> f64 {
        self.range()
            .and_then(|range| range.scale(self.value, FULL_CIRCLE))
            .unwrap_or(FULL_CIRCLE)
    }

    /// The angle currently shown, part way through the transition if one is running.
    pub fn angle_at(&self, now: i64) -> f64 {
        self.angle.sample(now)
    }

    /// Recomputes everything the gauge shows at `now`.
    pub fn display(&self, now: i64) -> GaugeView {
        GaugeView {
            meaning: self.meaning.clone(),
            value: self.value,
            unit: self.unit().to_string(),
            elapsed_secs: elapsed_secs(self.timestamp, now),
            color: self.color(),
            angle: self.angle_at(now),
        }
    }
}

/// Everything a gauge widget needs to draw one sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeView {
    pub meaning: String,
    pub value: f64,
    pub unit: String,
    pub elapsed_secs: i64,
    pub color: Rgba,
    pub angle: f64,
}

impl GaugeView {
    pub fn value_text(&self) -> String {
        format!("{:.1}", self.value)
    }

    pub fn elapsed_text(&self) -> String {
        format!("{} sec ago", self.elapsed_secs)
    }

    /// Three line label: meaning, value with unit, age of the reading.
    pub fn label(&self) -> String {
        format!(
            "{}\n{} {}\n{}",
            self.meaning,
            self.value_text(),
            self.unit,
            self.elapsed_text()
        )
    }

    /// SVG path commands of the gauge arc in a 100x100 viewbox.
    ///
    /// The arc starts at twelve o'clock and runs clockwise. Angles beyond a full turn
    /// draw a full circle, non positive angles draw nothing.
    pub fn arc_path(&self) -> String {
        const CENTER: f64 = 50.0;
        const RADIUS: f64 = 40.0;

        let angle = self.angle;
        if !angle.is_finite() || angle <= 0.0 {
            return String::new();
        }
        if angle >= FULL_CIRCLE {
            return format!(
                "M {c} {top} A {r} {r} 0 1 1 {c} {bottom} A {r} {r} 0 1 1 {c} {top}",
                c = CENTER,
                r = RADIUS,
                top = CENTER - RADIUS,
                bottom = CENTER + RADIUS,
            );
        }

        let radians = angle.to_radians();
        let x = CENTER + RADIUS * radians.sin();
        let y = CENTER - RADIUS * radians.cos();
        let large_arc = u8::from(angle > 180.0);
        format!(
            "M {c} {top} A {r} {r} 0 {large_arc} 1 {x:.2} {y:.2}",
            c = CENTER,
            r = RADIUS,
            top = CENTER - RADIUS,
        )
    }
}
