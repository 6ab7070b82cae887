use std::collections::HashMap;
use std::rc::Rc;

use crate::{ChartView, GaugeView, History, HistoryConfig, Reading, Sensor, SettingsRegistry};

/// The view model of one device: a gauge per sensor meaning plus a history chart.
#[derive(Debug)]
pub struct DevicePanel {
    id: String,
    label: String,
    registry: Rc<SettingsRegistry>,
    sensors: Vec<Sensor>,
    sensor_index: HashMap<String, usize>,
    history: History,
}

impl DevicePanel {
    pub fn new(
        id: impl Into<String>,
        registry: Rc<SettingsRegistry>,
        history: &HistoryConfig,
    ) -> Self {
        let id = id.into();
        let history = History::new(history.meaning.clone(), &registry, history.retention());
        Self {
            label: id.clone(),
            id,
            registry,
            sensors: Vec::new(),
            sensor_index: HashMap::new(),
            history,
        }
    }

    /// Replaces the displayed label, which defaults to the device id.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Sensors in the order they were first seen.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sensor(&self, meaning: &str) -> Option<&Sensor> {
        self.sensor_index.get(meaning).map(|&i| &self.sensors[i])
    }

    /// Folds `readings` into the panel, in order.
    ///
    /// Gauges are created on the first reading of their meaning and never removed.
    /// Readings of the tracked meaning are appended to the history as well.
    pub fn apply_readings(&mut self, readings: &[Reading], now: i64) {
        for reading in readings {
            let index = self.sensor_index_or_insert(&reading.meaning);
            self.sensors[index].record(reading.value, reading.recorded, now);

            if reading.meaning == self.history.meaning() {
                self.history.append(reading.value, reading.recorded, now);
            }
        }
    }

    fn sensor_index_or_insert(&mut self, meaning: &str) -> usize {
        if let Some(&index) = self.sensor_index.get(meaning) {
            return index;
        }
        log::info!("{}: new {meaning} gauge", self.id);
        let index = self.sensors.len();
        self.sensors.push(Sensor::new(meaning, &self.registry));
        self.sensor_index.insert(meaning.to_string(), index);
        index
    }

    pub fn render(&self, now: i64) -> DeviceView {
        DeviceView {
            id: self.id.clone(),
            label: self.label.clone(),
            gauges: self.sensors.iter().map(|s| s.display(now)).collect(),
            chart: self.history.plot(now),
        }
    }
}

/// Snapshot of a [`DevicePanel`] at one point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceView {
    pub id: String,
    pub label: String,
    pub gauges: Vec<GaugeView>,
    pub chart: ChartView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeaningSettings, ValueRange};

    fn panel() -> DevicePanel {
        let registry = SettingsRegistry::new().with(
            "temperature",
            MeaningSettings {
                unit: "C".into(),
                range: Some(ValueRange::new(0.0, 40.0)),
                ..Default::default()
            },
        );
        DevicePanel::new("d1", Rc::new(registry), &HistoryConfig::default())
    }

    #[test]
    fn gauges_are_created_lazily_in_order() {
        let mut panel = panel();
        assert!(panel.sensors().is_empty());

        panel.apply_readings(
            &[
                Reading::new("humidity", 40.0, 1_000),
                Reading::new("temperature", 20.0, 1_000),
            ],
            1_000,
        );
        panel.apply_readings(&[Reading::new("humidity", 41.0, 2_000)], 2_000);

        let meanings: Vec<&str> = panel.sensors().iter().map(|s| s.meaning()).collect();
        assert_eq!(meanings, vec!["humidity", "temperature"]);
        assert_eq!(panel.sensor("humidity").unwrap().value(), 41.0);
        assert_eq!(panel.sensor("humidity").unwrap().timestamp(), 2_000);
        assert_eq!(panel.sensor("temperature").unwrap().timestamp(), 1_000);
    }

    #[test]
    fn only_tracked_meaning_reaches_history() {
        let mut panel = panel();
        panel.apply_readings(
            &[
                Reading::new("humidity", 40.0, 1_000),
                Reading::new("temperature", 20.0, 1_000),
                Reading::new("temperature", 21.0, 2_000),
            ],
            2_000,
        );

        let samples: Vec<(i64, f64)> = panel
            .history()
            .samples()
            .map(|s| (s.timestamp, s.value))
            .collect();
        assert_eq!(samples, vec![(1_000, 20.0), (2_000, 21.0)]);
        assert_eq!(panel.sensor("temperature").unwrap().value(), 21.0);
    }

    #[test]
    fn label_defaults_to_id() {
        assert_eq!(panel().label(), "d1");
        assert_eq!(panel().with_label("Kitchen").label(), "Kitchen");
    }

    #[test]
    fn render_snapshots_every_gauge() {
        let mut panel = panel();
        panel.apply_readings(&[Reading::new("temperature", 20.0, 0)], 0);

        let view = panel.render(3_000);
        assert_eq!(view.id, "d1");
        assert_eq!(view.gauges.len(), 1);
        assert_eq!(view.gauges[0].elapsed_secs, 3);
        assert_eq!(view.gauges[0].angle, 180.0);
        assert_eq!(view.chart.points.len(), 1);
        assert_eq!(view.chart.points[0].x, -3.0);
    }
}
