// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use sensor_dashboard_model::{Reading, UpdatePayload};

use crate::feed::{FeedMessage, MessageSource};

#[derive(Deserialize, Clone, Debug)]
struct DummySensor {
    meaning: String,
    base: f64,
    amplitude: f64,
    period_secs: f64,
}

#[derive(Deserialize, Clone, Debug)]
struct DummyFeed {
    topic_prefix: String,
    interval_ms: u64,
    sensors: Vec<DummySensor>,
}

/// Synthetic readings for a roster of devices, for running without any hardware.
///
/// Every sensor follows a slow sine wave around its base value; devices are phase
/// shifted against each other so they do not show identical numbers.
pub struct DummyMessageSource {
    feed: DummyFeed,
    device_ids: Vec<String>,
    next_device: usize,
    interval: std::time::Duration,
}

impl DummyMessageSource {
    pub fn new(device_ids: Vec<String>) -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummyfeed.json");
        let feed = serde_json::from_str::<DummyFeed>(json_data)?;

        Ok(Self {
            interval: std::time::Duration::from_millis(feed.interval_ms),
            feed,
            device_ids,
            next_device: 0,
        })
    }

    /// Overrides the pause before each message.
    pub fn with_interval(mut self, interval: std::time::Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The message the device at `device_index` reports at `now`.
    ///
    /// # Panics
    ///
    /// If `device_index` is not an index into the device ids.
    pub fn message_at(&self, device_index: usize, now: i64) -> Result<FeedMessage, serde_json::Error> {
        let device_id = &self.device_ids[device_index];
        let phase = device_index as f64 * 0.25;
        let seconds = now as f64 / 1000.0;

        let readings = self
            .feed
            .sensors
            .iter()
            .map(|sensor| {
                let cycle = seconds / sensor.period_secs + phase;
                let value = sensor.base + sensor.amplitude * (std::f64::consts::TAU * cycle).sin();
                Reading::new(sensor.meaning.clone(), (value * 10.0).round() / 10.0, now)
            })
            .collect();

        let payload = UpdatePayload {
            device_id: device_id.clone(),
            readings,
        };

        Ok(FeedMessage::new(
            format!("{}/{}", self.feed.topic_prefix, device_id),
            payload.to_json()?,
        ))
    }
}

impl MessageSource for DummyMessageSource {
    fn next_message(&mut self) -> Result<Option<FeedMessage>, Box<dyn std::error::Error>> {
        if self.device_ids.is_empty() {
            return Ok(None);
        }

        std::thread::sleep(self.interval);

        let device_index = self.next_device;
        self.next_device = (self.next_device + 1) % self.device_ids.len();

        let now = chrono::Utc::now().timestamp_millis();
        Ok(Some(self.message_at(device_index, now)?))
    }
}

#[test]
fn test_dummy_message_source() {
    let source = DummyMessageSource::new(vec!["d1".into(), "d2".into()]).unwrap();
    let message = source.message_at(1, 0).unwrap();

    assert_eq!(message.topic, "sensors/d2");

    let payload = UpdatePayload::decode(&message.payload).unwrap();
    assert_eq!(payload.device_id, "d2");
    assert_eq!(payload.readings.len(), 4);
    assert!(payload.readings.iter().all(|r| r.recorded == 0));

    // A quarter period ahead, the sine wave is at its peak.
    let temperature = &payload.readings[0];
    assert_eq!(temperature.meaning, "temperature");
    assert_eq!(temperature.value, 25.0);
}

#[test]
fn test_dummy_message_source_round_robin() {
    let mut source = DummyMessageSource::new(vec!["a".into(), "b".into()])
        .unwrap()
        .with_interval(std::time::Duration::ZERO);

    let topics: Vec<String> = (0..3)
        .map(|_| source.next_message().unwrap().unwrap().topic)
        .collect();
    assert_eq!(topics, vec!["sensors/a", "sensors/b", "sensors/a"]);

    let mut empty = DummyMessageSource::new(Vec::new()).unwrap();
    assert!(empty.next_message().unwrap().is_none());
}
