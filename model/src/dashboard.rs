use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    now_millis, DashboardConfig, DeviceConfig, DevicePanel, DeviceView, HistoryConfig,
    SettingsRegistry, UpdateError, UpdatePayload,
};

/// Root of the view model, one [`DevicePanel`] per device of the roster.
///
/// The roster is fixed at construction. Messages addressed to other devices are
/// rejected with [`UpdateError::UnknownDevice`].
#[derive(Debug)]
pub struct Dashboard {
    panels: Vec<DevicePanel>,
    panel_index: HashMap<String, usize>,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        let registry = Rc::new(config.meanings.clone());
        let mut dashboard = Self {
            panels: Vec::with_capacity(config.devices.len()),
            panel_index: HashMap::new(),
        };

        for device in &config.devices {
            if dashboard.panel_index.contains_key(&device.id) {
                log::warn!("Ignoring duplicate device `{}` in roster", device.id);
                continue;
            }
            let panel = DevicePanel::new(device.id.clone(), registry.clone(), &config.history)
                .with_label(device.label());
            dashboard.panel_index.insert(device.id.clone(), dashboard.panels.len());
            dashboard.panels.push(panel);
        }

        dashboard
    }

    /// A dashboard for plain device ids with the default history settings.
    pub fn with_roster<I, S>(roster: I, registry: SettingsRegistry) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(&DashboardConfig {
            devices: roster
                .into_iter()
                .map(|id| DeviceConfig::from(id.as_ref()))
                .collect(),
            history: HistoryConfig::default(),
            meanings: registry,
        })
    }

    pub fn panels(&self) -> &[DevicePanel] {
        &self.panels
    }

    pub fn panel(&self, device_id: &str) -> Option<&DevicePanel> {
        self.panel_index.get(device_id).map(|&i| &self.panels[i])
    }

    /// Decodes `payload` and applies its readings to the addressed device at the
    /// current wall clock time.
    pub fn handle_update(
        &mut self,
        topic: &str,
        payload: impl AsRef<[u8]>,
    ) -> Result<usize, UpdateError> {
        self.handle_update_at(topic, payload, now_millis())
    }

    /// Like [`Dashboard::handle_update`] with an explicit `now`.
    ///
    /// Returns the number of readings applied.
    pub fn handle_update_at(
        &mut self,
        topic: &str,
        payload: impl AsRef<[u8]>,
        now: i64,
    ) -> Result<usize, UpdateError> {
        log::info!("Update for {topic}");

        let payload = UpdatePayload::decode(payload)?;
        let index = *self
            .panel_index
            .get(&payload.device_id)
            .ok_or_else(|| UpdateError::UnknownDevice(payload.device_id.clone()))?;

        self.panels[index].apply_readings(&payload.readings, now);
        Ok(payload.readings.len())
    }

    /// Feed entry point: applies the message and logs instead of failing.
    ///
    /// Returns whether the message was accepted.
    pub fn receive(&mut self, topic: &str, payload: impl AsRef<[u8]>) -> bool {
        self.receive_at(topic, payload, now_millis())
    }

    pub fn receive_at(&mut self, topic: &str, payload: impl AsRef<[u8]>, now: i64) -> bool {
        match self.handle_update_at(topic, payload, now) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Rejected message on {topic}: {e}");
                false
            }
        }
    }

    pub fn render(&self, now: i64) -> DashboardView {
        DashboardView {
            devices: self.panels.iter().map(|panel| panel.render(now)).collect(),
        }
    }
}

/// Snapshot of the whole dashboard, devices in roster order.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub devices: Vec<DeviceView>,
}
