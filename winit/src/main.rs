// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use sensor_dashboard_common::feed::{
    spawn_feed, DummyMessageSource, FeedMessage, LineMessageSource, MessageSourcePointer,
};
use sensor_dashboard_common::MessageInbox;
use sensor_dashboard_model::{
    now_millis, ChartView, Dashboard, DashboardConfig, DeviceView, GaugeView, Rgba,
};

/// Names a JSON file replacing the embedded dashboard configuration.
const CONFIG_ENV: &str = "SENSOR_DASHBOARD_CONFIG";

/// `stdin` reads `topic payload` lines from standard input, anything else runs the dummy feed.
const FEED_ENV: &str = "SENSOR_DASHBOARD_FEED";

/// Our App struct that holds the UI, the dashboard view model and the feed inbox.
///
/// The feed runs on its own thread and only fills the inbox. A timer on the UI thread
/// drains the inbox into the dashboard and renders the dashboard into the UI, often
/// enough for the gauge transitions to look smooth.
struct App {
    ui: AppWindow,
    dashboard: Rc<RefCell<Dashboard>>,
    inbox: MessageInbox<FeedMessage>,
    timer: slint::Timer,
    devices: Rc<slint::VecModel<DeviceData>>,
}

impl App {
    const TIMER_INTERVAL: std::time::Duration = std::time::Duration::from_millis(50);

    /// Create a new App struct and start the message feed.
    fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        // Make a new AppWindow
        let ui = AppWindow::new()?;

        let dashboard = Rc::new(RefCell::new(Dashboard::new(config)));

        let inbox = MessageInbox::new();
        spawn_feed(message_source(config)?, inbox.clone());

        // Create a shared model for the device panels
        let devices: Rc<slint::VecModel<DeviceData>> = Rc::default();
        ui.global::<ViewModel>()
            .set_devices(slint::ModelRc::from(devices.clone()));

        Ok(Self {
            ui,
            dashboard,
            inbox,
            timer: slint::Timer::default(),
            devices,
        })
    }

    /// Run the App, apply incoming messages and re-render periodically.
    fn run(&mut self) -> anyhow::Result<()> {
        let ui_handle = self.ui.as_weak();
        let dashboard = self.dashboard.clone();
        let inbox = self.inbox.clone();
        let devices = self.devices.clone();

        self.timer.start(
            slint::TimerMode::Repeated,
            Self::TIMER_INTERVAL,
            move || {
                let Some(ui) = ui_handle.upgrade() else {
                    return;
                };

                for message in inbox.drain() {
                    dashboard
                        .borrow_mut()
                        .receive(&message.topic, &message.payload);
                }

                let view = dashboard.borrow().render(now_millis());
                devices.set_vec(
                    view.devices
                        .into_iter()
                        .map(DeviceData::from)
                        .collect::<Vec<_>>(),
                );

                ViewModel::get(&ui).set_clock(slint::SharedString::from(
                    chrono::Local::now().format("%H:%M:%S").to_string(),
                ));
            },
        );

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }
}

fn load_config() -> anyhow::Result<DashboardConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = std::path::PathBuf::from(path);
            log::info!("Loading configuration from {}", path.display());
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            DashboardConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        }
        None => DashboardConfig::embedded().context("Failed to parse embedded config"),
    }
}

fn message_source(config: &DashboardConfig) -> anyhow::Result<MessageSourcePointer> {
    if std::env::var(FEED_ENV).is_ok_and(|feed| feed == "stdin") {
        log::info!("Reading messages from stdin");
        return Ok(Box::new(LineMessageSource::stdin()));
    }

    log::info!("Using dummy message feed");
    let device_ids = config.devices.iter().map(|d| d.id.clone()).collect();
    Ok(Box::new(DummyMessageSource::new(device_ids)?))
}

fn color(rgba: Rgba) -> slint::Color {
    slint::Color::from_argb_f32(rgba.alpha(), rgba.red(), rgba.green(), rgba.blue())
}

impl From<GaugeView> for GaugeData {
    fn from(view: GaugeView) -> Self {
        let arc_commands = view.arc_path();
        let value_text = view.value_text();
        let elapsed_text = view.elapsed_text();

        Self {
            meaning: view.meaning.into(),
            value_text: value_text.into(),
            unit: view.unit.into(),
            elapsed_text: elapsed_text.into(),
            tint: color(view.color),
            arc_commands: arc_commands.into(),
        }
    }
}

impl From<ChartView> for ChartData {
    fn from(view: ChartView) -> Self {
        Self {
            y_label: view.y_label.as_str().into(),
            y_min_text: slint::format!("{:.0}", view.y_min),
            y_max_text: slint::format!("{:.0}", view.y_max),
            x_min_text: slint::format!("{:.0}s", view.x_min),
            tint: color(view.color),
            line_commands: view.line_path(100.0, 100.0).into(),
        }
    }
}

impl From<DeviceView> for DeviceData {
    fn from(view: DeviceView) -> Self {
        let gauges: Vec<GaugeData> = view.gauges.into_iter().map(GaugeData::from).collect();

        Self {
            label: view.label.into(),
            gauges: slint::ModelRc::new(slint::VecModel::from(gauges)),
            chart: view.chart.into(),
        }
    }
}

/// A minimal main function that loads the configuration, initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    log::info!("Dashboard for {} devices", config.devices.len());

    let mut app = App::new(&config)?;

    app.run()
}
