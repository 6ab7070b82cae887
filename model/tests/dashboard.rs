use sensor_dashboard_model::{
    Dashboard, DashboardConfig, MeaningSettings, Reading, SettingsRegistry, UpdateError,
    UpdatePayload, ValueRange,
};

const RECORDED: i64 = 1_700_000_000_000;

fn registry() -> SettingsRegistry {
    SettingsRegistry::new().with(
        "temperature",
        MeaningSettings {
            unit: "C".into(),
            range: Some(ValueRange::new(0.0, 40.0)),
            ..Default::default()
        },
    )
}

fn payload(device_id: &str, readings: Vec<Reading>) -> String {
    UpdatePayload {
        device_id: device_id.into(),
        readings,
    }
    .to_json()
    .unwrap()
}

#[test]
fn test_example_message() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());

    let applied = dashboard
        .handle_update_at(
            "sensors/d1",
            r#"{"deviceId":"d1","readings":[{"meaning":"temperature","value":21.5,"recorded":1700000000000}]}"#,
            RECORDED,
        )
        .unwrap();
    assert_eq!(applied, 1);

    let panel = dashboard.panel("d1").unwrap();
    let gauge = panel.sensor("temperature").unwrap();
    assert_eq!(gauge.target_angle(), 193.5);
    assert_eq!(gauge.angle_at(RECORDED + 500), 193.5);

    let samples: Vec<_> = panel.history().samples().copied().collect();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].timestamp, RECORDED);
    assert_eq!(samples[0].value, 21.5);
}

#[test]
fn test_only_named_sensors_of_addressed_device_change() {
    let mut dashboard = Dashboard::with_roster(["d1", "d2"], registry());
    let now = RECORDED;

    dashboard
        .handle_update_at(
            "t",
            payload(
                "d1",
                vec![
                    Reading::new("temperature", 10.0, now),
                    Reading::new("humidity", 50.0, now),
                ],
            ),
            now,
        )
        .unwrap();
    dashboard
        .handle_update_at(
            "t",
            payload("d1", vec![Reading::new("humidity", 55.0, now + 1_000)]),
            now + 1_000,
        )
        .unwrap();

    let d1 = dashboard.panel("d1").unwrap();
    assert_eq!(d1.sensor("temperature").unwrap().value(), 10.0);
    assert_eq!(d1.sensor("temperature").unwrap().timestamp(), now);
    assert_eq!(d1.sensor("humidity").unwrap().value(), 55.0);
    assert_eq!(d1.sensor("humidity").unwrap().timestamp(), now + 1_000);
    assert!(dashboard.panel("d2").unwrap().sensors().is_empty());
}

#[test]
fn test_bad_messages_do_not_stop_processing() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());

    assert!(matches!(
        dashboard.handle_update_at("t", "{ not json", RECORDED),
        Err(UpdateError::MalformedPayload(_))
    ));
    assert!(matches!(
        dashboard.handle_update_at("t", r#"{"readings":[]}"#, RECORDED),
        Err(UpdateError::MalformedPayload(_))
    ));
    match dashboard.handle_update_at("t", payload("d9", vec![]), RECORDED) {
        Err(UpdateError::UnknownDevice(id)) => assert_eq!(id, "d9"),
        other => panic!("expected unknown device, got {other:?}"),
    }
    assert!(!dashboard.receive_at("t", b"\xff\xfe", RECORDED));

    assert!(dashboard.receive_at(
        "t",
        payload("d1", vec![Reading::new("temperature", 20.0, RECORDED)]),
        RECORDED,
    ));
    let gauge = dashboard.panel("d1").unwrap().sensor("temperature").unwrap();
    assert_eq!(gauge.target_angle(), 180.0);
}

#[test]
fn test_unregistered_meaning_is_full_circle() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());

    for value in [-5.0, 0.0, 42.0, 1e6] {
        dashboard
            .handle_update_at(
                "t",
                payload("d1", vec![Reading::new("lux", value, RECORDED)]),
                RECORDED,
            )
            .unwrap();
        let view = dashboard.render(RECORDED);
        assert_eq!(view.devices[0].gauges[0].angle, 360.0);
        assert_eq!(view.devices[0].gauges[0].unit, "");
    }
}

#[test]
fn test_reapplying_a_reading_refreshes_elapsed_time() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());
    let message = payload("d1", vec![Reading::new("temperature", 20.0, RECORDED)]);

    dashboard.handle_update_at("t", &message, RECORDED).unwrap();
    let first = dashboard.render(RECORDED + 1_000);
    dashboard.handle_update_at("t", &message, RECORDED + 5_000).unwrap();
    let second = dashboard.render(RECORDED + 6_000);

    assert_eq!(first.devices[0].gauges[0].elapsed_secs, 1);
    assert_eq!(second.devices[0].gauges[0].elapsed_secs, 6);
    assert_eq!(dashboard.panel("d1").unwrap().history().len(), 2);
}

#[test]
fn test_history_points_are_ordered_with_newest_near_zero() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());
    let (t1, t2, t3) = (RECORDED, RECORDED + 4_000, RECORDED + 9_000);

    for (t, v) in [(t1, 18.0), (t2, 19.0), (t3, 20.0)] {
        dashboard
            .handle_update_at(
                "t",
                payload("d1", vec![Reading::new("temperature", v, t)]),
                t3,
            )
            .unwrap();
    }

    let chart = dashboard.panel("d1").unwrap().history().last_plot().clone();
    let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(xs.last().copied(), Some(0.0));
    assert_eq!(chart.x_min, -9.0);
    assert_eq!(chart.x_max, 1.0);
}

#[test]
fn test_dashboard_from_embedded_config() {
    let config = DashboardConfig::embedded().unwrap();
    let dashboard = Dashboard::new(&config);

    assert_eq!(dashboard.panels().len(), config.devices.len());
    let view = dashboard.render(RECORDED);
    for (device, panel) in config.devices.iter().zip(&view.devices) {
        assert_eq!(panel.id, device.id);
        assert_eq!(panel.label, device.label());
        assert!(panel.gauges.is_empty());
    }
}

#[test]
fn test_duplicate_roster_entries_are_ignored() {
    let dashboard = Dashboard::with_roster(["d1", "d1", "d2"], registry());

    let ids: Vec<&str> = dashboard.panels().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["d1", "d2"]);
}

#[test]
fn test_extreme_recorded_timestamp_is_accepted() {
    let mut dashboard = Dashboard::with_roster(["d1"], registry());

    assert!(dashboard.receive_at(
        "t",
        r#"{"deviceId":"d1","readings":[{"meaning":"temperature","value":1,"recorded":-9223372036854775808}]}"#,
        RECORDED,
    ));

    let view = dashboard.render(RECORDED);
    assert_eq!(view.devices[0].gauges[0].elapsed_secs, i64::MAX / 1000);
    assert_eq!(view.devices[0].chart.points.len(), 1);

    assert!(dashboard.receive_at(
        "t",
        payload("d1", vec![Reading::new("temperature", 20.0, RECORDED)]),
        RECORDED,
    ));
    assert_eq!(dashboard.panel("d1").unwrap().history().len(), 2);
}
