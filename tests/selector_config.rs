use std::fs;

use chrono::{Duration, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use daily_core::content::haikus;
use daily_core::selection::{ConfigError, DailySelector, DatePolicy, SelectorConfig};
use tempfile::tempdir;

#[test]
fn config_defaults() {
    let config = SelectorConfig::default();
    assert_eq!(config, SelectorConfig::v0());
    assert_eq!(config.min_count, 5);
    assert_eq!(config.max_count, 11);
    assert_eq!(config.count_span(), 7);
    assert_eq!(config.date_policy, DatePolicy::Utc);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_bad_ranges() {
    for (min, max) in [(0, 11), (12, 11)] {
        let config = SelectorConfig {
            min_count: min,
            max_count: max,
            ..SelectorConfig::v0()
        };
        assert!(matches!(
            DailySelector::new(config),
            Err(ConfigError::InvalidCountRange { .. })
        ));
    }

    let config = SelectorConfig {
        date_policy: DatePolicy::FixedOffset { east_seconds: 90_000 },
        ..SelectorConfig::v0()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidOffset(90_000))));
}

#[test]
fn config_loads_from_json() {
    let config = SelectorConfig::from_json_str(
        r#"{ "version": "1", "min_count": 2, "max_count": 4,
             "date_policy": { "kind": "fixed_offset", "east_seconds": -18000 } }"#,
    )
    .unwrap();
    assert_eq!(config.count_span(), 3);
    assert_eq!(config.date_policy, DatePolicy::FixedOffset { east_seconds: -18000 });

    // date_policy may be omitted
    let config =
        SelectorConfig::from_json_str(r#"{ "version": "1", "min_count": 5, "max_count": 11 }"#)
            .unwrap();
    assert_eq!(config, SelectorConfig::v0());

    let invalid =
        SelectorConfig::from_json_str(r#"{ "version": "1", "min_count": 9, "max_count": 3 }"#);
    assert!(matches!(invalid, Err(ConfigError::InvalidCountRange { min: 9, max: 3 })));
}

#[test]
fn config_loads_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("selector.json");
    fs::write(&path, serde_json::to_string_pretty(&SelectorConfig::v0()).unwrap()).unwrap();

    let config = SelectorConfig::from_path(&path).unwrap();
    assert_eq!(config, SelectorConfig::v0());

    let missing = SelectorConfig::from_path(&dir.path().join("nope.json"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}

#[test]
fn date_policy_near_midnight() {
    // 23:30 on Jan 15 in New York is already Jan 16 in UTC.
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let instant = new_york.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap();

    let jan_15 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let jan_16 = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();

    assert_eq!(DatePolicy::Utc.calendar_date(&instant).unwrap(), jan_16);
    assert_eq!(
        DatePolicy::FixedOffset { east_seconds: -5 * 3600 }.calendar_date(&instant).unwrap(),
        jan_15
    );
}

#[test]
fn local_policy_follows_host_offset() {
    // Either side of UTC midnight, so any non-zero host offset moves one of them.
    let instants = [
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap(),
    ];

    for instant in instants {
        let east_seconds = Local.offset_from_utc_datetime(&instant.naive_utc()).local_minus_utc();
        let expected = (instant.naive_utc() + Duration::seconds(i64::from(east_seconds))).date();

        let local = DatePolicy::Local.calendar_date(&instant).unwrap();
        assert_eq!(local, expected, "{instant} at offset {east_seconds}");
        assert_eq!(
            local,
            DatePolicy::FixedOffset { east_seconds }.calendar_date(&instant).unwrap()
        );

        let utc = instant.date_naive();
        assert!((local - utc).num_days().abs() <= 1);
        if east_seconds == 0 {
            assert_eq!(local, utc);
        }
    }
}

#[test]
fn server_and_client_agree_under_shared_policy() {
    let pool = haikus().unwrap();
    let selector = DailySelector::default();

    // Same instant seen from two timezones.
    let server = Utc.with_ymd_and_hms(2025, 1, 16, 4, 30, 0).unwrap();
    let client = server.with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap());

    let from_server = selector.select_at(pool, &server).unwrap();
    let from_client = selector.select_at(pool, &client).unwrap();
    assert_eq!(from_server, from_client);
    assert_eq!(from_server.selection.date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
}

#[test]
fn select_today_uses_policy_date() {
    let pool = haikus().unwrap();
    let selector = DailySelector::default();

    let before = Utc::now().date_naive();
    let today = selector.select_today(pool).unwrap();
    let after = Utc::now().date_naive();

    assert!(today.selection.date == before || today.selection.date == after);
    assert_eq!(today, selector.select(pool, today.selection.date));
}
