mod common;
use common::temp_config;

use progress_battery::config::{Config, FileConfigProvider, KEYS};
use progress_battery::core::scheduler::ConfigProvider;
use progress_battery::errors::AppError;
use progress_battery::models::TimeScale;
use std::fs;

#[test]
fn test_missing_file_gives_defaults() {
    let (_dir, path) = temp_config();
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());

    let c = cfg.configuration();
    assert_eq!(c.birth_year, 1998);
    assert_eq!(c.life_expectancy_years, 80.0);
    assert_eq!(c.refresh_interval_seconds, 60.0);
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = temp_config();
    fs::write(&path, "birth_year: 1985\n").unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.birth_year, 1985);
    assert_eq!(cfg.update_interval, 60.0);
    assert_eq!(cfg.default_scale, TimeScale::Hour);
}

#[test]
fn test_legacy_camel_case_keys_are_accepted() {
    let (_dir, path) = temp_config();
    fs::write(
        &path,
        "birthYear: 1990\nlifeExpectancy: 90\nupdateInterval: 300\n",
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.birth_year, 1990);
    assert_eq!(cfg.life_expectancy, 90.0);
    assert_eq!(cfg.update_interval, 300.0);
    assert!(Config::missing_fields(&path).unwrap() == vec!["bar_width", "default_scale"]);
}

#[test]
fn test_save_and_reload() {
    let (_dir, path) = temp_config();
    let mut cfg = Config::default();
    cfg.set("default_scale", "m").unwrap();
    cfg.set("update_interval", "5m").unwrap();
    cfg.save_to(&path).unwrap();

    let back = Config::load_from(&path).unwrap();
    assert_eq!(back.default_scale, TimeScale::Month);
    assert_eq!(back.update_interval, 300.0);
    assert!(Config::missing_fields(&path).unwrap().is_empty());
}

#[test]
fn test_set_validates_values() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set("life_expectancy", "0"),
        Err(AppError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("life_expectancy", "200"),
        Err(AppError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("birth_year", "nineteen"),
        Err(AppError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("update_interval", "-1"),
        Err(AppError::InvalidInterval(_))
    ));
    assert!(matches!(
        cfg.set("bar_width", "0"),
        Err(AppError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("default_scale", "week"),
        Err(AppError::InvalidScale(_))
    ));
    assert!(matches!(cfg.set("colour", "red"), Err(AppError::UnknownKey(_))));

    // Nothing stuck.
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_get_every_key() {
    let cfg = Config::default();
    for key in KEYS {
        assert!(cfg.get(key).is_ok(), "{key}");
    }
    assert_eq!(cfg.get("default_scale").unwrap(), "hour");
    assert!(cfg.get("nope").is_err());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let (_dir, path) = temp_config();
    Config::init_at(&path, false).unwrap();
    assert!(matches!(
        Config::init_at(&path, false),
        Err(AppError::ConfigExists(_))
    ));
    assert!(Config::init_at(&path, true).is_ok());
}

#[test]
fn test_file_provider_reads_fresh_each_time() {
    let (_dir, path) = temp_config();
    let provider = FileConfigProvider::new(&path);
    assert_eq!(provider.configuration().birth_year, 1998);

    fs::write(&path, "birth_year: 2001\nupdate_interval: 30\n").unwrap();
    let c = provider.configuration();
    assert_eq!(c.birth_year, 2001);
    assert_eq!(c.refresh_interval_seconds, 30.0);
}

#[test]
fn test_file_provider_falls_back_on_broken_yaml() {
    let (_dir, path) = temp_config();
    fs::write(&path, "birth_year: [unterminated\n").unwrap();

    assert!(Config::load_from(&path).is_err());
    let provider = FileConfigProvider::new(&path);
    assert_eq!(provider.configuration().birth_year, 1998);
}
