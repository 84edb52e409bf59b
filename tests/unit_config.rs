use std::fs;
use std::path::PathBuf;

use taskmap::config::{Config, CONFIG_FILE};

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = Config::load_from_dir(dir.path());
    assert_eq!(cfg.viewport.start_node, "t1_intro");
    assert_eq!(cfg.autosave.resize_ms, 250);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[viewport]\nmin_zoom = 3.0\nmax_zoom = 1.0\n",
    )
    .expect("write config");

    assert!(Config::load(&dir.path().join(CONFIG_FILE)).is_err());
    let cfg = Config::load_from_dir(dir.path());
    assert_eq!(cfg.viewport.min_zoom, 0.25);
    assert_eq!(cfg.viewport.max_zoom, 2.0);
}

#[test]
fn relative_store_path_resolves_against_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[storage]\npath = \"state/view.json\"\n",
    )
    .expect("write config");

    let cfg = Config::load_from_dir(dir.path());
    assert_eq!(
        cfg.store_path(dir.path()),
        dir.path().join(PathBuf::from("state/view.json"))
    );
}

#[test]
fn storage_lock_timeout_is_configurable() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[storage]\nlock_timeout_ms = 50\n",
    )
    .expect("write config");

    let cfg = Config::load_from_dir(dir.path());
    assert_eq!(cfg.storage.lock_timeout_ms, 50);
    assert!(cfg.storage.path.is_none());
    assert_eq!(Config::default().storage.lock_timeout_ms, 2000);
}
