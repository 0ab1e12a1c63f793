use std::fs;

use autodeck::config::Config;
use autodeck::error::Error;

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_from_home(dir.path());

    assert_eq!(config.paths.data_dir, "data");
    assert_eq!(config.log.max_bytes, 512_000);
    assert_eq!(config.log.tail_lines, 12);
    assert_eq!(config.web.port, 5000);
    assert_eq!(config.dashboard.revenue_per_active_task, 75);
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let toml = r#"
[log]
max_bytes = 1024

[web]
host = "0.0.0.0"
port = 8080

[dashboard]
revenue_base = 100
"#;
    fs::write(dir.path().join("autodeck.toml"), toml)?;

    let config = Config::load_from_home(dir.path());

    assert_eq!(config.log.max_bytes, 1024);
    assert_eq!(config.log.tail_lines, 12);
    assert_eq!(config.web.host, "0.0.0.0");
    assert_eq!(config.web.port, 8080);
    assert_eq!(config.web.dashboard_log_lines, 8);
    assert_eq!(config.dashboard.revenue_base, 100);
    assert_eq!(config.dashboard.revenue_per_active_task, 75);
    Ok(())
}

#[test]
fn invalid_values_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("autodeck.toml");

    for toml in [
        "[log]\nmax_bytes = 0\n",
        "[log]\ntail_lines = 0\n",
        "[paths]\ndata_dir = \" \"\n",
        "[web]\nhost = \"\"\n",
    ] {
        fs::write(&path, toml)?;
        let err = Config::load(&path).expect_err("invalid config");
        assert!(matches!(err, Error::InvalidConfig(_)), "{toml}");
        assert_eq!(err.exit_code(), 2);

        let fallback = Config::load_from_home(dir.path());
        assert_eq!(fallback.log.max_bytes, 512_000);
    }
    Ok(())
}

#[test]
fn malformed_toml_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("autodeck.toml"), "[web\nport = ")?;

    let config = Config::load_from_home(dir.path());
    assert_eq!(config.web.port, 5000);
    Ok(())
}

#[test]
fn saved_config_loads_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("autodeck.toml");
    let mut config = Config::default();
    config.web.port = 9000;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.web.port, 9000);
    assert_eq!(loaded.paths.logs_dir, "logs");
    Ok(())
}
