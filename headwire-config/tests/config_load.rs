use headwire_config::HeadwireConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
extractor:
  batch_size: 20
  max_concurrent_requests: 3
  render_hosts:
    - elpais.com
    - lanacion.com.ar
output:
  results_dir: "/tmp/headwire-results"
"#;
    let p = write_yaml(&tmp, "headwire.yaml", file_yaml);

    let config = HeadwireConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load system config");

    assert_eq!(config.version.as_deref(), Some("0.1"));
    assert_eq!(config.extractor.batch_size, 20);
    assert_eq!(config.extractor.max_concurrent_requests, 3);
    assert_eq!(config.extractor.render_hosts.len(), 2);
    // Untouched fields keep their defaults.
    assert_eq!(config.extractor.max_retries, 3);
    assert_eq!(config.extractor.request_timeout_secs, 30);
    assert_eq!(
        config.output.results_dir,
        PathBuf::from("/tmp/headwire-results")
    );
}

#[test]
#[serial]
fn test_env_placeholder_expansion() {
    temp_env::with_var("NEWS_RENDER_HOST", Some("elpais.com"), || {
        let config = HeadwireConfigLoader::new()
            .with_yaml_str(
                r#"
extractor:
  render_hosts:
    - "${NEWS_RENDER_HOST}"
"#,
            )
            .load()
            .expect("load with placeholder");

        assert_eq!(config.extractor.render_hosts, vec!["elpais.com"]);
    });
}

#[test]
#[serial]
fn test_env_override_wins_over_defaults() {
    temp_env::with_var("HEADWIRE__EXTRACTOR__MAX_RETRIES", Some("5"), || {
        let config = HeadwireConfigLoader::new().load().expect("load from env");
        assert_eq!(config.extractor.max_retries, 5);
    });
}
