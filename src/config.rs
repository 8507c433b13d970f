use crate::error::{PulseError, Result};
use crate::types::config::PulseConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "devpulse.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".devpulse/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/devpulse/config.toml";

/// Load and validate layered config; `None` when `root` has no devpulse.toml.
pub fn load_config(root: &Path) -> Result<Option<PulseConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<PulseConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: PulseConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| PulseError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PulseError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ConsistencyMode;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_repo_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[fetch]
repo_cap = 5
timeout_secs = 30

[languages]
top = 3
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[window]
weeks = 6

[fetch]
timeout_secs = 15
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".devpulse")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[scoring]
consistency = "average"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");
        let settings = cfg.settings();

        assert_eq!(settings.weeks, 6);
        assert_eq!(settings.repo_cap, 5);
        assert_eq!(settings.fetch_timeout, Duration::from_secs(15));
        assert_eq!(settings.top_languages, 3);
        assert_eq!(settings.consistency_mode, ConsistencyMode::Average);
    }

    #[test]
    fn local_override_replaces_single_weight_before_validation() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring.weights]
commits = 0.5
recent = 0.3
consistency = 0.3
"#,
        )
        .expect("repo config should write");
        fs::create_dir_all(root.path().join(".devpulse")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            "[scoring.weights]\ncommits = 0.4\n",
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), None)
            .expect("merged weights should validate")
            .expect("merged config should exist");
        let weights = cfg.settings().weights;
        assert_eq!(weights.commits, 0.4);
        assert_eq!(weights.recent, 0.3);
        assert_eq!(weights.consistency, 0.3);

        fs::remove_file(root.path().join(DEFAULT_LOCAL_FILE)).expect("local override should delete");
        let err = load_config_with_global(root.path(), None)
            .expect_err("repo weights alone sum past 1.0");
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[window]\nweeks = 0\n",
        )
        .expect("repo config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(matches!(err, PulseError::ConfigParse(_)));
    }
}
