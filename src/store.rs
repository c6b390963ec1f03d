use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::{LoggingConfig, LoggingMode, ManualPolicy};

/// Loads the settings blob and merges it over defaults. Never fails: a
/// missing file, an unreadable file, or a malformed blob all fall back to
/// defaults, and every individual key falls back on its own.
pub fn load_config(path: &Path) -> LoggingConfig {
    match read_settings_blob(path) {
        Ok(Some(blob)) => config_from_blob(&blob),
        Ok(None) => LoggingConfig::default(),
        Err(error) => {
            tracing::warn!(
                settings_path = %path.display(),
                read_error = %error,
                "Falling back to default settings"
            );
            LoggingConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &LoggingConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| error.to_string())?;
    }

    let blob = serde_json::to_string_pretty(config).map_err(|error| error.to_string())?;
    std::fs::write(path, blob).map_err(|error| error.to_string())
}

fn read_settings_blob(path: &Path) -> Result<Option<Map<String, Value>>, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.to_string()),
    };

    let blob = serde_json::from_str::<Value>(&contents).map_err(|error| error.to_string())?;
    match blob {
        Value::Object(map) => Ok(Some(map)),
        _ => Err("settings blob is not a key-value object".to_string()),
    }
}

pub(crate) fn config_from_blob(blob: &Map<String, Value>) -> LoggingConfig {
    let defaults = LoggingConfig::default();
    let mut config = defaults.clone();

    config.enabled = bool_value(blob, "enabled", defaults.enabled);
    config.character_enabled = bool_value(blob, "characterEnabled", defaults.character_enabled);
    config.mode = mode_value(blob, "mode", defaults.mode);
    config.max_level_only = bool_value(blob, "maxLevelOnly", defaults.max_level_only);
    config.grouped_only = bool_value(blob, "groupedOnly", defaults.grouped_only);
    config.keystone_only = bool_value(blob, "keystoneOnly", defaults.keystone_only);
    config.log_scenarios = bool_value(blob, "logScenarios", defaults.log_scenarios);
    config.log_battlegrounds = bool_value(blob, "logBattlegrounds", defaults.log_battlegrounds);
    config.log_arenas = bool_value(blob, "logArenas", defaults.log_arenas);
    config.manual_policy = policy_value(blob, "manualPolicy", defaults.manual_policy);
    config.reset_between_instances = bool_value(
        blob,
        "resetBetweenInstances",
        defaults.reset_between_instances,
    );
    config.disable_only_owned = bool_value(blob, "disableOnlyOwned", defaults.disable_only_owned);
    config.advanced_logging = bool_value(blob, "advancedLogging", defaults.advanced_logging);
    config.debounce_seconds = seconds_value(blob, "debounceSeconds", defaults.debounce_seconds);
    config.enable_delay_seconds = seconds_value(
        blob,
        "enableDelaySeconds",
        defaults.enable_delay_seconds,
    );
    config.disable_delay_seconds = seconds_value(
        blob,
        "disableDelaySeconds",
        defaults.disable_delay_seconds,
    );
    config.recheck_seconds = seconds_value(blob, "recheckSeconds", defaults.recheck_seconds);

    if let Some(Value::Object(difficulties)) = blob.get("raidDifficulties") {
        let filter = &mut config.raid_difficulties;
        filter.lfr = bool_value(difficulties, "lfr", filter.lfr);
        filter.normal = bool_value(difficulties, "normal", filter.normal);
        filter.heroic = bool_value(difficulties, "heroic", filter.heroic);
        filter.mythic = bool_value(difficulties, "mythic", filter.mythic);
        filter.legacy = bool_value(difficulties, "legacy", filter.legacy);
    }

    config
}

fn bool_value(blob: &Map<String, Value>, key: &str, fallback: bool) -> bool {
    match blob.get(key) {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(value)) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => true,
            "false" | "off" | "no" | "0" => false,
            _ => fallback,
        },
        Some(Value::Number(value)) => value
            .as_f64()
            .map(|number| number != 0.0)
            .unwrap_or(fallback),
        _ => fallback,
    }
}

fn seconds_value(blob: &Map<String, Value>, key: &str, fallback: f64) -> f64 {
    let parsed = match blob.get(key) {
        Some(Value::Number(value)) => value.as_f64(),
        Some(Value::String(value)) => value.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .unwrap_or(fallback)
}

fn mode_value(blob: &Map<String, Value>, key: &str, fallback: LoggingMode) -> LoggingMode {
    match blob.get(key) {
        Some(Value::String(value)) => LoggingMode::parse(value).unwrap_or(fallback),
        _ => fallback,
    }
}

fn policy_value(blob: &Map<String, Value>, key: &str, fallback: ManualPolicy) -> ManualPolicy {
    match blob.get(key) {
        Some(Value::String(value)) => ManualPolicy::parse(value).unwrap_or(fallback),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::{config_from_blob, load_config, save_config};
    use crate::config::{LoggingConfig, LoggingMode, ManualPolicy};
    use serde_json::{json, Map, Value};
    use std::path::PathBuf;

    fn blob_of(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let blob = blob_of(json!({
            "mode": "raids",
            "groupedOnly": true,
            "raidDifficulties": { "lfr": false }
        }));
        let config = config_from_blob(&blob);

        assert_eq!(config.mode, LoggingMode::Raids);
        assert!(config.grouped_only);
        assert!(!config.raid_difficulties.lfr);
        assert!(config.raid_difficulties.heroic, "untouched keys keep defaults");
        assert!(config.enabled, "missing keys keep defaults");
    }

    #[test]
    fn unparseable_values_fall_back_per_key() {
        let blob = blob_of(json!({
            "enabled": "definitely",
            "mode": "mythic-only",
            "manualPolicy": 7,
            "enableDelaySeconds": "soon",
            "recheckSeconds": -4.0,
            "disableDelaySeconds": 0.25
        }));
        let config = config_from_blob(&blob);
        let defaults = LoggingConfig::default();

        assert_eq!(config.enabled, defaults.enabled);
        assert_eq!(config.mode, defaults.mode);
        assert_eq!(config.manual_policy, defaults.manual_policy);
        assert_eq!(config.enable_delay_seconds, defaults.enable_delay_seconds);
        assert_eq!(config.recheck_seconds, defaults.recheck_seconds);
        assert_eq!(config.disable_delay_seconds, 0.25);
    }

    #[test]
    fn lenient_bool_and_number_coercion() {
        let blob = blob_of(json!({
            "enabled": "off",
            "groupedOnly": 1,
            "keystoneOnly": "on",
            "enableDelaySeconds": "1.5"
        }));
        let config = config_from_blob(&blob);

        assert!(!config.enabled);
        assert!(config.grouped_only);
        assert!(config.keystone_only);
        assert_eq!(config.enable_delay_seconds, 1.5);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/autolog/settings.json");
        assert_eq!(load_config(&path), LoggingConfig::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let path = std::env::temp_dir().join(format!(
            "autolog-store-test-{}.json",
            std::process::id()
        ));

        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Dungeons;
        config.manual_policy = ManualPolicy::ForceBoundary;
        config.keystone_only = true;
        config.recheck_seconds = 0.0;

        save_config(&path, &config).expect("save settings");
        let loaded = load_config(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn corrupt_blob_yields_defaults() {
        let path = std::env::temp_dir().join(format!(
            "autolog-store-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json at all {{{").expect("write corrupt blob");

        let loaded = load_config(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, LoggingConfig::default());
    }
}
