use crate::config::{LoggingConfig, LoggingMode, ManualPolicy};

pub const SHARE_PREFIX: &str = "ACL1";

/// Renders the configuration as a compact shareable string.
pub fn export_string(config: &LoggingConfig) -> String {
    let pairs = [
        format!("enabled={}", flag(config.enabled)),
        format!("char={}", flag(config.character_enabled)),
        format!("mode={}", config.mode.label()),
        format!("maxlevel={}", flag(config.max_level_only)),
        format!("grouped={}", flag(config.grouped_only)),
        format!("keystone={}", flag(config.keystone_only)),
        format!("scenarios={}", flag(config.log_scenarios)),
        format!("battlegrounds={}", flag(config.log_battlegrounds)),
        format!("arenas={}", flag(config.log_arenas)),
        format!("lfr={}", flag(config.raid_difficulties.lfr)),
        format!("normal={}", flag(config.raid_difficulties.normal)),
        format!("heroic={}", flag(config.raid_difficulties.heroic)),
        format!("mythic={}", flag(config.raid_difficulties.mythic)),
        format!("legacy={}", flag(config.raid_difficulties.legacy)),
        format!("manual={}", config.manual_policy.label()),
        format!("reset={}", flag(config.reset_between_instances)),
        format!("ownedonly={}", flag(config.disable_only_owned)),
        format!("advanced={}", flag(config.advanced_logging)),
        format!("debounce={}", config.debounce_seconds),
        format!("enabledelay={}", config.enable_delay_seconds),
        format!("disabledelay={}", config.disable_delay_seconds),
        format!("recheck={}", config.recheck_seconds),
    ];

    format!("{SHARE_PREFIX}:{}", pairs.join(";"))
}

/// Parses a shared string into a full configuration. All-or-nothing: any
/// malformed entry rejects the whole string and nothing is applied.
pub fn import_string(input: &str) -> Result<LoggingConfig, String> {
    let trimmed = input.trim();
    let Some(body) = trimmed.strip_prefix(SHARE_PREFIX) else {
        return Err(format!("not an {SHARE_PREFIX} settings string"));
    };
    let Some(body) = body.strip_prefix(':') else {
        return Err(format!("not an {SHARE_PREFIX} settings string"));
    };

    let mut config = LoggingConfig::default();
    for pair in body.split(';').filter(|pair| !pair.trim().is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("malformed entry '{pair}'"));
        };
        apply_pair(&mut config, key.trim(), value.trim())?;
    }

    Ok(config)
}

fn apply_pair(config: &mut LoggingConfig, key: &str, value: &str) -> Result<(), String> {
    match key {
        "enabled" => config.enabled = parse_flag(key, value)?,
        "char" => config.character_enabled = parse_flag(key, value)?,
        "mode" => {
            config.mode =
                LoggingMode::parse(value).ok_or_else(|| format!("unknown mode '{value}'"))?;
        }
        "maxlevel" => config.max_level_only = parse_flag(key, value)?,
        "grouped" => config.grouped_only = parse_flag(key, value)?,
        "keystone" => config.keystone_only = parse_flag(key, value)?,
        "scenarios" => config.log_scenarios = parse_flag(key, value)?,
        "battlegrounds" => config.log_battlegrounds = parse_flag(key, value)?,
        "arenas" => config.log_arenas = parse_flag(key, value)?,
        "lfr" => config.raid_difficulties.lfr = parse_flag(key, value)?,
        "normal" => config.raid_difficulties.normal = parse_flag(key, value)?,
        "heroic" => config.raid_difficulties.heroic = parse_flag(key, value)?,
        "mythic" => config.raid_difficulties.mythic = parse_flag(key, value)?,
        "legacy" => config.raid_difficulties.legacy = parse_flag(key, value)?,
        "manual" => {
            config.manual_policy = ManualPolicy::parse(value)
                .ok_or_else(|| format!("unknown manual policy '{value}'"))?;
        }
        "reset" => config.reset_between_instances = parse_flag(key, value)?,
        "ownedonly" => config.disable_only_owned = parse_flag(key, value)?,
        "advanced" => config.advanced_logging = parse_flag(key, value)?,
        "debounce" => config.debounce_seconds = parse_seconds(key, value)?,
        "enabledelay" => config.enable_delay_seconds = parse_seconds(key, value)?,
        "disabledelay" => config.disable_delay_seconds = parse_seconds(key, value)?,
        "recheck" => config.recheck_seconds = parse_seconds(key, value)?,
        _ => return Err(format!("unknown option '{key}'")),
    }
    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "on" | "true" => Ok(true),
        "0" | "off" | "false" => Ok(false),
        _ => Err(format!("invalid value '{value}' for '{key}'")),
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| format!("invalid delay '{value}' for '{key}'"))
}
