use crate::config::{LoggingConfig, LoggingMode, ManualPolicy};
use crate::engine::AutoLogger;
use crate::share;

const UNKNOWN_OPTION_HELP: &str = "Unknown option. Available: status, on, off, char, mode, \
maxlevel, grouped, keystone, scenarios, battlegrounds, arenas, raid, manual, reset, ownedonly, \
advanced, delay, export, import";

/// Text command surface over the engine. Mutating verbs go through
/// `update_config`, so every change re-evaluates immediately.
pub fn dispatch(logger: &AutoLogger, input: &str) -> Result<String, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(UNKNOWN_OPTION_HELP.to_string());
    };
    let arguments: Vec<&str> = words.collect();

    match verb.to_ascii_lowercase().as_str() {
        "status" => Ok(render_status(logger)),
        "on" => {
            logger.update_config(|config| config.enabled = true);
            Ok("Automatic combat logging on".to_string())
        }
        "off" => {
            logger.update_config(|config| config.enabled = false);
            Ok("Automatic combat logging off".to_string())
        }
        "char" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: char on|off",
            "Character participation",
            |config, value| config.character_enabled = value,
        )),
        "maxlevel" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: maxlevel on|off",
            "Max-level-only filter",
            |config, value| config.max_level_only = value,
        )),
        "grouped" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: grouped on|off",
            "Grouped-only filter",
            |config, value| config.grouped_only = value,
        )),
        "keystone" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: keystone on|off",
            "Keystone-only dungeon filter",
            |config, value| config.keystone_only = value,
        )),
        "scenarios" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: scenarios on|off",
            "Scenario logging",
            |config, value| config.log_scenarios = value,
        )),
        "battlegrounds" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: battlegrounds on|off",
            "Battleground logging",
            |config, value| config.log_battlegrounds = value,
        )),
        "arenas" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: arenas on|off",
            "Arena logging",
            |config, value| config.log_arenas = value,
        )),
        "reset" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: reset on|off",
            "Boundary reset between instances",
            |config, value| config.reset_between_instances = value,
        )),
        "ownedonly" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: ownedonly on|off",
            "Disable-only-when-owned policy",
            |config, value| config.disable_only_owned = value,
        )),
        "advanced" => Ok(apply_toggle(
            logger,
            arguments.first().copied(),
            "Usage: advanced on|off",
            "Advanced combat logging",
            |config, value| config.advanced_logging = value,
        )),
        "mode" => Ok(set_mode(logger, arguments.first().copied())),
        "manual" => Ok(set_manual_policy(logger, arguments.first().copied())),
        "raid" => Ok(set_raid_bucket(
            logger,
            arguments.first().copied(),
            arguments.get(1).copied(),
        )),
        "delay" => Ok(set_delay(
            logger,
            arguments.first().copied(),
            arguments.get(1).copied(),
        )),
        "export" => Ok(share::export_string(&logger.config())),
        "import" => {
            let Some(payload) = arguments.first() else {
                return Err("import requires a settings string".to_string());
            };
            let imported = share::import_string(payload)?;
            logger.update_config(move |config| *config = imported);
            Ok("Settings imported".to_string())
        }
        _ => Ok(UNKNOWN_OPTION_HELP.to_string()),
    }
}

fn render_status(logger: &AutoLogger) -> String {
    let status = logger.status();
    let mut lines = vec![
        format!(
            "Combat logging: {} (owner: {})",
            on_off(status.logging_active),
            status.owner
        ),
        format!(
            "Location: {} - {}",
            status.signature,
            if status.eligible {
                "eligible"
            } else {
                "not eligible"
            }
        ),
        format!(
            "Mode: {}, manual policy: {}{}",
            status.mode.label(),
            status.manual_policy.label(),
            if status.running { "" } else { " (stopped)" }
        ),
    ];
    if let Some(last_toggle) = status.last_toggle {
        lines.push(format!("Last action: {last_toggle}"));
    }
    lines.join("\n")
}

fn apply_toggle(
    logger: &AutoLogger,
    argument: Option<&str>,
    usage: &str,
    label: &str,
    setter: impl FnOnce(&mut LoggingConfig, bool),
) -> String {
    let Some(value) = parse_toggle(argument) else {
        return usage.to_string();
    };
    logger.update_config(|config| setter(config, value));
    format!("{label} {}", on_off(value))
}

fn set_mode(logger: &AutoLogger, argument: Option<&str>) -> String {
    let Some(mode) = argument.and_then(LoggingMode::parse) else {
        return "Usage: mode raids|dungeons|all".to_string();
    };
    logger.update_config(|config| config.mode = mode);
    format!("Logging mode set to {}", mode.label())
}

fn set_manual_policy(logger: &AutoLogger, argument: Option<&str>) -> String {
    let Some(policy) = argument.and_then(ManualPolicy::parse) else {
        return "Usage: manual override|respect|force".to_string();
    };
    logger.update_config(|config| config.manual_policy = policy);
    format!("Manual logging policy set to {}", policy.label())
}

fn set_raid_bucket(logger: &AutoLogger, bucket: Option<&str>, argument: Option<&str>) -> String {
    const USAGE: &str = "Usage: raid lfr|normal|heroic|mythic|legacy on|off";
    let (Some(bucket), Some(value)) = (bucket, parse_toggle(argument)) else {
        return USAGE.to_string();
    };

    let mut recognized = false;
    logger.update_config(|config| {
        recognized = config.raid_difficulties.set_bucket(bucket, value);
    });
    if !recognized {
        return USAGE.to_string();
    }
    format!("Raid {} logging {}", bucket.to_ascii_lowercase(), on_off(value))
}

fn set_delay(logger: &AutoLogger, kind: Option<&str>, argument: Option<&str>) -> String {
    const USAGE: &str = "Usage: delay debounce|enable|disable|recheck <seconds>";
    let seconds = argument
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);
    let (Some(kind), Some(seconds)) = (kind, seconds) else {
        return USAGE.to_string();
    };

    match kind.to_ascii_lowercase().as_str() {
        "debounce" => logger.update_config(|config| config.debounce_seconds = seconds),
        "enable" => logger.update_config(|config| config.enable_delay_seconds = seconds),
        "disable" => logger.update_config(|config| config.disable_delay_seconds = seconds),
        "recheck" => logger.update_config(|config| config.recheck_seconds = seconds),
        _ => return USAGE.to_string(),
    }
    format!("{} delay set to {seconds}s", kind.to_ascii_lowercase())
}

fn parse_toggle(argument: Option<&str>) -> Option<bool> {
    match argument?.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
