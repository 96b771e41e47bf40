//! Configuration loading and environment parsing.

use super::validation::validate_config;
use super::Config;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw JSON document supplied through the environment.
pub const CONFIG_JSON_ENV: &str = "CHESS_COORDINATOR_CONFIG_JSON";
/// Path of a JSON config file.
pub const CONFIG_PATH_ENV: &str = "CHESS_COORDINATOR_CONFIG_PATH";
/// Prefix of per-field overrides, e.g. `CHESS_COORDINATOR__STORAGE__PATH`.
pub const ENV_OVERRIDE_PREFIX: &str = "CHESS_COORDINATOR__";

/// Load configuration. Sources merge in this order, later ones winning per
/// field:
/// 1) defaults compiled into the binary
/// 2) `config.json` in the current working directory
/// 3) the file named by `CHESS_COORDINATOR_CONFIG_PATH`
/// 4) raw JSON in `CHESS_COORDINATOR_CONFIG_JSON`
/// 5) `CHESS_COORDINATOR__SECTION__FIELD=value` overrides
///
/// Read and parse errors are printed to stderr and the offending source is
/// skipped. Validation problems are reported but not propagated; callers that
/// need a hard failure run [`validate_config`] themselves.
#[must_use]
pub fn load() -> Config {
    let defaults = Config::default();
    let mut merged =
        serde_json::to_value(&defaults).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

    merge_file_source(&mut merged, &PathBuf::from("config.json"));

    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        merge_file_source(&mut merged, &PathBuf::from(path));
    }

    if let Ok(json) = env::var(CONFIG_JSON_ENV) {
        if let Some(value) = parse_json_document(&json, CONFIG_JSON_ENV) {
            merge_values(&mut merged, value);
        }
    }

    apply_env_overrides(&mut merged, env::vars());

    let config = match serde_json::from_value::<Config>(merged) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to deserialize config; using defaults: {e}");
            defaults
        }
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("Configuration validation error: {e}");
    }

    config
}

fn parse_json_document(raw: &str, label: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("Failed to parse config from {label}: {err}");
            None
        }
    }
}

fn merge_file_source(target: &mut Value, path: &Path) {
    if path.as_os_str().is_empty() || !path.exists() {
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => {
            if let Some(value) = parse_json_document(&contents, &format!("file {}", path.display()))
            {
                merge_values(target, value);
            }
        }
        Err(err) => {
            eprintln!("Failed to read config from {}: {}", path.display(), err);
        }
    }
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target_slot, source_value) => {
            *target_slot = source_value;
        }
    }
}

fn apply_env_overrides(root: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (key, raw_value) in vars {
        let Some(stripped) = key.strip_prefix(ENV_OVERRIDE_PREFIX) else {
            continue;
        };

        let segments: Vec<String> = stripped
            .split("__")
            .filter(|segment| !segment.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        if segments.is_empty() {
            continue;
        }

        set_nested_value(root, &segments, parse_scalar(raw_value.trim()));
    }
}

/// JSON literals (`8080`, `true`) keep their type; anything else is a string.
fn parse_scalar(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }

    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn set_nested_value(target: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    let map = ensure_object(target);
    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let entry = map
        .entry(first.clone())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    set_nested_value(entry, rest, value);
}

fn ensure_object(value: &mut Value) -> &mut serde_json::Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(serde_json::Map::new());
    }

    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was coerced into an object above"),
    }
}
