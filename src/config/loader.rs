//! Configuration loading and environment parsing.

use super::Config;
use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "transport.json";
const CONFIG_PATH_ENV: &str = "WS_TRANSPORT_CONFIG_PATH";
const CONFIG_STDIN_ENV: &str = "WS_TRANSPORT_CONFIG_STDIN";
const CONFIG_JSON_ENV: &str = "WS_TRANSPORT_CONFIG_JSON";
const ENV_OVERRIDE_PREFIX: &str = "WS_TRANSPORT__";

/// Load configuration, merging sources onto the compiled-in defaults.
/// Later sources override earlier ones:
/// 1) `transport.json` in the current working directory (if present)
/// 2) File pointed to by `WS_TRANSPORT_CONFIG_PATH` (must exist)
/// 3) JSON from stdin when `WS_TRANSPORT_CONFIG_STDIN=true/1/yes`
/// 4) `WS_TRANSPORT_CONFIG_JSON` env var containing raw JSON
/// 5) Individual fields from env vars prefixed `WS_TRANSPORT__`, using "__" as the
///    nested separator, e.g. `WS_TRANSPORT__TRANSPORT__SUB_PROTOCOL=chat`
///
/// A source that cannot be read or parsed, or a merged document whose transport
/// settings fail validation, is an error.
pub fn load() -> anyhow::Result<Config> {
    use std::env;
    use std::io::Read;

    let mut merged = defaults_value()?;

    let cwd_file = Path::new(DEFAULT_CONFIG_FILE);
    if cwd_file.exists() {
        merge_file_source(&mut merged, cwd_file)?;
    }

    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        merge_file_source(&mut merged, Path::new(&path))?;
    }

    if let Ok(val) = env::var(CONFIG_STDIN_ENV) {
        if env_var_truthy(&val) {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read config from stdin")?;
            merge_document(&mut merged, &buf, "stdin")?;
        }
    }

    if let Ok(json) = env::var(CONFIG_JSON_ENV) {
        merge_document(&mut merged, &json, CONFIG_JSON_ENV)?;
    }

    apply_env_overrides(&mut merged, env::vars());

    finish(merged)
}

/// Merge a single JSON document onto the defaults.
pub fn from_json_str(raw: &str) -> anyhow::Result<Config> {
    let mut merged = defaults_value()?;
    merge_document(&mut merged, raw, "document")?;
    finish(merged)
}

fn defaults_value() -> anyhow::Result<Value> {
    serde_json::to_value(Config::default()).context("failed to serialize default config")
}

fn finish(merged: Value) -> anyhow::Result<Config> {
    serde_json::from_value::<Config>(merged).context("invalid configuration")
}

fn merge_document(target: &mut Value, raw: &str, label: &str) -> anyhow::Result<()> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    let value: Value =
        serde_json::from_str(raw).with_context(|| format!("failed to parse config from {label}"))?;
    tracing::debug!(source = label, "Merged configuration source");
    merge_values(target, value);
    Ok(())
}

fn merge_file_source(target: &mut Value, path: &Path) -> anyhow::Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    merge_document(target, &contents, &format!("file {}", path.display()))
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

fn env_var_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

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

    if !target.is_object() {
        *target = Value::Object(serde_json::Map::new());
    }
    let Value::Object(map) = target else {
        return;
    };

    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let entry = map
        .entry(first.clone())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    set_nested_value(entry, rest, value);
}
