//! In-memory settings store.

use serde_json::{Map, Value};
use splitconf_decode::hooks::{StringToDurationHook, StringToSliceHook};
use splitconf_decode::{Decode, Decoder, compose};
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// Separator of nested key paths (e.g. `server.port`).
pub const KEY_DELIMITER: char = '.';

/// Returns the decoder used when no hooks are given.
///
/// It turns duration strings into [`std::time::Duration`] and
/// comma-separated strings into sequences.
#[must_use]
pub fn default_decoder() -> Decoder {
    Decoder::new().with_hook(Box::new(compose(vec![
        Box::new(StringToDurationHook),
        Box::new(StringToSliceHook::new(",")),
    ])))
}

/// Untyped configuration values, addressed by case-insensitive keys.
///
/// Explicitly set values take precedence over defaults; nested maps are
/// merged key by key.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    overrides: Map<String, Value>,
    defaults: Map<String, Value>,
}

impl Settings {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or has an empty segment.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let path = key_path(key)?;
        debug!(key, "setting value");
        insert(&mut self.overrides, &path, lowercase_keys(value.into()));
        Ok(())
    }

    /// Sets the default value of `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or has an empty segment.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let path = key_path(key)?;
        debug!(key, "setting default");
        insert(&mut self.defaults, &path, lowercase_keys(value.into()));
        Ok(())
    }

    /// Returns the value of `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = key_path(key).ok()?;
        self.resolve(&path)
    }

    /// Returns true if `key` has a value or a default.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns every leaf key as a dotted path, sorted.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Value::Object(map) = self.all_settings() {
            collect_keys(&map, "", &mut keys);
        }
        keys.sort();
        keys
    }

    /// Returns all values merged over their defaults.
    #[must_use]
    pub fn all_settings(&self) -> Value {
        let mut merged = Value::Object(self.defaults.clone());
        merge(&mut merged, &Value::Object(self.overrides.clone()));
        merged
    }

    /// Decodes the value of `key` with the default hooks.
    ///
    /// A missing key decodes to the default of `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the value cannot be decoded.
    pub fn unmarshal_key<T: Decode>(&self, key: &str) -> ConfigResult<T> {
        self.unmarshal_key_with(key, &default_decoder())
    }

    /// Decodes the value of `key` with the given decoder.
    ///
    /// The decoder's hooks replace the default hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the value cannot be decoded.
    pub fn unmarshal_key_with<T: Decode>(&self, key: &str, decoder: &Decoder) -> ConfigResult<T> {
        let path = key_path(key)?;
        let value = self.resolve(&path).unwrap_or(Value::Null);
        debug!(key, hooks = decoder.hooks().len(), "unmarshalling key");

        decoder
            .decode_field(key, value)
            .map_err(|source| ConfigError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Decodes all settings with the default hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be decoded.
    pub fn unmarshal<T: Decode>(&self) -> ConfigResult<T> {
        self.unmarshal_with(&default_decoder())
    }

    /// Decodes all settings with the given decoder.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be decoded.
    pub fn unmarshal_with<T: Decode>(&self, decoder: &Decoder) -> ConfigResult<T> {
        debug!(hooks = decoder.hooks().len(), "unmarshalling settings");

        decoder
            .decode(self.all_settings())
            .map_err(|source| ConfigError::Decode {
                key: String::new(),
                source,
            })
    }

    fn resolve(&self, path: &[String]) -> Option<Value> {
        match (lookup(&self.defaults, path), lookup(&self.overrides, path)) {
            (Some(default), Some(value)) => {
                let mut merged = default.clone();
                merge(&mut merged, value);
                Some(merged)
            }
            (default, value) => value.or(default).cloned(),
        }
    }
}

fn key_path(key: &str) -> ConfigResult<Vec<String>> {
    let path: Vec<String> = key
        .split(KEY_DELIMITER)
        .map(str::to_lowercase)
        .collect();

    if path.iter().any(String::is_empty) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    Ok(path)
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn insert(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = map;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }

    current.insert(last.clone(), value);
}

fn lookup<'a>(map: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = map.get(first)?;
    for segment in rest {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{KEY_DELIMITER}{key}")
        };

        match value {
            Value::Object(nested) => collect_keys(nested, &path, keys),
            _ => keys.push(path),
        }
    }
}
