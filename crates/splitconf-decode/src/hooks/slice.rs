//! String to sequence hook.

use serde_json::Value;

use crate::{DecodeHook, HookOutcome, HookResult, TargetKind, TargetType, ValueKind};

/// Splits a string on a separator when the target is a sequence.
///
/// An empty string becomes an empty sequence. An empty separator splits
/// the string into its characters.
#[derive(Debug, Clone)]
pub struct StringToSliceHook {
    separator: String,
}

impl StringToSliceHook {
    /// Creates a hook splitting on `separator`.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Returns the separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for StringToSliceHook {
    fn default() -> Self {
        Self::new(",")
    }
}

impl DecodeHook for StringToSliceHook {
    fn name(&self) -> &'static str {
        "string-to-slice"
    }

    fn description(&self) -> &'static str {
        "Splits separated strings into sequences"
    }

    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult {
        if from != ValueKind::String || to.kind() != TargetKind::Sequence {
            return Ok(HookOutcome::Declined(value));
        }
        let Value::String(text) = value else {
            return Ok(HookOutcome::Declined(value));
        };

        if text.is_empty() {
            return Ok(HookOutcome::Converted(Value::Array(Vec::new())));
        }

        let items = if self.separator.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(self.separator.as_str())
                .map(|item| Value::String(item.to_string()))
                .collect()
        };
        Ok(HookOutcome::Converted(Value::Array(items)))
    }
}
