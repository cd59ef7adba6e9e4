//! Text unmarshaller hook.

use serde_json::Value;

use crate::{DecodeHook, HookOutcome, HookResult, TargetType, ValueKind};

/// Lets targets implementing [`UnmarshalText`](crate::UnmarshalText) parse
/// string values themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextUnmarshallerHook;

impl DecodeHook for TextUnmarshallerHook {
    fn name(&self) -> &'static str {
        "text-unmarshaller"
    }

    fn description(&self) -> &'static str {
        "Hands strings to targets that parse themselves from text"
    }

    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult {
        if from != ValueKind::String || !to.has_text_unmarshaler() {
            return Ok(HookOutcome::Declined(value));
        }

        match value {
            Value::String(text) => Ok(HookOutcome::UnmarshalText(text.into_bytes())),
            other => Ok(HookOutcome::Declined(other)),
        }
    }
}
