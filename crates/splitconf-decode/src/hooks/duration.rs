//! String to duration hook.

use std::time::Duration;

use serde_json::Value;

use crate::{DecodeHook, HookOutcome, HookResult, ParseError, TargetType, ValueKind};

/// Parses human readable durations such as `"1h30m"` or `"250ms"`.
///
/// Fractional amounts (`"1.5h"`) are accepted. Surrounding whitespace and
/// negative durations are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToDurationHook;

impl DecodeHook for StringToDurationHook {
    fn name(&self) -> &'static str {
        "string-to-duration"
    }

    fn description(&self) -> &'static str {
        "Parses human readable durations"
    }

    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult {
        if from != ValueKind::String || !to.is::<Duration>() {
            return Ok(HookOutcome::Declined(value));
        }
        let Value::String(text) = value else {
            return Ok(HookOutcome::Declined(value));
        };

        if text.trim() != text {
            return Err(ParseError::new(format!(
                "invalid duration {text:?}: surrounding whitespace"
            )));
        }
        let duration = humantime::parse_duration(&text)
            .map_err(|err| ParseError::new(format!("invalid duration {text:?}: {err}")))?;
        let nanos = u64::try_from(duration.as_nanos())
            .map_err(|_| ParseError::new(format!("duration {text:?} is out of range")))?;

        Ok(HookOutcome::Converted(Value::from(nanos)))
    }
}
