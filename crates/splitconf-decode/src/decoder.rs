//! Decoder execution.

use std::fmt;

use serde_json::Value;
use tracing::trace;

use crate::{
    ComposedHook, Decode, DecodeContext, DecodeError, DecodeHook, DecodeResult, HookOutcome,
    ValueKind,
};

/// Decodes untyped values into typed targets, running hooks per field.
#[derive(Default)]
pub struct Decoder {
    hooks: ComposedHook,
    error_unused: bool,
}

impl Decoder {
    /// Creates a decoder without hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook, tried after the hooks added before it.
    #[must_use]
    pub fn with_hook(mut self, hook: Box<dyn DecodeHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Rejects map keys no struct field consumes.
    #[must_use]
    pub fn with_error_unused(mut self, error_unused: bool) -> Self {
        self.error_unused = error_unused;
        self
    }

    /// Returns whether unused keys are rejected.
    pub fn error_unused(&self) -> bool {
        self.error_unused
    }

    /// Returns a reference to the hooks.
    pub fn hooks(&self) -> &[Box<dyn DecodeHook>] {
        self.hooks.hooks()
    }

    /// Decodes a root value.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of `value` cannot be decoded into `T`.
    pub fn decode<T: Decode>(&self, value: Value) -> DecodeResult<T> {
        self.decode_field("", value)
    }

    /// Decodes the value found at `field`.
    ///
    /// A null value keeps the default of `T` and skips the hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if a hook fails to parse the value, or the value
    /// does not fit `T`.
    pub fn decode_field<T: Decode>(&self, field: &str, value: Value) -> DecodeResult<T> {
        if value.is_null() {
            trace!(field, "null value, keeping default");
            return Ok(T::default());
        }

        let to = T::target_type();
        let from = ValueKind::of(&value);
        let outcome = self
            .hooks
            .apply(from, &to, value)
            .map_err(|source| DecodeError::Parse {
                field: field.to_string(),
                target: to.short_name(),
                source,
            })?;

        let cx = DecodeContext::new(self, field);
        match outcome {
            HookOutcome::Declined(value) | HookOutcome::Converted(value) => {
                T::from_value(value, &cx)
            }
            HookOutcome::UnmarshalText(text) => {
                let Some(unmarshal) = T::text_unmarshaler() else {
                    return Err(cx.mismatch::<T>(from));
                };
                unmarshal(&text).map_err(|source| DecodeError::Parse {
                    field: field.to_string(),
                    target: to.short_name(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("hooks", &self.hooks)
            .field("error_unused", &self.error_unused)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{StringToDurationHook, StringToSliceHook, TextUnmarshallerHook};
    use crate::{HookResult, ParseError, TargetType};
    use serde_json::json;
    use std::time::Duration;

    // Claims every string, regardless of target
    struct GreedyHook;

    impl DecodeHook for GreedyHook {
        fn name(&self) -> &'static str {
            "greedy"
        }

        fn apply(&self, from: ValueKind, _to: &TargetType, value: Value) -> HookResult {
            if from == ValueKind::String {
                Ok(HookOutcome::Converted(json!(42)))
            } else {
                Ok(HookOutcome::Declined(value))
            }
        }
    }

    // Asks for text unmarshalling of every string
    struct TextEverywhereHook;

    impl DecodeHook for TextEverywhereHook {
        fn name(&self) -> &'static str {
            "text-everywhere"
        }

        fn apply(&self, _from: ValueKind, _to: &TargetType, value: Value) -> HookResult {
            match value {
                Value::String(text) => Ok(HookOutcome::UnmarshalText(text.into_bytes())),
                other => Ok(HookOutcome::Declined(other)),
            }
        }
    }

    struct FailingHook;

    impl DecodeHook for FailingHook {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(&self, _from: ValueKind, _to: &TargetType, _value: Value) -> HookResult {
            Err(ParseError::new("rejected"))
        }
    }

    #[test]
    fn test_new() {
        let decoder = Decoder::new();
        assert!(decoder.hooks().is_empty());
        assert!(!decoder.error_unused());
    }

    #[test]
    fn test_with_hook_keeps_order() {
        let decoder = Decoder::new()
            .with_hook(Box::new(TextUnmarshallerHook))
            .with_hook(Box::new(StringToDurationHook))
            .with_hook(Box::new(StringToSliceHook::default()));

        let names: Vec<_> = decoder.hooks().iter().map(|hook| hook.name()).collect();
        assert_eq!(
            names,
            vec!["text-unmarshaller", "string-to-duration", "string-to-slice"]
        );
    }

    #[test]
    fn test_null_keeps_default_and_skips_hooks() {
        let decoder = Decoder::new().with_hook(Box::new(FailingHook));
        let value: Vec<String> = decoder.decode(Value::Null).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_converted_value_is_decoded() {
        let decoder = Decoder::new().with_hook(Box::new(GreedyHook));
        let value: u32 = decoder.decode(json!("anything")).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_converted_value_must_fit_target() {
        let decoder = Decoder::new().with_hook(Box::new(GreedyHook));
        let err = decoder
            .decode_field::<Vec<String>>("names", json!("a,b"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'names' expected type 'Vec<String>', got number"
        );
    }

    #[test]
    fn test_hook_error_becomes_parse_error() {
        let decoder = Decoder::new().with_hook(Box::new(FailingHook));
        let err = decoder.decode_field::<String>("name", json!("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'name' could not be parsed as 'String': rejected"
        );
    }

    #[test]
    fn test_unmarshal_text_without_capability_is_mismatch() {
        let decoder = Decoder::new().with_hook(Box::new(TextEverywhereHook));
        let err = decoder.decode_field::<u8>("level", json!("3")).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch {
                found: ValueKind::String,
                ..
            }
        ));
    }

    #[test]
    fn test_hooks_run_per_sequence_element() {
        let decoder = Decoder::new().with_hook(Box::new(StringToDurationHook));
        let value: Vec<Duration> = decoder.decode(json!(["1s", "2m"])).unwrap();
        assert_eq!(value, vec![Duration::from_secs(1), Duration::from_secs(120)]);
    }

    #[test]
    fn test_debug() {
        let decoder = Decoder::new().with_hook(Box::new(StringToDurationHook));
        let debug = format!("{decoder:?}");
        assert!(debug.contains("Decoder"));
        assert!(debug.contains("string-to-duration"));
    }
}
