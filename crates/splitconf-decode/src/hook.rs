//! Decode hook trait and composition.

use std::fmt;

use serde_json::Value;
use tracing::trace;

use crate::{ParseError, TargetType, ValueKind};

/// What a hook did with a value.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// The hook does not apply; the value is handed on unchanged.
    Declined(Value),
    /// The hook converted the value for the target type.
    Converted(Value),
    /// The target should parse itself from these bytes.
    UnmarshalText(Vec<u8>),
}

impl HookOutcome {
    /// Returns true if the hook did not apply.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined(_))
    }
}

/// Result type for hook application.
pub type HookResult = Result<HookOutcome, ParseError>;

/// Transforms a value before it is decoded into its target type.
///
/// Hooks inspect the kind of the source value and the declared target type.
/// A hook that does not apply returns [`HookOutcome::Declined`] with the
/// value untouched; declining is not an error.
pub trait DecodeHook: Send + Sync {
    /// Returns the hook name.
    fn name(&self) -> &'static str;

    /// Returns a short description of the hook.
    fn description(&self) -> &'static str {
        ""
    }

    /// Applies the hook.
    ///
    /// # Errors
    ///
    /// Returns an error if the hook applies but cannot parse the value.
    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult;
}

/// Hooks tried in order until one applies.
#[derive(Default)]
pub struct ComposedHook {
    hooks: Vec<Box<dyn DecodeHook>>,
}

impl ComposedHook {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook.
    #[must_use]
    pub fn with_hook(mut self, hook: Box<dyn DecodeHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Appends a hook in place.
    pub fn push(&mut self, hook: Box<dyn DecodeHook>) {
        self.hooks.push(hook);
    }

    /// Returns the composed hooks.
    pub fn hooks(&self) -> &[Box<dyn DecodeHook>] {
        &self.hooks
    }

    /// Returns the number of hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if there are no hooks.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for ComposedHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|hook| hook.name()))
            .finish()
    }
}

impl DecodeHook for ComposedHook {
    fn name(&self) -> &'static str {
        "composed"
    }

    fn description(&self) -> &'static str {
        "Tries each hook in order, the first one that applies wins"
    }

    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult {
        let mut value = value;
        for hook in &self.hooks {
            match hook.apply(from, to, value)? {
                HookOutcome::Declined(unchanged) => value = unchanged,
                outcome => {
                    trace!(hook = hook.name(), %from, %to, "hook applied");
                    return Ok(outcome);
                }
            }
        }

        Ok(HookOutcome::Declined(value))
    }
}

/// Composes hooks into one, tried in the given order.
#[must_use]
pub fn compose(hooks: Vec<Box<dyn DecodeHook>>) -> ComposedHook {
    ComposedHook { hooks }
}
