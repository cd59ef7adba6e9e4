//! Dot separated string list plugin.
//!
//! [`DotSeparatedStringList`] has no parsing logic of its own. Strings are
//! turned into it by [`DotSeparatedStringListHook`], a hook keyed on this
//! exact target type.

use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use splitconf_decode::{
    Decode, DecodeContext, DecodeHook, DecodeResult, HookOutcome, HookResult, TargetKind,
    TargetType, Value, ValueKind,
};

/// Separator between list items.
pub const DELIMITER: char = '.';

/// A string list written as `foo.bar.baz`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DotSeparatedStringList(pub Vec<String>);

impl DotSeparatedStringList {
    /// Splits `text` on [`DELIMITER`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(text.split(DELIMITER).map(str::to_string).collect())
    }

    /// Returns the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for DotSeparatedStringList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for DotSeparatedStringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl FromStr for DotSeparatedStringList {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DotSeparatedStringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(&DELIMITER.to_string()))
    }
}

impl Decode for DotSeparatedStringList {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Opaque)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        match value {
            Value::Array(_) => Vec::<String>::from_value(value, cx).map(Self),
            other => Err(cx.mismatch::<Self>(ValueKind::of(&other))),
        }
    }
}

/// Splits strings on `.` when the target is a [`DotSeparatedStringList`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DotSeparatedStringListHook;

impl DotSeparatedStringListHook {
    /// Creates a new hook.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DecodeHook for DotSeparatedStringListHook {
    fn name(&self) -> &'static str {
        "dot-separated-string-list"
    }

    fn description(&self) -> &'static str {
        "Splits dot separated strings into a DotSeparatedStringList"
    }

    fn apply(&self, from: ValueKind, to: &TargetType, value: Value) -> HookResult {
        if from != ValueKind::String {
            return Ok(HookOutcome::Declined(value));
        }
        if !to.is::<DotSeparatedStringList>() {
            return Ok(HookOutcome::Declined(value));
        }
        let Value::String(text) = value else {
            return Ok(HookOutcome::Declined(value));
        };

        let items = DotSeparatedStringList::parse(&text)
            .into_inner()
            .into_iter()
            .map(Value::String)
            .collect();
        Ok(HookOutcome::Converted(Value::Array(items)))
    }
}
