//! Semicolon separated string list plugin.
//!
//! [`SemicolonSeparatedStringList`] parses itself through
//! [`UnmarshalText`], so the generic text unmarshaller hook handles it and no
//! dedicated hook is needed.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use splitconf_decode::{
    Decode, DecodeContext, DecodeResult, ParseError, TargetKind, TargetType, TextUnmarshalFn,
    UnmarshalText, Value, ValueKind, unmarshal_text_into,
};

/// Separator between list items.
pub const DELIMITER: char = ';';

/// A string list written as `foo;bar;baz`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemicolonSeparatedStringList(pub Vec<String>);

impl SemicolonSeparatedStringList {
    /// Returns the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl UnmarshalText for SemicolonSeparatedStringList {
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), ParseError> {
        let text = std::str::from_utf8(text)?;
        self.0 = text.split(DELIMITER).map(str::to_string).collect();
        Ok(())
    }
}

impl Deref for SemicolonSeparatedStringList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for SemicolonSeparatedStringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl FromStr for SemicolonSeparatedStringList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        unmarshal_text_into(s.as_bytes())
    }
}

impl fmt::Display for SemicolonSeparatedStringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(&DELIMITER.to_string()))
    }
}

impl Decode for SemicolonSeparatedStringList {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Opaque)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        match value {
            Value::Array(_) => Vec::<String>::from_value(value, cx).map(Self),
            other => Err(cx.mismatch::<Self>(ValueKind::of(&other))),
        }
    }

    fn text_unmarshaler() -> Option<TextUnmarshalFn<Self>> {
        Some(unmarshal_text_into::<Self>)
    }
}
