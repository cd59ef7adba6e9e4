//! Source and target type descriptors.

use std::any::TypeId;
use std::fmt;

use serde_json::Value;

use crate::Decode;

/// Runtime kind of an untyped source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Missing or explicit null.
    Null,
    /// A boolean.
    Bool,
    /// An integer or floating point number.
    Number,
    /// A string.
    String,
    /// An ordered sequence of values.
    Sequence,
    /// A string-keyed map of values.
    Map,
}

impl ValueKind {
    /// Returns the kind of the given value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Map,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Sequence => write!(f, "sequence"),
            Self::Map => write!(f, "map"),
        }
    }
}

/// Structural kind of a declared target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// `bool`.
    Bool,
    /// Signed or unsigned integers.
    Integer,
    /// `f32` and `f64`.
    Float,
    /// `String`.
    String,
    /// `Vec<T>`.
    Sequence,
    /// String-keyed maps.
    Map,
    /// Records decoded field by field.
    Struct,
    /// Types with their own decode rules, such as newtypes and `Duration`.
    ///
    /// Hooks keyed on a structural kind never claim opaque targets; they have
    /// to match the exact type.
    Opaque,
}

/// Descriptor of the type a value is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
    kind: TargetKind,
    text_unmarshaler: bool,
}

impl TargetType {
    /// Describes `T` with the given structural kind.
    #[must_use]
    pub fn of<T: Decode>(kind: TargetKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind,
            text_unmarshaler: T::text_unmarshaler().is_some(),
        }
    }

    /// Returns the type id.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without module paths (e.g. `Vec<String>`).
    #[must_use]
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// Returns the structural kind.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Returns true if the type can parse itself from text.
    #[must_use]
    pub fn has_text_unmarshaler(&self) -> bool {
        self.text_unmarshaler
    }

    /// Returns true if this describes exactly `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

fn short_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();

    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or_default());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[test]
    fn test_value_kind_of() {
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("a")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!(["a"])), ValueKind::Sequence);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Map);
    }

    #[test]
    fn test_value_kind_display() {
        assert_eq!(ValueKind::String.to_string(), "string");
        assert_eq!(ValueKind::Sequence.to_string(), "sequence");
    }

    #[test]
    fn test_target_type_of_vec() {
        let target = TargetType::of::<Vec<String>>(TargetKind::Sequence);
        assert!(target.is::<Vec<String>>());
        assert!(!target.is::<String>());
        assert_eq!(target.kind(), TargetKind::Sequence);
        assert!(!target.has_text_unmarshaler());
    }

    #[test]
    fn test_target_type_matches_decode_impl() {
        assert_eq!(
            Vec::<String>::target_type(),
            TargetType::of::<Vec<String>>(TargetKind::Sequence)
        );
        assert_eq!(Duration::target_type().kind(), TargetKind::Opaque);
    }

    #[test]
    fn test_short_name_strips_paths() {
        assert_eq!(Vec::<String>::target_type().short_name(), "Vec<String>");
        assert_eq!(
            BTreeMap::<String, u16>::target_type().short_name(),
            "BTreeMap<String, u16>"
        );
        assert_eq!(Duration::target_type().to_string(), "Duration");
    }

    #[test]
    fn test_short_type_name_plain() {
        assert_eq!(short_type_name("bool"), "bool");
        assert_eq!(short_type_name("a::b::C<d::E, [f::G]>"), "C<E, [G]>");
    }
}
