//! The `Decode` trait and its implementations for standard types.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{DecodeError, DecodeResult, Decoder, ParseError, TargetKind, TargetType, ValueKind};

/// Builds a value of `T` from raw text.
pub type TextUnmarshalFn<T> = fn(&[u8]) -> Result<T, ParseError>;

/// Capability of a type to parse itself from raw text.
pub trait UnmarshalText {
    /// Replaces the contents of `self` with the value parsed from `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid representation.
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), ParseError>;
}

/// Builds a default `T` and unmarshals `text` into it.
///
/// Use this as the [`Decode::text_unmarshaler`] of types implementing
/// [`UnmarshalText`].
///
/// # Errors
///
/// Returns the error reported by [`UnmarshalText::unmarshal_text`].
pub fn unmarshal_text_into<T: UnmarshalText + Default>(text: &[u8]) -> Result<T, ParseError> {
    let mut value = T::default();
    value.unmarshal_text(text)?;
    Ok(value)
}

/// A type that untyped values can be decoded into.
///
/// Missing values leave the target at its [`Default`].
pub trait Decode: Default + Sized + 'static {
    /// Describes this type to the hooks.
    fn target_type() -> TargetType;

    /// Builds the value once the hooks have run.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not fit this type.
    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self>;

    /// Returns the text unmarshaller, if this type parses itself from text.
    fn text_unmarshaler() -> Option<TextUnmarshalFn<Self>> {
        None
    }
}

/// The decoder and field path a value is being decoded at.
#[derive(Debug)]
pub struct DecodeContext<'a> {
    decoder: &'a Decoder,
    field: &'a str,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(decoder: &'a Decoder, field: &'a str) -> Self {
        Self { decoder, field }
    }

    /// Returns the decoder running this decode.
    #[must_use]
    pub fn decoder(&self) -> &'a Decoder {
        self.decoder
    }

    /// Returns the path of the field being decoded.
    #[must_use]
    pub fn field(&self) -> &'a str {
        self.field
    }

    /// Returns the path of a child field.
    #[must_use]
    pub fn child(&self, name: &str) -> String {
        if self.field.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.field)
        }
    }

    /// Builds a type mismatch error for this field.
    #[must_use]
    pub fn mismatch<T: Decode>(&self, found: ValueKind) -> DecodeError {
        DecodeError::TypeMismatch {
            field: self.field.to_string(),
            expected: T::target_type().short_name(),
            found,
        }
    }
}

fn from_serde<T: Decode + DeserializeOwned>(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<T> {
    let found = ValueKind::of(&value);
    serde_json::from_value(value).map_err(|_| cx.mismatch::<T>(found))
}

macro_rules! decode_with_serde {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn target_type() -> TargetType {
                    TargetType::of::<Self>(TargetKind::$kind)
                }

                fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
                    from_serde(value, cx)
                }
            }
        )*
    };
}

decode_with_serde!(
    String => String,
    bool => Bool,
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    isize => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    u64 => Integer,
    usize => Integer,
    f32 => Float,
    f64 => Float,
);

impl<T: Decode> Decode for Vec<T> {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Sequence)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let Value::Array(items) = value else {
            return Err(cx.mismatch::<Self>(ValueKind::of(&value)));
        };

        let mut decoded = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let field = format!("{}[{index}]", cx.field());
            match cx.decoder().decode_field(&field, item) {
                Ok(value) => decoded.push(value),
                Err(err) => errors.push(err),
            }
        }

        DecodeError::aggregate(errors)?;
        Ok(decoded)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Map)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let Value::Object(entries) = value else {
            return Err(cx.mismatch::<Self>(ValueKind::of(&value)));
        };

        let mut decoded = BTreeMap::new();
        let mut errors = Vec::new();
        for (key, item) in entries {
            match cx.decoder().decode_field(&cx.child(&key), item) {
                Ok(value) => {
                    decoded.insert(key, value);
                }
                Err(err) => errors.push(err),
            }
        }

        DecodeError::aggregate(errors)?;
        Ok(decoded)
    }
}

/// Durations decode from an integer count of nanoseconds.
impl Decode for Duration {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Opaque)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        value
            .as_u64()
            .map(Duration::from_nanos)
            .ok_or_else(|| cx.mismatch::<Self>(ValueKind::of(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Upper(String);

    impl UnmarshalText for Upper {
        fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), ParseError> {
            self.0 = std::str::from_utf8(text)?.to_uppercase();
            Ok(())
        }
    }

    #[test]
    fn test_unmarshal_text_into() {
        let value: Upper = unmarshal_text_into(b"abc").unwrap();
        assert_eq!(value, Upper("ABC".to_string()));
    }

    #[test]
    fn test_unmarshal_text_into_error() {
        let result: Result<Upper, _> = unmarshal_text_into(&[0xff]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_string() {
        let value: String = Decoder::new().decode(json!("foo")).unwrap();
        assert_eq!(value, "foo");
    }

    #[test]
    fn test_decode_integer_rejects_string() {
        let err = Decoder::new().decode::<u16>(json!("8080")).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch {
                found: ValueKind::String,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_integer_out_of_range() {
        let err = Decoder::new().decode::<u8>(json!(300)).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_decode_float_and_bool() {
        let decoder = Decoder::new();
        assert!((decoder.decode::<f64>(json!(1.5)).unwrap() - 1.5).abs() < f64::EPSILON);
        assert!(decoder.decode::<bool>(json!(true)).unwrap());
    }

    #[test]
    fn test_decode_vec_without_hooks() {
        let value: Vec<String> = Decoder::new().decode(json!(["a", "b"])).unwrap();
        assert_eq!(value, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_vec_from_string_without_hooks_fails() {
        let err = Decoder::new()
            .decode::<Vec<String>>(json!("a,b"))
            .unwrap_err();
        assert_eq!(err.to_string(), "'' expected type 'Vec<String>', got string");
    }

    #[test]
    fn test_decode_vec_collects_element_errors() {
        let err = Decoder::new()
            .decode_field::<Vec<u8>>("ports", json!([1, "x", 2, true]))
            .unwrap_err();
        let fields: Vec<String> = err
            .errors()
            .iter()
            .map(|err| match err {
                DecodeError::TypeMismatch { field, .. } => field.clone(),
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(fields, vec!["ports[1]", "ports[3]"]);
    }

    #[test]
    fn test_decode_vec_null_element_is_default() {
        let value: Vec<String> = Decoder::new().decode(json!(["a", null])).unwrap();
        assert_eq!(value, vec!["a", ""]);
    }

    #[test]
    fn test_decode_map() {
        let value: BTreeMap<String, u16> = Decoder::new()
            .decode(json!({"http": 80, "https": 443}))
            .unwrap();
        assert_eq!(value.get("http"), Some(&80));
        assert_eq!(value.get("https"), Some(&443));
    }

    #[test]
    fn test_decode_map_error_path() {
        let err = Decoder::new()
            .decode_field::<BTreeMap<String, u16>>("ports", json!({"http": "eighty"}))
            .unwrap_err();
        assert!(err.to_string().contains("'ports.http' expected type 'u16'"));
    }

    #[test]
    fn test_decode_duration_from_nanos() {
        let value: Duration = Decoder::new().decode(json!(1_500_000_000_u64)).unwrap();
        assert_eq!(value, Duration::from_millis(1500));
    }

    #[test]
    fn test_decode_duration_from_string_without_hooks_fails() {
        let err = Decoder::new().decode::<Duration>(json!("1s")).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_context_child() {
        let decoder = Decoder::new();
        assert_eq!(DecodeContext::new(&decoder, "").child("a"), "a");
        assert_eq!(DecodeContext::new(&decoder, "a").child("b"), "a.b");
    }
}
