//! Field-by-field decoding of records.

use serde_json::{Map, Value};
use tracing::trace;

use crate::{Decode, DecodeContext, DecodeError, DecodeResult, Decoder, ValueKind};

/// Consumes the entries of a map while a record is decoded.
///
/// Every field is attempted even after a failure; [`Fields::finish`]
/// reports all collected errors at once.
///
/// ```
/// use splitconf_decode::{
///     Decode, DecodeContext, DecodeResult, Decoder, Fields, TargetKind, TargetType, Value,
/// };
///
/// #[derive(Debug, Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Decode for Server {
///     fn target_type() -> TargetType {
///         TargetType::of::<Self>(TargetKind::Struct)
///     }
///
///     fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
///         let mut fields = Fields::new::<Self>(value, cx)?;
///         let server = Self {
///             host: fields.take("host"),
///             port: fields.take("port"),
///         };
///         fields.finish()?;
///         Ok(server)
///     }
/// }
///
/// let value = serde_json::json!({"host": "localhost", "Port": 8080});
/// let server: Server = Decoder::new().decode(value).unwrap();
/// assert_eq!(server.port, 8080);
/// ```
#[derive(Debug)]
pub struct Fields<'a> {
    decoder: &'a Decoder,
    field: &'a str,
    entries: Map<String, Value>,
    errors: Vec<DecodeError>,
}

impl<'a> Fields<'a> {
    /// Starts decoding a record of type `T` from `value`.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if `value` is not a map.
    pub fn new<T: Decode>(value: Value, cx: &DecodeContext<'a>) -> DecodeResult<Self> {
        let Value::Object(entries) = value else {
            return Err(cx.mismatch::<T>(ValueKind::of(&value)));
        };

        Ok(Self {
            decoder: cx.decoder(),
            field: cx.field(),
            entries,
            errors: Vec::new(),
        })
    }

    /// Decodes the field `name`, matching keys case-insensitively.
    ///
    /// A missing key yields the default value. A failure is recorded and
    /// also yields the default value.
    pub fn take<T: Decode>(&mut self, name: &str) -> T {
        let value = self.remove(name).unwrap_or(Value::Null);
        let path = DecodeContext::new(self.decoder, self.field).child(name);

        match self.decoder.decode_field(&path, value) {
            Ok(value) => value,
            Err(err) => {
                trace!(field = %path, error = %err, "field failed to decode");
                self.errors.push(err);
                T::default()
            }
        }
    }

    /// Returns the keys not consumed so far.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Ends decoding of the record.
    ///
    /// # Errors
    ///
    /// Returns every error collected by [`Fields::take`], plus unused keys
    /// when the decoder rejects them.
    pub fn finish(self) -> DecodeResult<()> {
        let mut errors = self.errors;

        if self.decoder.error_unused() && !self.entries.is_empty() {
            errors.push(DecodeError::UnusedKeys {
                field: self.field.to_string(),
                keys: self.entries.keys().cloned().collect(),
            });
        }

        DecodeError::aggregate(errors)
    }

    fn remove(&mut self, name: &str) -> Option<Value> {
        if let Some(value) = self.entries.remove(name) {
            return Some(value);
        }

        let key = self
            .entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()?;
        self.entries.remove(&key)
    }
}
