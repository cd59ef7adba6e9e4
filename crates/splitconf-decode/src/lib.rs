//! Decode hook pipeline for Splitconf.
//!
//! This crate turns untyped values into typed configuration:
//! - [`Decode`]: Implemented by every type a value can be decoded into
//! - [`DecodeHook`]: Optionally transforms a value before it is decoded
//! - [`ComposedHook`]: Ordered chain of hooks, first match wins
//! - [`Decoder`]: Walks the target type and runs the hooks per field
//! - [`UnmarshalText`]: Capability for types that parse themselves from text

mod decode;
mod decoder;
mod error;
mod fields;
mod hook;
pub mod hooks;
mod kind;

pub use decode::{Decode, DecodeContext, TextUnmarshalFn, UnmarshalText, unmarshal_text_into};
pub use decoder::Decoder;
pub use error::{DecodeError, DecodeResult, ParseError};
pub use fields::Fields;
pub use hook::{ComposedHook, DecodeHook, HookOutcome, HookResult, compose};
pub use kind::{TargetKind, TargetType, ValueKind};

/// Re-exported so decoders and hooks can be written without a direct
/// `serde_json` dependency.
pub use serde_json::Value;
