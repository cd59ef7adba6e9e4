//! Aggregate configuration record.

use serde::Serialize;
use splitconf_decode::hooks::{StringToDurationHook, StringToSliceHook, TextUnmarshallerHook};
use splitconf_decode::{
    ComposedHook, Decode, DecodeContext, DecodeResult, Fields, TargetKind, TargetType, Value,
    compose,
};
use splitconf_list_dot::{DotSeparatedStringList, DotSeparatedStringListHook};
use splitconf_list_semicolon::SemicolonSeparatedStringList;

/// One field per list flavour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Split by the built-in comma hook.
    pub comma: Vec<String>,

    /// Split by the dot list hook.
    pub dot: DotSeparatedStringList,

    /// Split by the list itself, through the text unmarshaller hook.
    pub semicolon: SemicolonSeparatedStringList,
}

impl Decode for Config {
    fn target_type() -> TargetType {
        TargetType::of::<Self>(TargetKind::Struct)
    }

    fn from_value(value: Value, cx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let mut fields = Fields::new::<Self>(value, cx)?;
        let config = Self {
            comma: fields.take("comma"),
            dot: fields.take("dot"),
            semicolon: fields.take("semicolon"),
        };
        fields.finish()?;
        Ok(config)
    }
}

/// Returns the hook decoding every [`Config`] field.
pub fn all_in_one_hook() -> ComposedHook {
    compose(vec![
        Box::new(TextUnmarshallerHook),
        Box::new(DotSeparatedStringListHook::new()),
        Box::new(StringToDurationHook),
        Box::new(StringToSliceHook::new(",")),
    ])
}
