//! Built-in decode hooks.

mod duration;
mod slice;
mod text;

pub use duration::StringToDurationHook;
pub use slice::StringToSliceHook;
pub use text::TextUnmarshallerHook;
