//! Question kinds, fair pair selection, and text rendering.

mod kind;
mod select;
mod text;

pub use kind::*;
pub use select::*;
pub use text::*;
