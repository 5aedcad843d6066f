#![forbid(unsafe_code)]

//! Colors and styles for Tabulon widgets.

pub mod color;
pub mod style;

pub use color::Color;
pub use style::{Style, StyleFlags};
