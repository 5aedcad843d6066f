#![forbid(unsafe_code)]

//! Cell-grid rendering substrate: cells, buffers, frames, hit testing.

pub mod buffer;
pub mod cell;
pub mod frame;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::{Frame, HitGrid, HitId, HitRegion};
