//! Domain types shared by every component, shaped the way the backend serializes them.

pub mod catalog;
pub mod order;
pub mod payload;

pub use catalog::*;
pub use order::*;
pub use payload::*;
