//! CLI command implementations.

pub mod replay;
pub mod scale;
pub mod widgets;
