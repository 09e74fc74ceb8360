//! Leaf helpers shared by the pipeline stages.

pub mod date;
pub mod minify;
pub mod slug;
pub mod write;
