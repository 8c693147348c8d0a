// Utility functions

pub mod format;
pub mod logger;

pub use format::*;
pub use logger::*;
