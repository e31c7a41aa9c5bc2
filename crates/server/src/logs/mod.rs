//! Logs module — time parsing, response projection, and tool operations.

pub mod map;
pub mod route;
pub mod time;

pub use route::LogTools;
