//! Runtime module — server lifecycle: boot and the stdio serve loop.

pub mod boot;
pub mod serve;
