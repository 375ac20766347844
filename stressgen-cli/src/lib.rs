//! Support library for the `stressgen` binary.
//!
//! Exposes the command surface and logging setup so tests can drive whole
//! commands against an in-memory writer without spawning a process.

pub mod cli;
pub mod logging;
