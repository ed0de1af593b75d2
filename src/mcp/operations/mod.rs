//! NAS operations behind the tool catalog.
//!
//! Each operation is split into a pure command builder, which produces the
//! exact shell string sent to the NAS, and an async runner that executes it
//! through a [`CommandExecutor`](crate::mcp::executor::CommandExecutor) and
//! renders the result.
//!
//! # Trust boundary
//!
//! Paths, patterns, container and service names are interpolated into the
//! shell command unescaped. The caller and the NAS are both trusted; only
//! file content written by `write_file` is quoted, so it can contain
//! arbitrary text.

pub mod docker;
pub mod exec;
pub mod files;
pub mod services;
pub mod system;
