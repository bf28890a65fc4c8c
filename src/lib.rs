//! stepgen - Step descriptor generation for plugin host runtimes
//!
//! Scans declaration manifests describing host-language step classes,
//! flattens each step type's inherited field hierarchy to discover its
//! arguments, and emits per-step `.step` descriptor files plus a
//! `steps.properties` registry index. Also defines the [`function`]
//! contract step implementations expose to a host runtime.

pub mod config;
pub mod function;
pub mod generate;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod writer;
