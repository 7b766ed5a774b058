//! Shared pieces of the tracker binaries.
//!
//! - [`logging`] installs the tracing subscriber used by every binary
//! - [`render`] turns a viewer frame into plain text lines
//! - [`viewer`] runs the viewer event loop
pub mod logging;
pub mod render;
pub mod viewer;
