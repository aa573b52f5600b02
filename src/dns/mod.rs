//! Hostname resolution.
//!
//! This module provides the [`HostResolver`] seam used by the resolver pool and
//! its production implementation on top of `hickory-resolver`.

mod resolution;

// Re-export public API
pub use resolution::{resolve_host_to_ip, HostResolver};

#[cfg(test)]
pub(crate) mod test_helpers;
