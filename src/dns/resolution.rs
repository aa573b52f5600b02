//! IP address resolution.
//!
//! Only the first address of a lookup is ever used. A hostname with several
//! addresses is judged by whichever one the resolver lists first.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ResolutionError;

/// Something that can turn a hostname into an address.
///
/// Implementations must be shareable across tasks; the pool holds one behind
/// an `Arc` for the whole run.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves `host` and returns the first address of the answer.
    async fn resolve_first(&self, host: &str) -> Result<IpAddr, ResolutionError>;
}

#[async_trait]
impl HostResolver for TokioAsyncResolver {
    async fn resolve_first(&self, host: &str) -> Result<IpAddr, ResolutionError> {
        resolve_host_to_ip(host, self).await
    }
}

/// Resolves a hostname to an IP address using DNS.
///
/// # Arguments
///
/// * `host` - The hostname to resolve
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// The first IP address found, or an error if resolution fails.
///
/// # Errors
///
/// Returns `ResolutionError::Lookup` if the DNS query fails and
/// `ResolutionError::NoAddresses` if the answer is empty.
pub async fn resolve_host_to_ip(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<IpAddr, ResolutionError> {
    let response = resolver.lookup_ip(host).await?;
    response
        .iter()
        .next()
        .ok_or(ResolutionError::NoAddresses)
}
