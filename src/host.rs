//! Host identity resolution
//!
//! Queried once per logger at construction time.

use anyhow::{Context, Result};

/// Resolve the network host name of the running machine.
#[cfg(unix)]
pub fn hostname() -> Result<String> {
    let name = nix::unistd::gethostname().context("Failed to resolve host name")?;
    name.into_string()
        .map_err(|raw| anyhow::anyhow!("Host name is not valid UTF-8: {}", raw.to_string_lossy()))
}

/// Resolve the network host name of the running machine.
#[cfg(not(unix))]
pub fn hostname() -> Result<String> {
    std::env::var("COMPUTERNAME").context("Failed to resolve host name from COMPUTERNAME")
}
