//! # Network Exposure
//!
//! Decides whether an IP allow-list opens the database to the internet.

use std::net::IpAddr;

/// Whether the allow-list contains at least one unrestricted entry
///
/// Unrestricted entries are CIDR ranges with a zero prefix length
/// (`0.0.0.0/0`, `::/0`) and bare unspecified addresses (`0.0.0.0`, `::`).
pub fn is_public_accessible(security_ips: &[String]) -> bool {
    security_ips.iter().any(|entry| is_unrestricted(entry))
}

fn is_unrestricted(entry: &str) -> bool {
    let entry = entry.trim();
    match entry.split_once('/') {
        Some((address, prefix)) => {
            address.parse::<IpAddr>().is_ok() && prefix.parse::<u8>().is_ok_and(|p| p == 0)
        }
        None => entry
            .parse::<IpAddr>()
            .is_ok_and(|address| address.is_unspecified()),
    }
}
