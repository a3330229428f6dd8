use std::net::IpAddr;
use std::sync::Arc;

/// Parses an IP literal, accepting bracketed IPv6 (`[::1]`) as hosts often
/// hand it over that way.
pub fn parse_ip_literal(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);
    raw.parse::<IpAddr>().ok()
}

/// Canonical form used for every address comparison.
///
/// IPv6 is expanded/compressed by `IpAddr` so `::1` and `0:0:0:0:0:0:0:1`
/// collapse to one key; anything that is not an IP is trimmed and lowercased.
pub fn sanitize_address(raw: &str) -> Arc<str> {
    match parse_ip_literal(raw) {
        Some(ip) => Arc::from(ip.to_string()),
        None => Arc::from(raw.trim().to_lowercase()),
    }
}

/// The username/address pair being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: Arc<str>,
    pub address: Arc<str>,
}

impl Subject {
    /// Returns `None` for structurally invalid subjects (empty name or address).
    pub fn new(name: &str, address: &str) -> Option<Self> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() || address.is_empty() {
            return None;
        }
        Some(Self {
            name: Arc::from(name),
            address: sanitize_address(address),
        })
    }

    /// Anonymous subjects are identified by their address; in that case the
    /// sanitized name is an address alias worth checking against IP rules.
    pub fn name_alias(&self) -> Option<Arc<str>> {
        parse_ip_literal(&self.name).map(|ip| Arc::from(ip.to_string()))
    }

    /// Candidate values for IP-literal matching, deduplicated, address first.
    pub fn address_candidates(&self) -> Vec<Arc<str>> {
        let mut out = vec![self.address.clone()];
        if let Some(alias) = self.name_alias() {
            if alias != self.address {
                out.push(alias);
            }
        }
        out
    }
}
