use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::config::TrustedProxies;
use crate::state::AppState;

/// Header a trusted proxy uses to pass on the client address
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Resolve the client address of a request
///
/// # Security
///
/// `x-real-ip` is only read when the direct peer is a trusted proxy. The
/// header value replaces the peer address entirely; if it is missing or
/// does not parse as an IP address the request has no client address.
/// `x-forwarded-for` is never consulted, so at most one proxy hop is
/// supported.
///
/// IPv4-mapped IPv6 addresses resolve to their IPv4 form, so a client gets
/// the same account whether the listener is IPv4-only or dual-stack.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted_proxies: &TrustedProxies,
) -> Option<IpAddr> {
    let Some(direct) = direct_ip.map(|ip| ip.to_canonical()) else {
        tracing::warn!("No direct connection IP available for request");
        return None;
    };

    if !trusted_proxies.is_trusted(direct) {
        return Some(direct);
    }

    // First occurrence wins if the proxy sent several
    headers
        .get(REAL_IP_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<IpAddr>().ok())
        .map(|ip| ip.to_canonical())
}

pub(crate) fn direct_ip_from_parts(parts: &Parts) -> Option<IpAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
}

/// Request metadata used for provisioning and logging
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Resolved client address, if any
    pub client_ip: Option<IpAddr>,

    /// User-Agent string from the request headers
    pub user_agent: String,
}

impl RequestContext {
    /// Create a new request context from request parts
    pub fn from_parts(parts: &Parts, trusted_proxies: &TrustedProxies) -> Self {
        let direct_ip = direct_ip_from_parts(parts);
        let client_ip = resolve_client_ip(&parts.headers, direct_ip, trusted_proxies);

        let user_agent = parts
            .headers
            .get("User-Agent")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Self {
            client_ip,
            user_agent,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, &state.config.trusted_proxies))
    }
}
