//! Client address extraction for CAPTCHA verification.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use std::net::{IpAddr, SocketAddr};

/// Best-effort client IP for the `remoteip` field of a CAPTCHA check.
///
/// With `behind_proxy` the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise only the socket peer address is trusted.
/// Returns `None` when no address is available (e.g. in-process tests).
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions, behind_proxy: bool) -> Option<IpAddr> {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok());

        if forwarded.is_some() {
            return forwarded;
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        if real_ip.is_some() {
            return real_ip;
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
