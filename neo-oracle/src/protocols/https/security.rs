//! Private-network checks for fetched hosts.

use std::net::IpAddr;
use url::{Host, Url};

/// Whether `uri` points at a loopback, private, link-local or reserved host.
pub(super) async fn is_internal_host(uri: &Url) -> Result<bool, std::io::Error> {
    let host = match uri.host() {
        Some(host) => host,
        None => return Ok(false),
    };

    let name = match host {
        Host::Ipv4(ip) => return Ok(is_internal_ip(IpAddr::V4(ip))),
        Host::Ipv6(ip) => return Ok(is_internal_ip(IpAddr::V6(ip))),
        Host::Domain(name) => name,
    };

    if is_localhost_name(name) {
        return Ok(true);
    }

    let port = uri.port_or_known_default().unwrap_or(443);
    for addr in tokio::net::lookup_host((name, port)).await? {
        if is_internal_ip(addr.ip()) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_localhost_name(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    matches!(
        host.as_str(),
        "localhost" | "localhost.localdomain" | "ip6-localhost" | "ip6-loopback"
    ) || host.ends_with(".local")
        || host.ends_with(".internal")
}

pub(super) fn is_internal_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => {
            if ip.is_loopback() || ip.is_broadcast() || ip.is_unspecified() {
                return true;
            }
            let octets = ip.octets();
            match octets[0] {
                0 | 10 | 127 => true,
                100 if (64..128).contains(&octets[1]) => true, // carrier-grade NAT
                169 if octets[1] == 254 => true,
                172 if (16..32).contains(&octets[1]) => true,
                192 => match octets[1] {
                    0 => octets[2] == 0 || octets[2] == 2,
                    88 => octets[2] == 99,
                    168 => true,
                    _ => false,
                },
                198 => octets[1] == 18 || octets[1] == 19 || (octets[1] == 51 && octets[2] == 100),
                203 => octets[1] == 0 && octets[2] == 113,
                224..=255 => true,
                _ => false,
            }
        }
        IpAddr::V6(ip) => {
            let first = ip.segments()[0];
            if ip.is_loopback()
                || ip.is_unspecified()
                || ip.is_multicast()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80
            {
                return true;
            }
            match ip.to_ipv4_mapped() {
                Some(v4) => is_internal_ip(IpAddr::V4(v4)),
                None => false,
            }
        }
    }
}
