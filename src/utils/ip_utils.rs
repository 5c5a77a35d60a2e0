use std::net::{IpAddr, Ipv4Addr};

/// IP utility functions for validation

/// Check if a string is a valid IPv4 address
pub fn is_valid_ipv4(ip: &str) -> bool {
    ip.parse::<Ipv4Addr>().is_ok()
}

/// Check if an IP address is private (RFC 1918 for IPv4, RFC 4193 for IPv6)
pub fn is_private_ip(ip: &str) -> Result<bool, String> {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(ipv4)) => Ok(ipv4.is_private()),
        Ok(IpAddr::V6(ipv6)) => {
            // RFC 4193 Unique Local Addresses (fc00::/7)
            Ok(ipv6.segments()[0] & 0xfe00 == 0xfc00)
        }
        Err(_) => Err(format!("Invalid IP address '{}'", ip)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.0.100"));
        assert!(!is_valid_ipv4("192.168.0.256"));
        assert!(!is_valid_ipv4("fe80::1"));
        assert!(!is_valid_ipv4("linguafranca"));
    }

    #[test]
    fn test_is_private_ip() {
        assert_eq!(is_private_ip("10.0.0.5"), Ok(true));
        assert_eq!(is_private_ip("172.16.4.1"), Ok(true));
        assert_eq!(is_private_ip("192.168.0.100"), Ok(true));
        assert_eq!(is_private_ip("8.8.8.8"), Ok(false));
        assert_eq!(is_private_ip("fd00::1"), Ok(true));
        assert!(is_private_ip("nope").is_err());
    }
}
