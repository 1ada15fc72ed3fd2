//! String-convertible targets shipped with the crate

use crate::coerce::FromJsonString;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use url::Url;

impl FromJsonString for Url {
    fn from_json_string(s: &str) -> Result<Self, String> {
        Url::parse(s).map_err(|err| format!("invalid URL '{}': {}", s, err))
    }
}

impl FromJsonString for PathBuf {
    fn from_json_string(s: &str) -> Result<Self, String> {
        Ok(PathBuf::from(s))
    }
}

impl FromJsonString for char {
    fn from_json_string(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(format!(
                "expected a single character, found {} characters",
                s.chars().count()
            )),
        }
    }
}

macro_rules! impl_from_json_string_via_parse {
    ($($ty:ty => $what:literal),+ $(,)?) => {
        $(
            impl FromJsonString for $ty {
                fn from_json_string(s: &str) -> Result<Self, String> {
                    s.parse::<$ty>()
                        .map_err(|err| format!("invalid {} '{}': {}", $what, s, err))
                }
            }
        )+
    };
}

impl_from_json_string_via_parse!(
    IpAddr => "IP address",
    Ipv4Addr => "IPv4 address",
    Ipv6Addr => "IPv6 address",
    SocketAddr => "socket address",
);

crate::decode_from_string!(Url, PathBuf, char, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

#[cfg(test)]
mod tests {
    use crate::coerce::coerce;
    use jsonkp_core::{CoercionReason, KeyPath};
    use serde_json::json;
    use std::net::{IpAddr, SocketAddr};
    use std::path::PathBuf;
    use url::Url;

    fn ctx() -> KeyPath {
        KeyPath::parse("key").unwrap()
    }

    #[test]
    fn url_from_string() {
        let url = coerce::<Url>(&json!("https://www.google.com/search"), &ctx()).unwrap();
        assert_eq!(url.host_str(), Some("www.google.com"));
    }

    #[test]
    fn malformed_url_is_conversion_failure() {
        let failure = coerce::<Url>(&json!("www.google.com"), &ctx()).unwrap_err();
        match failure.reason {
            CoercionReason::CustomConversionFailed(message) => {
                assert!(message.contains("invalid URL 'www.google.com'"));
            }
            other => panic!("unexpected reason {:?}", other),
        }
    }

    #[test]
    fn numbers_are_not_urls() {
        let failure = coerce::<Url>(&json!(2), &ctx()).unwrap_err();
        assert_eq!(failure.reason, CoercionReason::IncorrectType);
    }

    #[test]
    fn addresses_and_paths() {
        let ip = coerce::<IpAddr>(&json!("127.0.0.1"), &ctx()).unwrap();
        assert!(ip.is_loopback());
        let addr = coerce::<SocketAddr>(&json!("[::1]:8080"), &ctx()).unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(coerce::<IpAddr>(&json!("localhost"), &ctx()).is_err());

        let path = coerce::<PathBuf>(&json!("/tmp/data.json"), &ctx()).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/data.json"));
    }

    #[test]
    fn single_characters() {
        assert_eq!(coerce::<char>(&json!("x"), &ctx()).unwrap(), 'x');
        assert!(coerce::<char>(&json!("xy"), &ctx()).is_err());
        assert!(coerce::<char>(&json!(""), &ctx()).is_err());
    }
}
