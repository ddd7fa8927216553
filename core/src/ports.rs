//! Well-known ports keyed by URL scheme.

const WELL_KNOWN: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("http", 80),
    ("ws", 80),
    ("pop3", 110),
    ("imap", 143),
    ("https", 443),
    ("wss", 443),
];

pub const HTTP: u16 = 80;
pub const HTTPS: u16 = 443;

/// Look up the default port for `scheme`, ignoring ASCII case.
pub fn lookup(scheme: &str) -> Option<u16> {
    WELL_KNOWN
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

/// Default port for a parsed URL: the scheme's entry, else 443 for ssl and 80
/// otherwise.
pub fn default_port(scheme: Option<&str>, ssl: bool) -> u16 {
    match scheme.and_then(lookup) {
        Some(port) => port,
        None if ssl => HTTPS,
        None => HTTP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_schemes_resolve() {
        assert_eq!(lookup("http"), Some(80));
        assert_eq!(lookup("HTTPS"), Some(443));
        assert_eq!(lookup("gopher"), None);
    }

    #[test]
    fn fallback_depends_on_ssl() {
        assert_eq!(default_port(None, false), 80);
        assert_eq!(default_port(None, true), 443);
        assert_eq!(default_port(Some("gopher"), false), 80);
        assert_eq!(default_port(Some("ftp"), false), 21);
    }
}
