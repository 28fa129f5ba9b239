use std::net::IpAddr;

/// The caller attribute rate limiting is keyed on: its source address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    const UNKNOWN: &'static str = "unknown";

    /// Builds an identity from a raw address as found on the connection or in a
    /// forwarding header. Ports are dropped so reconnects share one counter.
    pub fn parse(raw: &str) -> ClientIdentity {
        let raw = raw.trim();
        if let Ok(socket) = raw.parse::<std::net::SocketAddr>() {
            return Self(socket.ip().to_string());
        }
        if let Ok(ip) = raw.parse::<IpAddr>() {
            return Self(ip.to_string());
        }
        if raw.is_empty() {
            return Self::unknown();
        }
        Self(raw.to_string())
    }

    /// Picks the hop appended by the nearest proxy out of an `X-Forwarded-For`
    /// value. Earlier hops are supplied by the caller and are not trusted.
    pub fn from_forwarded_for(header: &str) -> Option<ClientIdentity> {
        header
            .rsplit(',')
            .map(str::trim)
            .find(|hop| !hop.is_empty())
            .map(Self::parse)
    }

    /// Every caller whose address cannot be determined shares this identity.
    pub fn unknown() -> ClientIdentity {
        Self(Self::UNKNOWN.to_string())
    }
}

impl From<IpAddr> for ClientIdentity {
    fn from(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }
}

impl AsRef<str> for ClientIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
