use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(
        "request timed out — the flight API may be slow or unreachable. \
         Try increasing --timeout or check that the backend is running"
    )]
    Timeout,

    #[error("connection failed — is the flight API running? ({0})")]
    ConnectionFailed(String),

    #[error("DNS resolution failed for {0} — check --api-url")]
    DnsResolution(String),

    #[error("proxy error — check your --proxy URL is correct ({0})")]
    ProxyError(String),

    #[error("TLS/SSL error — connection to the flight API failed ({0})")]
    TlsError(String),

    #[error("rate limited by the flight API (HTTP 429) — wait before retrying")]
    RateLimited,

    #[error("unexpected HTTP status {0} from the flight API")]
    HttpStatus(u16),

    #[error("failed to decode flight API response — {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Process exit code for one-shot commands.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Timeout
            | Self::ConnectionFailed(_)
            | Self::DnsResolution(_)
            | Self::TlsError(_)
            | Self::ProxyError(_) => 3,
            Self::RateLimited => 4,
            Self::HttpStatus(_) => 5,
            Self::Decode(_) => 6,
            Self::Io(_) => 1,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::DnsResolution(_) => "dns_error",
            Self::TlsError(_) => "tls_error",
            Self::ProxyError(_) => "proxy_error",
            Self::RateLimited => "rate_limited",
            Self::HttpStatus(_) => "http_error",
            Self::Decode(_) => "decode_error",
            Self::Io(_) => "io_error",
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub fn from_http_error(err: wreq::Error) -> DashboardError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return DashboardError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return DashboardError::DnsResolution(msg);
        }
        return DashboardError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return DashboardError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return DashboardError::TlsError(msg);
    }

    DashboardError::ConnectionFailed(msg)
}
