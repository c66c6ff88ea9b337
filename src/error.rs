use std::fmt;

/// Network, TLS, or non-2xx HTTP failure talking to the upstream.
#[derive(Debug)]
pub enum TransportError {
    Request(String),
    Http(u16),
    BodyRead(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "transport request failed: {e}"),
            Self::Http(status) => write!(f, "upstream HTTP {status}"),
            Self::BodyRead(e) => write!(f, "body read error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Login succeeded at the HTTP level but `result` was absent or not a string.
#[derive(Debug)]
pub struct AuthError(pub String);

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authentication failed: {}", self.0)
    }
}

impl std::error::Error for AuthError {}

/// JSON malformed, or a required field missing or of the wrong kind.
#[derive(Debug)]
pub struct ParseError {
    pub path: String,
    pub reason: String,
}

impl ParseError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self { path: path.into(), reason: "missing".to_string() }
    }

    pub fn wrong_kind(path: impl Into<String>, expected: &str) -> Self {
        Self { path: path.into(), reason: format!("expected {expected}") }
    }

    pub fn invalid_number(path: impl Into<String>, value: &str) -> Self {
        Self { path: path.into(), reason: format!("invalid numeric value: {value:?}") }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}: {}", self.path, self.reason)
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self { path: "$".to_string(), reason: e.to_string() }
    }
}

/// A JSON-RPC-level error envelope returned by the upstream.
#[derive(Debug)]
pub struct ProtocolError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream protocol error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// Raised by the raw cache or the normalized store.
#[derive(Debug)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Union of every error a single entity fetch can raise.
#[derive(Debug)]
pub enum FetchError {
    Transport(TransportError),
    Auth(AuthError),
    Parse(ParseError),
    Protocol(ProtocolError),
    Store(StoreError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{e}"),
            Self::Auth(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Protocol(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Auth(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Protocol(e) => Some(e),
            Self::Store(e) => Some(e),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<AuthError> for FetchError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<ParseError> for FetchError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ProtocolError> for FetchError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<StoreError> for FetchError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
