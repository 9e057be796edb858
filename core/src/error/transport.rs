use std::fmt;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network or HTTP failure while talking to the remote API.
#[derive(Debug, Clone)]
pub struct TransportError {
    kind: TransportErrorKind,
    status: Option<u16>,
    url: String,
    message: String,
}

impl TransportError {
    pub fn new(
        kind: TransportErrorKind,
        status: Option<u16>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status,
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn status_error(status: u16, url: impl Into<String>, body: &str) -> Self {
        Self::new(
            TransportErrorKind::Status,
            Some(status),
            url,
            preview_body(body),
        )
    }

    pub fn decode_error(
        status: Option<u16>,
        url: impl Into<String>,
        detail: impl fmt::Display,
        body: &str,
    ) -> Self {
        Self::new(
            TransportErrorKind::Decode,
            status,
            url,
            format!(
                "failed to decode response body: {} | body={}",
                detail,
                preview_body(body)
            ),
        )
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Timeouts, connection failures, 429 and 5xx responses may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            TransportErrorKind::Timeout | TransportErrorKind::Connect => true,
            TransportErrorKind::Status => matches!(self.status, Some(429) | Some(500..=599)),
            _ => false,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        write!(f, " url={}: {}", self.url, self.message)
    }
}

impl std::error::Error for TransportError {}

pub fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}
