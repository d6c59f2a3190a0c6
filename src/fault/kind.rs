//! Closed fault taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared, cloneable underlying error kept for diagnostics.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Discriminant of a [`Fault`], without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    Fatal,
    General,
    Authentication,
    Authorization,
    Client,
    Server,
    Network,
    Serialization,
    DiskReadWrite,
}

impl FaultKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::General => "General",
            Self::Authentication => "Authentication",
            Self::Authorization => "Authorization",
            Self::Client => "Client",
            Self::Server => "Server",
            Self::Network => "Network",
            Self::Serialization => "Serialization",
            Self::DiskReadWrite => "DiskReadWrite",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified failure, attached to a history node for rendering and
/// retry decisions.
///
/// The set is closed. `Client` and `Server` carry the HTTP status code.
#[derive(Clone, Debug, Error)]
pub enum Fault {
    #[error("fatal: {message}")]
    Fatal {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("unexpected failure: {message}")]
    General {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("authentication required")]
    Authentication {
        #[source]
        cause: Option<Cause>,
    },

    #[error("access denied")]
    Authorization {
        #[source]
        cause: Option<Cause>,
    },

    #[error("client error (status {code})")]
    Client {
        code: u16,
        #[source]
        cause: Option<Cause>,
    },

    #[error("server error (status {code})")]
    Server {
        code: u16,
        #[source]
        cause: Option<Cause>,
    },

    #[error("network failure")]
    Network {
        #[source]
        cause: Option<Cause>,
    },

    #[error("malformed data")]
    Serialization {
        #[source]
        cause: Option<Cause>,
    },

    #[error("local storage failure")]
    DiskReadWrite {
        #[source]
        cause: Option<Cause>,
    },
}

impl Fault {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
            cause: None,
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::General {
            message: message.into(),
            cause: None,
        }
    }

    pub fn authentication() -> Self {
        Self::Authentication { cause: None }
    }

    pub fn authorization() -> Self {
        Self::Authorization { cause: None }
    }

    pub fn client(code: u16) -> Self {
        Self::Client { code, cause: None }
    }

    pub fn server(code: u16) -> Self {
        Self::Server { code, cause: None }
    }

    pub fn network() -> Self {
        Self::Network { cause: None }
    }

    pub fn serialization() -> Self {
        Self::Serialization { cause: None }
    }

    pub fn disk_read_write() -> Self {
        Self::DiskReadWrite { cause: None }
    }

    /// Attach an underlying error, replacing any previous cause.
    pub fn with_cause<E>(self, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(error))
    }

    pub(crate) fn with_shared_cause(mut self, error: Cause) -> Self {
        let slot = match &mut self {
            Self::Fatal { cause, .. }
            | Self::General { cause, .. }
            | Self::Authentication { cause }
            | Self::Authorization { cause }
            | Self::Client { cause, .. }
            | Self::Server { cause, .. }
            | Self::Network { cause }
            | Self::Serialization { cause }
            | Self::DiskReadWrite { cause } => cause,
        };
        *slot = Some(error);
        self
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Self::Fatal { .. } => FaultKind::Fatal,
            Self::General { .. } => FaultKind::General,
            Self::Authentication { .. } => FaultKind::Authentication,
            Self::Authorization { .. } => FaultKind::Authorization,
            Self::Client { .. } => FaultKind::Client,
            Self::Server { .. } => FaultKind::Server,
            Self::Network { .. } => FaultKind::Network,
            Self::Serialization { .. } => FaultKind::Serialization,
            Self::DiskReadWrite { .. } => FaultKind::DiskReadWrite,
        }
    }

    /// HTTP status code for `Client` and `Server` faults.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Client { code, .. } | Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::Fatal { cause, .. }
            | Self::General { cause, .. }
            | Self::Authentication { cause }
            | Self::Authorization { cause }
            | Self::Client { cause, .. }
            | Self::Server { cause, .. }
            | Self::Network { cause }
            | Self::Serialization { cause }
            | Self::DiskReadWrite { cause } => cause.as_ref(),
        }
    }

    /// Whether repeating the same operation may succeed.
    ///
    /// Transient transport, storage and server-side failures are retryable;
    /// everything describing the request itself or the caller is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Server { .. } | Self::DiskReadWrite { .. }
        )
    }

    fn message(&self) -> Option<&str> {
        match self {
            Self::Fatal { message, .. } | Self::General { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

// Causes are diagnostic only and do not take part in equality.
impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.code() == other.code()
            && self.message() == other.message()
    }
}

impl Eq for Fault {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Fault::fatal("x").kind(), FaultKind::Fatal);
        assert_eq!(Fault::general("x").kind(), FaultKind::General);
        assert_eq!(Fault::authentication().kind(), FaultKind::Authentication);
        assert_eq!(Fault::authorization().kind(), FaultKind::Authorization);
        assert_eq!(Fault::client(404).kind(), FaultKind::Client);
        assert_eq!(Fault::server(503).kind(), FaultKind::Server);
        assert_eq!(Fault::network().kind(), FaultKind::Network);
        assert_eq!(Fault::serialization().kind(), FaultKind::Serialization);
        assert_eq!(Fault::disk_read_write().kind(), FaultKind::DiskReadWrite);
    }

    #[test]
    fn code_only_for_http_faults() {
        assert_eq!(Fault::client(418).code(), Some(418));
        assert_eq!(Fault::server(500).code(), Some(500));
        assert_eq!(Fault::network().code(), None);
        assert_eq!(Fault::authentication().code(), None);
    }

    #[test]
    fn retryable_faults() {
        assert!(Fault::network().is_retryable());
        assert!(Fault::server(502).is_retryable());
        assert!(Fault::disk_read_write().is_retryable());

        assert!(!Fault::fatal("boom").is_retryable());
        assert!(!Fault::client(400).is_retryable());
        assert!(!Fault::authentication().is_retryable());
        assert!(!Fault::serialization().is_retryable());
    }

    #[test]
    fn cause_is_exposed_as_source() {
        let fault = Fault::network().with_cause(io::Error::new(io::ErrorKind::TimedOut, "slow"));

        assert!(fault.cause().is_some());
        let source = fault.source().expect("source should be set");
        assert_eq!(source.to_string(), "slow");
    }

    #[test]
    fn equality_ignores_cause() {
        let plain = Fault::client(404);
        let caused = Fault::client(404).with_cause(io::Error::other("missing"));

        assert_eq!(plain, caused);
        assert_ne!(Fault::client(404), Fault::client(410));
        assert_ne!(Fault::general("a"), Fault::general("b"));
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(Fault::server(503).to_string(), "server error (status 503)");
        assert_eq!(FaultKind::DiskReadWrite.to_string(), "DiskReadWrite");
    }

    #[test]
    fn kind_serializes_by_name() {
        let json = serde_json::to_string(&FaultKind::Network).unwrap();
        assert_eq!(json, "\"Network\"");
    }
}
