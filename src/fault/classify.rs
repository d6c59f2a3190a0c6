//! Classification of raw failures into the fault taxonomy.
//!
//! Everything produced by transport, storage or parsing code passes through
//! [`classify`] before it is attached to a history node. Faults that are
//! already classified pass through unchanged.

use super::kind::{Cause, Fault};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Where a raw failure came from.
///
/// Only these two origins reach the classifier. Failures from anywhere else
/// must be classified by the caller first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureOrigin {
    RemoteCall,
    LocalStorage,
}

/// HTTP-style failure carrying a status code.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("HTTP {status}: {message}")]
pub struct HttpFailure {
    pub status: u16,
    pub message: String,
}

impl HttpFailure {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// An unclassified failure as handed over by an external collaborator.
#[derive(Debug)]
pub enum RawFailure {
    /// Already part of the taxonomy.
    Classified(Fault),
    /// Transport or storage I/O failure.
    Io(std::io::Error),
    Http(HttpFailure),
    /// Structured-data parse failure.
    Parse(Cause),
    Other(Cause),
}

impl RawFailure {
    pub fn parse<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse(Arc::new(error))
    }

    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Arc::new(error))
    }
}

impl From<Fault> for RawFailure {
    fn from(fault: Fault) -> Self {
        Self::Classified(fault)
    }
}

impl From<std::io::Error> for RawFailure {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<HttpFailure> for RawFailure {
    fn from(error: HttpFailure) -> Self {
        Self::Http(error)
    }
}

impl From<serde_json::Error> for RawFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(error)
    }
}

impl From<bincode::Error> for RawFailure {
    fn from(error: bincode::Error) -> Self {
        let kind: Arc<bincode::ErrorKind> = Arc::from(error);
        Self::Parse(kind)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RawFailure {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Other(Arc::from(error))
    }
}

type Handler = Box<dyn Fn(&RawFailure) -> Option<Fault> + Send + Sync>;

/// Classifier with an optional application-specific handler.
///
/// The handler is consulted first; returning `None` falls through to the
/// built-in rules.
///
/// # Example
///
/// ```rust
/// use waymark::fault::{Classifier, Fault, FaultKind, HttpFailure, RawFailure};
///
/// let classifier = Classifier::new().with_handler(|raw| match raw {
///     RawFailure::Http(http) if http.status == 429 => Some(Fault::server(429)),
///     _ => None,
/// });
///
/// let fault = classifier.classify(HttpFailure::new(429, "slow down"), None);
/// assert_eq!(fault.kind(), FaultKind::Server);
///
/// let fault = classifier.classify(HttpFailure::new(404, "missing"), None);
/// assert_eq!(fault, Fault::client(404));
/// ```
#[derive(Default)]
pub struct Classifier {
    handler: Option<Handler>,
}

impl Classifier {
    pub fn new() -> Self {
        Self { handler: None }
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RawFailure) -> Option<Fault> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Classify a raw failure.
    ///
    /// Total: every input maps to exactly one fault.
    pub fn classify(
        &self,
        raw: impl Into<RawFailure>,
        origin: impl Into<Option<FailureOrigin>>,
    ) -> Fault {
        let raw = raw.into();
        if let Some(fault) = self.handler.as_ref().and_then(|handler| handler(&raw)) {
            return fault;
        }
        classify_builtin(raw, origin.into())
    }
}

/// Classify a raw failure with the built-in rules only.
///
/// I/O failures need an origin: `RemoteCall` maps to `Network`,
/// `LocalStorage` to `DiskReadWrite`. An I/O failure without an origin is a
/// programming error and classifies as `Fatal`.
///
/// # Example
///
/// ```rust
/// use std::io;
/// use waymark::fault::{classify, FailureOrigin, FaultKind, HttpFailure};
///
/// let io = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
/// assert_eq!(classify(io, FailureOrigin::RemoteCall).kind(), FaultKind::Network);
///
/// let unauthorized = HttpFailure::new(401, "login");
/// assert_eq!(classify(unauthorized, None).kind(), FaultKind::Authentication);
/// ```
pub fn classify(raw: impl Into<RawFailure>, origin: impl Into<Option<FailureOrigin>>) -> Fault {
    classify_builtin(raw.into(), origin.into())
}

fn classify_builtin(raw: RawFailure, origin: Option<FailureOrigin>) -> Fault {
    match raw {
        RawFailure::Classified(fault) => fault,
        RawFailure::Io(error) => match origin {
            Some(FailureOrigin::RemoteCall) => Fault::network().with_cause(error),
            Some(FailureOrigin::LocalStorage) => Fault::disk_read_write().with_cause(error),
            None => Fault::fatal("I/O failure reached the classifier without an origin")
                .with_cause(error),
        },
        RawFailure::Http(http) => classify_status(http),
        RawFailure::Parse(cause) => Fault::serialization().with_shared_cause(cause),
        RawFailure::Other(cause) => Fault::general(cause.to_string()).with_shared_cause(cause),
    }
}

fn classify_status(http: HttpFailure) -> Fault {
    let fault = match http.status {
        401 => Fault::authentication(),
        403 => Fault::authorization(),
        code @ 400..=499 => Fault::client(code),
        code @ 500..=599 => Fault::server(code),
        _ => Fault::general(http.to_string()),
    };
    fault.with_cause(http)
}
