use crate::observer::{HostObserverKind, ObserverId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// The observer's kind has no unambiguous subject to persist against
    #[error("Unsupported observer kind: {0}")]
    InvalidObserverKind(HostObserverKind),
    #[error("Observer {0} is not registered")]
    NotRegistered(ObserverId),
}
