//! Error types for the elevator crate.
//!
//! Only resource exhaustion and host misuse are reported as values. A
//! non-empty queue at destroy time is an invariant breach and panics instead.

use thiserror::Error;

use crate::queue::RequestId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    /// Storage for the requested number of queued requests could not be reserved
    #[error("cannot reserve scheduler storage for {requested} requests")]
    ResourceExhausted { requested: usize },

    /// The request id is already tracked by this scheduler
    #[error("request {0} is already queued")]
    AlreadyQueued(RequestId),

    /// No policy is registered under this name
    #[error("unknown elevator policy '{0}'")]
    UnknownPolicy(String),

    /// A policy is already registered under this name
    #[error("elevator policy '{0}' is already registered")]
    DuplicatePolicy(String),
}

pub type Result<T> = std::result::Result<T, ElevatorError>;
