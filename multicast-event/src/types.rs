//! Core types for the multicast event library
//!
//! This module defines the error type, the kinds of entries a dispatcher can hold,
//! and the statistics snapshot it reports. Nothing here depends on the argument
//! signature of a particular dispatcher.

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use std::fmt;

/// Result type for fallible dispatcher operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors that can occur while registering callables
///
/// Detaching a callable that is not registered is not an error, and a
/// panicking callable is not caught: it unwinds straight out of `invoke`.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to allocate room for a new entry: {0}")]
    AllocationFailed(#[from] TryReserveError),
}

/// The variant of a registered callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A bare function pointer (free function, associated function, capture-less closure)
    Plain,
    /// An object reference paired with one of its methods
    BoundMethod,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Plain => write!(f, "plain"),
            EntryKind::BoundMethod => write!(f, "bound-method"),
        }
    }
}

/// Snapshot of what a dispatcher currently holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherStats {
    /// Total number of registered entries
    pub num_entries: usize,
    /// Entries wrapping a bare function pointer
    pub num_plain: usize,
    /// Entries wrapping an object/method pair
    pub num_bound: usize,
    /// Bound entries whose target object has already been dropped
    pub num_expired: usize,
}

impl DispatcherStats {
    /// Number of entries that would actually run on the next invoke
    pub fn num_live(&self) -> usize {
        self.num_entries.saturating_sub(self.num_expired)
    }
}
