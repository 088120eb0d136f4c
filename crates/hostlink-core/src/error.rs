// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Hostlink.
//
// Nothing in the bridge is recoverable: every variant ends the bridge's
// useful life. The variants exist so the log line that precedes process
// termination says which part of the sequence broke.

use thiserror::Error;

/// Top-level error type for all Hostlink operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Host-query failures --
    #[error("host query `{query}` failed: {detail}")]
    HostQuery { query: &'static str, detail: String },

    #[error("host query `{query}` returned unexpected value {value}")]
    InvalidHostValue { query: &'static str, value: i64 },

    // -- Boundary-call failures --
    #[error("engine call `{call}` failed: {detail}")]
    Boundary { call: &'static str, detail: String },

    #[error("native engine already registered")]
    EngineAlreadyRegistered,

    #[error("native engine not registered")]
    EngineNotRegistered,

    // -- Protocol misuse --
    #[error("onStart delivered more than once")]
    AlreadyStarted,

    #[error("configuration change delivered before onStart completed")]
    NotStarted,

    #[error("bridge is unusable after an earlier fatal failure")]
    Poisoned,

    // -- Setup --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which tier of the failure taxonomy an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Reading ambient host metadata failed.
    HostQuery,
    /// The native engine rejected or failed a forwarded call.
    Boundary,
    /// Lifecycle events arrived in an order the bridge does not allow.
    ProtocolMisuse,
    /// Configuration or platform setup problem before any event ran.
    Setup,
}

impl BridgeError {
    /// Convenience constructor for host-query failures.
    pub fn host(query: &'static str, detail: impl Into<String>) -> Self {
        Self::HostQuery {
            query,
            detail: detail.into(),
        }
    }

    /// Convenience constructor for boundary-call failures.
    pub fn boundary(call: &'static str, detail: impl Into<String>) -> Self {
        Self::Boundary {
            call,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::HostQuery { .. } | Self::InvalidHostValue { .. } => FailureKind::HostQuery,
            Self::Boundary { .. } | Self::EngineNotRegistered => FailureKind::Boundary,
            Self::AlreadyStarted | Self::NotStarted | Self::Poisoned => {
                FailureKind::ProtocolMisuse
            }
            Self::EngineAlreadyRegistered
            | Self::Config(_)
            | Self::Io(_)
            | Self::Serialization(_) => FailureKind::Setup,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_rotation_is_host_failure() {
        let err = BridgeError::InvalidHostValue {
            query: "display_rotation",
            value: 7,
        };
        assert_eq!(err.kind(), FailureKind::HostQuery);
        assert_eq!(
            err.to_string(),
            "host query `display_rotation` returned unexpected value 7"
        );
    }

    #[test]
    fn lifecycle_ordering_errors_are_misuse() {
        assert_eq!(BridgeError::AlreadyStarted.kind(), FailureKind::ProtocolMisuse);
        assert_eq!(BridgeError::NotStarted.kind(), FailureKind::ProtocolMisuse);
        assert_eq!(BridgeError::Poisoned.kind(), FailureKind::ProtocolMisuse);
    }

    #[test]
    fn setup_errors_are_classified_as_setup() {
        assert_eq!(
            BridgeError::Config("empty engine library name".into()).kind(),
            FailureKind::Setup
        );
        assert_eq!(BridgeError::EngineAlreadyRegistered.kind(), FailureKind::Setup);
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(BridgeError::from(json_err).kind(), FailureKind::Setup);
    }

    #[test]
    fn missing_engine_is_boundary_failure() {
        assert_eq!(BridgeError::EngineNotRegistered.kind(), FailureKind::Boundary);
        let err = BridgeError::boundary("update_orientation", "status -3");
        assert_eq!(err.kind(), FailureKind::Boundary);
        assert!(err.to_string().contains("update_orientation"));
    }
}
