//! Error type shared by the REST-backed ports.

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by the users and positions APIs.
    pub enum ApiError {
        /// Transport failed, the server answered with a non-success status
        /// and no structured message, or the body could not be decoded.
        Network => "network request failed: {message}",
        /// The server rejected submitted content and explained why. The
        /// message is meant to be shown to the user verbatim.
        Validation => "{message}",
    }
}

impl ApiError {
    /// Whether the server supplied a user-facing explanation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
