//! Liveness guards for components that outlive their own fetches.
//!
//! A component checks [`Lifecycle::is_live`] after every await and discards
//! results once the guard has been torn down. Clones share one guard, so the
//! page can hold a handle while the component owns another.
//!
//! [`InFlight`] covers the other end of an await: a busy flag raised before
//! a fetch is lowered again even if the fetching future is dropped.

use tokio_util::sync::CancellationToken;

/// Shared liveness flag backed by a cancellation token.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    token: CancellationToken,
}

impl Lifecycle {
    /// Create a live guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether results may still be applied.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Invalidate the guard for every clone. Idempotent.
    pub fn tear_down(&self) {
        self.token.cancel();
    }
}

/// Raises a busy flag for as long as it lives.
///
/// The flag is lowered on drop, so a cancelled future cannot leave its
/// component stuck in a busy state.
#[derive(Debug)]
pub(crate) struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
