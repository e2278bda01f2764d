//! Render supervision.
//!
//! Output rendering runs under a boundary that catches panics from the
//! renderer, substitutes a fallback, and suppresses further renders from the
//! faulted renderer until an explicit reset. Failed API calls never reach
//! this path; they surface as view error messages. The boundary exists for
//! genuine rendering faults.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// What happened when a render was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The renderer ran to completion.
    Rendered,
    /// The renderer panicked; the boundary is now faulted.
    Faulted,
    /// The boundary is faulted and the render was skipped.
    Suppressed,
}

/// Supervisory wrapper around the render path.
#[derive(Debug, Default)]
pub struct RenderBoundary {
    faulted: bool,
}

impl RenderBoundary {
    /// A fresh, healthy boundary.
    #[must_use]
    pub const fn new() -> Self {
        Self { faulted: false }
    }

    /// True once a render has panicked and no reset has happened since.
    #[must_use]
    pub const fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Run the renderer unless the boundary is faulted.
    pub fn render<F>(&mut self, render: F) -> RenderOutcome
    where
        F: FnOnce(),
    {
        if self.faulted {
            return RenderOutcome::Suppressed;
        }
        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(()) => RenderOutcome::Rendered,
            Err(_) => {
                self.faulted = true;
                RenderOutcome::Faulted
            }
        }
    }

    /// Clear the fault and allow rendering again.
    pub fn reset(&mut self) {
        self.faulted = false;
    }
}
