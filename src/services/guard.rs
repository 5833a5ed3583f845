// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-flight guard: at most one sync in flight per process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Non-blocking exclusive flag. Callers that find it held are turned away
/// instead of queueing.
#[derive(Clone, Default)]
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

/// Proof of holding the guard. Dropping it releases the guard, including
/// when the owning task panics or is aborted.
pub struct SingleFlightPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SingleFlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the guard if it is free.
    pub fn try_acquire(&self) -> Option<SingleFlightPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SingleFlightPermit {
                busy: self.busy.clone(),
            })
    }

    /// Whether a permit is currently held. Read-only: never contends with
    /// `try_acquire`.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}
