// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cooperative cancellation.  Renders poll a token once per pixel and
//! give up with `RenderError::Cancelled` when it trips.

use std::sync::atomic::{AtomicBool, Ordering};

/// Something a render can ask "should I stop?".
pub trait CancelToken: Send + Sync {
    /// True once the render should stop.
    fn is_cancelled(&self) -> bool;
}

/// A token that never trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelToken for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}
