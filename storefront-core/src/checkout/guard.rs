//! Non-reentrancy guard for checkout submissions.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use super::state::CheckoutState;

/// Held for as long as an attempt is in flight.
///
/// Dropping the guard frees the checkout for the next submit. If it is
/// dropped without [`release`](Self::release), i.e. the attempt's future was
/// abandoned mid-way, a processing state is also reset to `Idle`.
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    state: Option<&'a watch::Sender<CheckoutState>>,
}

impl<'a> InFlightGuard<'a> {
    /// Claim the flag, or `None` if another attempt holds it.
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, state: None })
    }

    pub(crate) fn reset_on_abandon(mut self, state: &'a watch::Sender<CheckoutState>) -> Self {
        self.state = Some(state);
        self
    }

    /// Normal completion: free the flag and leave the state to the caller.
    pub(crate) fn release(mut self) {
        self.state = None;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.send_if_modified(|current| {
                if current.is_processing() {
                    *current = CheckoutState::Idle;
                    true
                } else {
                    false
                }
            });
        }
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = InFlightGuard::try_acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::try_acquire(&flag).is_none());
        drop(guard);
        assert!(InFlightGuard::try_acquire(&flag).is_some());
    }

    #[test]
    fn test_abandoned_guard_resets_processing_state() {
        let flag = AtomicBool::new(false);
        let (state, _rx) = watch::channel(CheckoutState::Creating);

        let guard = InFlightGuard::try_acquire(&flag)
            .unwrap()
            .reset_on_abandon(&state);
        drop(guard);
        assert_eq!(*state.borrow(), CheckoutState::Idle);
        assert!(!flag.load(Ordering::Acquire));

        state.send_replace(CheckoutState::Initializing);
        let guard = InFlightGuard::try_acquire(&flag)
            .unwrap()
            .reset_on_abandon(&state);
        guard.release();
        assert_eq!(*state.borrow(), CheckoutState::Initializing);
        assert!(!flag.load(Ordering::Acquire));
    }
}
