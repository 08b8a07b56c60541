#![forbid(unsafe_code)]

//! Grouping writes so dependent effects run once.
//!
//! Inside a batch, values are stored and raw subscribers are notified
//! immediately; only the effect settle is deferred until the outermost scope
//! closes. Derivations stay correct throughout because they refresh on read.

use std::marker::PhantomData;

use super::runtime;

/// RAII guard that defers effect execution until it drops.
///
/// Nested scopes are allowed; only the outermost one settles.
#[must_use = "the batch ends as soon as the scope is dropped"]
pub struct BatchScope {
    // Reactive state is thread-local.
    _not_send: PhantomData<*const ()>,
}

impl BatchScope {
    pub fn new() -> Self {
        runtime::batch_enter();
        Self {
            _not_send: PhantomData,
        }
    }

    /// Whether any batch is open on this thread.
    #[must_use]
    pub fn is_active() -> bool {
        runtime::is_batching()
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        if runtime::batch_exit() {
            runtime::settle();
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope").finish()
    }
}

/// Run `f` inside a [`BatchScope`].
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    let _scope = BatchScope::new();
    f()
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::reactive::{Effect, Observable};

    #[test]
    fn values_update_immediately_inside_a_batch() {
        let obs = Observable::new(1);
        let _scope = BatchScope::new();
        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert!(BatchScope::is_active());
    }

    #[test]
    fn raw_subscribers_are_not_deferred() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));
        batch(|| {
            obs.set(1);
            assert_eq!(hits.get(), 1);
        });
    }

    #[test]
    fn nested_batches_settle_once_at_the_outermost_exit() {
        let obs = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (o, log) = (obs.clone(), Rc::clone(&seen));
        let _effect = Effect::new(move || log.borrow_mut().push(o.get())).unwrap();

        {
            let _outer = BatchScope::new();
            {
                let _inner = BatchScope::new();
                obs.set(1);
            }
            assert_eq!(*seen.borrow(), vec![0]);
            obs.set(2);
        }
        assert_eq!(*seen.borrow(), vec![0, 2]);
        assert!(!BatchScope::is_active());
    }

    #[test]
    fn batch_returns_the_closure_result() {
        assert_eq!(batch(|| 7), 7);
    }
}
