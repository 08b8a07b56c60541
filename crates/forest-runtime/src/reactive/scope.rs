#![forbid(unsafe_code)]

//! Ownership of a group of effects and subscriptions.

use super::effect::Effect;
use super::observable::{Observable, Subscription};
use crate::error::ReactiveError;

enum Held {
    Effect { _effect: Effect },
    Subscription { _subscription: Subscription },
}

/// Keeps effects and subscriptions alive for the lifetime of an owner (a
/// store, a projection, a view).
///
/// # Invariants
///
/// 1. Everything held is released in reverse registration order on drop.
/// 2. After drop or [`clear`](Self::clear), nothing registered through the
///    scope runs again.
#[derive(Default)]
pub struct ReactiveScope {
    held: Vec<Held>,
}

impl ReactiveScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect owned by this scope.
    pub fn effect(&mut self, body: impl FnMut() + 'static) -> Result<&mut Self, ReactiveError> {
        let effect = Effect::new(body)?;
        self.held.push(Held::Effect { _effect: effect });
        Ok(self)
    }

    pub fn hold_effect(&mut self, effect: Effect) {
        self.held.push(Held::Effect { _effect: effect });
    }

    pub fn hold(&mut self, subscription: Subscription) {
        self.held.push(Held::Subscription {
            _subscription: subscription,
        });
    }

    /// Subscribe to `source` for the lifetime of this scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.hold(source.subscribe(callback));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release everything now; the scope can be reused.
    pub fn clear(&mut self) {
        while let Some(item) = self.held.pop() {
            drop(item);
        }
    }
}

impl Drop for ReactiveScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for ReactiveScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveScope")
            .field("held", &self.held.len())
            .finish()
    }
}
