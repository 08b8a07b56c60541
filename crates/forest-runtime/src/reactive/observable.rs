#![forbid(unsafe_code)]

//! Mutable reactive cells.
//!
//! # Invariants
//!
//! 1. The version increments exactly once per write that changes the value.
//! 2. Subscribers are notified synchronously, in registration order, with the
//!    value that was just stored.
//! 3. Writing a value equal to the current one is a no-op: no version bump,
//!    no notification, no effect scheduling.
//! 4. A cell cannot be given a *different* value from inside its own
//!    notification pass; such writes are rejected with
//!    [`ReactiveError::ReentrantWrite`]. The same holds for a write made while
//!    an [`Observable::with`] closure borrows the value.
//! 5. Dropping a [`Subscription`] removes its callback before the next write.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::runtime::{self, NodeId};
use crate::error::ReactiveError;

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// RAII guard for a callback registered on a reactive node.
///
/// The node only holds a weak reference to the callback; this guard owns the
/// strong one. Dropping the guard (or calling [`unsubscribe`](Self::unsubscribe))
/// detaches the callback.
#[must_use = "dropping a Subscription detaches its callback immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Subscription {
    pub(crate) fn new<C: ?Sized + 'static>(callback: Rc<C>) -> Self {
        Self {
            _guard: Box::new(callback),
        }
    }

    /// Detach the callback now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Observable
// ---------------------------------------------------------------------------

type Callback<T> = dyn Fn(&T);

// The value and the subscriber list live in separate cells so that a closure
// borrowing the value can still subscribe or attempt a write.
struct Inner<T> {
    id: NodeId,
    value: RefCell<T>,
    version: Cell<u64>,
    subscribers: RefCell<Vec<Weak<Callback<T>>>>,
    notifying: Cell<bool>,
}

/// A shared, version-tracked reactive cell.
///
/// Cloning an `Observable` yields another handle to the same cell.
/// Reads through [`get`](Self::get) or [`with`](Self::with) inside a
/// [`Computed`](super::Computed) or [`Effect`](super::Effect) register a
/// dependency automatically.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                id: NodeId::next(),
                value: RefCell::new(value),
                version: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
                notifying: Cell::new(false),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// Current value; records a dependency for the evaluating node.
    #[must_use]
    pub fn get(&self) -> T {
        self.track();
        self.get_untracked()
    }

    /// Current value without recording a dependency.
    #[must_use]
    pub fn get_untracked(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value; records a dependency.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        f(&self.inner.value.borrow())
    }

    /// Borrow the current value without recording a dependency.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value`, logging and dropping the write if it is rejected.
    ///
    /// Use [`try_set`](Self::try_set) where a rejected write must be handled.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            tracing::warn!(target: "forest::reactive", error = %err, "write dropped");
        }
    }

    /// Store `value` and notify subscribers.
    ///
    /// Returns `Ok(true)` when the value changed, `Ok(false)` for a no-op
    /// write of an equal value. A different value written while the cell
    /// is notifying, or while a [`with`](Self::with) closure borrows it, is
    /// rejected with [`ReactiveError::ReentrantWrite`].
    pub fn try_set(&self, value: T) -> Result<bool, ReactiveError> {
        let reentrant = || ReactiveError::ReentrantWrite { node: self.inner.id };
        if *self.inner.value.try_borrow().map_err(|_| reentrant())? == value {
            return Ok(false);
        }
        if self.inner.notifying.get() {
            return Err(reentrant());
        }

        let snapshot = {
            let mut slot = self.inner.value.try_borrow_mut().map_err(|_| reentrant())?;
            *slot = value;
            slot.clone()
        };
        self.inner.version.set(self.inner.version.get() + 1);
        let callbacks: Vec<Rc<Callback<T>>> = {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            subscribers.retain(|cb| cb.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        self.inner.notifying.set(true);
        runtime::notifying(|| {
            for callback in &callbacks {
                callback(&snapshot);
            }
        });
        self.inner.notifying.set(false);

        runtime::settle();
        Ok(true)
    }

    /// Modify the value in place; behaves like [`set`](Self::set) with the
    /// modified copy.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get_untracked();
        f(&mut next);
        self.set(next);
    }

    /// Register a raw callback invoked synchronously on every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .subscribers
            .borrow_mut()
            .push(Rc::downgrade(&callback));
        Subscription::new(callback)
    }

    /// Number of writes that changed the value.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Live subscribers, including dependency links from derivations and
    /// effects.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|cb| cb.strong_count() > 0)
            .count()
    }

    /// A handle that can be read and observed but not written.
    #[must_use]
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            source: self.clone(),
        }
    }

    fn track(&self) {
        runtime::track(self.inner.id, |invalidate| {
            self.subscribe(move |_| invalidate())
        });
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.inner.id)
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read-only view of an [`Observable`]. Handed out by stores that keep write
/// access to themselves.
pub struct ReadSignal<T> {
    source: Observable<T>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ReadSignal<T> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.source.id()
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    #[must_use]
    pub fn get_untracked(&self) -> T {
        self.source.get_untracked()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(callback)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadSignal").field(&self.source).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);
        assert_eq!(obs.version(), 0);
        obs.set(100);
        assert_eq!(obs.get(), 100);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_write_is_a_no_op() {
        let obs = Observable::new(String::from("a"));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        assert_eq!(obs.try_set("a".into()), Ok(false));
        assert_eq!(obs.version(), 0);
        assert_eq!(hits.get(), 0);

        assert_eq!(obs.try_set("b".into()), Ok(true));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscribers_fire_in_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l1 = Rc::clone(&log);
        let l2 = Rc::clone(&log);
        let _a = obs.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
        let _b = obs.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

        obs.set(5);
        assert_eq!(*log.borrow(), vec![("a", 5), ("b", 5)]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| h.set(h.get() + 1));
        obs.set(1);
        assert_eq!(obs.subscriber_count(), 1);

        sub.unsubscribe();
        obs.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn update_mutates_in_place() {
        let obs = Observable::new(vec![1, 2]);
        obs.update(|v| v.push(3));
        assert_eq!(obs.get(), vec![1, 2, 3]);
        assert_eq!(obs.version(), 1);
        obs.update(|_| {});
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn reentrant_write_of_a_different_value_is_rejected() {
        let obs = Observable::new(0);
        let outcome = Rc::new(RefCell::new(None));
        let (o, out) = (obs.clone(), Rc::clone(&outcome));
        let _sub = obs.subscribe(move |v| {
            *out.borrow_mut() = Some(o.try_set(*v + 1));
        });

        obs.set(1);
        let recorded = outcome.borrow().clone();
        assert_eq!(
            recorded,
            Some(Err(ReactiveError::ReentrantWrite { node: obs.id() }))
        );
        assert_eq!(obs.get(), 1);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn write_while_borrowed_by_with_is_rejected() {
        let obs = Observable::new(3);
        let o = obs.clone();
        let outcome = obs.with(|v| o.try_set(*v + 1));
        assert_eq!(outcome, Err(ReactiveError::ReentrantWrite { node: obs.id() }));
        assert_eq!(obs.with(|v| o.try_set(*v)), Ok(false));

        obs.with(|_| o.set(10));
        assert_eq!(obs.get(), 3);
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn subscribing_inside_with_is_allowed() {
        let obs = Observable::new(1);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.with(|_| obs.subscribe(move |_| h.set(h.get() + 1)));
        obs.set(2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn reentrant_write_of_the_same_value_is_a_silent_no_op() {
        let obs = Observable::new(0);
        let outcome = Rc::new(RefCell::new(None));
        let (o, out) = (obs.clone(), Rc::clone(&outcome));
        let _sub = obs.subscribe(move |v| {
            *out.borrow_mut() = Some(o.try_set(*v));
        });

        obs.set(7);
        assert_eq!(*outcome.borrow(), Some(Ok(false)));
    }

    #[test]
    fn read_only_view_tracks_the_source() {
        let obs = Observable::new("x");
        let view = obs.read_only();
        obs.set("y");
        assert_eq!(view.get(), "y");
        assert_eq!(view.version(), 1);
        assert_eq!(view.id(), obs.id());
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
        assert_eq!(a.id(), b.id());
    }
}
