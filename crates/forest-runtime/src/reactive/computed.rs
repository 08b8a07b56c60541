#![forbid(unsafe_code)]

//! Memoized derived values.
//!
//! A [`Computed`] evaluates its function once on construction and records
//! every node it reads. A change in any of those nodes marks it dirty and
//! propagates the dirty mark to its own dependents; the next read
//! re-evaluates. Dependencies are re-collected on every evaluation, so
//! conditional reads are tracked exactly.
//!
//! # Invariants
//!
//! 1. [`Computed::get`] never returns a value older than its sources.
//! 2. The function runs at most once per source change, and only when read.
//! 3. The version increments only when re-evaluation yields a different value.
//! 4. A derivation that (transitively) reads itself is a dependency cycle:
//!    the re-entrant read yields the cached value, the cycle is reported to
//!    the outermost reader, and the derivation stays dirty. An effect that
//!    reaches such a cycle while settling is halted.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::observable::{Observable, Subscription};
use super::runtime::{self, NodeId};
use crate::error::ReactiveError;

struct Core<T> {
    id: NodeId,
    compute: Box<dyn Fn() -> T>,
    value: RefCell<T>,
    version: Cell<u64>,
    dirty: Cell<bool>,
    computing: Cell<bool>,
    invalidate: Rc<dyn Fn()>,
    sources: RefCell<Vec<Subscription>>,
    dependents: RefCell<Vec<Weak<dyn Fn()>>>,
}

impl<T: Clone + PartialEq + 'static> Core<T> {
    fn mark_dirty(&self) {
        if self.dirty.replace(true) {
            return;
        }
        let dependents: Vec<Rc<dyn Fn()>> = {
            let mut list = self.dependents.borrow_mut();
            list.retain(|dep| dep.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };
        for dependent in dependents {
            dependent();
        }
    }

    fn refresh(&self) {
        if !self.dirty.get() {
            return;
        }
        let mark = runtime::fault_mark();
        self.dirty.set(false);
        self.computing.set(true);
        self.sources.borrow_mut().clear();
        let (next, sources) =
            runtime::with_frame(self.id, Rc::clone(&self.invalidate), || (self.compute)());
        self.computing.set(false);
        *self.sources.borrow_mut() = sources;

        if runtime::fault_since(mark).is_some() {
            self.dirty.set(true);
            return;
        }
        let changed = *self.value.borrow() != next;
        if changed {
            *self.value.borrow_mut() = next;
            self.version.set(self.version.get() + 1);
        }
    }

    fn add_dependent(&self, invalidate: Rc<dyn Fn()>) -> Subscription {
        let link: Rc<dyn Fn()> = Rc::new(move || invalidate());
        self.dependents.borrow_mut().push(Rc::downgrade(&link));
        Subscription::new(link)
    }
}

/// A memoized value derived from other reactive nodes.
///
/// Cloning yields another handle to the same derivation.
pub struct Computed<T> {
    core: Rc<Core<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Computed<T> {
    /// Create a derivation and evaluate it once to collect its sources.
    #[must_use]
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        let id = NodeId::next();
        let core = Rc::new_cyclic(|weak: &Weak<Core<T>>| {
            let weak = Weak::clone(weak);
            let invalidate: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(core) = weak.upgrade() {
                    core.mark_dirty();
                }
            });
            let (value, sources) = runtime::with_frame(id, Rc::clone(&invalidate), &compute);
            Core {
                id,
                compute: Box::new(compute),
                value: RefCell::new(value),
                version: Cell::new(0),
                dirty: Cell::new(false),
                computing: Cell::new(false),
                invalidate,
                sources: RefCell::new(sources),
                dependents: RefCell::new(Vec::new()),
            }
        });
        Self { core }
    }

    /// Derive from a single observable.
    #[must_use]
    pub fn from_observable<S>(source: &Observable<S>, map: impl Fn(&S) -> T + 'static) -> Self
    where
        S: Clone + PartialEq + 'static,
    {
        let source = source.clone();
        Self::new(move || source.with(&map))
    }

    /// Derive from two observables.
    #[must_use]
    pub fn from2<A, B>(
        a: &Observable<A>,
        b: &Observable<B>,
        map: impl Fn(&A, &B) -> T + 'static,
    ) -> Self
    where
        A: Clone + PartialEq + 'static,
        B: Clone + PartialEq + 'static,
    {
        let (a, b) = (a.clone(), b.clone());
        Self::new(move || a.with(|a| b.with(|b| map(a, b))))
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.core.id
    }

    /// The up-to-date value.
    ///
    /// # Panics
    ///
    /// Panics when evaluation runs into a dependency cycle and no enclosing
    /// evaluation can absorb it. Inside another derivation or an effect the
    /// cycle is instead reported to the outermost reader. Use
    /// [`try_get`](Self::try_get) to handle cycles as errors.
    #[must_use]
    pub fn get(&self) -> T {
        match self.read() {
            Ok(value) => value,
            Err(_) if runtime::is_evaluating() => self.core.value.borrow().clone(),
            Err(err) => panic!("{err}"),
        }
    }

    /// The up-to-date value, or the dependency cycle that prevented it.
    pub fn try_get(&self) -> Result<T, ReactiveError> {
        self.read()
    }

    /// Number of re-evaluations that produced a different value.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.core.version.get()
    }

    /// Whether a source changed since the last evaluation.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.core.dirty.get()
    }

    fn read(&self) -> Result<T, ReactiveError> {
        runtime::track(self.core.id, |invalidate| self.core.add_dependent(invalidate));

        if self.core.computing.get() {
            let fault = ReactiveError::DependencyCycle { node: self.core.id };
            tracing::error!(target: "forest::reactive", node = %self.core.id, "derived value read itself");
            runtime::report_fault(fault.clone());
            return Err(fault);
        }

        let mark = runtime::fault_mark();
        self.core.refresh();
        let fault = if runtime::is_evaluating() {
            runtime::fault_since(mark)
        } else {
            runtime::fault_take(mark)
        };
        match fault {
            Some(fault) => Err(fault),
            None => Ok(self.core.value.borrow().clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("id", &self.core.id)
            .field("value", &self.core.value.borrow())
            .field("dirty", &self.core.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_and_refreshes_lazily() {
        let evals = Rc::new(Cell::new(0));
        let source = Observable::new(2);
        let (e, s) = (Rc::clone(&evals), source.clone());
        let doubled = Computed::new(move || {
            e.set(e.get() + 1);
            s.get() * 2
        });
        assert_eq!(evals.get(), 1);
        assert_eq!(doubled.get(), 4);
        assert_eq!(evals.get(), 1);

        source.set(5);
        assert!(doubled.is_dirty());
        assert_eq!(evals.get(), 1);
        assert_eq!(doubled.get(), 10);
        assert_eq!(evals.get(), 2);
        assert_eq!(doubled.version(), 1);
    }

    #[test]
    fn unchanged_result_keeps_version() {
        let source = Observable::new(3);
        let parity = Computed::from_observable(&source, |v| v % 2);
        source.set(5);
        assert_eq!(parity.get(), 1);
        assert_eq!(parity.version(), 0);
    }

    #[test]
    fn chains_propagate_dirtiness() {
        let base = Observable::new(1);
        let plus_one = Computed::from_observable(&base, |v| v + 1);
        let p = plus_one.clone();
        let times_ten = Computed::new(move || p.get() * 10);

        base.set(4);
        assert!(plus_one.is_dirty());
        assert!(times_ten.is_dirty());
        assert_eq!(times_ten.get(), 50);
    }

    #[test]
    fn from2_combines_sources() {
        let name = Observable::new(String::from("Guest"));
        let count = Observable::new(0usize);
        let line = Computed::from2(&name, &count, |n, c| format!("{n}: {c}"));
        count.set(3);
        assert_eq!(line.get(), "Guest: 3");
        name.set("Ada".into());
        assert_eq!(line.get(), "Ada: 3");
    }

    #[test]
    fn conditional_reads_retrack_dependencies() {
        let use_left = Observable::new(true);
        let left = Observable::new(1);
        let right = Observable::new(100);
        let (u, l, r) = (use_left.clone(), left.clone(), right.clone());
        let pick = Computed::new(move || if u.get() { l.get() } else { r.get() });

        assert_eq!(right.subscriber_count(), 0);
        use_left.set(false);
        assert_eq!(pick.get(), 100);
        assert_eq!(left.subscriber_count(), 0);
        assert_eq!(right.subscriber_count(), 1);

        left.set(2);
        assert!(!pick.is_dirty());
    }

    #[test]
    fn self_reference_is_reported_as_a_cycle() {
        let slot: Rc<RefCell<Option<Computed<i32>>>> = Rc::default();
        let trigger = Observable::new(1);
        let (s, t) = (Rc::clone(&slot), trigger.clone());
        let looped = Computed::new(move || {
            let base = t.get();
            if base > 1 {
                if let Some(me) = s.borrow().as_ref() {
                    return me.get() + base;
                }
            }
            base
        });
        *slot.borrow_mut() = Some(looped.clone());
        assert_eq!(looped.try_get(), Ok(1));

        trigger.set(2);
        assert_eq!(
            looped.try_get(),
            Err(ReactiveError::DependencyCycle { node: looped.id() })
        );
        assert!(looped.is_dirty());
        slot.borrow_mut().take();
    }

    #[test]
    fn repeated_cycle_reads_do_not_accumulate_faults() {
        let slot: Rc<RefCell<Option<Computed<i32>>>> = Rc::default();
        let s = Rc::clone(&slot);
        let looped = Computed::new(move || match s.borrow().as_ref() {
            Some(me) => me.get() + 1,
            None => 0,
        });
        *slot.borrow_mut() = Some(looped.clone());
        looped.core.dirty.set(true);

        let mark = runtime::fault_mark();
        for _ in 0..3 {
            assert!(looped.try_get().is_err());
            assert_eq!(runtime::fault_mark(), mark);
        }
        slot.borrow_mut().take();
    }

    #[test]
    #[should_panic(expected = "dependency cycle")]
    fn get_panics_on_a_cycle_at_top_level() {
        let slot: Rc<RefCell<Option<Computed<i32>>>> = Rc::default();
        let trigger = Observable::new(false);
        let (s, t) = (Rc::clone(&slot), trigger.clone());
        let looped = Computed::new(move || {
            if t.get() {
                if let Some(me) = s.borrow().as_ref() {
                    return me.get();
                }
            }
            0
        });
        *slot.borrow_mut() = Some(looped.clone());
        trigger.set(true);
        let _ = looped.get();
    }
}
