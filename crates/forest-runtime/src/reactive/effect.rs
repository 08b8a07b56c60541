#![forbid(unsafe_code)]

//! Side effects that re-run when the values they read change.
//!
//! # Invariants
//!
//! 1. The body runs once immediately on creation, then once per settle in
//!    which any of its dependencies changed, never more than once per settle
//!    unless it invalidates itself.
//! 2. The body never runs re-entrantly.
//! 3. Dependencies are re-collected on every run.
//! 4. A body that keeps invalidating itself more than
//!    [`MAX_EFFECT_RERUNS_PER_SETTLE`](super::MAX_EFFECT_RERUNS_PER_SETTLE)
//!    times in one settle, or that reads a derivation depending on itself,
//!    is halted and keeps the dependency cycle as its [`Effect::fault`].
//! 5. Dropping or disposing the handle detaches every dependency; a disposed
//!    effect never runs again. A body that disposes its own effect finishes
//!    its current run, and the reads of that run are not kept.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::batch::BatchScope;
use super::observable::Subscription;
use super::runtime::{self, NodeId};
use crate::error::ReactiveError;

pub(crate) struct EffectCore {
    id: NodeId,
    body: RefCell<Box<dyn FnMut()>>,
    invalidate: Rc<dyn Fn()>,
    sources: RefCell<Vec<Subscription>>,
    running: Cell<bool>,
    disposed: Cell<bool>,
    fault: RefCell<Option<ReactiveError>>,
    runs: Cell<u64>,
}

impl EffectCore {
    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn run(&self) {
        if self.disposed.get() || self.running.get() {
            return;
        }
        self.running.set(true);
        self.sources.borrow_mut().clear();
        let ((), sources) = {
            let mut body = self.body.borrow_mut();
            runtime::with_frame(self.id, Rc::clone(&self.invalidate), || (&mut **body)())
        };
        if !self.disposed.get() {
            *self.sources.borrow_mut() = sources;
        }
        self.runs.set(self.runs.get() + 1);
        self.running.set(false);
    }

    /// Stop the effect for good and release its dependencies.
    pub(crate) fn halt(&self) {
        self.disposed.set(true);
        self.sources.borrow_mut().clear();
    }

    /// Halt because of `fault`; the first fault is kept.
    pub(crate) fn fail(&self, fault: ReactiveError) {
        self.fault.borrow_mut().get_or_insert(fault);
        self.halt();
    }
}

/// A registered side effect. Dropping the handle disposes the effect.
#[must_use = "dropping an Effect disposes it immediately"]
pub struct Effect {
    core: Rc<EffectCore>,
}

impl Effect {
    /// Register `body` and run it once.
    ///
    /// Fails with [`ReactiveError::DependencyCycle`] when the first run
    /// cannot settle, either because the body keeps invalidating itself or
    /// because it reads a derivation that depends on itself. The effect is
    /// disposed in that case.
    pub fn new(body: impl FnMut() + 'static) -> Result<Self, ReactiveError> {
        let id = NodeId::next();
        let core = Rc::new_cyclic(|weak: &Weak<EffectCore>| {
            let weak = Weak::clone(weak);
            EffectCore {
                id,
                body: RefCell::new(Box::new(body)),
                invalidate: Rc::new(move || runtime::schedule(&weak)),
                sources: RefCell::new(Vec::new()),
                running: Cell::new(false),
                disposed: Cell::new(false),
                fault: RefCell::new(None),
                runs: Cell::new(0),
            }
        });

        let mark = runtime::fault_mark();
        {
            let _batch = BatchScope::new();
            core.run();
        }
        let fault = runtime::fault_take(mark).or_else(|| core.fault.borrow().clone());
        if let Some(fault) = fault {
            core.fail(fault.clone());
            tracing::error!(target: "forest::reactive", effect = %id, error = %fault, "effect rejected");
            return Err(fault);
        }
        Ok(Self { core })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.core.id
    }

    /// Detach the effect; it will not run again.
    pub fn dispose(&self) {
        self.core.halt();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.core.disposed.get()
    }

    /// The dependency cycle that halted the effect during a settle, if any.
    #[must_use]
    pub fn fault(&self) -> Option<ReactiveError> {
        self.core.fault.borrow().clone()
    }

    /// How many times the body has run, including the initial run.
    #[must_use]
    pub fn run_count(&self) -> u64 {
        self.core.runs.get()
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.core.halt();
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.core.id)
            .field("runs", &self.core.runs.get())
            .field("disposed", &self.core.disposed.get())
            .field("fault", &self.core.fault.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{Computed, MAX_EFFECT_RERUNS_PER_SETTLE, Observable, batch};

    #[test]
    fn runs_immediately_and_on_change() {
        let source = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (s, log) = (source.clone(), Rc::clone(&seen));
        let effect = Effect::new(move || log.borrow_mut().push(s.get())).unwrap();

        source.set(2);
        source.set(2);
        source.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn batched_writes_run_the_effect_once() {
        let a = Observable::new(0);
        let b = Observable::new(0);
        let sums = Rc::new(RefCell::new(Vec::new()));
        let (ra, rb, log) = (a.clone(), b.clone(), Rc::clone(&sums));
        let _effect = Effect::new(move || log.borrow_mut().push(ra.get() + rb.get())).unwrap();

        batch(|| {
            a.set(1);
            b.set(2);
        });
        assert_eq!(*sums.borrow(), vec![0, 3]);
    }

    #[test]
    fn diamond_is_observed_consistently() {
        let base = Observable::new(1);
        let left = Computed::from_observable(&base, |v| v + 1);
        let right = Computed::from_observable(&base, |v| v * 10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (l, r, log) = (left.clone(), right.clone(), Rc::clone(&seen));
        let _effect = Effect::new(move || log.borrow_mut().push((l.get(), r.get()))).unwrap();

        base.set(2);
        assert_eq!(*seen.borrow(), vec![(2, 10), (3, 20)]);
    }

    #[test]
    fn dispose_stops_reruns() {
        let source = Observable::new(0);
        let runs = Rc::new(Cell::new(0));
        let (s, r) = (source.clone(), Rc::clone(&runs));
        let effect = Effect::new(move || {
            let _ = s.get();
            r.set(r.get() + 1);
        })
        .unwrap();
        effect.dispose();
        assert!(effect.is_disposed());
        assert_eq!(source.subscriber_count(), 0);
        source.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn dropping_the_handle_disposes() {
        let source = Observable::new(0);
        let runs = Rc::new(Cell::new(0));
        let (s, r) = (source.clone(), Rc::clone(&runs));
        drop(
            Effect::new(move || {
                let _ = s.get();
                r.set(r.get() + 1);
            })
            .unwrap(),
        );
        source.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn converging_feedback_is_allowed() {
        let value = Observable::new(50);
        let v = value.clone();
        let effect = Effect::new(move || {
            let current = v.get();
            if current > 10 {
                v.set(current - 10);
            }
        })
        .unwrap();
        assert_eq!(value.get(), 10);
        assert!(effect.run_count() > 1);
    }

    #[test]
    fn runaway_feedback_is_a_cycle() {
        let value = Observable::new(0u64);
        let v = value.clone();
        let err = Effect::new(move || {
            let current = v.get();
            v.set(current + 1);
        })
        .unwrap_err();
        assert!(matches!(err, ReactiveError::DependencyCycle { .. }));
        let stopped_at = value.get();
        assert!(stopped_at >= u64::from(MAX_EFFECT_RERUNS_PER_SETTLE));
        value.set(stopped_at + 100);
        assert_eq!(value.get(), stopped_at + 100);
    }

    #[test]
    fn reading_a_cyclic_derivation_rejects_the_effect() {
        let slot: Rc<RefCell<Option<Computed<i32>>>> = Rc::default();
        let trigger = Observable::new(false);
        let (s, t) = (Rc::clone(&slot), trigger.clone());
        let looped = Computed::new(move || {
            if t.get() {
                if let Some(me) = s.borrow().as_ref() {
                    return me.get() + 1;
                }
            }
            0
        });
        *slot.borrow_mut() = Some(looped.clone());
        trigger.set(true);

        let l = looped.clone();
        let err = Effect::new(move || {
            let _ = l.get();
        })
        .unwrap_err();
        assert_eq!(err, ReactiveError::DependencyCycle { node: looped.id() });
        slot.borrow_mut().take();
    }

    #[test]
    fn derivation_turning_cyclic_halts_the_effect() {
        let slot: Rc<RefCell<Option<Computed<i32>>>> = Rc::default();
        let trigger = Observable::new(false);
        let (s, t) = (Rc::clone(&slot), trigger.clone());
        let looped = Computed::new(move || {
            if t.get() {
                if let Some(me) = s.borrow().as_ref() {
                    return me.get() + 1;
                }
            }
            0
        });
        *slot.borrow_mut() = Some(looped.clone());

        let runs = Rc::new(Cell::new(0));
        let (l, r) = (looped.clone(), Rc::clone(&runs));
        let effect = Effect::new(move || {
            let _ = l.get();
            r.set(r.get() + 1);
        })
        .unwrap();
        assert_eq!(effect.fault(), None);

        let mark = runtime::fault_mark();
        trigger.set(true);
        assert!(effect.is_disposed());
        assert_eq!(
            effect.fault(),
            Some(ReactiveError::DependencyCycle { node: looped.id() })
        );
        assert_eq!(runtime::fault_mark(), mark);

        let halted_at = runs.get();
        trigger.set(false);
        trigger.set(true);
        assert_eq!(runs.get(), halted_at);
        slot.borrow_mut().take();
    }

    #[test]
    fn disposing_itself_mid_run_finishes_the_run_and_drops_its_reads() {
        let source = Observable::new(0);
        let slot: Rc<RefCell<Option<Effect>>> = Rc::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (s, me, log) = (source.clone(), Rc::clone(&slot), Rc::clone(&seen));
        let effect = Effect::new(move || {
            let value = s.get();
            if value > 0 {
                if let Some(effect) = me.borrow().as_ref() {
                    effect.dispose();
                }
            }
            log.borrow_mut().push(value);
        })
        .unwrap();
        *slot.borrow_mut() = Some(effect);

        source.set(1);
        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(source.subscriber_count(), 0);
        assert!(slot.borrow().as_ref().is_some_and(Effect::is_disposed));

        source.set(2);
        assert_eq!(*seen.borrow(), vec![0, 1]);
        slot.borrow_mut().take();
    }

    #[test]
    fn rejected_effect_leaves_no_fault_behind() {
        let value = Observable::new(0u64);
        let v = value.clone();
        let mark = runtime::fault_mark();
        let _ = Effect::new(move || {
            let current = v.get();
            v.set(current + 1);
        })
        .unwrap_err();
        assert_eq!(runtime::fault_mark(), mark);
    }
}
