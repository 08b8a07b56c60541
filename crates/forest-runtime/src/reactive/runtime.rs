//! Thread-local bookkeeping shared by every reactive node.
//!
//! The runtime owns three things:
//!
//! 1. **Tracking frames**: while a [`Computed`](super::Computed) or an
//!    [`Effect`](super::Effect) evaluates, tracked reads subscribe the
//!    evaluating node to whatever it reads.
//! 2. **The settle queue**: effects invalidated by a write are queued and run
//!    once the outermost notification (or [`BatchScope`](super::BatchScope))
//!    has completed, so no effect ever observes a half-propagated write.
//! 3. **Faults**: dependency cycles detected during evaluation are recorded
//!    here until the outermost caller takes them. A fault raised while an
//!    effect runs during a settle halts that effect.
//!
//! Everything is single-threaded: the host's event loop is the only thread
//! that touches reactive state.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::effect::EffectCore;
use super::observable::Subscription;
use crate::error::ReactiveError;

/// Upper bound on re-invocations of one effect within a single settle.
///
/// An effect that keeps invalidating itself past this bound is feeding back
/// into its own dependencies without converging.
pub const MAX_EFFECT_RERUNS_PER_SETTLE: u32 = 64;

/// Process-unique identifier of a reactive node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Frame {
    observer: Option<NodeId>,
    invalidate: Option<Rc<dyn Fn()>>,
    seen: Vec<NodeId>,
    subscriptions: Vec<Subscription>,
}

#[derive(Default)]
struct Runtime {
    frames: RefCell<Vec<Frame>>,
    pending: RefCell<VecDeque<Weak<EffectCore>>>,
    notify_depth: Cell<usize>,
    batch_depth: Cell<usize>,
    settling: Cell<bool>,
    faults: RefCell<Vec<ReactiveError>>,
}

thread_local! {
    static RUNTIME: Runtime = Runtime::default();
}

/// Record a tracked read of `source` by the node currently evaluating.
///
/// `subscribe` is only invoked when a tracking frame is active and the source
/// has not been recorded yet during this evaluation.
pub(crate) fn track(source: NodeId, subscribe: impl FnOnce(Rc<dyn Fn()>) -> Subscription) {
    let invalidate = RUNTIME.with(|rt| {
        let frames = rt.frames.borrow();
        let frame = frames.last()?;
        if frame.observer == Some(source) || frame.seen.contains(&source) {
            return None;
        }
        frame.invalidate.clone()
    });
    let Some(invalidate) = invalidate else {
        return;
    };

    let subscription = subscribe(invalidate);
    RUNTIME.with(|rt| {
        if let Some(frame) = rt.frames.borrow_mut().last_mut() {
            frame.seen.push(source);
            frame.subscriptions.push(subscription);
        }
    });
}

/// Evaluate `f` inside a tracking frame owned by `observer`.
///
/// Returns the result together with the subscriptions created by tracked
/// reads; the caller keeps them alive for as long as the dependency holds.
pub(crate) fn with_frame<R>(
    observer: NodeId,
    invalidate: Rc<dyn Fn()>,
    f: impl FnOnce() -> R,
) -> (R, Vec<Subscription>) {
    push_frame(Frame {
        observer: Some(observer),
        invalidate: Some(invalidate),
        seen: Vec::new(),
        subscriptions: Vec::new(),
    });
    let result = f();
    let subscriptions = pop_frame();
    (result, subscriptions)
}

/// Run `f` without recording any dependency for the enclosing evaluation.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    push_frame(Frame {
        observer: None,
        invalidate: None,
        seen: Vec::new(),
        subscriptions: Vec::new(),
    });
    let result = f();
    drop(pop_frame());
    result
}

fn push_frame(frame: Frame) {
    RUNTIME.with(|rt| rt.frames.borrow_mut().push(frame));
}

fn pop_frame() -> Vec<Subscription> {
    RUNTIME.with(|rt| {
        rt.frames
            .borrow_mut()
            .pop()
            .map(|frame| frame.subscriptions)
            .unwrap_or_default()
    })
}

/// Whether some node is evaluating on this thread. Frames opened by
/// [`untracked`] alone do not count.
pub(crate) fn is_evaluating() -> bool {
    RUNTIME.with(|rt| rt.frames.borrow().iter().any(|frame| frame.observer.is_some()))
}

/// Run `f` as part of a cell's notification pass. Settles are deferred until
/// every nested notification has returned.
pub(crate) fn notifying<R>(f: impl FnOnce() -> R) -> R {
    RUNTIME.with(|rt| rt.notify_depth.set(rt.notify_depth.get() + 1));
    let result = f();
    RUNTIME.with(|rt| rt.notify_depth.set(rt.notify_depth.get() - 1));
    result
}

pub(crate) fn batch_enter() {
    RUNTIME.with(|rt| rt.batch_depth.set(rt.batch_depth.get() + 1));
}

/// Leave a batch; returns `true` when the outermost batch just closed.
pub(crate) fn batch_exit() -> bool {
    RUNTIME.with(|rt| {
        let depth = rt.batch_depth.get().saturating_sub(1);
        rt.batch_depth.set(depth);
        depth == 0
    })
}

pub(crate) fn is_batching() -> bool {
    RUNTIME.with(|rt| rt.batch_depth.get() > 0)
}

/// Queue an effect for the next settle. Already-queued effects are not
/// queued twice.
pub(crate) fn schedule(effect: &Weak<EffectCore>) {
    RUNTIME.with(|rt| {
        let mut pending = rt.pending.borrow_mut();
        if !pending.iter().any(|queued| Weak::ptr_eq(queued, effect)) {
            pending.push_back(Weak::clone(effect));
        }
    });
}

/// Run queued effects until the queue drains.
///
/// No-op while a notification, a batch or another settle is in progress;
/// the outermost of those settles instead.
pub(crate) fn settle() {
    let ready = RUNTIME.with(|rt| {
        if rt.settling.get() || rt.notify_depth.get() > 0 || rt.batch_depth.get() > 0 {
            return false;
        }
        rt.settling.set(true);
        true
    });
    if !ready {
        return;
    }

    let mut reruns: HashMap<NodeId, u32> = HashMap::new();
    let mut executed = 0usize;
    while let Some(next) = RUNTIME.with(|rt| rt.pending.borrow_mut().pop_front()) {
        let Some(effect) = next.upgrade() else {
            continue;
        };
        let count = reruns.entry(effect.id()).or_insert(0);
        *count += 1;
        if *count > MAX_EFFECT_RERUNS_PER_SETTLE {
            tracing::error!(
                target: "forest::reactive",
                effect = %effect.id(),
                "effect keeps invalidating itself; halting it"
            );
            effect.fail(ReactiveError::DependencyCycle { node: effect.id() });
            continue;
        }
        let mark = fault_mark();
        effect.run();
        executed += 1;
        if let Some(fault) = fault_take(mark) {
            tracing::error!(
                target: "forest::reactive",
                effect = %effect.id(),
                error = %fault,
                "effect read a cyclic derivation; halting it"
            );
            effect.fail(fault);
        }
    }

    RUNTIME.with(|rt| rt.settling.set(false));
    if executed > 0 {
        tracing::trace!(target: "forest::reactive", executed, "settled");
    }
}

pub(crate) fn report_fault(fault: ReactiveError) {
    RUNTIME.with(|rt| rt.faults.borrow_mut().push(fault));
}

/// Position in the fault log; pair with [`fault_since`] or [`fault_take`].
pub(crate) fn fault_mark() -> usize {
    RUNTIME.with(|rt| rt.faults.borrow().len())
}

/// First fault recorded after `mark`, if any. The log is left as is for an
/// enclosing reader.
pub(crate) fn fault_since(mark: usize) -> Option<ReactiveError> {
    RUNTIME.with(|rt| rt.faults.borrow().get(mark).cloned())
}

/// First fault recorded after `mark`, if any, truncating the log back to
/// `mark`.
pub(crate) fn fault_take(mark: usize) -> Option<ReactiveError> {
    RUNTIME.with(|rt| {
        let mut faults = rt.faults.borrow_mut();
        if faults.len() <= mark {
            return None;
        }
        faults.drain(mark..).next()
    })
}
