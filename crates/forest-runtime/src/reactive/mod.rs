#![forbid(unsafe_code)]

//! Reactive state for Focus Forest.
//!
//! - [`Observable`]: a mutable, version-tracked cell with synchronous
//!   change notification.
//! - [`Computed`]: a memoized derivation whose dependencies are collected
//!   automatically from the values it reads.
//! - [`Effect`]: a side effect that re-runs once per settle when something
//!   it read has changed.
//! - [`BatchScope`]: groups writes so effects observe only the final state.
//! - [`ReactiveScope`]: owns effects and subscriptions for one owner.
//!
//! # Architecture
//!
//! All nodes are single-threaded (`Rc`, `RefCell`). Nodes hold their
//! subscribers weakly; the strong references live in [`Subscription`] guards
//! kept by whoever depends on the node. A thread-local runtime tracks which
//! node is evaluating, queues invalidated effects, and settles them after the
//! outermost write or batch completes.
//!
//! ```
//! use forest_runtime::reactive::{Computed, Effect, Observable};
//! use std::{cell::RefCell, rc::Rc};
//!
//! let count = Observable::new(1);
//! let label = Computed::from_observable(&count, |n| format!("{n} trees"));
//!
//! let rendered = Rc::new(RefCell::new(String::new()));
//! let (l, out) = (label.clone(), Rc::clone(&rendered));
//! let _effect = Effect::new(move || *out.borrow_mut() = l.get()).unwrap();
//!
//! count.set(2);
//! assert_eq!(*rendered.borrow(), "2 trees");
//! ```

pub mod batch;
pub mod computed;
pub mod effect;
pub mod observable;
pub mod runtime;
pub mod scope;

pub use batch::{BatchScope, batch};
pub use computed::Computed;
pub use effect::Effect;
pub use observable::{Observable, ReadSignal, Subscription};
pub use runtime::{MAX_EFFECT_RERUNS_PER_SETTLE, NodeId, untracked};
pub use scope::ReactiveScope;
