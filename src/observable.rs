//! Value sources.
//!
//! [`ObservableValue`] is the whole contract a binding needs from a source:
//! subscribe an observer and identify yourself. The adapters in this module
//! cover the derived selectors applications build over atoms; they are not a
//! general operator library and have no error or completion channel.
//! Failures travel as ordinary values, typically `Result<T, E>`.

mod combine_latest;
#[cfg(feature = "futures-source")]
mod from_future;
mod map;
mod switch_map;
mod with_current;

pub use combine_latest::*;
#[cfg(feature = "futures-source")]
pub use from_future::*;
pub use map::*;
pub use switch_map::*;
pub use with_current::*;

use crate::{context::SourceId, subscription::Subscription};

/// A push-based source of values.
pub trait ObservableValue {
  type Item;
  type Unsub: Subscription + 'static;

  /// Register `on_next` for the values this source emits.
  ///
  /// The returned handle stops delivery when unsubscribed. Sources must not
  /// call `on_next` after that, not even for an emission already in flight.
  fn subscribe<F>(&self, on_next: F) -> Self::Unsub
  where
    F: Fn(Self::Item) + 'static;

  /// Identity of this source. Clones share it, freshly built sources never
  /// do, even when they are structurally equal.
  fn source_id(&self) -> SourceId;
}

/// Adapters available on every [`ObservableValue`].
pub trait ObservableExt: ObservableValue + Sized {
  /// Creates a derived source which calls a closure on each value and emits
  /// its return.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxatom::prelude::*;
  ///
  /// let atom = Atom::of(1);
  /// let last = Rc::new(RefCell::new(String::new()));
  /// let c_last = last.clone();
  /// let _sub = atom.clone().map(|v: i32| v.to_string()).subscribe(move |s| *c_last.borrow_mut() = s);
  /// atom.next(5);
  /// assert_eq!(*last.borrow(), "5");
  /// ```
  fn map<F, U>(self, func: F) -> Map<Self, F>
  where
    F: Fn(Self::Item) -> U,
  {
    Map::new(self, func)
  }

  /// Projects every value to an inner source and only forwards the most
  /// recent inner source's values.
  fn switch_map<F, Inner>(self, func: F) -> SwitchMap<Self, F>
  where
    F: Fn(Self::Item) -> Inner,
    Inner: ObservableValue,
  {
    SwitchMap::new(self, func)
  }

  /// Combines this source with `other`; emits `func(a, b)` with the latest
  /// value of each side once both have emitted.
  fn combine_latest<B, F, U>(self, other: B, func: F) -> CombineLatest<Self, B, F>
  where
    B: ObservableValue,
    F: Fn(Self::Item, B::Item) -> U,
  {
    CombineLatest::new(self, other, func)
  }
}

impl<S: ObservableValue> ObservableExt for S {}
