//! Write side of a stateful binding.

use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use tracing::trace;

use crate::atom::Stateful;

/// The argument of a setter call.
///
/// A literal and an updater are different variants, so a value that happens
/// to be callable (say `Rc<dyn Fn()>`) is stored as a value with
/// [`Update::Replace`] and never mistaken for an updater.
pub enum Update<T> {
  /// Use this value as the next value.
  Replace(T),
  /// Compute the next value from the previous one.
  With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
  pub fn with<F>(func: F) -> Self
  where
    F: FnOnce(&T) -> T + 'static,
  {
    Update::With(Box::new(func))
  }

  /// Evaluate against `previous`.
  pub fn resolve(self, previous: &T) -> T {
    match self {
      Update::Replace(value) => value,
      Update::With(func) => func(previous),
    }
  }
}

impl<T> From<T> for Update<T> {
  fn from(value: T) -> Self { Update::Replace(value) }
}

impl<T: Debug> Debug for Update<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Update::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
      Update::With(_) => f.write_str("With(..)"),
    }
  }
}

/// Setter returned by [`use_stateful`](crate::hooks::use_stateful).
///
/// A setter captures the value that was rendered when it was created.
/// Updaters always run against that snapshot, not against a fresh read of the
/// cell, so two updater calls before the next render both see the same
/// previous value and the last write wins:
///
/// ```rust
/// use rxatom::prelude::*;
///
/// let count = Atom::of(1);
/// let setter = Setter::new(count.clone(), count.value());
/// setter.update(|v| v + 1);
/// setter.update(|v| v + 1);
/// assert_eq!(count.value(), 2);
/// ```
///
/// Clones share identity; see [`Setter::ptr_eq`].
pub struct Setter<A: Stateful>(Rc<SetterInner<A>>);

struct SetterInner<A: Stateful> {
  target: A,
  snapshot: A::Item,
}

impl<A: Stateful> Setter<A> {
  pub fn new(target: A, snapshot: A::Item) -> Self { Self(Rc::new(SetterInner { target, snapshot })) }

  /// Push `value` as is.
  pub fn set(&self, value: A::Item) { self.push(value) }

  /// Push `func(snapshot)`.
  pub fn update<F>(&self, func: F)
  where
    F: FnOnce(&A::Item) -> A::Item,
  {
    let next = func(&self.0.snapshot);
    self.push(next)
  }

  /// Push a literal or an updater result.
  pub fn apply(&self, update: impl Into<Update<A::Item>>) {
    let next = update.into().resolve(&self.0.snapshot);
    self.push(next)
  }

  /// The value this setter computes updates against.
  pub fn snapshot(&self) -> &A::Item { &self.0.snapshot }

  /// Whether both setters are the same memoized instance.
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }

  fn push(&self, next: A::Item) {
    trace!(source = ?self.0.target.source_id(), "setter push");
    self.0.target.next(next);
  }
}

impl<A: Stateful> Clone for Setter<A> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<A: Stateful> Debug for Setter<A>
where
  A::Item: Debug,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Setter")
      .field("source", &self.0.target.source_id())
      .field("snapshot", &self.0.snapshot)
      .finish()
  }
}
