//! Shared stateful cells.

use std::fmt::{Debug, Formatter};

use crate::{
  context::{MutRc, SourceId},
  observable::ObservableValue,
  subject::{Subject, SubjectSubscription},
};

/// A source that also holds a current value which can be read synchronously
/// and replaced.
///
/// Bindings seed themselves from [`value`](Stateful::value) and setters write
/// through [`next`](Stateful::next). [`Atom`] is the stock implementation;
/// anything else holding a current value can implement this to be bound the
/// same way.
pub trait Stateful: ObservableValue {
  /// The current value. No side effects.
  fn value(&self) -> Self::Item;

  /// Replace the current value, then notify every observer with it.
  ///
  /// Observers are notified before `next` returns, except when it is called
  /// from inside an observer of the same source: the value is stored at once
  /// but its notification is queued behind the pass in progress.
  fn next(&self, value: Self::Item);
}

/// Atom: a mutable, observable single-value container shared across
/// consumers.
///
/// An atom is a [`Subject`] plus the last value pushed into it. Handles are
/// cheap to clone and all clones are the same atom; it lives as long as
/// somebody holds a handle.
///
/// Subscribing does not replay the current value, observers only see later
/// pushes. Every push notifies, even when the new value equals the old one.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxatom::prelude::*;
///
/// let count = Atom::of(1);
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let sub = count.subscribe(move |v| c_seen.borrow_mut().push(v));
///
/// count.next(2);
/// assert_eq!(count.value(), 2);
/// sub.unsubscribe();
/// count.next(3);
/// assert_eq!(*seen.borrow(), vec![2]);
/// ```
pub struct Atom<T> {
  subject: Subject<T>,
  value: MutRc<T>,
}

impl<T> Atom<T> {
  pub fn new(initial: T) -> Self { Self { subject: Subject::new(), value: MutRc::own(initial) } }

  /// Alias of [`Atom::new`].
  #[inline]
  pub fn of(initial: T) -> Self { Self::new(initial) }

  /// Number of live observers.
  pub fn observer_count(&self) -> usize { self.subject.observer_count() }

  #[inline]
  pub fn source_id(&self) -> SourceId { self.subject.source_id() }
}

impl<T: Clone + 'static> Atom<T> {
  /// The current value.
  pub fn value(&self) -> T { self.value.rc_deref().clone() }

  /// Replace the current value and notify observers synchronously, in
  /// subscription order.
  ///
  /// A nested call made from one of this atom's observers updates the value
  /// immediately, but returns before anyone sees it. Its notification runs
  /// once the outer pass finishes, so every observer sees pushes in order.
  pub fn next(&self, value: T) {
    *self.value.rc_deref_mut() = value.clone();
    self.subject.next(value);
  }

  /// Alias of [`Atom::next`].
  #[inline]
  pub fn set(&self, value: T) { self.next(value) }

  pub fn subscribe<F>(&self, on_next: F) -> SubjectSubscription<T>
  where
    F: Fn(T) + 'static,
  {
    self.subject.subscribe(on_next)
  }
}

impl<T> Clone for Atom<T> {
  fn clone(&self) -> Self { Self { subject: self.subject.clone(), value: self.value.clone() } }
}

impl<T: Debug> Debug for Atom<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Atom")
      .field("id", &self.source_id())
      .field("value", &self.value)
      .field("observers", &self.observer_count())
      .finish()
  }
}

impl<T: Clone + 'static> ObservableValue for Atom<T> {
  type Item = T;
  type Unsub = SubjectSubscription<T>;

  fn subscribe<F>(&self, on_next: F) -> Self::Unsub
  where
    F: Fn(T) + 'static,
  {
    Atom::subscribe(self, on_next)
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.subject.source_id() }
}

impl<T: Clone + 'static> Stateful for Atom<T> {
  #[inline]
  fn value(&self) -> T { Atom::value(self) }

  #[inline]
  fn next(&self, value: T) { Atom::next(self, value) }
}
