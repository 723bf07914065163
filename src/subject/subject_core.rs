use std::{collections::VecDeque, rc::Rc};

use tracing::trace;

use super::{
  subject_subscription::SubjectSubscription,
  subscribers::{BoxedObserver, Snapshot, Subscribers},
};
use crate::{
  context::{MutRc, SourceId},
  observable::ObservableValue,
};

/// Subject: a hot source that multicasts every pushed value to its current
/// observers.
///
/// This is the smallest observable-subject capability the crate needs:
/// `subscribe` and `next`. It has no completion or error channel and does not
/// replay; an observer only sees values pushed after it subscribed.
///
/// # Notification order
///
/// - Within one `next`, observers are called synchronously in subscription
///   order, before `next` returns.
/// - The observer list is snapshotted when `next` is called. An observer that
///   subscribes during the pass is not visited; an observer that is
///   unsubscribed during the pass is skipped if its turn has not come yet.
/// - Calling `next` from inside an observer does not recurse. The value is
///   queued together with its own snapshot and delivered after the current
///   pass, so every observer sees values in push order.
///
/// No borrow of the subject is held while observers run, so callbacks may
/// freely subscribe, unsubscribe and push.
///
/// # Example
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxatom::prelude::*;
///
/// let subject = Subject::new();
/// let results = Rc::new(RefCell::new(vec![]));
/// let c_results = results.clone();
///
/// let sub = subject.subscribe(move |v| c_results.borrow_mut().push(v));
/// subject.next(1);
/// subject.next(2);
/// sub.unsubscribe();
/// subject.next(3);
/// assert_eq!(*results.borrow(), vec![1, 2]);
/// ```
pub struct Subject<T> {
  pub(crate) inner: MutRc<SubjectInner<T>>,
  id: SourceId,
}

pub(crate) struct SubjectInner<T> {
  pub(crate) subscribers: Subscribers<BoxedObserver<T>>,
  emitting: bool,
  pending: VecDeque<Emission<T>>,
}

struct Emission<T> {
  value: T,
  observers: Snapshot<BoxedObserver<T>>,
}

impl<T> Subject<T> {
  pub fn new() -> Self {
    let inner = SubjectInner {
      subscribers: Subscribers::default(),
      emitting: false,
      pending: VecDeque::new(),
    };
    Self { inner: MutRc::own(inner), id: SourceId::next() }
  }

  /// Get the number of current subscribers.
  pub fn observer_count(&self) -> usize { self.inner.rc_deref().subscribers.len() }

  /// Check if there are no subscribers.
  pub fn is_empty(&self) -> bool { self.inner.rc_deref().subscribers.is_empty() }

  #[inline]
  pub fn source_id(&self) -> SourceId { self.id }
}

impl<T: Clone + 'static> Subject<T> {
  /// Register `on_next` for every value pushed from now on.
  pub fn subscribe<F>(&self, on_next: F) -> SubjectSubscription<T>
  where
    F: Fn(T) + 'static,
  {
    let observer: BoxedObserver<T> = Rc::new(on_next);
    let id = self.inner.rc_deref_mut().subscribers.add(observer);
    trace!(source = ?self.id, observer = id, "subscribed");
    SubjectSubscription::new(self.inner.clone(), id)
  }

  /// Push `value` to every observer registered right now.
  ///
  /// There is no equality short-circuit: pushing a value equal to the last
  /// one notifies again. A push made from inside an observer of this subject
  /// returns at once and is delivered after the current pass.
  pub fn next(&self, value: T) {
    let first = {
      let mut inner = self.inner.rc_deref_mut();
      let emission = Emission { value, observers: inner.subscribers.snapshot() };
      if inner.emitting {
        trace!(source = ?self.id, "queued re-entrant emission");
        inner.pending.push_back(emission);
        return;
      }
      inner.emitting = true;
      emission
    };

    let _guard = EmittingGuard(&self.inner);
    let mut emission = first;
    loop {
      self.deliver(emission);
      let next = self.inner.rc_deref_mut().pending.pop_front();
      match next {
        Some(queued) => emission = queued,
        None => break,
      }
    }
  }

  fn deliver(&self, emission: Emission<T>) {
    let Emission { value, observers } = emission;
    trace!(source = ?self.id, observers = observers.len(), "emit");
    let mut iter = observers.into_iter().peekable();
    while let Some((id, observer)) = iter.next() {
      let live = self.inner.rc_deref().subscribers.contains(id);
      if !live {
        continue;
      }
      if iter.peek().is_some() {
        observer(value.clone());
      } else {
        observer(value);
        break;
      }
    }
  }
}

/// Clears the emitting flag when a pass ends, including by unwinding out of
/// an observer. Queued emissions are dropped in the unwinding case.
struct EmittingGuard<'a, T>(&'a MutRc<SubjectInner<T>>);

impl<T> Drop for EmittingGuard<'_, T> {
  fn drop(&mut self) {
    let dropped = match self.0.try_rc_deref_mut() {
      Some(mut inner) => {
        inner.emitting = false;
        std::mem::take(&mut inner.pending)
      }
      None => VecDeque::new(),
    };
    drop(dropped);
  }
}

impl<T> Default for Subject<T> {
  fn default() -> Self { Self::new() }
}

impl<T> Clone for Subject<T> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone(), id: self.id } }
}

impl<T> std::fmt::Debug for Subject<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subject")
      .field("id", &self.id)
      .field("observers", &self.observer_count())
      .finish()
  }
}

impl<T: Clone + 'static> ObservableValue for Subject<T> {
  type Item = T;
  type Unsub = SubjectSubscription<T>;

  fn subscribe<F>(&self, on_next: F) -> Self::Unsub
  where
    F: Fn(T) + 'static,
  {
    Subject::subscribe(self, on_next)
  }

  fn source_id(&self) -> SourceId { self.id }
}
