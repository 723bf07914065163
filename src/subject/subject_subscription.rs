use std::{cell::Cell, rc::Rc};

use tracing::trace;

use super::subject_core::SubjectInner;
use crate::{context::MutRc, subscription::Subscription};

/// Subscription handle for a Subject.
///
/// Dropping the handle does not unsubscribe; call
/// [`unsubscribe`](Subscription::unsubscribe) or wrap it in a
/// [`SubscriptionGuard`](crate::subscription::SubscriptionGuard).
///
/// Clones share one cancellation state, so whichever clone unsubscribes
/// first removes the observer and every later call is a no-op.
pub struct SubjectSubscription<T> {
  observers: MutRc<SubjectInner<T>>,
  id: usize,
  closed: Rc<Cell<bool>>,
}

impl<T> SubjectSubscription<T> {
  pub(crate) fn new(observers: MutRc<SubjectInner<T>>, id: usize) -> Self {
    Self { observers, id, closed: Rc::new(Cell::new(false)) }
  }
}

impl<T> Clone for SubjectSubscription<T> {
  fn clone(&self) -> Self {
    Self { observers: self.observers.clone(), id: self.id, closed: self.closed.clone() }
  }
}

impl<T> Subscription for SubjectSubscription<T> {
  fn unsubscribe(self) {
    if self.closed.replace(true) {
      return;
    }
    // The observer is dropped after the borrow ends, its captures may touch
    // this subject again.
    let _ob = self.observers.rc_deref_mut().subscribers.remove(self.id);
    trace!(observer = self.id, "unsubscribed");
  }

  fn is_closed(&self) -> bool { self.closed.get() }
}
