use std::{cell::Cell, future::Future, rc::Rc};

use futures::{
  future::{AbortHandle, Abortable, FutureExt, Shared},
  task::{LocalSpawn, LocalSpawnExt},
};
use tracing::{error, trace};

use crate::{context::SourceId, observable::ObservableValue, subscription::Subscription};

/// Converts a `Future` to a source that emits its output once.
///
/// Every subscription spawns its own task on `spawner`; the future itself is
/// polled only once and its output is shared. Even if the output is a
/// `Result::Err`, it is emitted as a normal value: a failed request is
/// something the UI renders, not an exception crossing the binding.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use futures::executor::LocalPool;
/// use rxatom::prelude::*;
///
/// let mut pool = LocalPool::new();
/// let source = from_future(async { Err::<u32, _>("not found") }, pool.spawner());
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _sub = source.subscribe(move |v| c_seen.borrow_mut().push(v));
/// assert!(seen.borrow().is_empty());
///
/// pool.run_until_stalled();
/// assert_eq!(*seen.borrow(), vec![Err::<u32, _>("not found")]);
/// ```
pub fn from_future<Fut, Sp>(future: Fut, spawner: Sp) -> FromFuture<Fut, Sp>
where
  Fut: Future,
  Fut::Output: Clone,
{
  FromFuture { future: future.shared(), spawner, id: SourceId::next() }
}

pub struct FromFuture<Fut: Future, Sp> {
  future: Shared<Fut>,
  spawner: Sp,
  id: SourceId,
}

impl<Fut, Sp> Clone for FromFuture<Fut, Sp>
where
  Fut: Future,
  Sp: Clone,
{
  fn clone(&self) -> Self {
    Self { future: self.future.clone(), spawner: self.spawner.clone(), id: self.id }
  }
}

/// Subscription to a [`FromFuture`] source.
///
/// Closed once the value has been delivered or the subscription has been
/// cancelled. Cancelling aborts the spawned task.
pub struct FutureSubscription {
  abort: AbortHandle,
  closed: Rc<Cell<bool>>,
}

impl Subscription for FutureSubscription {
  fn unsubscribe(self) {
    self.closed.set(true);
    self.abort.abort();
  }

  fn is_closed(&self) -> bool { self.closed.get() }
}

impl<Fut, Sp> ObservableValue for FromFuture<Fut, Sp>
where
  Fut: Future + 'static,
  Fut::Output: Clone + 'static,
  Sp: LocalSpawn,
{
  type Item = Fut::Output;
  type Unsub = FutureSubscription;

  fn subscribe<F>(&self, on_next: F) -> Self::Unsub
  where
    F: Fn(Fut::Output) + 'static,
  {
    let closed = Rc::new(Cell::new(false));
    let (abort, registration) = AbortHandle::new_pair();
    let c_closed = closed.clone();
    let id = self.id;
    let task = Abortable::new(self.future.clone(), registration).map(move |output| {
      // `closed` is checked again here: the task may already be woken when
      // the subscription is cancelled.
      if let Ok(value) = output {
        if !c_closed.replace(true) {
          trace!(source = ?id, "future resolved");
          on_next(value);
        }
      }
    });

    if let Err(err) = self.spawner.spawn_local(task) {
      error!(source = ?id, %err, "failed to spawn future source");
      closed.set(true);
    }
    FutureSubscription { abort, closed }
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.id }
}
