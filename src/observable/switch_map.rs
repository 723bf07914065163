use std::rc::Rc;

use tracing::trace;

use crate::{
  context::{MutRc, SourceId},
  observable::ObservableValue,
  subscription::{BoxedSubscription, Subscription, TupleSubscription},
};

/// Derived source produced by
/// [`ObservableExt::switch_map`](super::ObservableExt::switch_map).
///
/// Each value of the source is mapped to an inner source. Only the latest
/// inner source is subscribed: when a new one is produced, the previous inner
/// subscription is released before the new one is acquired, so a slow inner
/// source (e.g. a request) can never deliver after it has been superseded.
pub struct SwitchMap<S, F> {
  source: S,
  func: Rc<F>,
  id: SourceId,
}

impl<S, F> SwitchMap<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func: Rc::new(func), id: SourceId::next() } }
}

impl<S: Clone, F> Clone for SwitchMap<S, F> {
  fn clone(&self) -> Self { Self { source: self.source.clone(), func: self.func.clone(), id: self.id } }
}

/// Subscription of the currently active inner source.
pub struct InnerSubscription(MutRc<Option<BoxedSubscription>>);

impl Subscription for InnerSubscription {
  fn unsubscribe(self) {
    let inner = self.0.rc_deref_mut().take();
    inner.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().is_closed() }
}

pub type SwitchMapSubscription<SrcSub> = TupleSubscription<SrcSub, InnerSubscription>;

impl<S, F, Inner> ObservableValue for SwitchMap<S, F>
where
  S: ObservableValue,
  F: Fn(S::Item) -> Inner + 'static,
  Inner: ObservableValue,
{
  type Item = Inner::Item;
  type Unsub = SwitchMapSubscription<S::Unsub>;

  fn subscribe<O>(&self, on_next: O) -> Self::Unsub
  where
    O: Fn(Inner::Item) + 'static,
  {
    let on_next = Rc::new(on_next);
    let current: MutRc<Option<BoxedSubscription>> = MutRc::own(None);
    let func = self.func.clone();
    let c_current = current.clone();
    let id = self.id;

    let outer = self.source.subscribe(move |value| {
      // Take the previous inner subscription out before unsubscribing it, the
      // slot must not be borrowed while foreign code runs.
      let previous = c_current.rc_deref_mut().take();
      if previous.is_some() {
        trace!(source = ?id, "switching inner source");
      }
      previous.unsubscribe();

      let on_next = on_next.clone();
      let inner = func(value).subscribe(move |v| on_next(v));
      *c_current.rc_deref_mut() = Some(BoxedSubscription::new(inner));
    });

    TupleSubscription::new(outer, InnerSubscription(current))
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.id }
}
