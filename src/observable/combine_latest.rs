use std::rc::Rc;

use crate::{
  context::{MutRc, SourceId},
  observable::ObservableValue,
  subscription::TupleSubscription,
};

/// Derived source produced by
/// [`ObservableExt::combine_latest`](super::ObservableExt::combine_latest).
pub struct CombineLatest<A, B, F> {
  a: A,
  b: B,
  func: Rc<F>,
  id: SourceId,
}

impl<A, B, F> CombineLatest<A, B, F> {
  pub fn new(a: A, b: B, func: F) -> Self { Self { a, b, func: Rc::new(func), id: SourceId::next() } }
}

impl<A: Clone, B: Clone, F> Clone for CombineLatest<A, B, F> {
  fn clone(&self) -> Self {
    Self { a: self.a.clone(), b: self.b.clone(), func: self.func.clone(), id: self.id }
  }
}

struct Latest<A, B> {
  a: Option<A>,
  b: Option<B>,
}

impl<A: Clone, B: Clone> Latest<A, B> {
  fn pair(&self) -> Option<(A, B)> {
    match (&self.a, &self.b) {
      (Some(a), Some(b)) => Some((a.clone(), b.clone())),
      _ => None,
    }
  }
}

impl<A, B, F, U> ObservableValue for CombineLatest<A, B, F>
where
  A: ObservableValue,
  B: ObservableValue,
  A::Item: Clone + 'static,
  B::Item: Clone + 'static,
  F: Fn(A::Item, B::Item) -> U + 'static,
{
  type Item = U;
  type Unsub = TupleSubscription<A::Unsub, B::Unsub>;

  fn subscribe<O>(&self, on_next: O) -> Self::Unsub
  where
    O: Fn(U) + 'static,
  {
    let latest = MutRc::own(Latest { a: None, b: None });
    let func = self.func.clone();
    let emit = Rc::new(move |(a, b): (A::Item, B::Item)| on_next(func(a, b)));

    let (c_latest, c_emit) = (latest.clone(), emit.clone());
    let unsub_a = self.a.subscribe(move |v| {
      let pair = {
        let mut latest = c_latest.rc_deref_mut();
        latest.a = Some(v);
        latest.pair()
      };
      if let Some(pair) = pair {
        c_emit(pair);
      }
    });
    let unsub_b = self.b.subscribe(move |v| {
      let pair = {
        let mut latest = latest.rc_deref_mut();
        latest.b = Some(v);
        latest.pair()
      };
      if let Some(pair) = pair {
        emit(pair);
      }
    });

    TupleSubscription::new(unsub_a, unsub_b)
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.id }
}
