use std::rc::Rc;

use crate::{context::SourceId, observable::ObservableValue};

/// Derived source produced by [`ObservableExt::map`](super::ObservableExt::map).
///
/// Every `Map` built with `map` is a new source identity, clones share it.
pub struct Map<S, F> {
  source: S,
  func: Rc<F>,
  id: SourceId,
}

impl<S, F> Map<S, F> {
  pub fn new(source: S, func: F) -> Self { Self { source, func: Rc::new(func), id: SourceId::next() } }
}

impl<S: Clone, F> Clone for Map<S, F> {
  fn clone(&self) -> Self { Self { source: self.source.clone(), func: self.func.clone(), id: self.id } }
}

impl<S, F, U> ObservableValue for Map<S, F>
where
  S: ObservableValue,
  F: Fn(S::Item) -> U + 'static,
{
  type Item = U;
  type Unsub = S::Unsub;

  fn subscribe<O>(&self, on_next: O) -> Self::Unsub
  where
    O: Fn(U) + 'static,
  {
    let func = self.func.clone();
    self.source.subscribe(move |v| on_next(func(v)))
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.id }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn primitive_type() {
    let atom = Atom::of(100);
    let i = Rc::new(RefCell::new(0));
    let c_i = i.clone();
    let _sub = atom.clone().map(|v| v * 2).subscribe(move |v| *c_i.borrow_mut() += v);
    atom.next(3);
    atom.next(4);
    assert_eq!(*i.borrow(), 14);
  }

  #[test]
  fn identity_is_per_construction() {
    let atom = Atom::of(1);
    let a = atom.clone().map(|v| v + 1);
    let b = atom.clone().map(|v| v + 1);
    assert_ne!(a.source_id(), b.source_id());
    assert_eq!(a.source_id(), a.clone().source_id());
    assert_ne!(a.source_id(), atom.source_id());
  }

  #[test]
  fn unsubscribe_reaches_upstream() {
    let atom = Atom::of(1);
    let sub = atom.clone().map(|v| v + 1).subscribe(|_| {});
    assert_eq!(atom.observer_count(), 1);
    sub.unsubscribe();
    assert_eq!(atom.observer_count(), 0);
  }
}
