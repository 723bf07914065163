use crate::{
  atom::Stateful,
  context::SourceId,
  observable::ObservableValue,
};

/// Emits the current value of a stateful source synchronously on subscribe,
/// then every later change.
///
/// Stateful sources themselves never replay. Wrap one in `with_current` to
/// build derived selectors that start from the present value instead of
/// waiting for the next push.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxatom::prelude::*;
///
/// let name = Atom::of("adam");
/// let upper = with_current(name.clone()).map(|v: &str| v.to_uppercase());
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// let _sub = upper.subscribe(move |v| c_seen.borrow_mut().push(v));
/// name.next("beata");
/// assert_eq!(*seen.borrow(), vec!["ADAM", "BEATA"]);
/// ```
pub fn with_current<S: Stateful>(source: S) -> WithCurrent<S> {
  WithCurrent { source, id: SourceId::next() }
}

#[derive(Clone)]
pub struct WithCurrent<S> {
  source: S,
  id: SourceId,
}

impl<S> ObservableValue for WithCurrent<S>
where
  S: Stateful,
{
  type Item = S::Item;
  type Unsub = S::Unsub;

  fn subscribe<F>(&self, on_next: F) -> Self::Unsub
  where
    F: Fn(S::Item) + 'static,
  {
    on_next(self.source.value());
    self.source.subscribe(on_next)
  }

  #[inline]
  fn source_id(&self) -> SourceId { self.id }
}
