use std::rc::Rc;

use smallvec::SmallVec;

/// Type-erased observer stored by a subject.
///
/// Observers are `Fn` behind an `Rc` so a notification pass can work from a
/// snapshot of the list without holding a borrow of it while user code runs.
pub type BoxedObserver<T> = Rc<dyn Fn(T)>;

/// Observers captured at the moment of a push, in subscription order.
pub(crate) type Snapshot<Ob> = SmallVec<[(usize, Ob); 2]>;

/// Subscribers container with ID-based management.
///
/// This struct holds the list of observers subscribed to a Subject, in
/// subscription order. Each observer gets a unique, never reused ID so a
/// subscription handle can remove exactly its own observer.
///
/// # Design
///
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 observers.
/// - **Snapshots**: `snapshot()` copies the `(id, observer)` pairs so a
///   broadcast can re-check `contains(id)` before each delivery.
pub struct Subscribers<Ob> {
  next_id: usize,
  items: SmallVec<[(usize, Ob); 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  /// Add an observer and return its unique ID.
  #[inline]
  pub fn add(&mut self, observer: Ob) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, observer));
    id
  }

  /// Remove an observer by ID.
  pub fn remove(&mut self, id: usize) -> Option<Ob> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  /// Check if an ID exists.
  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  pub(crate) fn snapshot(&self) -> Snapshot<Ob>
  where
    Ob: Clone,
  {
    self.items.iter().cloned().collect()
  }
}
