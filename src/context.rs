//! Single-threaded shared state primitives.
//!
//! Everything in this crate runs on one cooperative thread: the host UI
//! framework drives renders and sources push synchronously. Shared state is
//! therefore `Rc<RefCell<_>>` behind [`MutRc`], and no borrow is ever held
//! while user callbacks run.

use std::{
  cell::{Ref, RefCell, RefMut},
  fmt::{Debug, Formatter},
  rc::Rc,
  sync::atomic::{AtomicU64, Ordering},
};

/// Reference counted, interior mutable pointer for local contexts.
#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  #[inline]
  pub fn rc_deref(&self) -> Ref<'_, T> { self.0.borrow() }

  #[inline]
  pub fn rc_deref_mut(&self) -> RefMut<'_, T> { self.0.borrow_mut() }

  /// Borrow mutably only if nobody else is currently borrowing.
  #[inline]
  pub fn try_rc_deref_mut(&self) -> Option<RefMut<'_, T>> { self.0.try_borrow_mut().ok() }

  /// Whether both handles point at the same allocation.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<T> for MutRc<T> {
  fn from(t: T) -> Self { Self::own(t) }
}

impl<T: Debug> Debug for MutRc<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.0.try_borrow() {
      Ok(inner) => f.debug_tuple("MutRc").field(&*inner).finish(),
      Err(_) => f.write_str("MutRc(<borrowed>)"),
    }
  }
}

/// Identity of a value source.
///
/// Every source mints a fresh id when it is constructed and every clone of
/// that source shares it. Two sources compare equal only if one was cloned
/// from the other, never because they happen to produce the same values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SourceId(u64);

impl SourceId {
  /// Mint an id that no other source has.
  pub fn next() -> Self {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
  }
}
