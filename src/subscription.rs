//! Subscription handles.
//!
//! A subscription is the control handle returned by subscribing to a source.
//! Unsubscribing it guarantees the observer is never invoked again.

mod boxed;
mod tuple;

pub use boxed::*;
pub use tuple::*;

/// Handle to cancel an active subscription.
pub trait Subscription {
  /// Stop delivery to the observer this handle belongs to.
  ///
  /// Calling it on a subscription that is already closed is a no-op.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// The unit subscription owns nothing and is always closed.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<S: Subscription> Subscription for Option<S> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(s) = self {
      s.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  /// Give the subscription back without unsubscribing it.
  pub fn into_inner(mut self) -> Option<T> { self.0.take() }

  pub fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.take().unsubscribe() }
}

/// Extension to turn any subscription into a guard.
pub trait SubscriptionExt: Subscription + Sized {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard::new(self) }
}

impl<S: Subscription> SubscriptionExt for S {}
