//! The subscription bridge between a push-based source and a pull-based
//! render cycle.
//!
//! An [`ObservableBinding`] owns the value a component instance renders and
//! at most one live subscription. It is framework independent: the host
//! calls [`sync`](ObservableBinding::sync) on every render with the source it
//! wants to observe, and drops the binding on unmount.

use tracing::debug;

use crate::{
  context::{MutRc, SourceId},
  host::RenderTrigger,
  observable::ObservableValue,
  subscription::{BoxedSubscription, SubscriptionGuard},
};

/// Per-instance binding state plus the scoped subscription feeding it.
///
/// # Lifecycle
///
/// - `new`: unmounted, holds the seed (or nothing).
/// - `sync(source)`: if no source is active, or the active one has a
///   different [`SourceId`], the old subscription is released first and then
///   `source` is subscribed. Syncing the same identity again is a no-op, so
///   exactly one subscription is live per binding.
/// - every emission overwrites the value, bumps [`version`] and requests a
///   render through the [`RenderTrigger`]. Emissions made synchronously while
///   `sync` subscribes skip the request: the caller reads the value right
///   after `sync` returns.
/// - `deactivate` / drop: the subscription is released. Dropping also covers
///   unwinding, so a panicking render never leaks a subscription.
///
/// Identity is by [`SourceId`], never by value: a freshly built but
/// equivalent source forces a re-subscription.
///
/// [`version`]: ObservableBinding::version
///
/// ```rust
/// use rxatom::prelude::*;
///
/// let atom = Atom::of(1);
/// let trigger = RenderTrigger::new();
/// let mut binding = ObservableBinding::new(Some(atom.value()), trigger.clone());
///
/// binding.sync(&atom);
/// atom.next(2);
/// assert_eq!(binding.value(), Some(2));
/// assert!(trigger.is_requested());
///
/// drop(binding);
/// assert_eq!(atom.observer_count(), 0);
/// ```
pub struct ObservableBinding<T> {
  state: MutRc<BindingState<T>>,
  active: Option<ActiveSource>,
  trigger: RenderTrigger,
}

struct BindingState<T> {
  value: Option<T>,
  version: u64,
  acquiring: bool,
}

struct ActiveSource {
  id: SourceId,
  _subscription: SubscriptionGuard<BoxedSubscription>,
}

impl<T> ObservableBinding<T> {
  pub fn new(seed: Option<T>, trigger: RenderTrigger) -> Self {
    Self { state: MutRc::own(BindingState { value: seed, version: 0, acquiring: false }), active: None, trigger }
  }

  /// Number of emissions received so far.
  pub fn version(&self) -> u64 { self.state.rc_deref().version }

  /// Identity of the source currently subscribed, if any.
  pub fn source_id(&self) -> Option<SourceId> { self.active.as_ref().map(|a| a.id) }

  pub fn is_active(&self) -> bool { self.active.is_some() }

  /// Release the current subscription. Calling it again is a no-op.
  pub fn deactivate(&mut self) {
    if let Some(active) = self.active.take() {
      debug!(source = ?active.id, "binding released subscription");
      drop(active);
    }
  }
}

impl<T: Clone + 'static> ObservableBinding<T> {
  /// The last emitted value, or the seed if nothing was emitted yet.
  pub fn value(&self) -> Option<T> { self.state.rc_deref().value.clone() }

  /// Make `source` the one observed source of this binding.
  pub fn sync<S>(&mut self, source: &S)
  where
    S: ObservableValue<Item = T>,
  {
    let id = source.source_id();
    if self.source_id() == Some(id) {
      return;
    }
    self.deactivate();

    let state = self.state.clone();
    let trigger = self.trigger.clone();
    self.state.rc_deref_mut().acquiring = true;
    let subscription = source.subscribe(move |value| {
      let acquiring = {
        let mut state = state.rc_deref_mut();
        state.value = Some(value);
        state.version += 1;
        state.acquiring
      };
      if !acquiring {
        trigger.request();
      }
    });
    self.state.rc_deref_mut().acquiring = false;
    debug!(source = ?id, "binding acquired subscription");
    self.active = Some(ActiveSource {
      id,
      _subscription: SubscriptionGuard::new(BoxedSubscription::new(subscription)),
    });
  }
}

impl<T> Drop for ObservableBinding<T> {
  fn drop(&mut self) { self.deactivate(); }
}
