//! A minimal hook host standing in for a UI framework's component model.
//!
//! The bindings in this crate only need three things from a framework: a
//! slot that survives across renders, a way to request another render, and
//! stable identities keyed on a dependency. [`Hooks`] provides exactly those,
//! and [`Component`] drives a render function through mount, re-render and
//! unmount. Framework integrations can reuse the bindings directly and ignore
//! this module.

use std::{any::Any, cell::Cell, rc::Rc};

use tracing::{debug, warn};

/// Upper bound on consecutive renders in one [`Component::flush`].
const MAX_FLUSH_RENDERS: usize = 64;

/// Shared "please render again" flag.
///
/// Bindings hold a clone and call [`request`](RenderTrigger::request) on every
/// emission; the host checks and clears it around renders.
#[derive(Clone, Default)]
pub struct RenderTrigger(Rc<TriggerState>);

#[derive(Default)]
struct TriggerState {
  requested: Cell<bool>,
  requests: Cell<u64>,
}

impl RenderTrigger {
  pub fn new() -> Self { Self::default() }

  pub fn request(&self) {
    self.0.requested.set(true);
    self.0.requests.set(self.0.requests.get() + 1);
  }

  pub fn is_requested(&self) -> bool { self.0.requested.get() }

  /// Total number of requests ever made.
  pub fn requests(&self) -> u64 { self.0.requests.get() }

  pub(crate) fn take(&self) -> bool { self.0.requested.replace(false) }
}

/// Ordered hook slots of one component instance.
///
/// Like any hook system, slots are matched by call order: a render must call
/// the same hooks in the same order every time. When a slot's type no longer
/// matches, that slot and every later one are dropped and rebuilt, which also
/// releases any subscription they held.
pub struct Hooks {
  slots: Vec<Box<dyn Any>>,
  cursor: usize,
  trigger: RenderTrigger,
}

impl Hooks {
  pub fn new() -> Self { Self { slots: Vec::new(), cursor: 0, trigger: RenderTrigger::new() } }

  /// The trigger that schedules another render of this component.
  pub fn trigger(&self) -> RenderTrigger { self.trigger.clone() }

  /// Persistent state for the current hook position, created by `init` on
  /// first use.
  pub fn use_slot<S: 'static>(&mut self, init: impl FnOnce() -> S) -> &mut S {
    let index = self.cursor;
    self.cursor += 1;

    if self.slots.get(index).is_some_and(|slot| !slot.is::<S>()) {
      warn!(index, "hook order changed between renders, discarding later hook state");
      self.truncate(index);
    }
    if index == self.slots.len() {
      self.slots.push(Box::new(init()));
    }
    match self.slots[index].downcast_mut::<S>() {
      Some(slot) => slot,
      None => unreachable!("hook slot {index} holds the requested type"),
    }
  }

  /// Value that keeps its identity while `key` stays equal.
  pub fn use_memo<K, V>(&mut self, key: K, init: impl FnOnce() -> V) -> V
  where
    K: PartialEq + 'static,
    V: Clone + 'static,
  {
    let slot = self.use_slot(|| None::<(K, V)>);
    if let Some((memo_key, value)) = slot.as_ref() {
      if *memo_key == key {
        return value.clone();
      }
    }
    let value = init();
    *slot = Some((key, value.clone()));
    value
  }

  fn render<R>(&mut self, render: &mut impl FnMut(&mut Hooks) -> R) -> R {
    self.cursor = 0;
    self.trigger.take();
    let output = render(self);
    if self.cursor < self.slots.len() {
      warn!(called = self.cursor, slots = self.slots.len(), "fewer hooks called than last render");
      self.truncate(self.cursor);
    }
    output
  }

  // Later hooks are released first.
  fn truncate(&mut self, len: usize) {
    while self.slots.len() > len {
      drop(self.slots.pop());
    }
  }
}

impl Default for Hooks {
  fn default() -> Self { Self::new() }
}

impl Drop for Hooks {
  fn drop(&mut self) { self.truncate(0); }
}

/// A mounted render function.
///
/// ```rust
/// use rxatom::prelude::*;
///
/// let name = Atom::of("Adam");
/// let mut component = Component::mount(|hooks| use_stateful_value(hooks, &name));
/// assert_eq!(*component.output(), "Adam");
///
/// name.next("Beata");
/// assert!(component.flush());
/// assert_eq!(*component.output(), "Beata");
///
/// component.unmount();
/// assert_eq!(name.observer_count(), 0);
/// ```
pub struct Component<F, R> {
  hooks: Hooks,
  render: F,
  output: R,
}

impl<F, R> Component<F, R>
where
  F: FnMut(&mut Hooks) -> R,
{
  /// First render.
  pub fn mount(mut render: F) -> Self {
    let mut hooks = Hooks::new();
    let output = hooks.render(&mut render);
    debug!(hooks = hooks.slots.len(), "component mounted");
    Self { hooks, render, output }
  }

  /// Output of the most recent render.
  pub fn output(&self) -> &R { &self.output }

  pub fn needs_render(&self) -> bool { self.hooks.trigger.is_requested() }

  pub fn trigger(&self) -> RenderTrigger { self.hooks.trigger() }

  /// Render unconditionally.
  pub fn render(&mut self) -> &R {
    self.output = self.hooks.render(&mut self.render);
    &self.output
  }

  /// Render while a render is requested. Returns whether anything rendered.
  pub fn flush(&mut self) -> bool {
    let mut rendered = 0;
    while self.needs_render() {
      if rendered == MAX_FLUSH_RENDERS {
        warn!(renders = rendered, "component keeps requesting renders, giving up this flush");
        break;
      }
      self.render();
      rendered += 1;
    }
    rendered > 0
  }

  /// Tear down every hook slot, releasing their subscriptions.
  pub fn unmount(self) {
    debug!(hooks = self.hooks.slots.len(), "component unmounting");
    drop(self);
  }
}
