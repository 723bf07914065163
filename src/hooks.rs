//! Hook-style entry points over [`ObservableBinding`] and [`Setter`].
//!
//! Call them unconditionally, in the same order, on every render of a
//! component.

use crate::{
  atom::Stateful,
  binding::ObservableBinding,
  host::Hooks,
  observable::ObservableValue,
  setter::Setter,
};

/// Latest value emitted by `source`, or `seed` until the first emission.
///
/// The component re-renders on every emission. Passing a source with a
/// different identity releases the old subscription before subscribing the
/// new one.
pub fn use_observable_value<S>(hooks: &mut Hooks, source: &S, seed: S::Item) -> S::Item
where
  S: ObservableValue,
  S::Item: Clone + 'static,
{
  let trigger = hooks.trigger();
  let binding = hooks.use_slot(|| ObservableBinding::new(Some(seed.clone()), trigger));
  binding.sync(source);
  binding.value().unwrap_or(seed)
}

/// Latest value emitted by `source`, `None` until the first emission.
pub fn use_observable<S>(hooks: &mut Hooks, source: &S) -> Option<S::Item>
where
  S: ObservableValue,
  S::Item: Clone + 'static,
{
  let trigger = hooks.trigger();
  let binding = hooks.use_slot(|| ObservableBinding::new(None, trigger));
  binding.sync(source);
  binding.value()
}

/// Current value of a stateful source.
///
/// The binding is seeded with the value at mount, so the first render never
/// sees a placeholder.
pub fn use_stateful_value<A>(hooks: &mut Hooks, stateful: &A) -> A::Item
where
  A: Stateful,
  A::Item: Clone + 'static,
{
  bind_stateful(hooks, stateful)
}

/// Current value of a stateful source plus a setter writing back into it.
///
/// The setter is memoized: it keeps its identity until the bound value or
/// the source changes. Pushing a value equal to the current one keeps the
/// same setter. Updaters run against the value of the render that
/// produced the setter.
///
/// ```rust
/// use rxatom::prelude::*;
///
/// let name = Atom::of("Adam".to_string());
/// let mut component = Component::mount(|hooks| use_stateful(hooks, &name));
///
/// let (value, set_name) = component.output().clone();
/// assert_eq!(value, "Adam");
/// set_name.update(|v| v.to_uppercase());
///
/// component.flush();
/// assert_eq!(component.output().0, "ADAM");
/// ```
pub fn use_stateful<A>(hooks: &mut Hooks, stateful: &A) -> (A::Item, Setter<A>)
where
  A: Stateful + Clone + 'static,
  A::Item: Clone + PartialEq + 'static,
{
  let value = bind_stateful(hooks, stateful);
  let setter = hooks
    .use_memo((stateful.source_id(), value.clone()), || Setter::new(stateful.clone(), value.clone()));
  (value, setter)
}

fn bind_stateful<A>(hooks: &mut Hooks, stateful: &A) -> A::Item
where
  A: Stateful,
  A::Item: Clone + 'static,
{
  let trigger = hooks.trigger();
  let binding = hooks.use_slot(|| ObservableBinding::new(Some(stateful.value()), trigger));
  binding.sync(stateful);
  binding.value().unwrap_or_else(|| stateful.value())
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn gets_value_from_atom() {
    let name = Atom::of("Adam");
    let component = Component::mount(|hooks| use_stateful_value(hooks, &name));
    assert_eq!(*component.output(), "Adam");
    assert_eq!(name.observer_count(), 1);
  }

  #[test]
  fn gets_value_from_derived_source() {
    let name = Atom::of("Adam");
    let upper = with_current(name.clone()).map(|v: &str| v.to_uppercase());
    let component = Component::mount(|hooks| use_observable(hooks, &upper));
    assert_eq!(component.output().as_deref(), Some("ADAM"));
  }

  #[test]
  fn seeded_binding_waits_for_emission() {
    let subject = Subject::<i32>::new();
    let mut component = Component::mount(|hooks| use_observable_value(hooks, &subject, -1));
    assert_eq!(*component.output(), -1);
    assert!(!component.flush());

    subject.next(3);
    assert!(component.needs_render());
    component.flush();
    assert_eq!(*component.output(), 3);
  }

  #[test]
  fn unsubscribes_when_unmounted() {
    let name = Atom::of("Adam");
    let component = Component::mount(|hooks| use_observable_value(hooks, &name, "seed"));
    assert_eq!(name.observer_count(), 1);
    component.unmount();
    assert_eq!(name.observer_count(), 0);
  }

  #[test]
  fn rebuilt_source_resubscribes_every_render() {
    let count = Atom::of(1);
    let builds = Rc::new(RefCell::new(Vec::new()));
    let c_builds = builds.clone();
    let mut component = Component::mount(|hooks| {
      let doubled = count.clone().map(|v| v * 2);
      c_builds.borrow_mut().push(doubled.source_id());
      use_observable_value(hooks, &doubled, 0)
    });
    component.render();
    component.render();

    {
      let builds = builds.borrow();
      assert_eq!(builds.len(), 3);
      assert!(builds.windows(2).all(|w| w[0] != w[1]));
    }
    assert_eq!(count.observer_count(), 1);

    count.next(5);
    component.flush();
    assert_eq!(*component.output(), 10);
  }

  #[test]
  fn swapping_atoms_keeps_value_until_emission() {
    let first = Atom::of(1);
    let second = Atom::of(2);
    let use_second = Rc::new(RefCell::new(false));
    let c_use_second = use_second.clone();
    let mut component = Component::mount(|hooks| {
      let atom = if *c_use_second.borrow() { &second } else { &first };
      use_stateful_value(hooks, atom)
    });

    *use_second.borrow_mut() = true;
    component.render();
    assert_eq!(first.observer_count(), 0);
    assert_eq!(second.observer_count(), 1);
    assert_eq!(*component.output(), 1);

    second.next(20);
    component.flush();
    assert_eq!(*component.output(), 20);
  }

  #[test]
  fn sets_literal_value() {
    let name = Atom::of("Adam".to_string());
    let mut component = Component::mount(|hooks| use_stateful(hooks, &name));
    let (value, set_name) = component.output().clone();
    assert_eq!(value, "Adam");

    set_name.set("Beata".to_string());
    component.flush();
    assert_eq!(component.output().0, "Beata");
  }

  #[test]
  fn setter_identity_follows_value() {
    let count = Atom::of(1);
    let mut component = Component::mount(|hooks| use_stateful(hooks, &count));
    let (_, first) = component.output().clone();

    component.render();
    assert!(first.ptr_eq(&component.output().1));

    first.set(2);
    component.flush();
    assert!(!first.ptr_eq(&component.output().1));
    assert_eq!(*component.output().1.snapshot(), 2);
  }

  #[test]
  fn equal_push_keeps_setter() {
    let count = Atom::of(1);
    let mut component = Component::mount(|hooks| use_stateful(hooks, &count));
    let (_, first) = component.output().clone();

    count.next(1);
    assert!(component.flush());
    assert_eq!(component.output().0, 1);
    assert!(first.ptr_eq(&component.output().1));
  }

  #[test]
  fn swapping_atoms_replaces_setter() {
    let first = Atom::of(1);
    let second = Atom::of(1);
    let use_second = Rc::new(RefCell::new(false));
    let c_use_second = use_second.clone();
    let mut component = Component::mount(|hooks| {
      let atom = if *c_use_second.borrow() { &second } else { &first };
      use_stateful(hooks, atom)
    });
    let (_, set_first) = component.output().clone();

    *use_second.borrow_mut() = true;
    component.render();
    let (value, set_second) = component.output().clone();
    assert_eq!(value, 1);
    assert!(!set_first.ptr_eq(&set_second));

    set_second.set(5);
    assert_eq!(second.value(), 5);
    assert_eq!(first.value(), 1);
  }

  #[test]
  fn replaying_source_settles_at_mount() {
    let name = Atom::of("Adam");
    let renders = Rc::new(RefCell::new(0));
    let c_renders = renders.clone();
    let replaying = with_current(name.clone());
    let mut component = Component::mount(|hooks| {
      *c_renders.borrow_mut() += 1;
      use_observable(hooks, &replaying)
    });
    assert_eq!(*component.output(), Some("Adam"));
    assert!(!component.needs_render());
    assert!(!component.flush());
    assert_eq!(*renders.borrow(), 1);

    name.next("Beata");
    assert!(component.flush());
    assert_eq!(*component.output(), Some("Beata"));
    assert_eq!(*renders.borrow(), 2);
  }

  #[test]
  fn updaters_before_rerender_share_the_snapshot() {
    let count = Atom::of(1);
    let mut component = Component::mount(|hooks| use_stateful(hooks, &count));
    let (_, set_count) = component.output().clone();

    set_count.update(|v| v + 1);
    set_count.update(|v| v + 1);
    component.flush();
    assert_eq!(component.output().0, 2);
  }
}
