//! End-to-end scenarios: atoms shared between components, derived selectors
//! and async sources surfacing errors as values.

use std::{cell::RefCell, rc::Rc};

use rxatom::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

#[test]
fn two_components_share_one_atom() {
  init_tracing();
  let cell = Atom::of(1);
  let mut a = Component::mount(|hooks| use_stateful(hooks, &cell));
  let mut b = Component::mount(|hooks| use_stateful(hooks, &cell));

  a.output().1.set(2);
  assert!(a.flush());
  assert!(b.flush());
  assert_eq!((a.output().0, b.output().0), (2, 2));

  a.output().1.update(|v| v * 10);
  a.flush();
  b.flush();
  assert_eq!((a.output().0, b.output().0), (20, 20));
  assert_eq!(cell.value(), 20);

  a.unmount();
  b.unmount();
  assert_eq!(cell.observer_count(), 0);
}

#[test]
fn derived_source_maps_int_to_string() {
  init_tracing();
  let cell = Atom::of(0);
  let as_text = cell.clone().map(|v: i32| v.to_string());
  let mut view = Component::mount(|hooks| use_observable(hooks, &as_text));
  assert_eq!(*view.output(), None);

  cell.next(5);
  view.flush();
  assert_eq!(view.output().as_deref(), Some("5"));
}

#[test]
fn first_render_sees_value_at_bind_time() {
  init_tracing();
  let cell = Atom::of("before");
  let renders = Rc::new(RefCell::new(vec![]));
  let c_renders = renders.clone();
  let mut view = Component::mount(|hooks| {
    let value = use_stateful_value(hooks, &cell);
    c_renders.borrow_mut().push(value);
  });

  cell.next("after");
  view.flush();
  assert_eq!(*renders.borrow(), vec!["before", "after"]);
}

#[test]
fn last_write_wins_between_components() {
  init_tracing();
  let cell = Atom::of(1);
  let mut a = Component::mount(|hooks| use_stateful(hooks, &cell));
  let mut b = Component::mount(|hooks| use_stateful(hooks, &cell));
  let (set_a, set_b) = (a.output().1.clone(), b.output().1.clone());

  set_a.update(|v| v + 1);
  set_b.update(|v| v + 100);
  a.flush();
  b.flush();

  assert_eq!(cell.value(), 101);
  assert_eq!((a.output().0, b.output().0), (101, 101));
}

#[test]
fn selector_over_two_atoms() {
  init_tracing();
  let first = Atom::of("Adam");
  let last = Atom::of("Zima");
  let full_name = with_current(first.clone())
    .combine_latest(with_current(last.clone()), |f: &str, l: &str| format!("{f} {l}"));
  let mut view = Component::mount(|hooks| use_observable_value(hooks, &full_name, String::new()));
  assert_eq!(view.output(), "Adam Zima");

  last.next("Obrok");
  view.flush();
  assert_eq!(view.output(), "Adam Obrok");
}

#[cfg(feature = "futures-source")]
mod async_sources {
  use std::fmt;

  use futures::{channel::oneshot, executor::LocalPool, future::Future};

  use super::*;

  #[derive(Clone, Debug, PartialEq)]
  struct User {
    id: u32,
    first_name: &'static str,
    last_name: &'static str,
  }

  const USERS: [User; 2] = [
    User { id: 1, first_name: "Adam", last_name: "Zima" },
    User { id: 2, first_name: "Beata", last_name: "Obrok" },
  ];

  #[derive(Clone, Debug, PartialEq)]
  enum FetchError {
    NotFound(u32),
  }

  impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      match self {
        FetchError::NotFound(_) => f.write_str("User not found"),
      }
    }
  }

  #[derive(Clone, Debug, PartialEq)]
  enum UserState {
    Loading,
    Success(User),
    Error(FetchError),
  }

  fn fetch_user(id: u32) -> impl Future<Output = Result<User, FetchError>> {
    async move {
      USERS
        .iter()
        .find(|user| user.id == id)
        .cloned()
        .ok_or(FetchError::NotFound(id))
    }
  }

  fn text(state: &UserState) -> String {
    match state {
      UserState::Loading => "Loading...".into(),
      UserState::Success(user) => format!("Hi {} {}", user.first_name, user.last_name),
      UserState::Error(err) => format!("Error fetching user: {err}"),
    }
  }

  #[test]
  fn component_follows_atom_through_async_fetches() {
    init_tracing();
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let user_id = Atom::of(1u32);
    let current_user = with_current(user_id.clone()).switch_map(move |id| {
      from_future(fetch_user(id), spawner.clone()).map(|res| match res {
        Ok(user) => UserState::Success(user),
        Err(err) => UserState::Error(err),
      })
    });

    let mut view = Component::mount(|hooks| {
      let (id, set_id) = use_stateful(hooks, &user_id);
      let state = use_observable_value(hooks, &current_user, UserState::Loading);
      (id, set_id, text(&state))
    });
    assert_eq!(view.output().2, "Loading...");

    pool.run_until_stalled();
    view.flush();
    assert_eq!(view.output().2, "Hi Adam Zima");

    view.output().1.set(3);
    pool.run_until_stalled();
    view.flush();
    assert_eq!(view.output().0, 3);
    assert_eq!(view.output().2, "Error fetching user: User not found");

    view.output().1.set(2);
    pool.run_until_stalled();
    view.flush();
    assert_eq!(view.output().2, "Hi Beata Obrok");

    view.unmount();
    assert_eq!(user_id.observer_count(), 0);
  }

  #[test]
  fn rejected_source_surfaces_error_value() {
    init_tracing();
    let mut pool = LocalPool::new();
    let (tx, rx) = oneshot::channel::<u32>();
    let source = from_future(async move { rx.await.map_err(|_| "request dropped") }, pool.spawner());

    let mut view = Component::mount(|hooks| use_observable(hooks, &source));
    assert_eq!(*view.output(), None);

    drop(tx);
    pool.run_until_stalled();
    assert!(view.flush());
    assert_eq!(*view.output(), Some(Err("request dropped")));
  }

  #[test]
  fn superseded_request_never_lands() {
    init_tracing();
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let pending = Rc::new(RefCell::new(Vec::new()));
    let c_pending = pending.clone();
    let query = Atom::of("a");
    let results = query.clone().switch_map(move |q: &'static str| {
      let (tx, rx) = oneshot::channel::<String>();
      c_pending.borrow_mut().push(tx);
      from_future(async move { rx.await.unwrap_or_default() }, spawner.clone()).map(move |r| format!("{q}:{r}"))
    });

    let mut view = Component::mount(|hooks| use_observable(hooks, &results));
    query.next("b");
    query.next("c");
    pool.run_until_stalled();

    let senders: Vec<_> = pending.borrow_mut().drain(..).collect();
    for (i, tx) in senders.into_iter().enumerate() {
      let _ = tx.send(i.to_string());
    }
    pool.run_until_stalled();
    view.flush();
    assert_eq!(view.output().as_deref(), Some("c:1"));
  }
}
