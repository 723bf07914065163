//! Prelude module for convenient imports

pub use crate::{
  atom::{Atom, Stateful},
  binding::ObservableBinding,
  context::{MutRc, SourceId},
  hooks::{use_observable, use_observable_value, use_stateful, use_stateful_value},
  host::{Component, Hooks, RenderTrigger},
  observable::*,
  setter::{Setter, Update},
  subject::{Subject, SubjectSubscription},
  subscription::*,
};
