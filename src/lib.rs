//! # rxatom: shared reactive atoms for hook-based UIs
//!
//! Components subscribe to externally held values ("atoms"), re-render when
//! they change, and write new values back.
//!
//! ```rust
//! use rxatom::prelude::*;
//!
//! let count = Atom::of(1);
//!
//! let mut a = Component::mount(|hooks| use_stateful(hooks, &count));
//! let mut b = Component::mount(|hooks| use_stateful_value(hooks, &count));
//!
//! a.output().1.set(2);
//! a.flush();
//! b.flush();
//! assert_eq!((a.output().0, *b.output()), (2, 2));
//!
//! a.output().1.update(|v| v * 10);
//! a.flush();
//! b.flush();
//! assert_eq!((a.output().0, *b.output()), (20, 20));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Atom`] | Shared cell: current value + change notifications |
//! | [`ObservableValue`] | Anything a component can subscribe to |
//! | [`ObservableBinding`] | One component's subscription and rendered value |
//! | [`Setter`] | Writes literals or updater results back into a cell |
//! | [`Component`] / [`Hooks`] | Minimal host driving renders |
//!
//! Everything runs on one thread. Sources push synchronously and the host
//! decides when to render; nothing here schedules work of its own, except
//! [`from_future`] which hands its future to the executor you pass in.
//!
//! ## Feature Flags
//!
//! - **`futures-source`** (default): [`from_future`], async sources on a
//!   `futures` local executor.
//!
//! [`Atom`]: atom::Atom
//! [`ObservableValue`]: observable::ObservableValue
//! [`ObservableBinding`]: binding::ObservableBinding
//! [`Setter`]: setter::Setter
//! [`Component`]: host::Component
//! [`Hooks`]: host::Hooks
//! [`from_future`]: observable::from_future

pub mod atom;
pub mod binding;
pub mod context;
pub mod hooks;
pub mod host;
pub mod observable;
pub mod prelude;
pub mod setter;
pub mod subject;
pub mod subscription;

pub use prelude::*;
