mod subject_core;
mod subject_subscription;
mod subscribers;

pub use subject_core::*;
pub use subject_subscription::*;
pub use subscribers::*;
