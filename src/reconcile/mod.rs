mod service;

pub use service::{check, update, Outcome, Plan, Reconciler, RECORD_TYPE};
