//! Shared plumbing for the runnable stockdash demos.
pub mod common;
