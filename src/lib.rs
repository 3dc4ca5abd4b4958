//! A bidirectional bump-allocated memory pool.
//!
//! [`Pool`] serves two disjoint allocation streams from opposite ends of one
//! fixed-capacity buffer: growable, reallocatable scratch from the head end,
//! and append-only, persistent reservations from the tail end. It is built
//! to back per-connection scratch memory in a request/response server,
//! where a connection admits many short-lived allocations plus a handful of
//! long-lived reservations, and the whole arena is cheaply reset between
//! request cycles.
//!
//! There is no general free: individual allocations cannot be released.
//! The only ways memory comes back are [`Pool::reallocate`] growing or
//! shrinking the single most-recently-allocated head-end block in place,
//! and [`Pool::reset`], which discards everything except at most one block
//! it relocates to the buffer's origin. See [`Pool`] for the full contract.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::inline_always)]

mod align;
mod config;
mod error;
mod pool;
mod storage;

pub use align::QUANTUM;
pub use config::PoolConfig;
pub use error::{PoolError, PoolResult};
pub use pool::Pool;
