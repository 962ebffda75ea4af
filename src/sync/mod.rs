//! Staleness and coalescing primitives for fire-and-settle requests.
//!
//! State transitions in the engine happen on discrete input or
//! network-completion events. These primitives keep late responses from
//! overwriting newer state: [`Generation`] drops any response that is not
//! the latest issued request, and [`Debouncer`] coalesces rapid input
//! events into a single outbound call with explicit cancellation on
//! teardown.

mod debounce;
mod generation;

pub use debounce::Debouncer;
pub use generation::Generation;
