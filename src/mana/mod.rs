//! Card cost adjustment.
//!
//! - [`ManaFilterEntry`]: `(amount, minimum, predicate)`
//! - [`ManaFilterChain`]: a player's ordered entries and the cost fold

mod filter;

pub use filter::{CardFilter, FilterId, ManaFilterChain, ManaFilterEntry};
