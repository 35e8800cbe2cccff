//! Route handlers, grouped by view.

pub mod matches;
pub mod players;
pub mod refresh;
pub mod standings;
pub mod teams;
