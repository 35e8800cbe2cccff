//! # Liga Tracker
//!
//! A local league stats tracker: standings, streaks, partner affinities
//! and balanced team generation, computed from a shared match sheet.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (cells, matches, roster, derived stats)
//! - **parse**: Match parser (decoded grid → matches + roster)
//! - **calculate**: Statistics and derived metrics computation
//! - **fetch**: Sheet retrieval (local CSV file or HTTP)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod parse;

pub use models::*;
