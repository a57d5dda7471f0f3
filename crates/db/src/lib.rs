//! ORM client factory for ormkit.
//!
//! Builds a SeaORM connection from [`DatabaseSettings`] and offers a one-shot
//! startup [`probe`] that logs whether the database is reachable.

mod client;
mod config;
mod database_url;
mod dialect;
pub mod probe;
pub mod shared;

pub use client::{ClientError, DbClient};
pub use config::DatabaseSettings;
pub use database_url::DatabaseUrl;
pub use dialect::{Dialect, ParseDialectError};
pub use probe::{connect_and_probe, probe, spawn_probe, ProbeOutcome};
pub use shared::{ClientSlot, SlotError};
