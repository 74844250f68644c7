#![warn(clippy::all, missing_docs)]

//! Core domain logic for the front desk.
//!
//! This crate hosts the room catalog, the check-in/check-out lifecycle,
//! the loyalty ledger, configuration handling, and room file persistence
//! used by the terminal UI.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod models;
pub mod store;

pub use catalog::{Availability, CatalogStats, GuestRecord, RoomCatalog};
pub use config::AppConfig;
pub use error::{DeskError, Result};
pub use ledger::{Discount, LoyaltyLedger};
pub use lifecycle::{CheckInReceipt, CheckOutStatement, FrontDesk};
pub use models::{AcType, ComfortTier, GuestDetails, GuestStay, Room, RoomStatus};
pub use store::{LoadReport, RoomStore};
