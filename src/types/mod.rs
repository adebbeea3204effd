//! Core data types for the auctionhouse engine
//!
//! Records that cross the observability boundary implement SSZ
//! serialization for deterministic encoding. All value amounts are `u64`
//! integers in the smallest native unit.
//!
//! ## Types
//!
//! - [`Auction`]: a single-item auction record
//! - [`AssetRef`]: reference to an asset in an external registry
//! - [`EngineEvent`]: one journal entry ([`EventKind`] discriminated)
//! - [`SettlementReceipt`]: outcome of a close, with arena state root
//!
//! ## Fixed-Point Amounts
//!
//! One value unit is 10^8 native units; see [`amount`] for the boundary
//! conversions.

mod auction;
mod event;
mod receipt;
pub mod amount;

// Re-export all types at module level
pub use auction::{AccountId, Amount, AssetRef, Auction, AuctionId, NO_ACCOUNT};
pub use event::{EngineEvent, EventKind};
pub use receipt::SettlementReceipt;
