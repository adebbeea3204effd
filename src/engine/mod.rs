//! Auction engine module.
//!
//! ## Design Principles
//!
//! The engine is designed for:
//!
//! 1. **Determinism**: same operation sequence, same state and journal
//! 2. **Serialized Execution**: one operation at a time, no locks, no async
//! 3. **All-or-Nothing Calls**: a failing operation mutates nothing and
//!    moves no value
//! 4. **Asset-Before-Funds Settlement**: the seller is paid only after the
//!    registry delivers the asset
//!
//! ## Lifecycle Rules
//!
//! - Bids escrow their value; a displaced bidder is refunded immediately
//! - Bids must strictly exceed the current highest (the first must reach
//!   the start price); ties are rejected
//! - Closing is allowed at or past the deadline, subject to [`ClosePolicy`]
//! - A settled auction is terminal but stays queryable forever
//!
//! ## Example
//!
//! ```
//! use auctionhouse::engine::AuctionEngine;
//! use auctionhouse::registry::InMemoryRegistry;
//! use auctionhouse::types::AssetRef;
//!
//! let mut registry = InMemoryRegistry::new();
//! let mut engine = AuctionEngine::new(999);
//!
//! let asset = AssetRef::new(1, 1);
//! registry.mint(asset, 10);
//! registry.approve(asset, 10, engine.house_account()).unwrap();
//!
//! let id = engine.create_auction(&registry, 10, asset, 100, 5, 0).unwrap();
//! engine.place_bid(id, 2, 100, 1).unwrap();
//! engine.place_bid(id, 3, 120, 2).unwrap();
//!
//! let receipt = engine.close_auction(&mut registry, id, 10, 5).unwrap();
//! assert_eq!(receipt.winner, 3);
//! assert_eq!(engine.credit_of(2), 100); // displaced bidder refunded
//! ```

pub mod auctioneer;
mod error;

pub use auctioneer::{AuctionEngine, BidReceipt, ClosePolicy};
pub use error::EngineError;
