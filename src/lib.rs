//! # Auctionhouse
//!
//! Sealed-custody auction engine with escrowed bidding and atomic
//! settlement.
//!
//! ## Architecture
//!
//! The engine consists of:
//! - **Types**: Core data records (Auction, EngineEvent, SettlementReceipt)
//! - **Registry**: The asset-registry seam (trait + in-memory registry)
//! - **Arena**: Append-only, slab-backed auction storage keyed by id
//! - **Vault**: Escrowed bid value and released credits
//! - **Engine**: The three lifecycle operations and the event journal
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for
//!    identical inputs, down to the arena state root
//! 2. **No Floating Point**: All amounts are u64 integers in the smallest
//!    native unit (10^8 scaling at the display boundary)
//! 3. **Serialized Execution**: One operation at a time; each call either
//!    commits completely or fails with zero observable mutation
//! 4. **Sealed Custody**: Bid value is held by the engine until refunded
//!    on outbid or released at settlement; assets move only through the
//!    registry, and only after the engine marks the auction ended
//!
//! ## Lifecycle
//!
//! A seller who controls an asset (and has approved the engine's house
//! account as operator) opens an auction with a start price and a
//! deadline on the shared logical clock. Bidders escrow strictly
//! increasing amounts, each new leader displacing (and immediately
//! refunding) the previous one. At or past the deadline the auction is
//! closed: the registry transfers the asset to the winner, then the
//! escrowed winning bid is credited to the seller. An auction with no
//! bids closes with the asset untouched.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Auction, EngineEvent, SettlementReceipt
pub mod types;

/// Asset registry seam: trait, errors, in-memory registry
pub mod registry;

/// Auction arena: append-only slab-backed record storage
pub mod arena;

/// Escrow vault: bid custody and released credits
pub mod vault;

/// Auction engine: creation, bidding, settlement
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{AccountId, Amount, AssetRef, Auction, AuctionId, EngineEvent, EventKind,
    SettlementReceipt, NO_ACCOUNT};
pub use registry::{AssetRegistry, InMemoryRegistry, RegistryError};
pub use arena::AuctionArena;
pub use vault::{EscrowEntry, EscrowVault};
pub use engine::{AuctionEngine, BidReceipt, ClosePolicy, EngineError};
