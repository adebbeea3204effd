//! Auction record and identity types for the auctionhouse engine.
//!
//! ## SSZ Serialization
//!
//! The `Auction` record derives `SimpleSerialize` from ssz_rs for
//! deterministic encoding. Per the SSZ spec (ethereum.org):
//! - Basic types (u64, bool): direct little-endian encoding
//! - Fixed-size composites: concatenated little-endian fields
//!
//! ## Identity Conventions
//!
//! Accounts, auctions, and assets are identified by `u64` handles.
//! Account 0 (`NO_ACCOUNT`) is reserved as the "no bidder yet" sentinel
//! and is never a valid participant.

use ssz_rs::prelude::*;

/// Auction identifier, assigned by the arena. Starts at 1, never reused.
pub type AuctionId = u64;

/// Account identity (seller, bidder, or the engine's house account).
pub type AccountId = u64;

/// Value amount in the smallest native unit (see `types::amount`).
pub type Amount = u64;

/// Reserved sentinel: "no account". Used for `highest_bidder` before the
/// first accepted bid and for the winner field of an unsold settlement.
pub const NO_ACCOUNT: AccountId = 0;

// ============================================================================
// AssetRef
// ============================================================================

/// Reference to a non-fungible asset held by an external registry.
///
/// The pair (collection handle, token id) is opaque to the engine; only the
/// registry interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssetRef {
    /// Registry collection handle (the registry "address")
    pub collection: u64,

    /// Token id within the collection
    pub token: u64,
}

impl AssetRef {
    /// Create an asset reference
    #[inline]
    pub fn new(collection: u64, token: u64) -> Self {
        Self { collection, token }
    }
}

// ============================================================================
// Auction struct
// ============================================================================

/// A single-item auction record.
///
/// ## Fields
///
/// Amounts are integers in the smallest native unit. The asset reference is
/// flattened into two raw `u64` fields for SSZ compatibility; use
/// [`Auction::asset`] to read it back as an [`AssetRef`].
///
/// ## SSZ Layout
///
/// Fixed-size container: 9 u64 fields + 1 bool = 73 bytes.
///
/// ## Example
///
/// ```
/// use auctionhouse::types::{AssetRef, Auction};
///
/// // Auction 1: seller 10 lists token (7, 42) at a 100-unit start price,
/// // created at clock 5 with deadline 15.
/// let auction = Auction::new(1, 10, AssetRef::new(7, 42), 100, 5, 15);
///
/// assert!(!auction.ended);
/// assert!(!auction.has_bid());
/// assert_eq!(auction.highest_bid, 0);
/// assert_eq!(auction.min_acceptable_bid(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Auction {
    /// Unique auction identifier (assigned by the arena)
    pub id: u64,

    /// Seller identity; owns the settlement proceeds
    pub seller: u64,

    /// Asset registry collection handle
    /// Stored raw for SSZ compatibility; see [`Auction::asset`]
    pub asset_collection: u64,

    /// Asset token id within the collection
    pub asset_token: u64,

    /// Minimum acceptable value for the first bid; immutable after creation
    pub start_price: u64,

    /// Current winning bid amount; 0 until the first accepted bid
    pub highest_bid: u64,

    /// Current highest bidder; `NO_ACCOUNT` until the first accepted bid
    pub highest_bidder: u64,

    /// Logical clock value at creation
    pub created_at: u64,

    /// Deadline: `created_at + duration_units`. Bids are accepted strictly
    /// before this point; closing is allowed at or past it.
    pub deadline: u64,

    /// Set true exactly once by settlement; irreversible
    pub ended: bool,
}

impl Auction {
    /// Create a new auction record with no bids.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique auction identifier (0 lets the arena assign one)
    /// * `seller` - Creator identity
    /// * `asset` - Reference to the listed asset
    /// * `start_price` - Minimum acceptable first bid
    /// * `created_at` - Logical clock at creation
    /// * `deadline` - Logical clock value at which the auction expires
    pub fn new(
        id: AuctionId,
        seller: AccountId,
        asset: AssetRef,
        start_price: Amount,
        created_at: u64,
        deadline: u64,
    ) -> Self {
        Self {
            id,
            seller,
            asset_collection: asset.collection,
            asset_token: asset.token,
            start_price,
            highest_bid: 0,
            highest_bidder: NO_ACCOUNT,
            created_at,
            deadline,
            ended: false,
        }
    }

    /// Get the listed asset reference
    #[inline]
    pub fn asset(&self) -> AssetRef {
        AssetRef::new(self.asset_collection, self.asset_token)
    }

    /// Check whether at least one bid has been accepted
    #[inline]
    pub fn has_bid(&self) -> bool {
        self.highest_bidder != NO_ACCOUNT
    }

    /// Get the current highest bidder, if any
    #[inline]
    pub fn leading_bidder(&self) -> Option<AccountId> {
        if self.has_bid() {
            Some(self.highest_bidder)
        } else {
            None
        }
    }

    /// Check whether the deadline has been reached at the given clock
    #[inline]
    pub fn is_expired(&self, clock: u64) -> bool {
        clock >= self.deadline
    }

    /// Check whether the auction can still accept bids at the given clock
    #[inline]
    pub fn accepts_bids(&self, clock: u64) -> bool {
        !self.ended && !self.is_expired(clock)
    }

    /// Smallest amount the next bid must reach.
    ///
    /// The first bid may equal the start price; every later bid must be
    /// strictly greater than the current highest bid.
    #[inline]
    pub fn min_acceptable_bid(&self) -> Amount {
        if self.has_bid() {
            self.highest_bid.saturating_add(1)
        } else {
            self.start_price
        }
    }

    /// Record an accepted bid, replacing the current leader.
    ///
    /// The caller is responsible for having validated the amount against
    /// [`Auction::min_acceptable_bid`].
    #[inline]
    pub fn record_bid(&mut self, bidder: AccountId, amount: Amount) {
        self.highest_bid = amount;
        self.highest_bidder = bidder;
    }

    /// Canonical fixed-size encoding of this record.
    ///
    /// Identical to the SSZ encoding (little-endian fields in declaration
    /// order, bool as one byte) but infallible; the arena hashes these
    /// bytes when computing state roots.
    pub fn canonical_bytes(&self) -> [u8; 73] {
        let mut bytes = [0u8; 73];
        let fields = [
            self.id,
            self.seller,
            self.asset_collection,
            self.asset_token,
            self.start_price,
            self.highest_bid,
            self.highest_bidder,
            self.created_at,
            self.deadline,
        ];
        for (i, field) in fields.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&field.to_le_bytes());
        }
        bytes[72] = self.ended as u8;
        bytes
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
