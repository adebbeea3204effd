//! Engine event journal records.
//!
//! ## Design
//!
//! Every state-changing operation appends one or two events to the engine's
//! journal; consumers may rely on journal order matching call order. All
//! four lifecycle events share a single fixed-size container so the journal
//! has one deterministic SSZ encoding; the discriminant is stored as a raw
//! `u8`, and fields that do not apply to a kind are zero.

use ssz_rs::prelude::*;

use crate::types::auction::{AccountId, Amount, AssetRef, AuctionId, NO_ACCOUNT};

// ============================================================================
// EventKind enum
// ============================================================================

/// Lifecycle event discriminant.
///
/// Represented as u8 for SSZ compatibility:
/// - Created = 0
/// - BidPlaced = 1
/// - BidRefunded = 2
/// - Closed = 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    /// A new auction was opened
    #[default]
    Created,
    /// A bid was accepted and escrowed
    BidPlaced,
    /// A displaced bidder's escrow was returned
    BidRefunded,
    /// The auction was settled (with or without a sale)
    Closed,
}

impl EventKind {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            EventKind::Created => 0,
            EventKind::BidPlaced => 1,
            EventKind::BidRefunded => 2,
            EventKind::Closed => 3,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(EventKind::Created),
            1 => Some(EventKind::BidPlaced),
            2 => Some(EventKind::BidRefunded),
            3 => Some(EventKind::Closed),
            _ => None,
        }
    }
}

// ============================================================================
// EngineEvent struct
// ============================================================================

/// A single journal entry.
///
/// ## Field usage per kind
///
/// | kind        | account   | amount      | asset_*  | deadline |
/// |-------------|-----------|-------------|----------|----------|
/// | Created     | seller    | start_price | set      | set      |
/// | BidPlaced   | bidder    | bid         | 0        | 0        |
/// | BidRefunded | refundee  | refund      | 0        | 0        |
/// | Closed      | winner*   | final bid   | 0        | 0        |
///
/// *`NO_ACCOUNT` when the auction closed without a sale.
///
/// ## SSZ Layout
///
/// Fixed-size container: 1 u8 + 7 u64 fields = 57 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct EngineEvent {
    /// Event kind as u8 (see [`EventKind`])
    pub kind_raw: u8,

    /// Auction this event belongs to
    pub auction_id: u64,

    /// Acting or affected account (see the table above)
    pub account: u64,

    /// Value carried by the event, in the smallest native unit
    pub amount: u64,

    /// Asset registry collection handle (Created only)
    pub asset_collection: u64,

    /// Asset token id (Created only)
    pub asset_token: u64,

    /// Auction deadline (Created only)
    pub deadline: u64,

    /// Logical clock at emission
    pub clock: u64,
}

impl EngineEvent {
    /// Journal entry for a newly created auction
    pub fn created(
        auction_id: AuctionId,
        seller: AccountId,
        asset: AssetRef,
        start_price: Amount,
        deadline: u64,
        clock: u64,
    ) -> Self {
        Self {
            kind_raw: EventKind::Created.to_u8(),
            auction_id,
            account: seller,
            amount: start_price,
            asset_collection: asset.collection,
            asset_token: asset.token,
            deadline,
            clock,
        }
    }

    /// Journal entry for an accepted bid
    pub fn bid_placed(auction_id: AuctionId, bidder: AccountId, amount: Amount, clock: u64) -> Self {
        Self {
            kind_raw: EventKind::BidPlaced.to_u8(),
            auction_id,
            account: bidder,
            amount,
            clock,
            ..Self::default()
        }
    }

    /// Journal entry for a refunded (displaced) bid
    pub fn bid_refunded(
        auction_id: AuctionId,
        refundee: AccountId,
        amount: Amount,
        clock: u64,
    ) -> Self {
        Self {
            kind_raw: EventKind::BidRefunded.to_u8(),
            auction_id,
            account: refundee,
            amount,
            clock,
            ..Self::default()
        }
    }

    /// Journal entry for a settled auction.
    ///
    /// `winner` is `None` when the auction closed without a sale.
    pub fn closed(
        auction_id: AuctionId,
        winner: Option<AccountId>,
        final_bid: Amount,
        clock: u64,
    ) -> Self {
        Self {
            kind_raw: EventKind::Closed.to_u8(),
            auction_id,
            account: winner.unwrap_or(NO_ACCOUNT),
            amount: final_bid,
            clock,
            ..Self::default()
        }
    }

    /// Get the event kind
    #[inline]
    pub fn kind(&self) -> EventKind {
        EventKind::from_u8(self.kind_raw).unwrap_or(EventKind::Created)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
