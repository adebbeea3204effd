//! Error taxonomy for engine operations.
//!
//! Every failure is surfaced synchronously to the caller with a distinct
//! variant per cause, and every failing call leaves the engine completely
//! unchanged: no record mutation, no value movement.

use thiserror::Error;

use crate::types::{Amount, AuctionId};

/// Failure causes for `create_auction`, `place_bid`, and `close_auction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A creation parameter is out of range (detail names the parameter)
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// The caller cannot prove the rights the operation requires
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    /// No auction exists under this id
    #[error("auction {0} not found")]
    AuctionNotFound(AuctionId),

    /// Bid rejected: the auction has already been settled
    #[error("auction {0} has ended")]
    AuctionEnded(AuctionId),

    /// Close rejected: the auction was already settled once
    #[error("auction {0} was already closed")]
    AlreadyEnded(AuctionId),

    /// Bid rejected: the deadline has passed
    #[error("auction {0} has expired")]
    AuctionExpired(AuctionId),

    /// Close rejected: the deadline has not been reached
    #[error("auction {0} has not yet expired")]
    NotYetExpired(AuctionId),

    /// Bid rejected: below the minimum acceptable amount
    #[error("bid of {bid} is below the minimum acceptable bid of {min}")]
    BidTooLow { bid: Amount, min: Amount },
}

// ============================================================================
// Unit Tests
// ============================================================================
