//! Settlement receipt returned by auction closing.
//!
//! The receipt summarizes the outcome of a settlement and carries the
//! state root of the auction arena after the close, enabling callers to
//! verify engine state without reading every record.

use sha2::{Digest, Sha256};

use crate::types::auction::{AccountId, Amount, AuctionId, NO_ACCOUNT};

/// Receipt for one settled auction.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash over the canonical encoding of
/// every auction record in the arena, computed after the settlement took
/// effect. Two engines that processed the same operation sequence produce
/// identical roots.
///
/// ## Example
///
/// ```
/// use auctionhouse::types::SettlementReceipt;
///
/// let receipt = SettlementReceipt::new(
///     1,                      // auction_id
///     4,                      // winner
///     500_000_000,            // final_bid: 5.00000000
///     [0u8; 32],              // state_root (computed by the engine)
///     20,                     // clock
/// );
///
/// assert!(receipt.is_sale());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReceipt {
    /// The settled auction
    pub auction_id: AuctionId,

    /// Winning bidder; `NO_ACCOUNT` when the auction closed without a sale
    pub winner: AccountId,

    /// Winning bid amount released to the seller; 0 when unsold
    pub final_bid: Amount,

    /// Arena state root after settlement (SHA-256, 32 bytes)
    pub state_root: [u8; 32],

    /// Logical clock at settlement
    pub clock: u64,
}

impl SettlementReceipt {
    /// Create a new settlement receipt
    ///
    /// # Arguments
    ///
    /// * `auction_id` - The settled auction
    /// * `winner` - Winning bidder (`NO_ACCOUNT` for an unsold close)
    /// * `final_bid` - Amount released to the seller (0 for an unsold close)
    /// * `state_root` - 32-byte hash of the arena state after settlement
    /// * `clock` - Logical clock at settlement
    pub fn new(
        auction_id: AuctionId,
        winner: AccountId,
        final_bid: Amount,
        state_root: [u8; 32],
        clock: u64,
    ) -> Self {
        Self {
            auction_id,
            winner,
            final_bid,
            state_root,
            clock,
        }
    }

    /// Create a receipt with a state root computed from the given bytes
    pub fn with_computed_root(
        auction_id: AuctionId,
        winner: AccountId,
        final_bid: Amount,
        state_data: &[u8],
        clock: u64,
    ) -> Self {
        let state_root = Self::compute_hash(state_data);
        Self::new(auction_id, winner, final_bid, state_root, clock)
    }

    /// Compute SHA-256 hash of the given data
    ///
    /// Returns a 32-byte array suitable for use as a state root.
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Check whether the settlement transferred the asset to a winner
    #[inline]
    pub fn is_sale(&self) -> bool {
        self.winner != NO_ACCOUNT
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_new() {
        let state_root = [1u8; 32];
        let receipt = SettlementReceipt::new(1, 4, 500_000_000, state_root, 20);

        assert_eq!(receipt.auction_id, 1);
        assert_eq!(receipt.winner, 4);
        assert_eq!(receipt.final_bid, 500_000_000);
        assert_eq!(receipt.state_root, state_root);
        assert_eq!(receipt.clock, 20);
        assert!(receipt.is_sale());
    }

    #[test]
    fn test_receipt_unsold() {
        let receipt = SettlementReceipt::new(1, NO_ACCOUNT, 0, [0u8; 32], 20);

        assert!(!receipt.is_sale());
        assert_eq!(receipt.final_bid, 0);
    }

    #[test]
    fn test_receipt_computed_root() {
        let receipt = SettlementReceipt::with_computed_root(1, 4, 500_000_000, b"arena state", 20);

        // Verify the hash was computed
        assert_ne!(receipt.state_root, [0u8; 32]);

        // Verify it's deterministic
        let expected_hash = SettlementReceipt::compute_hash(b"arena state");
        assert_eq!(receipt.state_root, expected_hash);
    }

    #[test]
    fn test_receipt_hash_determinism() {
        // Same input should always produce same hash
        let hash1 = SettlementReceipt::compute_hash(b"test data");
        let hash2 = SettlementReceipt::compute_hash(b"test data");
        assert_eq!(hash1, hash2);

        // Different input should produce different hash
        let hash3 = SettlementReceipt::compute_hash(b"different data");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_receipt_state_root_hex() {
        let state_root = [0xAB; 32];
        let receipt = SettlementReceipt::new(1, 4, 0, state_root, 0);

        let hex = receipt.state_root_hex();
        assert_eq!(hex.len(), 64); // 32 bytes * 2 hex chars
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
