//! Append-only auction arena.
//!
//! ## Architecture
//!
//! The arena is the single source of truth for auction records:
//!
//! - **Slab**: pre-allocated storage for O(1) record access
//! - **HashMap**: auction id to slab key mapping for O(1) id lookup
//!
//! ## Id Discipline
//!
//! Ids are assigned from a monotonically increasing counter starting at 1
//! and are never reused. Records are never deleted (a settled auction
//! stays queryable forever), so there is no removal API at all.
//!
//! ## Memory Model
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - `Slab::with_capacity(n)` pre-allocates n slots
//! - O(1) insert and lookup
//!
//! ## Example
//!
//! ```
//! use auctionhouse::arena::AuctionArena;
//! use auctionhouse::types::{AssetRef, Auction};
//!
//! let mut arena = AuctionArena::with_capacity(1_000);
//!
//! // Id 0 asks the arena to assign the next fresh id
//! let id = arena.insert(Auction::new(0, 10, AssetRef::new(7, 42), 100, 0, 10));
//!
//! assert_eq!(id, 1);
//! assert!(arena.contains(1));
//! assert_eq!(arena.len(), 1);
//! ```

use std::collections::HashMap;

use slab::Slab;

use crate::types::{Auction, AuctionId, SettlementReceipt};

/// Append-only store of auction records keyed by id.
#[derive(Debug)]
pub struct AuctionArena {
    /// Pre-allocated record storage
    /// Key: slab index, Value: Auction
    records: Slab<Auction>,

    /// Auction id to slab key mapping (for O(1) lookup)
    index: HashMap<AuctionId, usize>,

    /// Next auction id (monotonically increasing, starts at 1)
    next_auction_id: AuctionId,
}

impl Default for AuctionArena {
    fn default() -> Self {
        Self::new()
    }
}

impl AuctionArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            records: Slab::new(),
            index: HashMap::new(),
            next_auction_id: 1,
        }
    }

    /// Create an arena with pre-allocated capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of auction records to pre-allocate
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_auction_id: 1,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current capacity (pre-allocated slots)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Total number of auctions ever created
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the arena holds no auctions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next inserted auction will receive
    #[inline]
    pub fn peek_next_id(&self) -> AuctionId {
        self.next_auction_id
    }

    // ========================================================================
    // Record Management
    // ========================================================================

    /// Insert an auction record and return its id.
    ///
    /// An id of 0 asks the arena to assign the next fresh id; a non-zero id
    /// is kept as-is (the engine always passes 0).
    pub fn insert(&mut self, mut auction: Auction) -> AuctionId {
        if auction.id == 0 {
            auction.id = self.next_auction_id;
        }
        // Keep the counter monotonic even for caller-supplied ids
        self.next_auction_id = self.next_auction_id.max(auction.id.saturating_add(1));

        let id = auction.id;
        let key = self.records.insert(auction);
        self.index.insert(id, key);
        id
    }

    /// Get a reference to an auction by id
    #[inline]
    pub fn get(&self, id: AuctionId) -> Option<&Auction> {
        let key = *self.index.get(&id)?;
        self.records.get(key)
    }

    /// Get a mutable reference to an auction by id
    #[inline]
    pub fn get_mut(&mut self, id: AuctionId) -> Option<&mut Auction> {
        let key = *self.index.get(&id)?;
        self.records.get_mut(key)
    }

    /// Check if an auction exists
    #[inline]
    pub fn contains(&self, id: AuctionId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate over all records in insertion (id) order
    pub fn iter(&self) -> impl Iterator<Item = &Auction> {
        self.records.iter().map(|(_, auction)| auction)
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// Compute the SHA-256 state root over every record's canonical
    /// encoding, in id order.
    ///
    /// Insertion order equals id order because records are never removed,
    /// so the root is deterministic for a given operation history.
    pub fn state_root(&self) -> [u8; 32] {
        let mut state_data = Vec::with_capacity(self.records.len() * 73);
        for auction in self.iter() {
            state_data.extend_from_slice(&auction.canonical_bytes());
        }
        SettlementReceipt::compute_hash(&state_data)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetRef;

    fn sample(id: AuctionId) -> Auction {
        Auction::new(id, 10, AssetRef::new(7, 42), 100_000_000, 0, 10)
    }

    #[test]
    fn test_arena_new() {
        let arena = AuctionArena::new();

        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.peek_next_id(), 1);
        assert!(arena.get(1).is_none());
    }

    #[test]
    fn test_arena_with_capacity() {
        let arena = AuctionArena::with_capacity(10_000);

        assert!(arena.capacity() >= 10_000);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_arena_ids_start_at_one_and_increase() {
        let mut arena = AuctionArena::new();

        assert_eq!(arena.insert(sample(0)), 1);
        assert_eq!(arena.insert(sample(0)), 2);
        assert_eq!(arena.insert(sample(0)), 3);
        assert_eq!(arena.peek_next_id(), 4);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_arena_get() {
        let mut arena = AuctionArena::new();
        let id = arena.insert(sample(0));

        let record = arena.get(id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.seller, 10);

        assert!(arena.get(999).is_none());
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena = AuctionArena::new();
        let id = arena.insert(sample(0));

        arena.get_mut(id).unwrap().record_bid(2, 150_000_000);
        assert_eq!(arena.get(id).unwrap().highest_bid, 150_000_000);
    }

    #[test]
    fn test_arena_contains() {
        let mut arena = AuctionArena::new();

        assert!(!arena.contains(1));
        arena.insert(sample(0));
        assert!(arena.contains(1));
    }

    #[test]
    fn test_arena_explicit_id_keeps_counter_monotonic() {
        let mut arena = AuctionArena::new();

        assert_eq!(arena.insert(sample(5)), 5);
        // The next auto-assigned id continues past the explicit one
        assert_eq!(arena.insert(sample(0)), 6);
    }

    #[test]
    fn test_arena_iter_in_insertion_order() {
        let mut arena = AuctionArena::new();
        arena.insert(sample(0));
        arena.insert(sample(0));
        arena.insert(sample(0));

        let ids: Vec<AuctionId> = arena.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_arena_state_root_deterministic() {
        let mut arena1 = AuctionArena::new();
        let mut arena2 = AuctionArena::new();
        for _ in 0..3 {
            arena1.insert(sample(0));
            arena2.insert(sample(0));
        }

        assert_eq!(arena1.state_root(), arena2.state_root());
    }

    #[test]
    fn test_arena_state_root_tracks_mutation() {
        let mut arena = AuctionArena::new();
        let id = arena.insert(sample(0));
        let root_before = arena.state_root();

        arena.get_mut(id).unwrap().record_bid(2, 150_000_000);

        assert_ne!(arena.state_root(), root_before);
    }

    #[test]
    fn test_arena_empty_state_root() {
        let arena = AuctionArena::new();

        // Root of zero records is the hash of the empty byte string
        assert_eq!(
            arena.state_root(),
            SettlementReceipt::compute_hash(&[])
        );
    }
}
