//! The auction engine: creation, bidding, and settlement.
//!
//! ## Operation Discipline
//!
//! Operations execute in one global serialized order and are all-or-nothing:
//! every precondition is validated before the first mutation, so a failing
//! call returns with zero observable change and no value movement. The one
//! fallible step that cannot be validated up front, the registry transfer
//! during settlement, is bracketed by mark-ended / roll-back so the same
//! guarantee holds there.
//!
//! ## Settlement Ordering
//!
//! Asset delivery comes first. The escrowed winning bid is released to the
//! seller only after the registry has accepted the transfer; a seller can
//! never be paid without delivering the asset.

use crate::arena::AuctionArena;
use crate::engine::EngineError;
use crate::registry::AssetRegistry;
use crate::types::{
    AccountId, Amount, AssetRef, Auction, AuctionId, EngineEvent, SettlementReceipt, NO_ACCOUNT,
};
use crate::vault::{EscrowEntry, EscrowVault};

// ============================================================================
// ClosePolicy enum
// ============================================================================

/// Who may trigger settlement once an auction has expired.
///
/// Settlement is deterministic, so widening this is a policy choice, not a
/// safety one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosePolicy {
    /// Only the seller may close (the conventional marketplace rule)
    #[default]
    SellerOnly,
    /// Any account may close an expired auction
    Anyone,
}

// ============================================================================
// BidReceipt struct
// ============================================================================

/// Outcome of an accepted bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidReceipt {
    /// The auction bid on
    pub auction_id: AuctionId,

    /// The new highest bidder
    pub bidder: AccountId,

    /// The new highest bid
    pub amount: Amount,

    /// The displaced entry refunded in the same operation, if any
    pub refund: Option<EscrowEntry>,
}

// ============================================================================
// AuctionEngine struct
// ============================================================================

/// Single-item auction engine with escrowed bidding and atomic settlement.
///
/// The engine owns all auction records (arena), all escrowed value
/// (vault), and the event journal. Asset ownership stays in an external
/// [`AssetRegistry`]; the engine interacts with it under its
/// `house_account` identity, which sellers approve as an operator.
///
/// ## Example
///
/// ```
/// use auctionhouse::engine::AuctionEngine;
/// use auctionhouse::registry::{AssetRegistry, InMemoryRegistry};
/// use auctionhouse::types::{amount::to_native, AssetRef};
///
/// let mut registry = InMemoryRegistry::new();
/// let mut engine = AuctionEngine::new(999);
///
/// // Seller 10 lists token (7, 42) after approving the house account
/// let asset = AssetRef::new(7, 42);
/// registry.mint(asset, 10);
/// registry.approve(asset, 10, engine.house_account()).unwrap();
///
/// let id = engine
///     .create_auction(&registry, 10, asset, to_native("1").unwrap(), 10, 0)
///     .unwrap();
/// engine.place_bid(id, 2, to_native("1.5").unwrap(), 1).unwrap();
///
/// // Past the deadline the seller settles: asset to winner, value to seller
/// let receipt = engine.close_auction(&mut registry, id, 10, 10).unwrap();
/// assert_eq!(receipt.winner, 2);
/// assert_eq!(registry.owner_of(asset), Ok(2));
/// assert_eq!(engine.credit_of(10), to_native("1.5").unwrap());
/// ```
#[derive(Debug)]
pub struct AuctionEngine {
    /// All auction records, keyed by id
    arena: AuctionArena,

    /// Escrowed bid value and released credits
    vault: EscrowVault,

    /// Append-only event journal (order matches call order)
    events: Vec<EngineEvent>,

    /// The engine's identity in asset registries; sellers approve this
    /// account as operator
    house_account: AccountId,

    /// Who may close expired auctions
    close_policy: ClosePolicy,
}

impl AuctionEngine {
    /// Create an engine operating as `house_account`
    pub fn new(house_account: AccountId) -> Self {
        Self {
            arena: AuctionArena::new(),
            vault: EscrowVault::new(),
            events: Vec::new(),
            house_account,
            close_policy: ClosePolicy::default(),
        }
    }

    /// Create an engine with pre-allocated arena capacity
    ///
    /// # Arguments
    ///
    /// * `house_account` - The engine's registry identity
    /// * `capacity` - Number of auctions to pre-allocate
    pub fn with_capacity(house_account: AccountId, capacity: usize) -> Self {
        Self {
            arena: AuctionArena::with_capacity(capacity),
            vault: EscrowVault::new(),
            events: Vec::with_capacity(capacity),
            house_account,
            close_policy: ClosePolicy::default(),
        }
    }

    /// Change who may close expired auctions
    pub fn set_close_policy(&mut self, policy: ClosePolicy) {
        self.close_policy = policy;
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Open a new auction for an asset the seller controls.
    ///
    /// The asset is not taken into custody; settlement relies on the
    /// seller's standing approval of the engine's house account, which the
    /// registry re-validates at transfer time.
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry holding the asset
    /// * `seller` - Creator; receives the settlement proceeds
    /// * `asset` - The listed asset
    /// * `start_price` - Minimum acceptable first bid (must be positive)
    /// * `duration_units` - Logical-clock ticks until expiry (must be positive)
    /// * `clock` - Current logical clock
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidParameters`] - non-positive price or
    ///   duration, reserved seller account, or deadline overflow
    /// * [`EngineError::NotAuthorized`] - unknown asset, or the seller
    ///   neither owns nor is approved for it
    pub fn create_auction(
        &mut self,
        registry: &impl AssetRegistry,
        seller: AccountId,
        asset: AssetRef,
        start_price: Amount,
        duration_units: u64,
        clock: u64,
    ) -> Result<AuctionId, EngineError> {
        if seller == NO_ACCOUNT {
            return Err(EngineError::InvalidParameters("seller account is reserved"));
        }
        if start_price == 0 {
            return Err(EngineError::InvalidParameters("start price must be positive"));
        }
        if duration_units == 0 {
            return Err(EngineError::InvalidParameters("duration must be positive"));
        }
        let deadline = clock
            .checked_add(duration_units)
            .ok_or(EngineError::InvalidParameters("deadline overflows the logical clock"))?;

        // The seller must control the asset now; the house approval needed
        // for settlement is validated later, by the registry, at close.
        let owner = registry
            .owner_of(asset)
            .map_err(|_| EngineError::NotAuthorized)?;
        if owner != seller && !registry.is_authorized(asset, owner, seller) {
            return Err(EngineError::NotAuthorized);
        }

        let id = self
            .arena
            .insert(Auction::new(0, seller, asset, start_price, clock, deadline));
        self.events
            .push(EngineEvent::created(id, seller, asset, start_price, deadline, clock));
        Ok(id)
    }

    /// Place a bid, escrowing its value and refunding the displaced bidder.
    ///
    /// The first accepted bid must reach the start price; every later bid
    /// must be strictly greater than the current highest (ties rejected).
    /// When a previous bidder is displaced, their escrow is credited back
    /// in this same operation, so the engine never holds more than one
    /// live bid per auction.
    ///
    /// # Errors
    ///
    /// * [`EngineError::AuctionNotFound`] - no such auction
    /// * [`EngineError::AuctionEnded`] - the auction was settled
    /// * [`EngineError::AuctionExpired`] - the deadline has passed
    /// * [`EngineError::BidTooLow`] - below the minimum acceptable bid
    /// * [`EngineError::InvalidParameters`] - reserved bidder account
    pub fn place_bid(
        &mut self,
        auction_id: AuctionId,
        bidder: AccountId,
        amount: Amount,
        clock: u64,
    ) -> Result<BidReceipt, EngineError> {
        if bidder == NO_ACCOUNT {
            return Err(EngineError::InvalidParameters("bidder account is reserved"));
        }
        let auction = self
            .arena
            .get_mut(auction_id)
            .ok_or(EngineError::AuctionNotFound(auction_id))?;
        if auction.ended {
            return Err(EngineError::AuctionEnded(auction_id));
        }
        if auction.is_expired(clock) {
            return Err(EngineError::AuctionExpired(auction_id));
        }
        let min = auction.min_acceptable_bid();
        if amount < min {
            return Err(EngineError::BidTooLow { bid: amount, min });
        }

        // All preconditions hold; the record, the escrow swap, and the
        // refund commit together.
        auction.record_bid(bidder, amount);
        let displaced = self.vault.swap(auction_id, bidder, amount);
        self.events
            .push(EngineEvent::bid_placed(auction_id, bidder, amount, clock));
        if let Some(entry) = displaced {
            self.vault.credit(entry.account, entry.amount);
            self.events
                .push(EngineEvent::bid_refunded(auction_id, entry.account, entry.amount, clock));
        }

        Ok(BidReceipt {
            auction_id,
            bidder,
            amount,
            refund: displaced,
        })
    }

    /// Settle an expired auction.
    ///
    /// With at least one bid: the registry transfers the asset from seller
    /// to winner under the house-account authorization, then the escrowed
    /// winning bid is credited to the seller. With zero bids: the auction
    /// is marked ended and nothing moves. Either way the record becomes
    /// terminal and stays queryable.
    ///
    /// If the registry refuses the transfer (approval revoked, asset moved
    /// away), the close fails with [`EngineError::NotAuthorized`] and the
    /// engine state, including the `ended` flag and the winner's escrow,
    /// is exactly as before the call.
    ///
    /// # Errors
    ///
    /// * [`EngineError::AuctionNotFound`] - no such auction
    /// * [`EngineError::AlreadyEnded`] - settled once already
    /// * [`EngineError::NotYetExpired`] - deadline not reached
    /// * [`EngineError::NotAuthorized`] - caller rejected by the close
    ///   policy, or the registry refused the transfer
    pub fn close_auction(
        &mut self,
        registry: &mut impl AssetRegistry,
        auction_id: AuctionId,
        caller: AccountId,
        clock: u64,
    ) -> Result<SettlementReceipt, EngineError> {
        let house = self.house_account;
        let policy = self.close_policy;

        let auction = self
            .arena
            .get_mut(auction_id)
            .ok_or(EngineError::AuctionNotFound(auction_id))?;
        if auction.ended {
            return Err(EngineError::AlreadyEnded(auction_id));
        }
        if !auction.is_expired(clock) {
            return Err(EngineError::NotYetExpired(auction_id));
        }
        if policy == ClosePolicy::SellerOnly && caller != auction.seller {
            return Err(EngineError::NotAuthorized);
        }

        let seller = auction.seller;
        let asset = auction.asset();
        let winner = auction.leading_bidder();
        let final_bid = auction.highest_bid;

        // Mark ended before touching the registry: once set, no path in
        // the engine can mutate this auction again, even if the registry
        // call re-enters.
        auction.ended = true;

        if let Some(winner_account) = winner {
            // Asset delivery must succeed before any value is released.
            if registry
                .transfer(asset, seller, winner_account, house)
                .is_err()
            {
                // Roll the flag back: a failed close leaves no trace.
                if let Some(auction) = self.arena.get_mut(auction_id) {
                    auction.ended = false;
                }
                return Err(EngineError::NotAuthorized);
            }
            if self.vault.release(auction_id).is_some() {
                self.vault.credit(seller, final_bid);
            }
        }

        self.events
            .push(EngineEvent::closed(auction_id, winner, final_bid, clock));
        Ok(SettlementReceipt::new(
            auction_id,
            winner.unwrap_or(NO_ACCOUNT),
            final_bid,
            self.arena.state_root(),
            clock,
        ))
    }

    // ========================================================================
    // Read Accessors
    // ========================================================================

    /// Get an auction record by id
    #[inline]
    pub fn auction(&self, auction_id: AuctionId) -> Option<&Auction> {
        self.arena.get(auction_id)
    }

    /// Total number of auctions ever created
    #[inline]
    pub fn auction_count(&self) -> usize {
        self.arena.len()
    }

    /// The full event journal, in call order
    #[inline]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Journal entries for one auction, in call order
    pub fn events_for(&self, auction_id: AuctionId) -> impl Iterator<Item = &EngineEvent> {
        self.events
            .iter()
            .filter(move |event| event.auction_id == auction_id)
    }

    /// Value currently escrowed for an auction (0 if none)
    #[inline]
    pub fn escrow_held(&self, auction_id: AuctionId) -> Amount {
        self.vault.held(auction_id)
    }

    /// Total value currently escrowed across all auctions
    #[inline]
    pub fn total_escrow(&self) -> Amount {
        self.vault.total_held()
    }

    /// Total value released to an account (refunds + seller proceeds)
    #[inline]
    pub fn credit_of(&self, account: AccountId) -> Amount {
        self.vault.credit_of(account)
    }

    /// SHA-256 root of the current arena state
    #[inline]
    pub fn state_root(&self) -> [u8; 32] {
        self.arena.state_root()
    }

    /// The engine's registry identity
    #[inline]
    pub fn house_account(&self) -> AccountId {
        self.house_account
    }

    /// The active close policy
    #[inline]
    pub fn close_policy(&self) -> ClosePolicy {
        self.close_policy
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryRegistry;
    use crate::types::EventKind;

    const HOUSE: AccountId = 999;
    const SELLER: AccountId = 10;
    const ALICE: AccountId = 1;
    const BOB: AccountId = 2;

    const START_PRICE: Amount = 100_000_000; // 1.00000000
    const DURATION: u64 = 10;

    fn asset() -> AssetRef {
        AssetRef::new(7, 42)
    }

    /// Registry with the asset minted to SELLER and the house approved
    fn ready_registry() -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        registry.mint(asset(), SELLER);
        registry.approve(asset(), SELLER, HOUSE).unwrap();
        registry
    }

    /// Engine plus registry with one auction created at clock 0
    fn engine_with_auction() -> (AuctionEngine, InMemoryRegistry, AuctionId) {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);
        let id = engine
            .create_auction(&registry, SELLER, asset(), START_PRICE, DURATION, 0)
            .unwrap();
        (engine, registry, id)
    }

    // ------------------------------------------------------------------------
    // create_auction
    // ------------------------------------------------------------------------

    #[test]
    fn test_create_auction_fresh_state() {
        let (engine, _registry, id) = engine_with_auction();

        let auction = engine.auction(id).unwrap();
        assert_eq!(auction.id, 1);
        assert_eq!(auction.seller, SELLER);
        assert_eq!(auction.asset(), asset());
        assert_eq!(auction.start_price, START_PRICE);
        assert_eq!(auction.highest_bid, 0);
        assert_eq!(auction.highest_bidder, NO_ACCOUNT);
        assert_eq!(auction.deadline, DURATION);
        assert!(!auction.ended);
        assert_eq!(engine.escrow_held(id), 0);
    }

    #[test]
    fn test_create_auction_ids_increase() {
        let mut registry = ready_registry();
        let second = AssetRef::new(7, 43);
        registry.mint(second, SELLER);

        let mut engine = AuctionEngine::new(HOUSE);
        let first_id = engine
            .create_auction(&registry, SELLER, asset(), START_PRICE, DURATION, 0)
            .unwrap();
        let second_id = engine
            .create_auction(&registry, SELLER, second, START_PRICE, DURATION, 0)
            .unwrap();

        assert_eq!(first_id, 1);
        assert_eq!(second_id, 2);
        assert_eq!(engine.auction_count(), 2);
    }

    #[test]
    fn test_create_auction_rejects_zero_start_price() {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);

        let result = engine.create_auction(&registry, SELLER, asset(), 0, DURATION, 0);
        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
        assert_eq!(engine.auction_count(), 0);
    }

    #[test]
    fn test_create_auction_rejects_zero_duration() {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);

        let result = engine.create_auction(&registry, SELLER, asset(), START_PRICE, 0, 0);
        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
    }

    #[test]
    fn test_create_auction_rejects_deadline_overflow() {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);

        let result =
            engine.create_auction(&registry, SELLER, asset(), START_PRICE, u64::MAX, 1);
        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
    }

    #[test]
    fn test_create_auction_rejects_non_controller() {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);

        // ALICE neither owns nor is approved for the asset
        let result = engine.create_auction(&registry, ALICE, asset(), START_PRICE, DURATION, 0);
        assert_eq!(result, Err(EngineError::NotAuthorized));
    }

    #[test]
    fn test_create_auction_rejects_unknown_asset() {
        let registry = ready_registry();
        let mut engine = AuctionEngine::new(HOUSE);

        let missing = AssetRef::new(7, 999);
        let result = engine.create_auction(&registry, SELLER, missing, START_PRICE, DURATION, 0);
        assert_eq!(result, Err(EngineError::NotAuthorized));
    }

    #[test]
    fn test_create_auction_allows_approved_operator_as_seller() {
        let mut registry = ready_registry();
        // SELLER approves ALICE instead of the house for this check
        registry.approve(asset(), SELLER, ALICE).unwrap();

        let mut engine = AuctionEngine::new(HOUSE);
        let result = engine.create_auction(&registry, ALICE, asset(), START_PRICE, DURATION, 0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_auction_emits_created_event() {
        let (engine, _registry, id) = engine_with_auction();

        let events: Vec<&EngineEvent> = engine.events_for(id).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Created);
        assert_eq!(events[0].account, SELLER);
        assert_eq!(events[0].amount, START_PRICE);
        assert_eq!(events[0].asset_collection, 7);
        assert_eq!(events[0].asset_token, 42);
        assert_eq!(events[0].deadline, DURATION);
    }

    // ------------------------------------------------------------------------
    // place_bid
    // ------------------------------------------------------------------------

    #[test]
    fn test_place_bid_accepts_start_price() {
        let (mut engine, _registry, id) = engine_with_auction();

        let receipt = engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();
        assert_eq!(receipt.bidder, ALICE);
        assert_eq!(receipt.amount, START_PRICE);
        assert!(receipt.refund.is_none());

        let auction = engine.auction(id).unwrap();
        assert_eq!(auction.leading_bidder(), Some(ALICE));
        assert_eq!(auction.highest_bid, START_PRICE);
        assert_eq!(engine.escrow_held(id), START_PRICE);
    }

    #[test]
    fn test_place_bid_below_start_price_rejected() {
        let (mut engine, _registry, id) = engine_with_auction();

        let result = engine.place_bid(id, ALICE, START_PRICE - 1, 1);
        assert_eq!(
            result,
            Err(EngineError::BidTooLow {
                bid: START_PRICE - 1,
                min: START_PRICE
            })
        );

        // Nothing moved
        assert_eq!(engine.escrow_held(id), 0);
        assert!(!engine.auction(id).unwrap().has_bid());
    }

    #[test]
    fn test_place_bid_tie_rejected() {
        let (mut engine, _registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();

        let result = engine.place_bid(id, BOB, 150_000_000, 2);
        assert_eq!(
            result,
            Err(EngineError::BidTooLow {
                bid: 150_000_000,
                min: 150_000_001
            })
        );

        // Leader unchanged, escrow unchanged, no refund credited
        let auction = engine.auction(id).unwrap();
        assert_eq!(auction.leading_bidder(), Some(ALICE));
        assert_eq!(engine.escrow_held(id), 150_000_000);
        assert_eq!(engine.credit_of(ALICE), 0);
    }

    #[test]
    fn test_place_bid_outbid_refunds_previous() {
        let (mut engine, _registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();

        let receipt = engine.place_bid(id, BOB, 200_000_000, 2).unwrap();
        assert_eq!(
            receipt.refund,
            Some(EscrowEntry {
                account: ALICE,
                amount: 150_000_000
            })
        );

        // Alice is made whole immediately; only Bob's bid is held
        assert_eq!(engine.credit_of(ALICE), 150_000_000);
        assert_eq!(engine.escrow_held(id), 200_000_000);
        assert_eq!(engine.total_escrow(), 200_000_000);
    }

    #[test]
    fn test_place_bid_self_outbid_allowed() {
        let (mut engine, _registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();

        let receipt = engine.place_bid(id, ALICE, 200_000_000, 2).unwrap();
        assert_eq!(
            receipt.refund,
            Some(EscrowEntry {
                account: ALICE,
                amount: 150_000_000
            })
        );
        assert_eq!(engine.credit_of(ALICE), 150_000_000);
        assert_eq!(engine.escrow_held(id), 200_000_000);
    }

    #[test]
    fn test_place_bid_unknown_auction() {
        let (mut engine, _registry, _id) = engine_with_auction();

        let result = engine.place_bid(999, ALICE, START_PRICE, 1);
        assert_eq!(result, Err(EngineError::AuctionNotFound(999)));
    }

    #[test]
    fn test_place_bid_at_deadline_rejected() {
        let (mut engine, _registry, id) = engine_with_auction();

        // The deadline itself is already too late
        let result = engine.place_bid(id, ALICE, START_PRICE, DURATION);
        assert_eq!(result, Err(EngineError::AuctionExpired(id)));

        // One tick earlier is fine
        assert!(engine.place_bid(id, ALICE, START_PRICE, DURATION - 1).is_ok());
    }

    #[test]
    fn test_place_bid_after_close_rejected() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();
        engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();

        let result = engine.place_bid(id, BOB, 500_000_000, DURATION);
        assert_eq!(result, Err(EngineError::AuctionEnded(id)));
    }

    #[test]
    fn test_place_bid_strictly_increasing_sequence() {
        let (mut engine, _registry, id) = engine_with_auction();

        let bids: [(AccountId, Amount); 4] = [
            (1, 150_000_000), // 1.5
            (2, 200_000_000), // 2
            (3, 400_000_000), // 4
            (4, 500_000_000), // 5
        ];
        let mut previous = 0;
        for (clock, (bidder, amount)) in bids.into_iter().enumerate() {
            engine.place_bid(id, bidder, amount, clock as u64 + 1).unwrap();
            let auction = engine.auction(id).unwrap();
            assert!(auction.highest_bid > previous);
            assert_eq!(auction.leading_bidder(), Some(bidder));
            // Escrow never exceeds the current highest bid
            assert_eq!(engine.total_escrow(), auction.highest_bid);
            previous = auction.highest_bid;
        }
    }

    #[test]
    fn test_place_bid_event_order() {
        let (mut engine, _registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();
        engine.place_bid(id, BOB, 200_000_000, 2).unwrap();

        let kinds: Vec<EventKind> = engine.events_for(id).map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Created,
                EventKind::BidPlaced,
                EventKind::BidPlaced,
                EventKind::BidRefunded,
            ]
        );

        // The refund names the displaced bidder, not the new one
        let refund = engine
            .events_for(id)
            .find(|e| e.kind() == EventKind::BidRefunded)
            .unwrap();
        assert_eq!(refund.account, ALICE);
        assert_eq!(refund.amount, 150_000_000);
    }

    // ------------------------------------------------------------------------
    // close_auction
    // ------------------------------------------------------------------------

    #[test]
    fn test_close_before_deadline_rejected() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();

        let result = engine.close_auction(&mut registry, id, SELLER, DURATION - 1);
        assert_eq!(result, Err(EngineError::NotYetExpired(id)));

        // No mutation: still open, escrow intact, asset with seller
        assert!(!engine.auction(id).unwrap().ended);
        assert_eq!(engine.escrow_held(id), START_PRICE);
        assert_eq!(registry.owner_of(asset()), Ok(SELLER));
    }

    #[test]
    fn test_close_by_non_seller_rejected() {
        let (mut engine, mut registry, id) = engine_with_auction();

        let result = engine.close_auction(&mut registry, id, ALICE, DURATION);
        assert_eq!(result, Err(EngineError::NotAuthorized));
        assert!(!engine.auction(id).unwrap().ended);
    }

    #[test]
    fn test_close_policy_anyone() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.set_close_policy(ClosePolicy::Anyone);
        assert_eq!(engine.close_policy(), ClosePolicy::Anyone);
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();

        // A third party may settle once expired
        let receipt = engine.close_auction(&mut registry, id, BOB, DURATION).unwrap();
        assert_eq!(receipt.winner, ALICE);
        assert_eq!(registry.owner_of(asset()), Ok(ALICE));
    }

    #[test]
    fn test_close_with_winner_settles() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();
        engine.place_bid(id, BOB, 200_000_000, 2).unwrap();

        let receipt = engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();
        assert_eq!(receipt.auction_id, id);
        assert_eq!(receipt.winner, BOB);
        assert_eq!(receipt.final_bid, 200_000_000);
        assert!(receipt.is_sale());

        // Asset to winner, proceeds to seller, escrow fully drained
        assert_eq!(registry.owner_of(asset()), Ok(BOB));
        assert_eq!(engine.credit_of(SELLER), 200_000_000);
        assert_eq!(engine.escrow_held(id), 0);
        assert_eq!(engine.total_escrow(), 0);
        assert!(engine.auction(id).unwrap().ended);
    }

    #[test]
    fn test_close_twice_rejected() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();
        engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();

        let result = engine.close_auction(&mut registry, id, SELLER, DURATION + 1);
        assert_eq!(result, Err(EngineError::AlreadyEnded(id)));

        // The second attempt paid the seller nothing extra
        assert_eq!(engine.credit_of(SELLER), START_PRICE);
    }

    #[test]
    fn test_close_with_no_bids() {
        let (mut engine, mut registry, id) = engine_with_auction();

        let receipt = engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();
        assert_eq!(receipt.winner, NO_ACCOUNT);
        assert_eq!(receipt.final_bid, 0);
        assert!(!receipt.is_sale());

        // Asset stays with the seller; no value moved anywhere
        assert_eq!(registry.owner_of(asset()), Ok(SELLER));
        assert_eq!(engine.credit_of(SELLER), 0);
        assert_eq!(engine.total_escrow(), 0);
        assert!(engine.auction(id).unwrap().ended);
    }

    #[test]
    fn test_close_unknown_auction() {
        let (mut engine, mut registry, _id) = engine_with_auction();

        let result = engine.close_auction(&mut registry, 999, SELLER, DURATION);
        assert_eq!(result, Err(EngineError::AuctionNotFound(999)));
    }

    #[test]
    fn test_close_with_revoked_approval_rolls_back() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, 150_000_000, 1).unwrap();

        // The seller revokes the house approval before settlement
        registry.revoke(asset(), SELLER).unwrap();

        let result = engine.close_auction(&mut registry, id, SELLER, DURATION);
        assert_eq!(result, Err(EngineError::NotAuthorized));

        // Zero net mutation: not ended, escrow intact, nobody paid,
        // asset still with the seller
        let auction = engine.auction(id).unwrap();
        assert!(!auction.ended);
        assert_eq!(auction.leading_bidder(), Some(ALICE));
        assert_eq!(engine.escrow_held(id), 150_000_000);
        assert_eq!(engine.credit_of(SELLER), 0);
        assert_eq!(engine.credit_of(ALICE), 0);
        assert_eq!(registry.owner_of(asset()), Ok(SELLER));

        // Re-approving lets a later close succeed
        registry.approve(asset(), SELLER, HOUSE).unwrap();
        let receipt = engine
            .close_auction(&mut registry, id, SELLER, DURATION + 1)
            .unwrap();
        assert_eq!(receipt.winner, ALICE);
        assert_eq!(registry.owner_of(asset()), Ok(ALICE));
        assert_eq!(engine.credit_of(SELLER), 150_000_000);
    }

    #[test]
    fn test_close_emits_closed_event() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();
        engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();

        let last = engine.events().last().unwrap();
        assert_eq!(last.kind(), EventKind::Closed);
        assert_eq!(last.auction_id, id);
        assert_eq!(last.account, ALICE);
        assert_eq!(last.amount, START_PRICE);
        assert_eq!(last.clock, DURATION);
    }

    #[test]
    fn test_close_receipt_state_root_matches_engine() {
        let (mut engine, mut registry, id) = engine_with_auction();
        engine.place_bid(id, ALICE, START_PRICE, 1).unwrap();

        let receipt = engine.close_auction(&mut registry, id, SELLER, DURATION).unwrap();
        assert_eq!(receipt.state_root, engine.state_root());
    }
}
