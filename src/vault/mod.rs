//! Escrow vault: custody of bid value between acceptance and release.
//!
//! Only the engine moves value, and only along two paths: the
//! refund-on-outbid path (displaced entry credited back to its bidder) and
//! the settlement path (winning entry credited to the seller). The vault
//! structure guarantees at most one live entry per auction.

mod escrow;

pub use escrow::{EscrowEntry, EscrowVault};
