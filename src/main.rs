//! Auctionhouse - Demo Entry Point
//!
//! Walks one auction through its full lifecycle: listing, a chain of
//! competitive bids with refund-on-outbid, and atomic settlement.

use auctionhouse::types::amount::{from_native_trimmed, to_native};
use auctionhouse::{AssetRef, AssetRegistry, AuctionEngine, InMemoryRegistry};

fn main() {
    println!("===========================================");
    println!("  Auctionhouse - Sealed-Custody Auctions");
    println!("===========================================");
    println!();

    let house_account = 999;
    let seller = 10;
    let asset = AssetRef::new(7, 42);

    let mut registry = InMemoryRegistry::new();
    let mut engine = AuctionEngine::new(house_account);

    // Seller mints the asset and approves the house for settlement
    registry.mint(asset, seller);
    if registry.approve(asset, seller, house_account).is_err() {
        println!("ERROR: could not approve the house account");
        return;
    }

    // List at 1 value unit, expiring 10 clock ticks after creation
    let start_price = to_native("1").unwrap_or(0);
    println!("Creating auction (start price 1, duration 10)...");
    let auction_id = match engine.create_auction(&registry, seller, asset, start_price, 10, 0) {
        Ok(id) => id,
        Err(e) => {
            println!("ERROR: {}", e);
            return;
        }
    };
    println!("  Auction id: {}", auction_id);
    println!();

    // Four bidders drive the price from 1.5 to 5
    println!("Placing bids...");
    let bids = [("1.5", 1u64), ("2", 2), ("4", 3), ("5", 4)];
    for (clock, (value, bidder)) in bids.into_iter().enumerate() {
        let amount = to_native(value).unwrap_or(0);
        match engine.place_bid(auction_id, bidder, amount, clock as u64 + 1) {
            Ok(receipt) => {
                print!("  Bidder {} leads at {}", bidder, value);
                match receipt.refund {
                    Some(refund) => println!(
                        " (refunded {} to bidder {})",
                        from_native_trimmed(refund.amount),
                        refund.account
                    ),
                    None => println!(),
                }
            }
            Err(e) => println!("  ERROR: {}", e),
        }
    }
    println!();

    // Settlement: asset to winner, proceeds to seller
    println!("Closing at clock 10...");
    match engine.close_auction(&mut registry, auction_id, seller, 10) {
        Ok(receipt) => {
            println!("  Winner: account {}", receipt.winner);
            println!("  Final bid: {}", from_native_trimmed(receipt.final_bid));
            println!("  State root: {}", receipt.state_root_hex());
        }
        Err(e) => println!("  ERROR: {}", e),
    }
    println!();

    println!(
        "Asset (7, 42) owner: {:?}",
        registry.owner_of(asset)
    );
    println!(
        "Seller credit: {}",
        from_native_trimmed(engine.credit_of(seller))
    );
    for bidder in [1u64, 2, 3] {
        println!(
            "Bidder {} refunded: {}",
            bidder,
            from_native_trimmed(engine.credit_of(bidder))
        );
    }
    println!();

    // The journal is the observability surface; show its deterministic
    // encoding the consumers would read
    println!("Journal: {} events recorded.", engine.events().len());
    if let Some(event) = engine.events().last() {
        match ssz_rs::serialize(event) {
            Ok(bytes) => {
                println!("  Last event serialized to {} bytes (SSZ)", bytes.len());
                println!("  Bytes: {:?}", &bytes[..bytes.len().min(32)]);
            }
            Err(e) => {
                println!("  ERROR: Failed to serialize: {:?}", e);
            }
        }
    }
    println!();
    println!("Run 'cargo test' to verify all tests pass.");
}
