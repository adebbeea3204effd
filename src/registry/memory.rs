//! In-memory asset registry.
//!
//! ## Design
//!
//! A HashMap-backed registry with ERC-721-style single approvals: each
//! asset has one owner and at most one approved operator. A successful
//! transfer consumes the approval, so a settled auction leaves no standing
//! authorization behind.
//!
//! This is the registry used by the demo binary and the test harness; the
//! engine itself only sees the [`AssetRegistry`] trait.

use std::collections::HashMap;

use crate::registry::{AssetRegistry, RegistryError};
use crate::types::{AccountId, AssetRef};

/// HashMap-backed asset registry with per-asset approvals.
///
/// ## Example
///
/// ```
/// use auctionhouse::registry::{AssetRegistry, InMemoryRegistry};
/// use auctionhouse::types::AssetRef;
///
/// let mut registry = InMemoryRegistry::new();
/// let asset = AssetRef::new(7, 42);
///
/// registry.mint(asset, 10);
/// registry.approve(asset, 10, 99).unwrap();
///
/// assert_eq!(registry.owner_of(asset), Ok(10));
/// assert!(registry.is_authorized(asset, 10, 99));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// Current owner per asset
    owners: HashMap<AssetRef, AccountId>,

    /// Approved operator per asset (at most one, consumed on transfer)
    approvals: HashMap<AssetRef, AccountId>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new asset owned by `owner`.
    ///
    /// Returns false (and changes nothing) if the asset already exists.
    pub fn mint(&mut self, asset: AssetRef, owner: AccountId) -> bool {
        if self.owners.contains_key(&asset) {
            return false;
        }
        self.owners.insert(asset, owner);
        true
    }

    /// Grant `operator` transfer rights over the asset.
    ///
    /// Only the current owner may approve; a second approval replaces the
    /// first.
    pub fn approve(
        &mut self,
        asset: AssetRef,
        owner: AccountId,
        operator: AccountId,
    ) -> Result<(), RegistryError> {
        let current = self.owner_of(asset)?;
        if current != owner {
            return Err(RegistryError::NotOwner);
        }
        self.approvals.insert(asset, operator);
        Ok(())
    }

    /// Revoke the asset's standing approval, if any.
    ///
    /// Only the current owner may revoke.
    pub fn revoke(&mut self, asset: AssetRef, owner: AccountId) -> Result<(), RegistryError> {
        let current = self.owner_of(asset)?;
        if current != owner {
            return Err(RegistryError::NotOwner);
        }
        self.approvals.remove(&asset);
        Ok(())
    }

    /// Currently approved operator for the asset, if any
    pub fn approved(&self, asset: AssetRef) -> Option<AccountId> {
        self.approvals.get(&asset).copied()
    }

    /// Number of assets in the registry
    pub fn asset_count(&self) -> usize {
        self.owners.len()
    }
}

impl AssetRegistry for InMemoryRegistry {
    fn owner_of(&self, asset: AssetRef) -> Result<AccountId, RegistryError> {
        self.owners
            .get(&asset)
            .copied()
            .ok_or(RegistryError::UnknownAsset)
    }

    fn is_authorized(&self, asset: AssetRef, owner: AccountId, operator: AccountId) -> bool {
        // Stale owners hold no rights
        if self.owners.get(&asset) != Some(&owner) {
            return false;
        }
        owner == operator || self.approvals.get(&asset) == Some(&operator)
    }

    fn transfer(
        &mut self,
        asset: AssetRef,
        from: AccountId,
        to: AccountId,
        operator: AccountId,
    ) -> Result<(), RegistryError> {
        let current = self.owner_of(asset)?;
        if current != from {
            return Err(RegistryError::NotOwner);
        }
        if !self.is_authorized(asset, from, operator) {
            return Err(RegistryError::NotAuthorized);
        }

        self.owners.insert(asset, to);
        // A transfer consumes the standing approval
        self.approvals.remove(&asset);
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
