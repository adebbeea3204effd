//! Asset registry interface consumed by the engine.
//!
//! ## Custody Model
//!
//! The engine never takes custody of a listed asset. Settlement relies on
//! a standing authorization: the seller approves the engine's house
//! account as an operator for the asset, and the registry enforces that
//! authorization when the engine requests the transfer. Registries own all
//! ownership bookkeeping; the engine only queries and requests.

use thiserror::Error;

use crate::types::{AccountId, AssetRef};

/// Errors surfaced by an asset registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The referenced asset does not exist in this registry
    #[error("asset does not exist in the registry")]
    UnknownAsset,

    /// The `from` account does not currently hold the asset
    #[error("account is not the current asset owner")]
    NotOwner,

    /// The operator has not been granted transfer rights by the owner
    #[error("operator is not authorized by the asset owner")]
    NotAuthorized,
}

/// Ownership queries and transfers over non-fungible assets.
///
/// The engine calls [`owner_of`](AssetRegistry::owner_of) and
/// [`is_authorized`](AssetRegistry::is_authorized) when validating a new
/// listing, and [`transfer`](AssetRegistry::transfer) exactly once per sold
/// auction at settlement. `operator` names the identity requesting the
/// transfer on `from`'s behalf; registries must reject operators that
/// `from` has not authorized.
pub trait AssetRegistry {
    /// Current owner of the asset
    fn owner_of(&self, asset: AssetRef) -> Result<AccountId, RegistryError>;

    /// Whether `operator` may transfer the asset on behalf of `owner`.
    ///
    /// An owner is always authorized for its own assets. Returns false for
    /// unknown assets and for stale owners.
    fn is_authorized(&self, asset: AssetRef, owner: AccountId, operator: AccountId) -> bool;

    /// Transfer the asset from `from` to `to`, requested by `operator`.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::UnknownAsset`] - the asset does not exist
    /// * [`RegistryError::NotOwner`] - `from` does not hold the asset
    /// * [`RegistryError::NotAuthorized`] - `from` has not granted
    ///   `operator` transfer rights
    fn transfer(
        &mut self,
        asset: AssetRef,
        from: AccountId,
        to: AccountId,
        operator: AccountId,
    ) -> Result<(), RegistryError>;
}
