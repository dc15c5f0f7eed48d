use std::collections::HashSet;
use std::sync::RwLock;

use zacline_shared::Identity;

/// Whether the shipment-creating caller may be re-bound after the
/// first bind. The observed deployments bind exactly once, so that is
/// the default; `Rebind` keeps the owner able to swap the ledger in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindPolicy {
    #[default]
    BindOnce,
    Rebind,
}

impl BindPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bind-once" => Some(Self::BindOnce),
            "rebind" => Some(Self::Rebind),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Only owner")]
    OnlyOwner,

    #[error("Caller already bound")]
    AlreadyBound,
}

/// Answers every authorization question in the system: who owns it,
/// which identities are admins, and which single identity is trusted
/// to create shipment records.
///
/// The admin set is seeded from configuration at construction and
/// mutated only by the owner. Mutations take the write lock, so a
/// grant or revoke never interleaves with an in-flight `is_admin`
/// check.
pub struct AccessControl {
    owner: Identity,
    bind_policy: BindPolicy,
    admins: RwLock<HashSet<Identity>>,
    bound_caller: RwLock<Option<Identity>>,
}

impl AccessControl {
    pub fn new(
        owner: Identity,
        initial_admins: impl IntoIterator<Item = Identity>,
        bind_policy: BindPolicy,
    ) -> Self {
        Self {
            owner,
            bind_policy,
            admins: RwLock::new(initial_admins.into_iter().collect()),
            bound_caller: RwLock::new(None),
        }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Identity) -> bool {
        *caller == self.owner
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.admins
            .read()
            .expect("admin set lock poisoned")
            .contains(identity)
    }

    /// Grant or revoke the admin flag. Owner only; idempotent.
    pub fn set_admin(
        &self,
        caller: &Identity,
        identity: Identity,
        enabled: bool,
    ) -> Result<(), AccessError> {
        if !self.is_owner(caller) {
            return Err(AccessError::OnlyOwner);
        }

        let mut admins = self.admins.write().expect("admin set lock poisoned");
        if enabled {
            if admins.insert(identity.clone()) {
                tracing::info!(admin = %identity, "admin granted");
            }
        } else if admins.remove(&identity) {
            tracing::info!(admin = %identity, "admin revoked");
        }
        Ok(())
    }

    pub fn bound_caller(&self) -> Option<Identity> {
        self.bound_caller
            .read()
            .expect("bound caller lock poisoned")
            .clone()
    }

    pub fn is_bound_caller(&self, identity: &Identity) -> bool {
        self.bound_caller
            .read()
            .expect("bound caller lock poisoned")
            .as_ref()
            == Some(identity)
    }

    /// Establish the single identity trusted to create shipments.
    /// Owner only; a second bind is refused under `BindPolicy::BindOnce`.
    pub fn bind_caller(&self, caller: &Identity, identity: Identity) -> Result<(), AccessError> {
        if !self.is_owner(caller) {
            return Err(AccessError::OnlyOwner);
        }

        let mut bound = self.bound_caller.write().expect("bound caller lock poisoned");
        if let Some(existing) = bound.as_ref() {
            match self.bind_policy {
                BindPolicy::BindOnce => return Err(AccessError::AlreadyBound),
                BindPolicy::Rebind => {
                    tracing::warn!(previous = %existing, next = %identity, "bound caller re-assigned");
                }
            }
        }
        *bound = Some(identity);
        Ok(())
    }
}
