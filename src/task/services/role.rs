//! Active UI role selection.

use crate::task::{
    domain::Role,
    ports::{PersistenceResult, TaskPersistence},
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Holds the active role and mirrors every switch to storage.
pub struct RoleSelector<P>
where
    P: TaskPersistence,
{
    persistence: Arc<P>,
    current: RwLock<Role>,
}

impl<P> RoleSelector<P>
where
    P: TaskPersistence,
{
    /// Reads the saved role, defaulting to [`Role::Worker`].
    #[must_use]
    pub fn hydrate(persistence: Arc<P>) -> Self {
        let current = persistence.load_role();
        Self {
            persistence,
            current: RwLock::new(current),
        }
    }

    /// Returns the active role.
    #[must_use]
    pub fn current(&self) -> Role {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches the active role.
    ///
    /// The in-memory role changes even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns the storage failure so the caller can surface it.
    pub fn switch(&self, role: Role) -> PersistenceResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = role;
        self.persistence.save_role(role).inspect_err(|err| {
            warn!(error = %err, %role, "failed to persist role");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RoleSelector;
    use crate::task::{
        adapters::{local_storage::LocalStoragePersistence, memory::InMemoryKeyValueStore},
        domain::Role,
        ports::KeyValueStore,
    };
    use eyre::ensure;
    use std::sync::Arc;

    #[test]
    fn switch_persists_and_survives_rehydration() -> eyre::Result<()> {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persistence = Arc::new(LocalStoragePersistence::new(Arc::clone(&store)));
        let selector = RoleSelector::hydrate(Arc::clone(&persistence));
        ensure!(selector.current() == Role::Worker);

        selector.switch(Role::Client)?;
        ensure!(RoleSelector::hydrate(persistence).current() == Role::Client);
        Ok(())
    }

    #[test]
    fn switch_keeps_in_memory_role_when_storage_is_full() -> eyre::Result<()> {
        let store = Arc::new(InMemoryKeyValueStore::with_quota(4));
        let persistence = Arc::new(LocalStoragePersistence::new(Arc::clone(&store)));
        let selector = RoleSelector::hydrate(persistence);

        ensure!(selector.switch(Role::Client).is_err());
        ensure!(selector.current() == Role::Client);
        ensure!(store.get("fieldwork_role")?.is_none());
        Ok(())
    }
}
