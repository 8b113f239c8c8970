//! In-memory integration tests for the role flag.

use std::sync::Arc;

use fieldwork::task::{
    adapters::{local_storage::LocalStoragePersistence, memory::InMemoryKeyValueStore},
    domain::Role,
    ports::KeyValueStore,
    services::RoleSelector,
};
use rstest::rstest;

#[rstest]
#[case(None, Role::Worker)]
#[case(Some("client"), Role::Client)]
#[case(Some("worker"), Role::Worker)]
#[case(Some("supervisor"), Role::Worker)]
fn stored_flag_selects_initial_role(
    #[case] stored: Option<&str>,
    #[case] expected: Role,
) -> Result<(), eyre::Report> {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    if let Some(flag) = stored {
        storage.set("fieldwork_role", flag)?;
    }
    let selector = RoleSelector::hydrate(Arc::new(LocalStoragePersistence::new(storage)));
    eyre::ensure!(selector.current() == expected);
    Ok(())
}

#[rstest]
fn switching_role_writes_the_flag() -> Result<(), eyre::Report> {
    let storage = Arc::new(InMemoryKeyValueStore::new());
    let selector =
        RoleSelector::hydrate(Arc::new(LocalStoragePersistence::new(Arc::clone(&storage))));

    selector.switch(Role::Client)?;
    eyre::ensure!(storage.get("fieldwork_role")?.as_deref() == Some("client"));
    selector.switch(Role::Worker)?;
    eyre::ensure!(storage.get("fieldwork_role")?.as_deref() == Some("worker"));
    Ok(())
}
