//! Integration tests for the directory-backed key/value store.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use fieldwork::{
    config::FieldworkConfig,
    task::{
        adapters::{directory::DirectoryKeyValueStore, local_storage::LocalStoragePersistence},
        domain::{CompletionReport, IntakeForm, Priority, TaskStatus},
        ports::{KeyValueError, KeyValueStore},
        services::{HydrationSource, TaskStore},
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("create temp dir: {err}"))
}

fn utf8_root(temp: &TempDir) -> Result<Utf8PathBuf, eyre::Report> {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre::eyre!("temp path is not UTF-8: {}", path.display()))
}

#[rstest]
fn values_survive_reopening(temp_dir: TempDir) -> Result<(), eyre::Report> {
    let root = utf8_root(&temp_dir)?;
    {
        let store = DirectoryKeyValueStore::open(&root)?;
        store.set("fieldwork_role", "client")?;
        store.set("scratch", "temporary")?;
        store.remove("scratch")?;
        store.remove("never-written")?;
    }

    let reopened = DirectoryKeyValueStore::open(&root)?;
    eyre::ensure!(reopened.get("fieldwork_role")?.as_deref() == Some("client"));
    eyre::ensure!(reopened.get("scratch")?.is_none());
    Ok(())
}

#[rstest]
#[case("../escape")]
#[case(".hidden")]
#[case("")]
#[case("with space")]
fn unsafe_keys_are_refused(temp_dir: TempDir, #[case] key: &str) -> Result<(), eyre::Report> {
    let store = DirectoryKeyValueStore::open(&utf8_root(&temp_dir)?)?;
    eyre::ensure!(matches!(
        store.set(key, "value"),
        Err(KeyValueError::InvalidKey(_))
    ));
    Ok(())
}

#[rstest]
fn quota_refuses_growth_but_allows_shrinking(temp_dir: TempDir) -> Result<(), eyre::Report> {
    let store = DirectoryKeyValueStore::open(&utf8_root(&temp_dir)?)?.with_quota(16);
    store.set("k", "0123456789")?;

    let refused = store.set("k", "0123456789abcdefXYZ");
    eyre::ensure!(matches!(refused, Err(KeyValueError::QuotaExceeded { .. })));
    eyre::ensure!(store.get("k")?.as_deref() == Some("0123456789"));

    store.set("k", "short")?;
    eyre::ensure!(store.get("k")?.as_deref() == Some("short"));
    Ok(())
}

#[rstest]
fn task_store_round_trips_through_files(temp_dir: TempDir) -> Result<(), eyre::Report> {
    let root = utf8_root(&temp_dir)?;
    let open_store = |path: &Utf8Path| -> Result<_, eyre::Report> {
        let kv = Arc::new(DirectoryKeyValueStore::open(path)?);
        Ok(TaskStore::hydrate(
            Arc::new(LocalStoragePersistence::new(kv)),
            Arc::new(DefaultClock),
            FieldworkConfig::default().store_settings(),
        ))
    };

    let created = {
        let store = open_store(&root)?;
        eyre::ensure!(store.hydration_source() == HydrationSource::Seed);
        let new_task = IntakeForm::new("No power", "Breaker trips", "Main St 1", "Jane")
            .with_priority(Priority::High)
            .validate()?;
        let created = store.create(new_task);
        store.start(created.id().clone())?;
        store.complete(
            created.id().clone(),
            CompletionReport::new()
                .with_time_spent_minutes(45)
                .with_worker_notes("Replaced breaker"),
        )?;
        created
    };

    let reopened = open_store(&root)?;
    eyre::ensure!(reopened.hydration_source() == HydrationSource::Stored);
    let task = reopened
        .find(created.id())
        .ok_or_else(|| eyre::eyre!("task missing after reopen"))?;
    eyre::ensure!(task.status() == TaskStatus::Completed);
    eyre::ensure!(task.worker_notes() == Some("Replaced breaker"));
    eyre::ensure!(reopened.statistics().completed_minutes_total() == 45);
    Ok(())
}

#[rstest]
fn configured_persistence_uses_configured_keys(temp_dir: TempDir) -> Result<(), eyre::Report> {
    let root = utf8_root(&temp_dir)?;
    let config = FieldworkConfig::from_lookup(|name| match name {
        "FIELDWORK_STORAGE_DIR" => Some(root.join("data").into_string()),
        "FIELDWORK_TASKS_KEY" => Some("orders".to_owned()),
        _ => None,
    })?;
    let persistence = Arc::new(config.open_persistence()?);
    let store = TaskStore::hydrate(
        Arc::clone(&persistence),
        Arc::new(DefaultClock),
        config.store_settings(),
    );
    drop(store);

    let raw = DirectoryKeyValueStore::open(&root.join("data"))?.get("orders")?;
    eyre::ensure!(raw.is_some_and(|json| json.contains("demo-1")));
    Ok(())
}
