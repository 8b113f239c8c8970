//! Shared fixtures for task unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::task::{
    adapters::{local_storage::LocalStoragePersistence, memory::InMemoryKeyValueStore},
    domain::{IntakeForm, NewTask, Priority, TaskDomainError},
    services::{TaskStore, TaskStoreSettings},
};

/// Clock frozen at a known instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl FixedClock {
    pub(super) fn at(hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 3, 14, hour, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) type MemoryPersistence = LocalStoragePersistence<InMemoryKeyValueStore>;
pub(super) type MemoryStore = TaskStore<MemoryPersistence, FixedClock>;

pub(super) fn memory_persistence(
    store: &Arc<InMemoryKeyValueStore>,
) -> Arc<MemoryPersistence> {
    Arc::new(LocalStoragePersistence::new(Arc::clone(store)))
}

pub(super) fn memory_store(kv: &Arc<InMemoryKeyValueStore>) -> MemoryStore {
    TaskStore::hydrate(
        memory_persistence(kv),
        Arc::new(FixedClock::at(9)),
        TaskStoreSettings::default(),
    )
}

pub(super) fn power_outage() -> Result<NewTask, TaskDomainError> {
    IntakeForm::new("No power", "Breaker trips", "Main St 1", "Jane")
        .with_priority(Priority::High)
        .validate()
}

pub(super) fn png_bytes(width: u32, height: u32) -> eyre::Result<Vec<u8>> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([30, 90, 160]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
