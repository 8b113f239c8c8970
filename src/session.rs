//! Form-session tickets for asynchronous work started from a task view.
//!
//! Each task has at most one live session per registry. Opening a new
//! session supersedes the previous one, and closing or superseding a session
//! aborts every tokio task tracked against it. Results that arrive for a
//! ticket that is no longer current are refused, so a late photo or summary
//! can never land on a newer form.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;
use tracing::debug;

use crate::task::domain::TaskId;

/// Identifies one form session for one task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionTicket {
    task_id: TaskId,
    generation: u64,
}

impl SessionTicket {
    /// Returns the task the session belongs to.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the session generation; later sessions have larger values.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct SessionEntry<S> {
    generation: u64,
    state: S,
    in_flight: Vec<AbortHandle>,
}

impl<S> SessionEntry<S> {
    fn abort_in_flight(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

/// Registry of live sessions keyed by task, each carrying state `S`.
#[derive(Debug)]
pub struct SessionRegistry<S> {
    next_generation: AtomicU64,
    sessions: Mutex<HashMap<TaskId, SessionEntry<S>>>,
}

impl<S> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self {
            next_generation: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl<S> SessionRegistry<S> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TaskId, SessionEntry<S>>> {
        // Entries are replaced wholesale, so a poisoned map is still coherent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a session for `task_id` with `state`, superseding any previous
    /// session for that task.
    pub fn open_with(&self, task_id: TaskId, state: S) -> SessionTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = SessionEntry {
            generation,
            state,
            in_flight: Vec::new(),
        };
        if let Some(mut previous) = self.lock().insert(task_id.clone(), entry) {
            debug!(task_id = %task_id, generation = previous.generation, "session superseded");
            previous.abort_in_flight();
        }
        SessionTicket {
            task_id,
            generation,
        }
    }

    /// Returns `true` while `ticket` names the live session of its task.
    #[must_use]
    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        self.lock()
            .get(&ticket.task_id)
            .is_some_and(|entry| entry.generation == ticket.generation)
    }

    /// Applies `update` to the session state if `ticket` is still current.
    ///
    /// Returns `false`, leaving everything untouched, for a stale ticket.
    pub fn update(&self, ticket: &SessionTicket, update: impl FnOnce(&mut S)) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(&ticket.task_id) {
            Some(entry) if entry.generation == ticket.generation => {
                update(&mut entry.state);
                true
            }
            _ => {
                debug!(
                    task_id = %ticket.task_id,
                    generation = ticket.generation,
                    "discarding result for stale session"
                );
                false
            }
        }
    }

    /// Ties an in-flight tokio task to the session so it is aborted when the
    /// session ends. A stale ticket aborts the task immediately.
    pub fn track(&self, ticket: &SessionTicket, handle: AbortHandle) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(&ticket.task_id) {
            Some(entry) if entry.generation == ticket.generation => {
                entry.in_flight.retain(|tracked| !tracked.is_finished());
                entry.in_flight.push(handle);
                true
            }
            _ => {
                handle.abort();
                false
            }
        }
    }

    /// Ends the session named by `ticket` and returns its state.
    ///
    /// Returns `None` when the ticket is stale; a newer session is left
    /// untouched.
    pub fn close(&self, ticket: &SessionTicket) -> Option<S> {
        let mut sessions = self.lock();
        let is_current = sessions
            .get(&ticket.task_id)
            .is_some_and(|entry| entry.generation == ticket.generation);
        if !is_current {
            return None;
        }
        let mut entry = sessions.remove(&ticket.task_id)?;
        entry.abort_in_flight();
        Some(entry.state)
    }

    /// Ends whatever session is live for `task_id`.
    pub fn dismiss(&self, task_id: &TaskId) -> bool {
        self.lock().remove(task_id).is_some_and(|mut entry| {
            entry.abort_in_flight();
            true
        })
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<S: Default> SessionRegistry<S> {
    /// Opens a session for `task_id` with default state.
    pub fn open(&self, task_id: TaskId) -> SessionTicket {
        self.open_with(task_id, S::default())
    }
}

impl<S: Clone> SessionRegistry<S> {
    /// Returns a copy of the state of the live session for `task_id`.
    #[must_use]
    pub fn state_of(&self, task_id: &TaskId) -> Option<S> {
        self.lock().get(task_id).map(|entry| entry.state.clone())
    }

    /// Returns a copy of the session state if `ticket` is still current.
    #[must_use]
    pub fn state(&self, ticket: &SessionTicket) -> Option<S> {
        self.lock()
            .get(&ticket.task_id)
            .filter(|entry| entry.generation == ticket.generation)
            .map(|entry| entry.state.clone())
    }
}
