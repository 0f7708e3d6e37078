use crate::{
    domain::ticket::{Status, Ticket, TicketDraft, TicketId},
    error::{Result, TicketingError},
    storage::Storage,
};
use std::sync::Arc;

/// Owns the authoritative in-memory ticket collections and keeps the storage
/// backend in sync.
///
/// A ticket lives in exactly one of the two collections. It is created into
/// `active`, optionally moved to `archived`, and can only be deleted from
/// there. Insertion order is preserved for display; it carries no other
/// meaning.
///
/// With a push-based backend the durable copy is the source of truth: writes
/// are fire-and-forget and the backend's snapshot pushes (applied via
/// [`TicketStore::apply_active_snapshot`] /
/// [`TicketStore::apply_archived_snapshot`]) replace in-memory state
/// wholesale. With a notification-less backend the store acts as a
/// write-through cache instead.
pub struct TicketStore {
    active: Vec<Ticket>,
    archived: Vec<Ticket>,
    storage: Arc<dyn Storage>,
    push_based: bool,
}

impl TicketStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let push_based = storage.watch_active().is_some();
        Self {
            active: Vec::new(),
            archived: Vec::new(),
            storage,
            push_based,
        }
    }

    /// Replaces both in-memory collections from the durable copy
    pub async fn load(&mut self) -> Result<()> {
        self.active = self.storage.load_active().await?;
        self.archived = self.storage.load_archived().await?;
        Ok(())
    }

    pub fn active(&self) -> &[Ticket] {
        &self.active
    }

    pub fn archived(&self) -> &[Ticket] {
        &self.archived
    }

    /// Creates a ticket from the draft.
    ///
    /// Fails before any persistence write when the project name is empty or
    /// duplicates an active ticket's (case-sensitive exact match). On
    /// success the backend assigns the id; with a push-based backend the
    /// in-memory collection is left untouched until the snapshot arrives,
    /// otherwise the created ticket is appended immediately.
    pub async fn add(&mut self, draft: TicketDraft) -> Result<TicketId> {
        if draft.project_name.is_empty() {
            return Err(TicketingError::EmptyProjectName);
        }
        if self
            .active
            .iter()
            .any(|t| t.project_name == draft.project_name)
        {
            return Err(TicketingError::DuplicateProjectName(draft.project_name));
        }

        let ticket = self.storage.create(&draft).await?;
        let id = ticket.id.clone();

        if !self.push_based {
            self.active.push(ticket);
        }

        Ok(id)
    }

    /// Overwrites the status of an active ticket and writes through.
    ///
    /// Unknown ids are a silent no-op. Backend errors are logged and
    /// swallowed; the write is asynchronous from the caller's point of view,
    /// so there is nothing to raise synchronously.
    pub async fn update_status(&mut self, id: &TicketId, status: Status) {
        let Some(ticket) = self.active.iter_mut().find(|t| &t.id == id) else {
            return;
        };
        ticket.status = status;

        if let Err(error) = self.storage.update_status(id, status).await {
            tracing::error!(%id, %error, "failed to persist status update");
        }
    }

    /// Moves an active ticket to the archive and writes both sides through.
    ///
    /// Unknown ids are a silent no-op. On backends without a transactional
    /// archive the durable copy may transiently hold the ticket in both
    /// collections (or neither); the next snapshot reconciles the in-memory
    /// view either way.
    pub async fn archive(&mut self, id: &TicketId) {
        let Some(index) = self.active.iter().position(|t| &t.id == id) else {
            return;
        };
        let ticket = self.active.remove(index);
        self.archived.push(ticket.clone());

        if let Err(error) = self.storage.move_to_archive(&ticket).await {
            tracing::error!(%id, %error, "failed to persist archive");
        }
    }

    /// Removes a ticket from the archive and writes through.
    ///
    /// Unknown ids are a silent no-op; backend errors are logged and
    /// swallowed.
    pub async fn delete_archived(&mut self, id: &TicketId) {
        let Some(index) = self.archived.iter().position(|t| &t.id == id) else {
            return;
        };
        self.archived.remove(index);

        if let Err(error) = self.storage.delete_archived(id).await {
            tracing::error!(%id, %error, "failed to persist archive deletion");
        }
    }

    /// Replaces the active collection with a pushed snapshot
    pub fn apply_active_snapshot(&mut self, tickets: Vec<Ticket>) {
        self.active = tickets;
    }

    /// Replaces the archived collection with a pushed snapshot
    pub fn apply_archived_snapshot(&mut self, tickets: Vec<Ticket>) {
        self.archived = tickets;
    }
}
