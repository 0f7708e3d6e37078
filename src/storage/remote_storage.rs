use crate::{
    domain::ticket::{Status, Ticket, TicketDraft, TicketId},
    error::Result,
    storage::Storage,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use uuid::Uuid;

/// A stored document: backend-assigned id plus the id-less ticket body,
/// mirroring how the hosted document store keys its records.
#[derive(Debug, Clone)]
struct Document {
    id: String,
    body: TicketDraft,
}

impl Document {
    fn to_ticket(&self) -> Ticket {
        Ticket::from_draft(TicketId::new(self.id.clone()), self.body.clone())
    }
}

#[derive(Debug, Default)]
struct Collections {
    active: Vec<Document>,
    archived: Vec<Document>,
}

/// In-process document-store backend with the hosted store's contract.
///
/// Documents are keyed by backend-assigned UUIDs; every mutation is an
/// independent per-document write; and after each committed write the full
/// current snapshot of the touched collection is published on a watch
/// channel. Subscribers see snapshots at-least-once with latest-wins
/// conflation, and no ordering holds across the two channels.
///
/// [`Storage::move_to_archive`] is two independent writes with no
/// transaction around them, so an interruption between the archived insert
/// and the active delete leaves the ticket visible in both collections until
/// the operation is retried or repaired. This is the accepted inconsistency
/// window of the remote contract, not a bug in this backend.
///
/// Useful as the single-process stand-in for the hosted store and for
/// exercising push-based consumers in tests.
pub struct RemoteStorage {
    collections: Mutex<Collections>,
    active_tx: watch::Sender<Vec<Ticket>>,
    archived_tx: watch::Sender<Vec<Ticket>>,
}

impl RemoteStorage {
    pub fn new() -> Self {
        let (active_tx, _) = watch::channel(Vec::new());
        let (archived_tx, _) = watch::channel(Vec::new());
        Self {
            collections: Mutex::new(Collections::default()),
            active_tx,
            archived_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_active(&self, collections: &Collections) {
        let snapshot = collections.active.iter().map(Document::to_ticket).collect();
        self.active_tx.send_replace(snapshot);
    }

    fn publish_archived(&self, collections: &Collections) {
        let snapshot = collections
            .archived
            .iter()
            .map(Document::to_ticket)
            .collect();
        self.archived_tx.send_replace(snapshot);
    }

    /// First half of the archive operation: one independent write.
    fn insert_archived_doc(&self, ticket: &Ticket) {
        let mut collections = self.lock();
        collections.archived.push(Document {
            id: ticket.id.as_str().to_string(),
            body: ticket.to_draft(),
        });
        self.publish_archived(&collections);
    }

    /// Second half of the archive operation: one independent write.
    fn remove_active_doc(&self, id: &TicketId) {
        let mut collections = self.lock();
        collections.active.retain(|d| d.id != id.as_str());
        self.publish_active(&collections);
    }
}

impl Default for RemoteStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for RemoteStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn load_active(&self) -> Result<Vec<Ticket>> {
        let collections = self.lock();
        Ok(collections.active.iter().map(Document::to_ticket).collect())
    }

    async fn load_archived(&self) -> Result<Vec<Ticket>> {
        let collections = self.lock();
        Ok(collections
            .archived
            .iter()
            .map(Document::to_ticket)
            .collect())
    }

    async fn create(&self, draft: &TicketDraft) -> Result<Ticket> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            body: draft.clone(),
        };
        let ticket = document.to_ticket();

        let mut collections = self.lock();
        collections.active.push(document);
        self.publish_active(&collections);

        Ok(ticket)
    }

    async fn update_status(&self, id: &TicketId, status: Status) -> Result<()> {
        let mut collections = self.lock();

        let Some(document) = collections.active.iter_mut().find(|d| d.id == id.as_str())
        else {
            return Ok(());
        };
        document.body.status = status;

        self.publish_active(&collections);
        Ok(())
    }

    async fn move_to_archive(&self, ticket: &Ticket) -> Result<()> {
        // Two writes, no transaction: the window between them is part of the
        // contract (see the type-level docs).
        self.insert_archived_doc(ticket);
        self.remove_active_doc(&ticket.id);
        Ok(())
    }

    async fn delete_archived(&self, id: &TicketId) -> Result<()> {
        let mut collections = self.lock();

        let before = collections.archived.len();
        collections.archived.retain(|d| d.id != id.as_str());
        if collections.archived.len() == before {
            return Ok(());
        }

        self.publish_archived(&collections);
        Ok(())
    }

    fn watch_active(&self) -> Option<watch::Receiver<Vec<Ticket>>> {
        Some(self.active_tx.subscribe())
    }

    fn watch_archived(&self) -> Option<watch::Receiver<Vec<Ticket>>> {
        Some(self.archived_tx.subscribe())
    }
}
