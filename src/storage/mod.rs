use crate::{
    domain::ticket::{Status, Ticket, TicketDraft, TicketId},
    error::Result,
};
use async_trait::async_trait;
use tokio::sync::watch;

#[cfg(feature = "local-storage")]
pub mod local_storage;

#[cfg(feature = "remote-storage")]
pub mod remote_storage;

/// Storage trait for persisting the active and archived ticket collections.
///
/// Two contracts hide behind this interface. A synchronous-style backend
/// (local key-value blobs) completes each call before returning and offers no
/// change notifications, so callers keep their own write-through cache. A
/// push-based backend additionally exposes snapshot channels via
/// [`Storage::watch_active`] / [`Storage::watch_archived`], and the durable
/// copy it pushes is the source of truth.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads all active tickets
    async fn load_active(&self) -> Result<Vec<Ticket>>;

    /// Loads all archived tickets
    async fn load_archived(&self) -> Result<Vec<Ticket>>;

    /// Persists a new active ticket. The backend assigns the id and returns
    /// the stored record.
    async fn create(&self, draft: &TicketDraft) -> Result<Ticket>;

    /// Overwrites the status of an active ticket. Unknown ids are a no-op.
    async fn update_status(&self, id: &TicketId, status: Status) -> Result<()>;

    /// Moves a ticket from the active collection to the archive.
    ///
    /// Backends without multi-document transactions perform this as two
    /// independent writes; a crash between them leaves the ticket in both
    /// collections (or, with the opposite write order, neither). Consumers
    /// must tolerate that transient state until the next snapshot.
    async fn move_to_archive(&self, ticket: &Ticket) -> Result<()>;

    /// Deletes an archived ticket. Unknown ids are a no-op.
    async fn delete_archived(&self, id: &TicketId) -> Result<()>;

    /// Subscription delivering the full active collection after each change.
    /// `None` for backends without push notifications.
    fn watch_active(&self) -> Option<watch::Receiver<Vec<Ticket>>> {
        None
    }

    /// Subscription delivering the full archived collection after each
    /// change. `None` for backends without push notifications.
    fn watch_archived(&self) -> Option<watch::Receiver<Vec<Ticket>>> {
        None
    }
}
