use crate::{
    domain::ticket::{Status, Ticket, TicketDraft, TicketId},
    error::Result,
    storage::Storage,
};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local key-value storage: one serialized blob per collection.
///
/// Every mutation is a read-modify-write of the whole collection file, so a
/// failure is a global I/O fault rather than a partial one. There is no
/// notification mechanism; callers either re-read after mutating or keep a
/// write-through cache.
pub struct LocalStorage {
    root_path: PathBuf,
}

impl LocalStorage {
    const DATA_DIR: &'static str = ".workday";
    const ACTIVE_FILE: &'static str = "tickets.json";
    const ARCHIVED_FILE: &'static str = "archived_tickets.json";

    /// Creates a new LocalStorage instance rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::DATA_DIR),
        }
    }

    fn active_file(&self) -> PathBuf {
        self.root_path.join(Self::ACTIVE_FILE)
    }

    fn archived_file(&self) -> PathBuf {
        self.root_path.join(Self::ARCHIVED_FILE)
    }

    async fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }
        Ok(())
    }

    async fn read_collection(&self, path: &Path) -> Result<Vec<Ticket>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(path).await?;
        let tickets: Vec<Ticket> = serde_json::from_str(&contents)?;
        Ok(tickets)
    }

    async fn write_collection(&self, path: &Path, tickets: &[Ticket]) -> Result<()> {
        self.ensure_directory_exists().await?;

        let json = serde_json::to_string_pretty(tickets)?;
        fs::write(path, json).await?;
        Ok(())
    }

    /// Millisecond-timestamp id, bumped past any id already in use so that
    /// two creates within the same millisecond stay distinct.
    fn next_id(existing: &[Ticket]) -> TicketId {
        let mut candidate = Utc::now().timestamp_millis();
        while existing
            .iter()
            .any(|t| t.id.as_str() == candidate.to_string())
        {
            candidate += 1;
        }
        TicketId::new(candidate.to_string())
    }

    /// Whether the data directory has been set up
    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.active_file().exists()
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists().await?;

        if !self.active_file().exists() {
            self.write_collection(&self.active_file(), &[]).await?;
        }
        if !self.archived_file().exists() {
            self.write_collection(&self.archived_file(), &[]).await?;
        }

        Ok(())
    }

    async fn load_active(&self) -> Result<Vec<Ticket>> {
        self.read_collection(&self.active_file()).await
    }

    async fn load_archived(&self) -> Result<Vec<Ticket>> {
        self.read_collection(&self.archived_file()).await
    }

    async fn create(&self, draft: &TicketDraft) -> Result<Ticket> {
        let mut active = self.load_active().await?;

        let ticket = Ticket::from_draft(Self::next_id(&active), draft.clone());
        active.push(ticket.clone());
        self.write_collection(&self.active_file(), &active).await?;

        Ok(ticket)
    }

    async fn update_status(&self, id: &TicketId, status: Status) -> Result<()> {
        let mut active = self.load_active().await?;

        let Some(ticket) = active.iter_mut().find(|t| &t.id == id) else {
            return Ok(());
        };
        ticket.status = status;

        self.write_collection(&self.active_file(), &active).await
    }

    async fn move_to_archive(&self, ticket: &Ticket) -> Result<()> {
        let mut archived = self.load_archived().await?;
        archived.push(ticket.clone());
        self.write_collection(&self.archived_file(), &archived)
            .await?;

        let mut active = self.load_active().await?;
        active.retain(|t| t.id != ticket.id);
        self.write_collection(&self.active_file(), &active).await
    }

    async fn delete_archived(&self, id: &TicketId) -> Result<()> {
        let mut archived = self.load_archived().await?;

        let before = archived.len();
        archived.retain(|t| &t.id != id);
        if archived.len() == before {
            return Ok(());
        }

        self.write_collection(&self.archived_file(), &archived)
            .await
    }
}
