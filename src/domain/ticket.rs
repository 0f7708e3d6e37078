use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Opaque identifier for a ticket.
///
/// The value is assigned by the storage backend at creation time and never
/// changes afterwards. The local backend derives it from a millisecond
/// timestamp; the remote backend assigns a document UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = crate::error::TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(crate::error::TicketingError::InvalidPriority(
                other.to_string(),
            )),
        }
    }
}

/// Status of a ticket while it is active.
///
/// Any status may move to any other status; a transition is a plain field
/// write with no workflow enforcement. Archived tickets keep whatever status
/// they had when archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl Default for Status {
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for Status {
    type Err = crate::error::TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Closed" => Ok(Self::Closed),
            other => Err(crate::error::TicketingError::InvalidStatus(
                other.to_string(),
            )),
        }
    }
}

/// Creation-form payload for a new ticket: everything but the id.
///
/// Field names on the wire match the stored document shape
/// (`projectName`, `assignedTo`, ...), so a draft can be written directly as
/// the document body for backends that assign their own ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TicketDraft {
    /// Creates a draft with the given project name and the form defaults
    /// (Medium priority, Open status, nothing assigned, no due date).
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            assigned_to: String::new(),
            due_date: None,
        }
    }
}

/// A ticket record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Ticket {
    /// Builds a ticket from a backend-assigned id and a creation draft
    pub fn from_draft(id: TicketId, draft: TicketDraft) -> Self {
        Self {
            id,
            project_name: draft.project_name,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
        }
    }

    /// The draft-shaped body of this ticket, without the id. Used when
    /// writing to backends that key documents by their own identifier.
    pub fn to_draft(&self) -> TicketDraft {
        TicketDraft {
            project_name: self.project_name.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            assigned_to: self.assigned_to.clone(),
            due_date: self.due_date,
        }
    }
}
