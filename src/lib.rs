//! # Workday Core
//!
//! Core ticket store, query, and persistence logic for the Workday ticketing
//! system.
//!
//! This crate provides the ticket record model, the collection store that
//! owns the active and archived sets, the display-side query view, and
//! interchangeable persistence backends (local key-value blobs or a
//! push-based document store), without any dependency on a specific UI
//! implementation.

pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    query::{query_tickets, SortKey, TicketQuery},
    ticket::{Priority, Status, Ticket, TicketDraft, TicketId},
};
pub use error::{Result, TicketingError};
pub use storage::Storage;
pub use store::TicketStore;
