pub mod query;
pub mod ticket;

pub use query::{query_tickets, sort_tickets, SortKey, TicketQuery};
pub use ticket::{Priority, Status, Ticket, TicketDraft, TicketId};
