use crate::domain::ticket::{Priority, Status, Ticket};
use std::str::FromStr;

/// Fields available for sorting the ticket list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ProjectName,
    Description,
    Priority,
    Status,
    AssignedTo,
    DueDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" | "project-name" => Ok(SortKey::ProjectName),
            "description" => Ok(SortKey::Description),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "assignee" | "assigned-to" => Ok(SortKey::AssignedTo),
            "due" | "due-date" => Ok(SortKey::DueDate),
            _ => Err(format!(
                "Invalid sort key '{}'. Valid keys: project, description, priority, status, assignee, due",
                s
            )),
        }
    }
}

/// Display-side query over a ticket collection.
///
/// An empty `search` and unset filters match everything; `sort: None` keeps
/// the collection's insertion order.
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
    pub search: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub sort: Option<SortKey>,
}

/// Computes the filtered and sorted projection of a ticket collection.
///
/// Pure function of its inputs: the slice is never mutated and the result is
/// recomputed from scratch on every call. All active filters must match
/// simultaneously; the search term is a case-insensitive substring match
/// against project name and description.
///
/// # Examples
/// ```
/// use workday_core::domain::query::{query_tickets, TicketQuery};
/// use workday_core::domain::ticket::{Status, Ticket, TicketDraft, TicketId};
///
/// let tickets = vec![Ticket::from_draft(TicketId::new("1"), TicketDraft::new("Alpha"))];
/// let query = TicketQuery {
///     status: Some(Status::Open),
///     ..TicketQuery::default()
/// };
///
/// let view = query_tickets(&tickets, &query);
/// assert_eq!(view.len(), 1);
/// ```
pub fn query_tickets(tickets: &[Ticket], query: &TicketQuery) -> Vec<Ticket> {
    let mut view: Vec<Ticket> = tickets
        .iter()
        .filter(|t| matches(t, query))
        .cloned()
        .collect();

    if let Some(key) = query.sort {
        sort_tickets(&mut view, key);
    }

    view
}

fn matches(ticket: &Ticket, query: &TicketQuery) -> bool {
    if let Some(status) = query.status {
        if ticket.status != status {
            return false;
        }
    }

    if let Some(priority) = query.priority {
        if ticket.priority != priority {
            return false;
        }
    }

    if query.search.is_empty() {
        return true;
    }

    let needle = query.search.to_lowercase();
    ticket.project_name.to_lowercase().contains(&needle)
        || ticket.description.to_lowercase().contains(&needle)
}

/// Sorts tickets in place by the raw string value of the chosen field,
/// ascending.
///
/// The comparison is plain lexicographic over the field's display string, so
/// enum-like fields order alphabetically rather than by severity or workflow
/// position: `High < Low < Medium` and `Closed < In Progress < Open`. That
/// ordering is the shipped behavior and is pinned by tests; change it only on
/// an explicit product decision. The sort is stable, so equal keys keep their
/// input order.
pub fn sort_tickets(tickets: &mut [Ticket], key: SortKey) {
    tickets.sort_by(|a, b| sort_value(a, key).cmp(&sort_value(b, key)));
}

fn sort_value(ticket: &Ticket, key: SortKey) -> String {
    match key {
        SortKey::ProjectName => ticket.project_name.clone(),
        SortKey::Description => ticket.description.clone(),
        SortKey::Priority => ticket.priority.to_string(),
        SortKey::Status => ticket.status.to_string(),
        SortKey::AssignedTo => ticket.assigned_to.clone(),
        // Unset dates render as "" and therefore sort first.
        SortKey::DueDate => ticket
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{TicketDraft, TicketId};
    use chrono::NaiveDate;

    fn ticket(id: &str, project: &str) -> Ticket {
        Ticket::from_draft(TicketId::new(id), TicketDraft::new(project))
    }

    fn ticket_with(id: &str, project: &str, priority: Priority, status: Status) -> Ticket {
        let mut draft = TicketDraft::new(project);
        draft.priority = priority;
        draft.status = status;
        Ticket::from_draft(TicketId::new(id), draft)
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let tickets = vec![ticket("1", "Alpha"), ticket("2", "Bravo")];

        let view = query_tickets(&tickets, &TicketQuery::default());
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].project_name, "Alpha");
        assert_eq!(view[1].project_name, "Bravo");
    }

    #[test]
    fn test_status_filter() {
        let tickets = vec![
            ticket_with("1", "Alpha", Priority::Medium, Status::Open),
            ticket_with("2", "Bravo", Priority::Medium, Status::Closed),
        ];
        let query = TicketQuery {
            status: Some(Status::Open),
            ..TicketQuery::default()
        };

        let view = query_tickets(&tickets, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].project_name, "Alpha");
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let tickets = vec![
            ticket_with("1", "Alpha", Priority::High, Status::Open),
            ticket_with("2", "Bravo", Priority::High, Status::Closed),
            ticket_with("3", "Charlie", Priority::Low, Status::Open),
        ];
        let query = TicketQuery {
            status: Some(Status::Open),
            priority: Some(Priority::High),
            ..TicketQuery::default()
        };

        let view = query_tickets(&tickets, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].project_name, "Alpha");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tickets = vec![ticket("1", "Payroll Migration"), ticket("2", "Onboarding")];
        let query = TicketQuery {
            search: "MIGRA".to_string(),
            ..TicketQuery::default()
        };

        let view = query_tickets(&tickets, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].project_name, "Payroll Migration");
    }

    #[test]
    fn test_search_matches_description() {
        let mut t = ticket("1", "Alpha");
        t.description = "Quarterly ledger cleanup".to_string();
        let tickets = vec![t, ticket("2", "Bravo")];
        let query = TicketQuery {
            search: "ledger".to_string(),
            ..TicketQuery::default()
        };

        let view = query_tickets(&tickets, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].project_name, "Alpha");
    }

    #[test]
    fn test_query_is_pure_and_idempotent() {
        let tickets = vec![
            ticket_with("1", "Alpha", Priority::High, Status::Open),
            ticket_with("2", "Bravo", Priority::Low, Status::Closed),
        ];
        let snapshot = tickets.clone();
        let query = TicketQuery {
            status: Some(Status::Open),
            ..TicketQuery::default()
        };

        let once = query_tickets(&tickets, &query);
        let twice = query_tickets(&once, &query);
        let again = query_tickets(&tickets, &query);

        // Filtering an already-filtered view changes nothing, identical
        // inputs give identical outputs, and the input is untouched.
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.len(), again.len());
        for (a, b) in once.iter().zip(again.iter()) {
            assert_eq!(a.id, b.id);
        }
        assert_eq!(tickets.len(), snapshot.len());
        for (a, b) in tickets.iter().zip(snapshot.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_sort_by_project_name() {
        let mut tickets = vec![
            ticket("1", "Charlie"),
            ticket("2", "Alpha"),
            ticket("3", "Bravo"),
        ];

        sort_tickets(&mut tickets, SortKey::ProjectName);

        assert_eq!(tickets[0].project_name, "Alpha");
        assert_eq!(tickets[1].project_name, "Bravo");
        assert_eq!(tickets[2].project_name, "Charlie");
    }

    #[test]
    fn test_sort_by_priority_is_alphabetic_not_severity() {
        let mut tickets = vec![
            ticket_with("1", "A", Priority::Medium, Status::Open),
            ticket_with("2", "B", Priority::Low, Status::Open),
            ticket_with("3", "C", Priority::High, Status::Open),
        ];

        sort_tickets(&mut tickets, SortKey::Priority);

        // "High" < "Low" < "Medium" lexicographically.
        assert_eq!(tickets[0].priority, Priority::High);
        assert_eq!(tickets[1].priority, Priority::Low);
        assert_eq!(tickets[2].priority, Priority::Medium);
    }

    #[test]
    fn test_sort_by_status_is_alphabetic_not_workflow() {
        let mut tickets = vec![
            ticket_with("1", "A", Priority::Medium, Status::Open),
            ticket_with("2", "B", Priority::Medium, Status::InProgress),
            ticket_with("3", "C", Priority::Medium, Status::Closed),
        ];

        sort_tickets(&mut tickets, SortKey::Status);

        // "Closed" < "In Progress" < "Open" lexicographically.
        assert_eq!(tickets[0].status, Status::Closed);
        assert_eq!(tickets[1].status, Status::InProgress);
        assert_eq!(tickets[2].status, Status::Open);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut tickets = vec![
            ticket_with("1", "Zulu", Priority::High, Status::Open),
            ticket_with("2", "Alpha", Priority::High, Status::Open),
            ticket_with("3", "Mike", Priority::High, Status::Open),
        ];

        sort_tickets(&mut tickets, SortKey::Priority);

        assert_eq!(tickets[0].id.as_str(), "1");
        assert_eq!(tickets[1].id.as_str(), "2");
        assert_eq!(tickets[2].id.as_str(), "3");
    }

    #[test]
    fn test_sort_by_due_date_unset_sorts_first() {
        let mut with_date = ticket("1", "Alpha");
        with_date.due_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let mut tickets = vec![with_date, ticket("2", "Bravo")];

        sort_tickets(&mut tickets, SortKey::DueDate);

        assert_eq!(tickets[0].project_name, "Bravo");
        assert_eq!(tickets[1].project_name, "Alpha");
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SortKey::from_str("project").unwrap(), SortKey::ProjectName);
        assert_eq!(SortKey::from_str("due-date").unwrap(), SortKey::DueDate);
        assert_eq!(SortKey::from_str("STATUS").unwrap(), SortKey::Status);
        assert!(SortKey::from_str("severity").is_err());
    }
}
