//! Ticket statistics for the admin dashboard.

use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;
use crate::types::{Priority, TicketStatus};

/// Counts over the full ticket set.
///
/// Every bucket is always present; empty buckets report `0`. The status
/// buckets and the priority buckets each sum to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl StatsSnapshot {
    /// Reduce a ticket set to counts. Order-independent, O(n).
    pub fn from_tickets<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        tickets.into_iter().fold(Self::default(), |mut acc, ticket| {
            acc.record(ticket.status, ticket.priority);
            acc
        })
    }

    fn record(&mut self, status: TicketStatus, priority: Priority) {
        self.total += 1;
        match status {
            TicketStatus::Pending => self.pending += 1,
            TicketStatus::InProgress => self.in_progress += 1,
            TicketStatus::Resolved => self.resolved += 1,
            TicketStatus::Closed => self.closed += 1,
        }
        match priority {
            Priority::Critical => self.critical += 1,
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    /// Sum of the status buckets.
    #[must_use]
    pub const fn status_sum(&self) -> u64 {
        self.pending + self.in_progress + self.resolved + self.closed
    }

    /// Sum of the priority buckets.
    #[must_use]
    pub const fn priority_sum(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ticket::NewTicket;
    use crate::types::{TicketId, Timestamp};

    fn ticket(priority: Priority, status: TicketStatus) -> Ticket {
        let mut t = Ticket::create(
            TicketId::generate(),
            NewTicket {
                title: "Broken light".to_owned(),
                description: "Hallway light is flickering".to_owned(),
                priority,
                created_by: "User".to_owned(),
            },
            Timestamp::now(),
        );
        t.status = status;
        t
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let stats = StatsSnapshot::from_tickets(&Vec::<Ticket>::new());
        assert_eq!(stats, StatsSnapshot::default());
        assert_eq!(stats.total, 0);
    }

    #[test]
    fn test_counts_and_sums() {
        let tickets = vec![
            ticket(Priority::High, TicketStatus::Pending),
            ticket(Priority::High, TicketStatus::Resolved),
            ticket(Priority::Critical, TicketStatus::InProgress),
            ticket(Priority::Low, TicketStatus::Pending),
        ];
        let stats = StatsSnapshot::from_tickets(&tickets);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.closed, 0);
        assert_eq!(stats.high, 2);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.medium, 0);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.status_sum(), stats.total);
        assert_eq!(stats.priority_sum(), stats.total);
    }

    #[test]
    fn test_order_independent() {
        let mut tickets = vec![
            ticket(Priority::Medium, TicketStatus::Closed),
            ticket(Priority::Low, TicketStatus::Pending),
            ticket(Priority::Critical, TicketStatus::Resolved),
        ];
        let forward = StatsSnapshot::from_tickets(&tickets);
        tickets.reverse();
        assert_eq!(StatsSnapshot::from_tickets(&tickets), forward);
    }

    #[test]
    fn test_zero_buckets_are_serialized() {
        let json = serde_json::to_value(StatsSnapshot::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        assert!(obj.values().all(|v| v == 0));
    }
}
