//! Field validation for maintenance tickets.
//!
//! Every function here is pure: it takes raw client-submitted values and
//! returns either the normalized value or the first [`ValidationError`].
//! Fields are always checked in the order title, description, priority,
//! status.

use thiserror::Error;

use crate::ticket::{CreateTicket, NewTicket};
use crate::types::{Priority, TicketStatus};

/// Minimum title length in characters (after trimming).
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length in characters (after trimming).
pub const TITLE_MAX_CHARS: usize = 255;
/// Minimum description length in characters (after trimming).
pub const DESCRIPTION_MIN_CHARS: usize = 10;
/// Reporter name used when a ticket is created without one.
pub const DEFAULT_CREATED_BY: &str = "User";

/// A client-supplied ticket field violates its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field required on create is missing or empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// Title is shorter than 3 or longer than 255 characters.
    #[error("Title must be between 3 and 255 characters")]
    TitleLength,

    /// Description is shorter than 10 characters.
    #[error("Description must be at least 10 characters")]
    DescriptionLength,

    /// Priority is not one of the enumerated values.
    #[error("Invalid priority. Must be one of: Low, Medium, High, Critical")]
    InvalidPriority,

    /// Status is not one of the enumerated values.
    #[error("Invalid status. Must be one of: Pending, In Progress, Resolved, Closed")]
    InvalidStatus,

    /// A partial update did not contain any recognized field.
    #[error("No fields to update")]
    EmptyUpdate,
}

/// Validate and normalize a title.
///
/// # Errors
///
/// Returns [`ValidationError::TitleLength`] unless the trimmed title is
/// between 3 and 255 characters inclusive.
pub fn title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        Ok(trimmed.to_owned())
    } else {
        Err(ValidationError::TitleLength)
    }
}

/// Validate and normalize a description.
///
/// # Errors
///
/// Returns [`ValidationError::DescriptionLength`] if the trimmed description
/// is shorter than 10 characters.
pub fn description(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() >= DESCRIPTION_MIN_CHARS {
        Ok(trimmed.to_owned())
    } else {
        Err(ValidationError::DescriptionLength)
    }
}

/// Parse a priority (exact, case-sensitive match after trimming).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPriority`] for anything outside
/// `Low`, `Medium`, `High`, `Critical`.
pub fn priority(raw: &str) -> Result<Priority, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidPriority)
}

/// Parse a status (exact, case-sensitive match after trimming).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStatus`] for anything outside
/// `Pending`, `In Progress`, `Resolved`, `Closed`.
pub fn status(raw: &str) -> Result<TicketStatus, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidStatus)
}

/// Validate a create request.
///
/// Title and description are required (missing, `null` and empty strings
/// all count as missing). Priority defaults to `Medium`, the reporter to
/// `"User"`. Any status in the input is ignored: new tickets are always
/// `Pending`.
///
/// # Errors
///
/// Returns the first failing check in field order.
pub fn new_ticket(input: &CreateTicket) -> Result<NewTicket, ValidationError> {
    let title = match input.title.as_deref() {
        Some(raw) if !raw.is_empty() => title(raw)?,
        _ => return Err(ValidationError::Required("Title")),
    };
    let description = match input.description.as_deref() {
        Some(raw) if !raw.is_empty() => description(raw)?,
        _ => return Err(ValidationError::Required("Description")),
    };
    let priority = input
        .priority
        .as_deref()
        .map_or(Ok(Priority::default()), priority)?;
    let created_by = input
        .created_by
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_CREATED_BY)
        .to_owned();

    Ok(NewTicket {
        title,
        description,
        priority,
        created_by,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create(title: &str, description: &str) -> CreateTicket {
        CreateTicket {
            title: Some(title.to_owned()),
            description: Some(description.to_owned()),
            ..CreateTicket::default()
        }
    }

    #[test]
    fn test_title_boundaries() {
        assert_eq!(title("ab"), Err(ValidationError::TitleLength));
        assert_eq!(title("abc").unwrap(), "abc");
        assert_eq!(title(&"x".repeat(255)).unwrap().len(), 255);
        assert_eq!(title(&"x".repeat(256)), Err(ValidationError::TitleLength));
    }

    #[test]
    fn test_title_is_trimmed_before_measuring() {
        assert_eq!(title("  ab  "), Err(ValidationError::TitleLength));
        assert_eq!(title("  abc  ").unwrap(), "abc");
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        // 255 two-byte characters is still a valid title
        let accented = "é".repeat(255);
        assert!(title(&accented).is_ok());
        assert_eq!(title(&"é".repeat(256)), Err(ValidationError::TitleLength));
    }

    #[test]
    fn test_description_boundaries() {
        assert_eq!(
            description("123456789"),
            Err(ValidationError::DescriptionLength)
        );
        assert_eq!(description("1234567890").unwrap(), "1234567890");
        assert_eq!(
            description("   12345678   "),
            Err(ValidationError::DescriptionLength)
        );
    }

    #[test]
    fn test_priority_values() {
        assert_eq!(priority("Critical").unwrap(), Priority::Critical);
        assert_eq!(priority(" Low ").unwrap(), Priority::Low);
        assert_eq!(priority("critical"), Err(ValidationError::InvalidPriority));
        assert_eq!(priority(""), Err(ValidationError::InvalidPriority));
    }

    #[test]
    fn test_status_values() {
        assert_eq!(status("In Progress").unwrap(), TicketStatus::InProgress);
        assert_eq!(status("Resolved").unwrap(), TicketStatus::Resolved);
        assert_eq!(status("resolved"), Err(ValidationError::InvalidStatus));
        assert_eq!(status("Open"), Err(ValidationError::InvalidStatus));
    }

    #[test]
    fn test_new_ticket_defaults() {
        let ticket = new_ticket(&create("Leaky faucet", "Kitchen faucet drips constantly")).unwrap();
        assert_eq!(ticket.title, "Leaky faucet");
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.created_by, "User");
    }

    #[test]
    fn test_new_ticket_trims_reporter() {
        let mut input = create("Leaky faucet", "Kitchen faucet drips constantly");
        input.created_by = Some("  Facilities  ".to_owned());
        assert_eq!(new_ticket(&input).unwrap().created_by, "Facilities");

        input.created_by = Some("   ".to_owned());
        assert_eq!(new_ticket(&input).unwrap().created_by, "User");
    }

    #[test]
    fn test_new_ticket_requires_title_and_description() {
        let missing_title = CreateTicket {
            description: Some("Kitchen faucet drips constantly".to_owned()),
            ..CreateTicket::default()
        };
        assert_eq!(
            new_ticket(&missing_title),
            Err(ValidationError::Required("Title"))
        );

        let empty_description = create("Leaky faucet", "");
        assert_eq!(
            new_ticket(&empty_description),
            Err(ValidationError::Required("Description"))
        );
    }

    #[test]
    fn test_new_ticket_checks_fields_in_order() {
        // Both title and priority are invalid: title wins
        let mut input = create("ab", "short");
        input.priority = Some("Urgent".to_owned());
        assert_eq!(new_ticket(&input), Err(ValidationError::TitleLength));

        // Title fixed: description is next
        input.title = Some("Broken window".to_owned());
        assert_eq!(new_ticket(&input), Err(ValidationError::DescriptionLength));

        // Description fixed: priority is last
        input.description = Some("Window in room 12 is cracked".to_owned());
        assert_eq!(new_ticket(&input), Err(ValidationError::InvalidPriority));
    }
}
