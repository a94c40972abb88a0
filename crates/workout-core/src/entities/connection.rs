//! Connection entity - the instructor/student relationship record
//!
//! A record starts as an invitation (`Pending`) and is answered once by the
//! addressed student. Accepted records are removed by deletion only.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ConnectionId, InvitationStatus, UserId};

/// Relationship record between one student and one instructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub student_id: UserId,
    pub instructor_id: UserId,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub connected_at: Option<DateTime<Utc>>,
}

impl Connection {
    /// Create a pending invitation
    pub fn new(
        id: ConnectionId,
        student_id: UserId,
        instructor_id: UserId,
        invited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            instructor_id,
            status: InvitationStatus::Pending,
            invited_at,
            responded_at: None,
            connected_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.status == InvitationStatus::Accepted
    }

    /// Whether the invitation is addressed to `student_id`
    #[inline]
    pub fn is_addressed_to(&self, student_id: UserId) -> bool {
        self.student_id == student_id
    }

    /// Transition `Pending -> Accepted`
    pub fn accept(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Accepted;
        self.responded_at = Some(now);
        self.connected_at = Some(now);
        Ok(())
    }

    /// Transition `Pending -> Rejected`
    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_pending()?;
        self.status = InvitationStatus::Rejected;
        self.responded_at = Some(now);
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(DomainError::InvitationNotPending {
                status: self.status,
            })
        }
    }
}

/// Fields for a fresh invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConnection {
    pub student_id: UserId,
    pub instructor_id: UserId,
    pub invited_at: DateTime<Utc>,
}
