//! Connection entity <-> model mapper

use workout_core::entities::Connection;
use workout_core::value_objects::{ConnectionId, InvitationStatus, UserId};

use crate::models::ConnectionModel;

fn parse_status(s: &str) -> InvitationStatus {
    InvitationStatus::parse(s).unwrap_or(InvitationStatus::Pending)
}

impl From<ConnectionModel> for Connection {
    fn from(model: ConnectionModel) -> Self {
        Connection {
            id: ConnectionId::new(model.id),
            student_id: UserId::new(model.student_id),
            instructor_id: UserId::new(model.instructor_id),
            status: parse_status(&model.status),
            invited_at: model.invited_at,
            responded_at: model.responded_at,
            connected_at: model.connected_at,
        }
    }
}
