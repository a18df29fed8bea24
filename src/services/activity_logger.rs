use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::database::models::{Action, Activity, CreateActivityInput, EntityType};
use crate::database::repositories::ActivityRepository;

/// Audit-trail writer. Logging must never fail the operation being logged,
/// so every helper swallows repository errors with a warning. Reads go
/// through `trail_for_booking`, which does propagate errors.
#[derive(Clone)]
pub struct ActivityLogger {
    repository: ActivityRepository,
}

impl ActivityLogger {
    pub fn new(repository: ActivityRepository) -> Self {
        Self { repository }
    }

    /// Newest-first audit entries for a booking, covering both its
    /// lifecycle changes and its staff assignment churn.
    pub async fn trail_for_booking(&self, booking_id: Uuid) -> anyhow::Result<Vec<Activity>> {
        let mut entries = self
            .repository
            .list_for_entity(EntityType::BOOKING, booking_id)
            .await?;
        entries.extend(
            self.repository
                .list_for_entity(EntityType::ASSIGNMENT, booking_id)
                .await?,
        );
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn log(&self, input: CreateActivityInput) {
        if let Err(err) = self.repository.log_activity(input).await {
            log::warn!("Failed to record activity: {}", err);
        }
    }

    pub async fn booking_created(
        &self,
        booking_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) {
        let mut metadata = HashMap::new();
        metadata.insert("service_id".to_string(), serde_json::json!(service_id));
        metadata.insert("date".to_string(), serde_json::json!(date));
        metadata.insert("time".to_string(), serde_json::json!(time));

        self.log(CreateActivityInput {
            entity_type: EntityType::BOOKING.to_string(),
            entity_id: booking_id,
            action: Action::CREATED.to_string(),
            description: format!("Booking created for {} at {}", date, time),
            metadata: Some(metadata),
        })
        .await;
    }

    pub async fn booking_cancelled(&self, booking_id: Uuid, released_assignments: u64) {
        let mut metadata = HashMap::new();
        metadata.insert(
            "released_assignments".to_string(),
            serde_json::json!(released_assignments),
        );

        self.log(CreateActivityInput {
            entity_type: EntityType::BOOKING.to_string(),
            entity_id: booking_id,
            action: Action::CANCELLED.to_string(),
            description: format!(
                "Booking cancelled, {} staff assignment(s) released",
                released_assignments
            ),
            metadata: Some(metadata),
        })
        .await;
    }

    pub async fn booking_status_changed(&self, booking_id: Uuid, from: &str, to: &str) {
        self.log(CreateActivityInput {
            entity_type: EntityType::BOOKING.to_string(),
            entity_id: booking_id,
            action: Action::STATUS_CHANGED.to_string(),
            description: format!("Booking status changed from {} to {}", from, to),
            metadata: None,
        })
        .await;
    }

    pub async fn staff_assigned(&self, booking_id: Uuid, staff_id: Uuid) {
        let mut metadata = HashMap::new();
        metadata.insert("staff_id".to_string(), serde_json::json!(staff_id));

        self.log(CreateActivityInput {
            entity_type: EntityType::ASSIGNMENT.to_string(),
            entity_id: booking_id,
            action: Action::ASSIGNED.to_string(),
            description: format!("Staff {} assigned", staff_id),
            metadata: Some(metadata),
        })
        .await;
    }

    pub async fn staff_unassigned(&self, booking_id: Uuid, staff_id: Uuid) {
        let mut metadata = HashMap::new();
        metadata.insert("staff_id".to_string(), serde_json::json!(staff_id));

        self.log(CreateActivityInput {
            entity_type: EntityType::ASSIGNMENT.to_string(),
            entity_id: booking_id,
            action: Action::UNASSIGNED.to_string(),
            description: format!("Staff {} unassigned", staff_id),
            metadata: Some(metadata),
        })
        .await;
    }
}
