use uuid::Uuid;

use crate::database::models::{BookingStatus, StaffAssignment, StaffMember};
use crate::database::repositories::{
    AssignOutcome, AssignmentRepository, BookingRepository, ServiceRepository, StaffRepository,
};
use crate::error::AppError;
use crate::services::activity_logger::ActivityLogger;
use crate::services::stats::StatsService;

/// Outcome of an unassign call. Releasing a pair that was already released
/// is a tolerated no-op; a pair that never existed is the caller's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnassignOutcome {
    Released,
    AlreadyReleased,
}

/// The staff assignment engine. All booking <-> staff mutation funnels
/// through here; the unique `(booking_id, staff_id)` index underneath is
/// what makes the at-most-one-active-assignment rule hold under races.
pub struct AssignmentService {
    assignments: AssignmentRepository,
    bookings: BookingRepository,
    staff: StaffRepository,
    catalog: ServiceRepository,
    stats: StatsService,
    activity: ActivityLogger,
}

impl AssignmentService {
    pub fn new(
        assignments: AssignmentRepository,
        bookings: BookingRepository,
        staff: StaffRepository,
        catalog: ServiceRepository,
        stats: StatsService,
        activity: ActivityLogger,
    ) -> Self {
        Self {
            assignments,
            bookings,
            staff,
            catalog,
            stats,
            activity,
        }
    }

    pub async fn assign(
        &self,
        booking_id: Uuid,
        staff_id: Uuid,
    ) -> Result<StaffAssignment, AppError> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::validation(
                "cannot assign staff to a cancelled booking",
            ));
        }
        if self.staff.get_by_id(staff_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Staff {}", staff_id)));
        }

        let assignment = match self.assignments.assign(booking_id, staff_id).await? {
            AssignOutcome::Assigned(assignment) => assignment,
            AssignOutcome::PairActive => {
                return Err(AppError::AlreadyAssigned {
                    booking_id,
                    staff_id,
                });
            }
        };

        self.invalidate_scope(booking.service_id).await;
        self.activity.staff_assigned(booking_id, staff_id).await;

        Ok(assignment)
    }

    pub async fn unassign(
        &self,
        booking_id: Uuid,
        staff_id: Uuid,
    ) -> Result<UnassignOutcome, AppError> {
        let released = self.assignments.release(booking_id, staff_id).await?;
        if released > 0 {
            match self.bookings.get_by_id(booking_id).await {
                Ok(Some(booking)) => self.invalidate_scope(booking.service_id).await,
                Ok(None) => {}
                Err(err) => log::warn!(
                    "Failed to resolve booking {} for invalidation: {}",
                    booking_id,
                    err
                ),
            }
            self.activity.staff_unassigned(booking_id, staff_id).await;
            return Ok(UnassignOutcome::Released);
        }

        // Nothing active. A pair that existed before is a repeat unassign,
        // tolerated; a pair that never existed is NotFound.
        if self.assignments.pair_exists(booking_id, staff_id).await? {
            log::debug!(
                "Repeat unassign of staff {} from booking {}",
                staff_id,
                booking_id
            );
            Ok(UnassignOutcome::AlreadyReleased)
        } else {
            Err(AppError::NotFound(format!(
                "Assignment of staff {} to booking {}",
                staff_id, booking_id
            )))
        }
    }

    pub async fn list_by_booking(&self, booking_id: Uuid) -> Result<Vec<StaffAssignment>, AppError> {
        if self.bookings.get_by_id(booking_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Booking {}", booking_id)));
        }

        Ok(self.assignments.list_active_by_booking(booking_id).await?)
    }

    pub async fn assignable_staff(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Vec<StaffMember>, AppError> {
        if self.bookings.get_by_id(booking_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Booking {}", booking_id)));
        }

        Ok(self.assignments.assignable_staff(owner_id, booking_id).await?)
    }

    async fn invalidate_scope(&self, service_id: Uuid) {
        match self.catalog.get_by_id(service_id).await {
            Ok(Some(service)) => self.stats.invalidate(service.id, service.owner_id).await,
            Ok(None) => {}
            Err(err) => log::warn!("Failed to resolve service {} for invalidation: {}", service_id, err),
        }
    }
}
