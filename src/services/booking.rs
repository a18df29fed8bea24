use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::database::models::{Activity, Booking, BookingInput, BookingStatus, CancelOutcome};
use crate::database::repositories::{
    BookingRepository, ReserveOutcome, ServiceRepository, SlotRepository, SlotReservation,
    UserRepository,
};
use crate::error::AppError;
use crate::services::activity_logger::ActivityLogger;
use crate::services::payments::{PaymentAuthorization, PaymentError, PaymentGateway};
use crate::services::stats::StatsService;

/// The booking entity manager. Owns the create/cancel/transition flows and
/// is the only writer of booking rows; slot mutation itself is delegated to
/// the slot repository, whose unique index settles races.
pub struct BookingService {
    slots: SlotRepository,
    bookings: BookingRepository,
    catalog: ServiceRepository,
    users: UserRepository,
    gateway: Arc<dyn PaymentGateway>,
    stats: StatsService,
    activity: ActivityLogger,
    op_timeout: Duration,
}

impl BookingService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        slots: SlotRepository,
        bookings: BookingRepository,
        catalog: ServiceRepository,
        users: UserRepository,
        gateway: Arc<dyn PaymentGateway>,
        stats: StatsService,
        activity: ActivityLogger,
        op_timeout_ms: u64,
    ) -> Self {
        Self {
            slots,
            bookings,
            catalog,
            users,
            gateway,
            stats,
            activity,
            op_timeout: Duration::from_millis(op_timeout_ms),
        }
    }

    /// Create a booking: validate, authorize payment, reserve the slot,
    /// capture. Payment is provisional around the reservation, so a
    /// conflict voids the hold and a failed capture releases the fresh
    /// booking; the slot is never left held by an unpaid booking.
    pub async fn create(&self, input: BookingInput) -> Result<Booking, AppError> {
        let scheduled_date = parse_date(&input.scheduled_date)?;
        let scheduled_time = parse_time(&input.scheduled_time)?;
        let location = input.location.trim();
        if location.is_empty() {
            return Err(AppError::validation("location must not be empty"));
        }

        let service = self
            .catalog
            .get_by_id(input.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {}", input.service_id)))?;
        if !self.users.exists(input.user_id).await? {
            return Err(AppError::NotFound(format!("User {}", input.user_id)));
        }

        let authorization = self
            .gateway
            .authorize(&input.payment.token, service.base_price_cents)
            .await
            .map_err(upstream)?;

        let reservation = SlotReservation {
            service_id: service.id,
            user_id: input.user_id,
            scheduled_date,
            scheduled_time,
            location: location.to_string(),
        };

        // The reserve runs on its own task so a deadline miss does not
        // cancel an insert that may already be committing.
        let mut reserve_task = {
            let slots = self.slots.clone();
            tokio::spawn(async move { slots.reserve(reservation).await })
        };

        let outcome = match tokio::time::timeout(self.op_timeout, &mut reserve_task).await {
            Ok(joined) => {
                joined.map_err(|err| AppError::internal(format!("reserve task failed: {}", err)))?
            }
            Err(_) => {
                self.void_quietly(&authorization).await;
                self.release_late_reservation(reserve_task, service.id, service.owner_id);
                return Err(AppError::Timeout("slot reservation".to_string()));
            }
        };

        let booking = match outcome {
            Ok(ReserveOutcome::Reserved(booking)) => booking,
            Ok(ReserveOutcome::SlotTaken) => {
                self.void_quietly(&authorization).await;
                return Err(AppError::SlotConflict {
                    service_id: service.id,
                    date: scheduled_date,
                    time: scheduled_time,
                });
            }
            Err(err) => {
                self.void_quietly(&authorization).await;
                return Err(err.into());
            }
        };

        if let Err(err) = self.gateway.capture(&authorization).await {
            log::warn!(
                "Capture failed for booking {}, releasing its slot: {}",
                booking.id,
                err
            );
            // A stats read racing the capture may have cached the doomed
            // booking; dropping the scope after the release keeps the
            // aggregates honest.
            if let Some(released) = self.slots.release(booking.id).await? {
                self.stats
                    .invalidate(released.service_id, released.owner_id)
                    .await;
            }
            return Err(upstream(err));
        }

        self.stats.invalidate(service.id, service.owner_id).await;
        self.activity
            .booking_created(booking.id, service.id, scheduled_date, scheduled_time)
            .await;

        Ok(booking)
    }

    /// Cancel a booking. Re-cancelling is a tolerated no-op; cancelling an
    /// id that never existed is an error; a completed booking stays in the
    /// books since undoing it would retroactively distort revenue stats.
    pub async fn cancel(&self, booking_id: Uuid) -> Result<CancelOutcome, AppError> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;

        match booking.status {
            BookingStatus::Cancelled => {
                log::debug!("Booking {} is already cancelled", booking_id);
                return Ok(CancelOutcome::AlreadyCancelled);
            }
            BookingStatus::Completed => {
                return Err(AppError::validation("completed bookings cannot be cancelled"));
            }
            BookingStatus::Pending | BookingStatus::Approved => {}
        }

        let released = tokio::time::timeout(self.op_timeout, self.slots.release(booking_id))
            .await
            .map_err(|_| AppError::Timeout("slot release".to_string()))??;

        let Some(released) = released else {
            // Lost a race against another cancel.
            log::debug!("Booking {} was cancelled concurrently", booking_id);
            return Ok(CancelOutcome::AlreadyCancelled);
        };

        self.stats
            .invalidate(released.service_id, released.owner_id)
            .await;
        self.activity
            .booking_cancelled(booking_id, released.released_assignments)
            .await;

        Ok(CancelOutcome::Cancelled)
    }

    /// Explicit lifecycle transition (pending -> approved -> completed).
    /// Cancellation is not reachable here; it goes through `cancel` so the
    /// slot is released and assignments are cascaded.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        next: BookingStatus,
    ) -> Result<Booking, AppError> {
        if next == BookingStatus::Cancelled {
            return Err(AppError::validation(
                "cancellation goes through the cancel endpoint",
            ));
        }

        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;

        if !booking.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "cannot transition booking from {} to {}",
                booking.status, next
            )));
        }

        let updated = self
            .bookings
            .update_status(booking_id, next)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;

        if let Some(service) = self.catalog.get_by_id(updated.service_id).await? {
            self.stats.invalidate(service.id, service.owner_id).await;
        }
        self.activity
            .booking_status_changed(booking_id, &booking.status.to_string(), &next.to_string())
            .await;

        Ok(updated)
    }

    pub async fn get_by_id(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        self.bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))
    }

    pub async fn activity_trail(&self, booking_id: Uuid) -> Result<Vec<Activity>, AppError> {
        if self.bookings.get_by_id(booking_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Booking {}", booking_id)));
        }

        Ok(self.activity.trail_for_booking(booking_id).await?)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.list_by_user(user_id).await?)
    }

    pub async fn list_by_service(&self, service_id: Uuid) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.list_by_service(service_id).await?)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.list_by_owner(owner_id).await?)
    }

    /// A reserve that misses its deadline may still commit afterwards, and
    /// the caller was told `Timeout` with no booking id to cancel. Await the
    /// straggler off to the side and release whatever row it created so the
    /// slot does not stay held by an unpaid booking.
    fn release_late_reservation(
        &self,
        pending: JoinHandle<anyhow::Result<ReserveOutcome>>,
        service_id: Uuid,
        owner_id: Uuid,
    ) {
        let slots = self.slots.clone();
        let stats = self.stats.clone();
        tokio::spawn(async move {
            if let Ok(Ok(ReserveOutcome::Reserved(booking))) = pending.await {
                log::warn!(
                    "Reserve of booking {} committed after its deadline, releasing it",
                    booking.id
                );
                match slots.release(booking.id).await {
                    Ok(Some(_)) => stats.invalidate(service_id, owner_id).await,
                    Ok(None) => {}
                    Err(err) => {
                        log::error!("Failed to release late booking {}: {}", booking.id, err)
                    }
                }
            }
        });
    }

    async fn void_quietly(&self, authorization: &PaymentAuthorization) {
        if let Err(err) = self.gateway.void(authorization).await {
            // The hold expires on its own; nothing to do but record it.
            log::warn!("Failed to void {}: {}", authorization.reference, err);
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("invalid time '{}', expected HH:MM", raw)))
}

fn upstream(err: PaymentError) -> AppError {
    AppError::UpstreamFailure(err.to_string())
}
