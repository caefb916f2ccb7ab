//! Assignments service.

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{info, warn};

use dormitory::{
    assignments::{
        AssignmentStatus, AssignmentUuid, apply_status_change, checkout, generate_reference,
    },
    dashboard::DateFilter,
    occupancy::OccupancyEffect,
    pricing::{days_between, estimate_total, storable_amount},
};

use crate::{
    database::Db,
    domain::{
        assignments::{
            data::{NewAssignment, StatusUpdate},
            errors::AssignmentsServiceError,
            models::{AssignmentRecord, CheckoutReceipt, PrintTransaction},
            repository::PgAssignmentsRepository,
        },
        rooms::{RoomsServiceError, repository::PgRoomsRepository},
        users::AuthenticatedUser,
    },
};

/// Attempts at drawing an unused reference number.
const REFERENCE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgAssignmentsService {
    db: Db,
    repository: PgAssignmentsRepository,
    rooms: PgRoomsRepository,
    tz: TimeZone,
}

impl PgAssignmentsService {
    /// `tz` decides the calendar day used for reference numbers and reports.
    #[must_use]
    pub fn new(db: Db, tz: TimeZone) -> Self {
        Self {
            db,
            repository: PgAssignmentsRepository::new(),
            rooms: PgRoomsRepository::new(),
            tz,
        }
    }
}

fn room_lookup(error: sqlx::Error) -> AssignmentsServiceError {
    match RoomsServiceError::from(error) {
        RoomsServiceError::NotFound => AssignmentsServiceError::RoomNotFound,
        RoomsServiceError::Sql(error) => AssignmentsServiceError::Sql(error),
        _ => AssignmentsServiceError::InvalidData,
    }
}

#[async_trait]
impl AssignmentsService for PgAssignmentsService {
    async fn create_assignment(
        &self,
        tenant: AuthenticatedUser,
        assignment: NewAssignment,
    ) -> Result<AssignmentRecord, AssignmentsServiceError> {
        let id_document_path = assignment
            .id_document_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .ok_or(AssignmentsServiceError::MissingIdDocument)?;

        let mut tx = self.db.begin().await?;

        let room = self
            .rooms
            .get_room(&mut tx, assignment.room)
            .await
            .map_err(room_lookup)?;

        if !room.accepts_bookings() {
            return Err(AssignmentsServiceError::RoomUnavailable);
        }

        if self
            .repository
            .has_open_assignment(&mut tx, tenant.uuid)
            .await?
        {
            return Err(AssignmentsServiceError::AlreadyHasOpenAssignment);
        }

        let total_price = match assignment.total_price {
            Some(price) => storable_amount(price).ok_or(AssignmentsServiceError::InvalidPrice)?,
            None => estimate_total(room.monthly_rate, &assignment.stay)?,
        };

        let today = Timestamp::now().to_zoned(self.tz.clone()).date();
        let mut created = None;

        for _ in 0..REFERENCE_ATTEMPTS {
            let reference = generate_reference(today);

            created = self
                .repository
                .insert_assignment(
                    &mut tx,
                    tenant.uuid,
                    &reference,
                    &assignment,
                    id_document_path,
                    total_price,
                )
                .await?;

            if created.is_some() {
                break;
            }

            warn!(%reference, "reference number collision, retrying");
        }

        let uuid = created.ok_or(AssignmentsServiceError::ReferenceExhausted)?;

        let record = self.repository.get_record(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(
            assignment = %uuid,
            reference = %record.assignment.reference,
            room = %record.room.uuid,
            tenant = %tenant.uuid,
            "assignment requested"
        );

        Ok(record)
    }

    async fn list_assignments(
        &self,
        viewer: AuthenticatedUser,
    ) -> Result<Vec<AssignmentRecord>, AssignmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = if viewer.is_admin() {
            self.repository.list_records(&mut tx).await?
        } else {
            self.repository
                .list_user_records(&mut tx, viewer.uuid)
                .await?
        };

        tx.commit().await?;

        Ok(records)
    }

    async fn list_pending_assignments(
        &self,
    ) -> Result<Vec<AssignmentRecord>, AssignmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .list_records_by_status(&mut tx, AssignmentStatus::Pending)
            .await?;

        tx.commit().await?;

        Ok(records)
    }

    async fn get_assignment(
        &self,
        viewer: AuthenticatedUser,
        assignment: AssignmentUuid,
    ) -> Result<AssignmentRecord, AssignmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_record(&mut tx, assignment).await?;

        tx.commit().await?;

        if !viewer.is_admin() && record.tenant.uuid != viewer.uuid {
            return Err(AssignmentsServiceError::Forbidden);
        }

        Ok(record)
    }

    async fn update_status(
        &self,
        actor: AuthenticatedUser,
        assignment: AssignmentUuid,
        update: StatusUpdate,
    ) -> Result<AssignmentRecord, AssignmentsServiceError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let mut locked = self.repository.lock_assignment(&mut tx, assignment).await?;
        let mut room = self
            .rooms
            .lock_room(&mut tx, locked.room)
            .await
            .map_err(room_lookup)?;

        let change = apply_status_change(&mut locked, &mut room, update.status, now, actor.uuid)?;

        if let Some(notes) = update.notes.as_deref() {
            locked.set_notes(notes);
            locked.updated_at = now;
        }

        self.repository.save_assignment(&mut tx, &locked).await?;

        if change.effect != OccupancyEffect::None {
            self.rooms.save_occupancy(&mut tx, &room).await?;
        }

        let record = self.repository.get_record(&mut tx, assignment).await?;

        tx.commit().await?;

        if !change.is_noop() {
            info!(
                assignment = %assignment,
                from = %change.previous,
                to = %change.next,
                room = %room.uuid,
                occupied = room.occupied,
                capacity = room.capacity,
                "assignment status changed"
            );
        }

        Ok(record)
    }

    async fn checkout(
        &self,
        tenant: AuthenticatedUser,
        assignment: AssignmentUuid,
    ) -> Result<CheckoutReceipt, AssignmentsServiceError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let mut locked = self.repository.lock_assignment(&mut tx, assignment).await?;
        let mut room = self
            .rooms
            .lock_room(&mut tx, locked.room)
            .await
            .map_err(room_lookup)?;

        let outcome = checkout(&mut locked, &mut room, tenant.uuid, now)?;

        self.repository.save_assignment(&mut tx, &locked).await?;
        self.rooms.save_occupancy(&mut tx, &room).await?;

        let record = self.repository.get_record(&mut tx, assignment).await?;

        tx.commit().await?;

        info!(
            assignment = %assignment,
            tenant = %tenant.uuid,
            status = %outcome.status(),
            "assignment checked out"
        );

        Ok(CheckoutReceipt { outcome, record })
    }

    async fn list_print_transactions(
        &self,
        filter: DateFilter,
    ) -> Result<Vec<PrintTransaction>, AssignmentsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_billable_records(&mut tx).await?;

        tx.commit().await?;

        let transactions = records
            .into_iter()
            .filter_map(|record| {
                let (check_in, check_out) = record.assignment.stay_window(&self.tz);

                filter
                    .overlaps(check_in, check_out)
                    .then(|| PrintTransaction {
                        duration_days: days_between(check_in, check_out),
                        reference: record.assignment.reference,
                        tenant_name: record.tenant.name,
                        tenant_email: record.tenant.email,
                        room_number: record.room.number,
                        status: record.assignment.status,
                        check_in,
                        check_out,
                        total_price: record.assignment.total_price,
                    })
            })
            .collect();

        Ok(transactions)
    }
}

#[automock]
#[async_trait]
pub trait AssignmentsService: Send + Sync {
    /// Request a room on behalf of `tenant`. Occupancy is untouched until approval.
    async fn create_assignment(
        &self,
        tenant: AuthenticatedUser,
        assignment: NewAssignment,
    ) -> Result<AssignmentRecord, AssignmentsServiceError>;

    /// Every assignment for admins, the caller's own otherwise.
    async fn list_assignments(
        &self,
        viewer: AuthenticatedUser,
    ) -> Result<Vec<AssignmentRecord>, AssignmentsServiceError>;

    /// Assignments awaiting an admin decision, oldest first.
    async fn list_pending_assignments(
        &self,
    ) -> Result<Vec<AssignmentRecord>, AssignmentsServiceError>;

    /// Retrieve a single assignment visible to `viewer`.
    async fn get_assignment(
        &self,
        viewer: AuthenticatedUser,
        assignment: AssignmentUuid,
    ) -> Result<AssignmentRecord, AssignmentsServiceError>;

    /// Move an assignment to a new status and keep its room in step.
    async fn update_status(
        &self,
        actor: AuthenticatedUser,
        assignment: AssignmentUuid,
        update: StatusUpdate,
    ) -> Result<AssignmentRecord, AssignmentsServiceError>;

    /// Tenant self-service checkout or cancellation.
    async fn checkout(
        &self,
        tenant: AuthenticatedUser,
        assignment: AssignmentUuid,
    ) -> Result<CheckoutReceipt, AssignmentsServiceError>;

    /// Billable stays overlapping `filter`.
    async fn list_print_transactions(
        &self,
        filter: DateFilter,
    ) -> Result<Vec<PrintTransaction>, AssignmentsServiceError>;
}
