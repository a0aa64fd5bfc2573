//! Class roster repository port.
//!
//! Every mutation of a class or its reservations goes through a
//! `RosterLease`: an exclusive hold on one class's roster. While a lease is
//! alive, no other lease for the same class can be obtained, so a
//! check-then-write sequence on the roster (capacity, duplicates, cascade)
//! cannot interleave with another request for that class. Leases on
//! different classes are independent.
//!
//! # Example
//!
//! ```ignore
//! let mut lease = repo.lock(&class_id).await?.ok_or(SchedulingError::ClassNotFound(class_id))?;
//! let reservation = lease.roster_mut().book(request)?;
//! lease.commit().await?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ClassId, DomainError, MemberId, ReservationId};
use crate::domain::scheduling::{ClassRoster, GymClass, Occupancy, Reservation};

/// A class together with its occupancy at read time.
#[derive(Debug, Clone)]
pub struct ClassSummary {
    pub class: GymClass,
    pub occupancy: Occupancy,
}

/// Exclusive, transactional hold on one class roster.
///
/// Dropping a lease without calling `commit` discards every change made
/// through `roster_mut`; nothing becomes visible to other callers.
#[async_trait]
pub trait RosterLease: Send {
    fn roster(&self) -> &ClassRoster;

    fn roster_mut(&mut self) -> &mut ClassRoster;

    /// Persists every change atomically and releases the hold.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the write fails; in that case none of the
    ///   changes are persisted
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Stores a newly created class with no reservations.
    async fn create_class(&self, class: &GymClass) -> Result<(), DomainError>;

    async fn find_class(&self, id: &ClassId) -> Result<Option<ClassSummary>, DomainError>;

    /// Classes ordered by date and start time, optionally for one day.
    async fn list_classes(&self, date: Option<NaiveDate>) -> Result<Vec<ClassSummary>, DomainError>;

    /// Snapshot of a class and all its reservations, without taking a lease.
    async fn load_roster(&self, id: &ClassId) -> Result<Option<ClassRoster>, DomainError>;

    async fn find_reservation(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// A member's reservations, newest first.
    async fn list_reservations_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Waits for exclusive access to a class roster.
    ///
    /// Returns `None` if the class does not exist.
    async fn lock(&self, class_id: &ClassId) -> Result<Option<Box<dyn RosterLease>>, DomainError>;
}
