//! In-memory class and reservation store.
//!
//! Each class has its own `tokio::sync::Mutex` in a `DashMap`; a lease holds
//! that mutex for its whole lifetime, so bookings on different classes run
//! in parallel while bookings on the same class queue up. Changes live only
//! in the lease's private copy of the roster until `commit` publishes them
//! under the global write lock.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::{ClassId, DomainError, ErrorCode, MemberId, ReservationId};
use crate::domain::scheduling::{ClassRoster, GymClass, Reservation};
use crate::ports::{ClassSummary, RosterLease, RosterRepository};

#[derive(Debug, Default)]
struct RosterState {
    classes: HashMap<ClassId, GymClass>,
    reservations: HashMap<ReservationId, Reservation>,
}

impl RosterState {
    fn roster(&self, class_id: &ClassId) -> Option<ClassRoster> {
        let class = self.classes.get(class_id)?.clone();
        let mut reservations: Vec<Reservation> = self
            .reservations
            .values()
            .filter(|r| &r.class_id == class_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| r.created_at);
        Some(ClassRoster::new(class, reservations))
    }

    fn summary(&self, class_id: &ClassId) -> Option<ClassSummary> {
        let roster = self.roster(class_id)?;
        Some(ClassSummary {
            occupancy: roster.occupancy(),
            class: roster.class().clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterRepository {
    state: Arc<RwLock<RosterState>>,
    locks: Arc<DashMap<ClassId, Arc<Mutex<()>>>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

struct InMemoryRosterLease {
    roster: ClassRoster,
    state: Arc<RwLock<RosterState>>,
    _guard: OwnedMutexGuard<()>,
}

#[async_trait]
impl RosterLease for InMemoryRosterLease {
    fn roster(&self) -> &ClassRoster {
        &self.roster
    }

    fn roster_mut(&mut self) -> &mut ClassRoster {
        &mut self.roster
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let class = self.roster.class().clone();
        for reservation in self.roster.reservations() {
            state.reservations.insert(reservation.id, reservation.clone());
        }
        state.classes.insert(class.id, class);
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn create_class(&self, class: &GymClass) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.classes.contains_key(&class.id) {
            return Err(DomainError::database(format!("Class {} already exists", class.id)));
        }
        state.classes.insert(class.id, class.clone());
        Ok(())
    }

    async fn find_class(&self, id: &ClassId) -> Result<Option<ClassSummary>, DomainError> {
        Ok(self.state.read().await.summary(id))
    }

    async fn list_classes(&self, date: Option<NaiveDate>) -> Result<Vec<ClassSummary>, DomainError> {
        let state = self.state.read().await;
        let mut classes: Vec<&GymClass> = state
            .classes
            .values()
            .filter(|c| date.map_or(true, |d| c.schedule.date == d))
            .collect();
        classes.sort_by_key(|c| (c.schedule.date, c.schedule.starts_at));
        Ok(classes
            .into_iter()
            .filter_map(|c| state.summary(&c.id))
            .collect())
    }

    async fn load_roster(&self, id: &ClassId) -> Result<Option<ClassRoster>, DomainError> {
        Ok(self.state.read().await.roster(id))
    }

    async fn find_reservation(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        Ok(self.state.read().await.reservations.get(id).cloned())
    }

    async fn list_reservations_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Reservation>, DomainError> {
        let state = self.state.read().await;
        let mut reservations: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| &r.member_id == member_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reservations)
    }

    async fn lock(&self, class_id: &ClassId) -> Result<Option<Box<dyn RosterLease>>, DomainError> {
        if !self.state.read().await.classes.contains_key(class_id) {
            return Ok(None);
        }

        let mutex = self.locks.entry(*class_id).or_default().clone();
        let guard = mutex.lock_owned().await;

        // Read after acquiring the lock so the previous holder's commit is seen.
        let roster = self.state.read().await.roster(class_id).ok_or_else(|| {
            DomainError::new(ErrorCode::ClassNotFound, format!("Class not found: {}", class_id))
                .with_detail("class_id", class_id.to_string())
        })?;

        Ok(Some(Box::new(InMemoryRosterLease {
            roster,
            state: Arc::clone(&self.state),
            _guard: guard,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{EffectiveStatus, MembershipStanding};
    use crate::domain::scheduling::{BookingOrigin, BookingRequest, ClassSchedule, ReservationStatus};
    use chrono::NaiveTime;
    use std::time::Duration;

    fn class(capacity: u32) -> GymClass {
        let schedule = ClassSchedule::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap();
        GymClass::create("Pilates", schedule, capacity, None).unwrap()
    }

    fn booking() -> BookingRequest {
        BookingRequest {
            member_id: MemberId::new(),
            standing: MembershipStanding {
                status: EffectiveStatus::Active,
                days_to_expiry: 10,
                expired: false,
            },
            origin: BookingOrigin::Socio,
        }
    }

    #[tokio::test]
    async fn committed_changes_are_visible() {
        let repo = InMemoryRosterRepository::new();
        let c = class(3);
        repo.create_class(&c).await.unwrap();

        let mut lease = repo.lock(&c.id).await.unwrap().unwrap();
        let reservation = lease.roster_mut().book(booking()).unwrap();
        lease.commit().await.unwrap();

        let summary = repo.find_class(&c.id).await.unwrap().unwrap();
        assert_eq!(summary.occupancy.occupied, 1);
        let stored = repo.find_reservation(&reservation.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Reserved);
    }

    #[tokio::test]
    async fn dropped_lease_discards_changes() {
        let repo = InMemoryRosterRepository::new();
        let c = class(3);
        repo.create_class(&c).await.unwrap();

        {
            let mut lease = repo.lock(&c.id).await.unwrap().unwrap();
            lease.roster_mut().book(booking()).unwrap();
            lease.roster_mut().cancel_class().unwrap();
        }

        let summary = repo.find_class(&c.id).await.unwrap().unwrap();
        assert_eq!(summary.occupancy.occupied, 0);
        assert!(summary.class.is_active());
    }

    #[tokio::test]
    async fn lock_on_unknown_class_is_none() {
        let repo = InMemoryRosterRepository::new();
        assert!(repo.lock(&ClassId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_lease_waits_for_first() {
        let repo = InMemoryRosterRepository::new();
        let c = class(3);
        repo.create_class(&c).await.unwrap();

        let first = repo.lock(&c.id).await.unwrap().unwrap();
        let blocked = tokio::time::timeout(Duration::from_millis(50), repo.lock(&c.id)).await;
        assert!(blocked.is_err());

        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(500), repo.lock(&c.id)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn leases_on_different_classes_do_not_block() {
        let repo = InMemoryRosterRepository::new();
        let a = class(1);
        let b = class(1);
        repo.create_class(&a).await.unwrap();
        repo.create_class(&b).await.unwrap();

        let _held = repo.lock(&a.id).await.unwrap().unwrap();
        let other = tokio::time::timeout(Duration::from_millis(500), repo.lock(&b.id)).await;
        assert!(other.is_ok());
    }
}
