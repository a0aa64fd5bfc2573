//! CreateClassHandler - Command handler for scheduling a class.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{AuthenticatedUser, InstructorId};
use crate::domain::scheduling::{ClassSchedule, GymClass, Occupancy, SchedulingError};
use crate::ports::{ClassSummary, RosterRepository};

#[derive(Debug, Clone)]
pub struct CreateClassCommand {
    pub actor: AuthenticatedUser,
    pub name: String,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub capacity: u32,
    pub instructor_id: Option<InstructorId>,
}

pub struct CreateClassHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl CreateClassHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    pub async fn handle(&self, cmd: CreateClassCommand) -> Result<ClassSummary, SchedulingError> {
        if !cmd.actor.role.can_manage_classes() {
            return Err(SchedulingError::Forbidden);
        }

        let schedule = ClassSchedule::new(cmd.date, cmd.starts_at, cmd.ends_at)?;
        let class = GymClass::create(cmd.name, schedule, cmd.capacity, cmd.instructor_id)?;

        self.rosters.create_class(&class).await?;

        tracing::info!(class_id = %class.id, cupo = class.capacity, date = %class.schedule.date, "class created");

        Ok(ClassSummary {
            occupancy: Occupancy {
                capacity: class.capacity,
                occupied: 0,
            },
            class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRosterRepository;
    use crate::application::handlers::scheduling::test_support::{staff, today};
    use crate::domain::foundation::Role;

    fn command(role: Role, capacity: u32) -> CreateClassCommand {
        CreateClassCommand {
            actor: staff(role),
            name: "Yoga".to_string(),
            date: today(),
            starts_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            capacity,
            instructor_id: None,
        }
    }

    #[tokio::test]
    async fn admin_creates_empty_class() {
        let repo = Arc::new(InMemoryRosterRepository::new());
        let handler = CreateClassHandler::new(repo.clone());

        let summary = handler.handle(command(Role::Admin, 12)).await.unwrap();

        assert_eq!(summary.occupancy.available(), 12);
        assert!(repo.find_class(&summary.class.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn zero_capacity_is_rejected() {
        let handler = CreateClassHandler::new(Arc::new(InMemoryRosterRepository::new()));
        let err = handler.handle(command(Role::Admin, 0)).await.unwrap_err();
        assert!(matches!(err, SchedulingError::ValidationFailed { ref field, .. } if field == "cupo"));
    }

    #[tokio::test]
    async fn reception_cannot_create_classes() {
        let handler = CreateClassHandler::new(Arc::new(InMemoryRosterRepository::new()));
        let err = handler.handle(command(Role::Recepcion, 10)).await.unwrap_err();
        assert_eq!(err, SchedulingError::Forbidden);
    }
}
