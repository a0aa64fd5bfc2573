//! Class read queries: one class, a day's classes, and a class roster.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AuthenticatedUser, ClassId};
use crate::domain::scheduling::{ClassRoster, SchedulingError};
use crate::ports::{ClassSummary, RosterRepository};

#[derive(Debug, Clone)]
pub struct GetClassQuery {
    pub class_id: ClassId,
}

#[derive(Debug, Clone, Default)]
pub struct ListClassesQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct GetClassRosterQuery {
    pub actor: AuthenticatedUser,
    pub class_id: ClassId,
}

pub struct ClassQueryHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl ClassQueryHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    pub async fn get(&self, query: GetClassQuery) -> Result<ClassSummary, SchedulingError> {
        self.rosters
            .find_class(&query.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(query.class_id))
    }

    pub async fn list(&self, query: ListClassesQuery) -> Result<Vec<ClassSummary>, SchedulingError> {
        Ok(self.rosters.list_classes(query.date).await?)
    }

    /// Full roster, for staff and instructors taking attendance.
    pub async fn roster(&self, query: GetClassRosterQuery) -> Result<ClassRoster, SchedulingError> {
        if !query.actor.role.can_take_attendance() {
            return Err(SchedulingError::Forbidden);
        }

        self.rosters
            .load_roster(&query.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(query.class_id))
    }
}
