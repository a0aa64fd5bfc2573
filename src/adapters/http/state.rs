//! Shared application state for the REST API.

use std::sync::Arc;

use crate::application::handlers::access::{
    AccessTokenService, AccessVerifier, ListAccessLogHandler, RenderQrHandler, RotateTokenHandler,
};
use crate::application::handlers::member::{
    GetMemberHandler, RegisterMemberHandler, UpdateMemberHandler,
};
use crate::application::handlers::routine::{
    CreateRoutineHandler, GetRoutineHandler, ReviewExerciseHandler,
};
use crate::application::handlers::scheduling::{
    CancelClassHandler, CancelReservationHandler, ClassQueryHandler, CreateClassHandler,
    CreateReservationHandler, ListMemberReservationsHandler, MarkAttendanceHandler,
};
use crate::domain::foundation::GymClock;
use crate::ports::{
    AccessLogRepository, AccessTokenRepository, MemberRepository, QrRenderer, RosterRepository,
    RoutineRepository, SessionValidator,
};

/// Default window for the "expiring soon" flag on member views.
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 7;

/// Everything a request handler may need.
///
/// Cloned per request; every dependency is behind an `Arc`. Application
/// handlers are built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberRepository>,
    pub rosters: Arc<dyn RosterRepository>,
    pub access_tokens: Arc<dyn AccessTokenRepository>,
    pub access_log: Arc<dyn AccessLogRepository>,
    pub routines: Arc<dyn RoutineRepository>,
    pub qr_renderer: Arc<dyn QrRenderer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub clock: GymClock,
    pub expiring_soon_days: u32,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        members: Arc<dyn MemberRepository>,
        rosters: Arc<dyn RosterRepository>,
        access_tokens: Arc<dyn AccessTokenRepository>,
        access_log: Arc<dyn AccessLogRepository>,
        routines: Arc<dyn RoutineRepository>,
        qr_renderer: Arc<dyn QrRenderer>,
        session_validator: Arc<dyn SessionValidator>,
        clock: GymClock,
    ) -> Self {
        Self {
            members,
            rosters,
            access_tokens,
            access_log,
            routines,
            qr_renderer,
            session_validator,
            clock,
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
        }
    }

    pub fn with_expiring_soon_days(mut self, days: u32) -> Self {
        self.expiring_soon_days = days;
        self
    }

    pub fn token_service(&self) -> AccessTokenService {
        AccessTokenService::new(self.access_tokens.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Members
    // ════════════════════════════════════════════════════════════════════════════

    pub fn register_member_handler(&self) -> RegisterMemberHandler {
        RegisterMemberHandler::new(self.members.clone(), self.token_service())
    }

    pub fn update_member_handler(&self) -> UpdateMemberHandler {
        UpdateMemberHandler::new(self.members.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.members.clone(), self.clock, self.expiring_soon_days)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Classes and reservations
    // ════════════════════════════════════════════════════════════════════════════

    pub fn create_class_handler(&self) -> CreateClassHandler {
        CreateClassHandler::new(self.rosters.clone())
    }

    pub fn cancel_class_handler(&self) -> CancelClassHandler {
        CancelClassHandler::new(self.rosters.clone())
    }

    pub fn class_query_handler(&self) -> ClassQueryHandler {
        ClassQueryHandler::new(self.rosters.clone())
    }

    pub fn create_reservation_handler(&self) -> CreateReservationHandler {
        CreateReservationHandler::new(self.members.clone(), self.rosters.clone(), self.clock)
    }

    pub fn cancel_reservation_handler(&self) -> CancelReservationHandler {
        CancelReservationHandler::new(self.rosters.clone())
    }

    pub fn mark_attendance_handler(&self) -> MarkAttendanceHandler {
        MarkAttendanceHandler::new(self.rosters.clone())
    }

    pub fn list_member_reservations_handler(&self) -> ListMemberReservationsHandler {
        ListMemberReservationsHandler::new(self.rosters.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Access control
    // ════════════════════════════════════════════════════════════════════════════

    pub fn access_verifier(&self) -> AccessVerifier {
        AccessVerifier::new(
            self.token_service(),
            self.members.clone(),
            self.access_log.clone(),
            self.clock,
        )
    }

    pub fn rotate_token_handler(&self) -> RotateTokenHandler {
        RotateTokenHandler::new(self.members.clone(), self.token_service())
    }

    pub fn render_qr_handler(&self) -> RenderQrHandler {
        RenderQrHandler::new(self.token_service(), self.qr_renderer.clone())
    }

    pub fn list_access_log_handler(&self) -> ListAccessLogHandler {
        ListAccessLogHandler::new(self.access_log.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Routines
    // ════════════════════════════════════════════════════════════════════════════

    pub fn create_routine_handler(&self) -> CreateRoutineHandler {
        CreateRoutineHandler::new(self.members.clone(), self.routines.clone())
    }

    pub fn get_routine_handler(&self) -> GetRoutineHandler {
        GetRoutineHandler::new(self.routines.clone())
    }

    pub fn review_exercise_handler(&self) -> ReviewExerciseHandler {
        ReviewExerciseHandler::new(self.routines.clone())
    }
}
