//! Lifecycle rules for tagged status enums.
//!
//! Class status, reservation status, and exercise review status each list
//! their legal moves once, here, and every mutation goes through
//! `transition_to`. Terminal states are the ones with no legal moves.

use super::ValidationError;

/// A status enum with a fixed set of legal transitions.
///
/// ```ignore
/// let next = ReservationStatus::Reserved.transition_to(ReservationStatus::Attended)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Moves to `target`, or reports the illegal move on the `estado` field.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "estado",
                format!("cannot move from {:?} to {:?}", self, target),
            ))
        }
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
