//! Authorization predicates: role × resource ownership.
//!
//! Every data-revealing or data-mutating handler consults these before
//! touching the persistence layer. The rules are deliberately centralized
//! here rather than scattered across routes.

use uuid::Uuid;

use crate::auth::UserRole;
use crate::models::EvaluationStatus;

/// What the caller wants to do with a student-owned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

/// Core ownership check for student-scoped records (profile, attendance,
/// evaluations, justifications).
///
/// Admins pass unconditionally. A student-role caller passes only when the
/// record belongs to its linked student. Every other role is denied.
pub fn authorize(
    role: UserRole,
    caller_student_id: Option<Uuid>,
    target_student_id: Uuid,
    _action: Action,
) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Student => caller_student_id == Some(target_student_id),
        UserRole::Guest => false,
    }
}

/// Evaluation visibility adds the lifecycle rule on top of ownership:
/// students see only released evaluations, even their own.
pub fn evaluation_visible(
    role: UserRole,
    caller_student_id: Option<Uuid>,
    target_student_id: Uuid,
    status: EvaluationStatus,
) -> bool {
    if !authorize(role, caller_student_id, target_student_id, Action::Read) {
        return false;
    }
    match role {
        UserRole::Admin => true,
        _ => status == EvaluationStatus::Released,
    }
}

/// Resolves which student a justification filing applies to.
///
/// Students always file for their own linked student; the requested id is
/// ignored. Admins file for whichever student the request names. Callers
/// without a linked student cannot file at all.
pub fn justification_target(
    role: UserRole,
    caller_student_id: Option<Uuid>,
    requested_student_id: Option<Uuid>,
) -> Option<Uuid> {
    match role {
        UserRole::Admin => requested_student_id,
        UserRole::Student | UserRole::Guest => caller_student_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_full_access() {
        let target = Uuid::new_v4();
        assert!(authorize(UserRole::Admin, None, target, Action::Read));
        assert!(authorize(UserRole::Admin, None, target, Action::Write));
    }

    #[test]
    fn test_student_scoped_to_own_record() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(authorize(UserRole::Student, Some(own), own, Action::Read));
        assert!(!authorize(UserRole::Student, Some(own), other, Action::Read));
        assert!(!authorize(UserRole::Student, None, other, Action::Read));
    }

    #[test]
    fn test_guest_denied() {
        let target = Uuid::new_v4();
        assert!(!authorize(UserRole::Guest, Some(target), target, Action::Read));
    }

    #[test]
    fn test_draft_evaluations_invisible_to_owner() {
        let own = Uuid::new_v4();
        assert!(!evaluation_visible(
            UserRole::Student,
            Some(own),
            own,
            EvaluationStatus::Draft
        ));
        assert!(evaluation_visible(
            UserRole::Student,
            Some(own),
            own,
            EvaluationStatus::Released
        ));
    }

    #[test]
    fn test_released_evaluation_of_another_student_denied() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!evaluation_visible(
            UserRole::Student,
            Some(own),
            other,
            EvaluationStatus::Released
        ));
    }

    #[test]
    fn test_admin_sees_drafts() {
        let target = Uuid::new_v4();
        assert!(evaluation_visible(
            UserRole::Admin,
            None,
            target,
            EvaluationStatus::Draft
        ));
    }

    #[test]
    fn test_justification_target_resolution() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(
            justification_target(UserRole::Student, Some(own), Some(other)),
            Some(own)
        );
        assert_eq!(
            justification_target(UserRole::Admin, None, Some(other)),
            Some(other)
        );
        assert_eq!(justification_target(UserRole::Guest, None, Some(other)), None);
    }
}
