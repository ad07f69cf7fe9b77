use uuid::Uuid;

use dojo_admin::auth::UserRole;
use dojo_admin::domain::access::{authorize, evaluation_visible, justification_target, Action};
use dojo_admin::models::EvaluationStatus;

#[test]
fn admin_reads_and_writes_any_student() {
    let target = Uuid::new_v4();
    assert!(authorize(UserRole::Admin, None, target, Action::Read));
    assert!(authorize(UserRole::Admin, None, target, Action::Write));
}

#[test]
fn student_limited_to_linked_record() {
    let own = Uuid::new_v4();
    let other = Uuid::new_v4();

    assert!(authorize(UserRole::Student, Some(own), own, Action::Read));
    assert!(authorize(UserRole::Student, Some(own), own, Action::Write));
    assert!(!authorize(UserRole::Student, Some(own), other, Action::Read));
    assert!(!authorize(UserRole::Student, Some(own), other, Action::Write));
}

#[test]
fn student_without_link_denied() {
    let target = Uuid::new_v4();
    assert!(!authorize(UserRole::Student, None, target, Action::Read));
}

#[test]
fn guest_denied_everywhere() {
    let target = Uuid::new_v4();
    assert!(!authorize(UserRole::Guest, None, target, Action::Read));
    assert!(!authorize(UserRole::Guest, Some(target), target, Action::Write));
}

#[test]
fn student_never_sees_drafts_even_for_own_record() {
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
fn released_evaluation_of_another_student_still_denied() {
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
fn admin_sees_draft_and_released() {
    let target = Uuid::new_v4();
    assert!(evaluation_visible(
        UserRole::Admin,
        None,
        target,
        EvaluationStatus::Draft
    ));
    assert!(evaluation_visible(
        UserRole::Admin,
        None,
        target,
        EvaluationStatus::Released
    ));
}

#[test]
fn justification_filing_scopes() {
    let own = Uuid::new_v4();
    let other = Uuid::new_v4();

    // Students file for themselves no matter what the request names
    assert_eq!(
        justification_target(UserRole::Student, Some(own), Some(other)),
        Some(own)
    );
    assert_eq!(justification_target(UserRole::Student, Some(own), None), Some(own));

    // Admins file on behalf of the named student
    assert_eq!(
        justification_target(UserRole::Admin, None, Some(other)),
        Some(other)
    );
    assert_eq!(justification_target(UserRole::Admin, None, None), None);

    // Callers with no linked student cannot file
    assert_eq!(justification_target(UserRole::Guest, None, Some(other)), None);
}
