// Business logic services

pub mod announcement_service;
pub mod attendance_service;
pub mod dashboard_service;
pub mod evaluation_service;
pub mod import_service;
pub mod justification_service;
pub mod notification_service;
pub mod re_enrollment_service;
pub mod student_service;
pub mod technique_service;
pub mod user_service;

pub use announcement_service::AnnouncementService;
pub use attendance_service::AttendanceService;
pub use dashboard_service::DashboardService;
pub use evaluation_service::EvaluationService;
pub use import_service::ImportService;
pub use justification_service::JustificationService;
pub use notification_service::NotificationService;
pub use re_enrollment_service::ReEnrollmentService;
pub use student_service::StudentService;
pub use technique_service::TechniqueService;
pub use user_service::UserService;
