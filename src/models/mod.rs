// Data models

pub mod announcement;
pub mod attendance;
pub mod dashboard;
pub mod evaluation;
pub mod justification;
pub mod notification;
pub mod re_enrollment;
pub mod student;
pub mod technique;
pub mod user;

pub use announcement::*;
pub use attendance::*;
pub use dashboard::*;
pub use evaluation::*;
pub use justification::*;
pub use notification::*;
pub use re_enrollment::*;
pub use student::*;
pub use technique::*;
pub use user::*;
