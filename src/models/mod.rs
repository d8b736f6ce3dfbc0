pub mod course;
pub mod user;

pub use course::{Course, CourseSection};
pub use user::User;
