pub mod catalog;
pub mod detail;

pub use catalog::{CatalogView, CourseFilter, filter_courses};
pub use detail::{CourseDetailView, EnrollmentState};
