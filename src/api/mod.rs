pub mod dto;
pub mod http;
pub mod memory;

use std::env;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::Course;

pub use http::HttpCourseService;
pub use memory::InMemoryCourseService;

/// Connection settings for the remote course API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl ApiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("COURSE_API_URL")
            .map_err(|_| AppError::Config("COURSE_API_URL is not set".to_string()))?;
        let api_token = env::var("COURSE_API_TOKEN").ok();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

/// The remote course-data collaborator consumed by the views.
///
/// The backend owns every course record; this contract covers the three
/// operations the views need. Implementations live behind `Arc<dyn _>` so a
/// view never knows which binding it is talking to.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Fetch the full course collection.
    async fn fetch_all_courses(&self) -> Result<Vec<Course>, AppError>;

    /// Fetch one course record by id.
    async fn fetch_course(&self, id: &str) -> Result<Course, AppError>;

    /// Enroll `user_id` into `course_id`.
    async fn enroll(&self, course_id: &str, user_id: &str) -> Result<(), AppError>;
}
