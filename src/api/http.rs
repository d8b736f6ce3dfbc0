use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, error};

use crate::api::dto::EnrollRequest;
use crate::api::{ApiConfig, CourseService};
use crate::error::AppError;
use crate::models::Course;

/// JSON-over-HTTP binding of [`CourseService`].
pub struct HttpCourseService {
    client: Client,
    config: ApiConfig,
}

impl HttpCourseService {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl CourseService for HttpCourseService {
    async fn fetch_all_courses(&self) -> Result<Vec<Course>, AppError> {
        let url = self.endpoint("courses");
        let response = self.with_auth(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Service(format!(
                "course API error {}: {}",
                status, body
            )));
        }

        response.json::<Vec<Course>>().await.map_err(|e| {
            error!("failed to parse course list: {}", e);
            AppError::Service(format!("Failed to parse course list: {}", e))
        })
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, AppError> {
        let url = self.endpoint(&format!("courses/{}", id));
        let response = self.with_auth(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Service(format!(
                "course API error {}: {}",
                status, body
            )));
        }

        response.json::<Course>().await.map_err(|e| {
            error!("failed to parse course {}: {}", id, e);
            AppError::Service(format!("Failed to parse course response: {}", e))
        })
    }

    async fn enroll(&self, course_id: &str, user_id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("courses/{}/enroll", course_id));
        let body = EnrollRequest {
            user_id: user_id.to_string(),
        };

        let response = self
            .with_auth(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Service(format!(
                "course API error {}: {}",
                status, body
            )));
        }

        debug!("enroll response for course {}: {}", course_id, status);
        Ok(())
    }
}
