use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course record as served by the remote course API.
///
/// Views hold read-only copies of these; the only local mutation is the
/// optimistic append to `enrolled_students` after a successful enroll call.
/// Field names on the wire are the backend's camelCase ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor_name: String,
    #[serde(rename = "instructorPhotoURL")]
    pub instructor_photo_url: Option<String>,
    pub image: Option<String>,
    pub price: f64,
    pub duration: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
    #[serde(default)]
    pub sections: Vec<CourseSection>,
}

impl Course {
    /// Whether `uid` appears in the enrolled-student list.
    pub fn is_enrolled(&self, uid: &str) -> bool {
        self.enrolled_students.iter().any(|student| student == uid)
    }
}

/// One content section of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub id: String,
    pub title: String,
    pub duration: Option<String>,
    pub video_url: Option<String>,
}
