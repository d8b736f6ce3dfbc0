use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::CourseService;
use crate::error::AppError;
use crate::models::Course;

/// Fixture-backed [`CourseService`] for tests and offline runs.
///
/// Enrollments mutate the stored records, and every enroll call is counted so
/// tests can assert the remote collaborator was (or was not) contacted.
pub struct InMemoryCourseService {
    courses: Mutex<Vec<Course>>,
    enroll_calls: AtomicUsize,
}

impl InMemoryCourseService {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
            enroll_calls: AtomicUsize::new(0),
        }
    }

    /// How many enroll calls this service has received.
    pub fn enroll_calls(&self) -> usize {
        self.enroll_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseService for InMemoryCourseService {
    async fn fetch_all_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, AppError> {
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|course| course.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn enroll(&self, course_id: &str, user_id: &str) -> Result<(), AppError> {
        self.enroll_calls.fetch_add(1, Ordering::SeqCst);

        let mut courses = self.courses.lock().unwrap();
        let course = courses
            .iter_mut()
            .find(|course| course.id == course_id)
            .ok_or_else(|| AppError::NotFound(course_id.to_string()))?;

        if !course.is_enrolled(user_id) {
            course.enrolled_students.push(user_id.to_string());
        }
        Ok(())
    }
}
