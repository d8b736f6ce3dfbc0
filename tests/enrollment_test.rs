use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use coursehub::api::{CourseService, InMemoryCourseService};
use coursehub::auth::FixedAuth;
use coursehub::error::AppError;
use coursehub::models::Course;
use coursehub::views::{CourseDetailView, EnrollmentState};

fn course(id: &str, enrolled: &[&str]) -> Course {
    Course {
        id: id.to_string(),
        title: "Intro to Go".to_string(),
        description: "Build small systems tools".to_string(),
        category: "Programming".to_string(),
        instructor_name: "B. Erdene".to_string(),
        instructor_photo_url: None,
        image: None,
        price: 49000.0,
        duration: "6 weeks".to_string(),
        level: "Beginner".to_string(),
        created_at: Utc::now(),
        rating: Some(4.5),
        enrolled_students: enrolled.iter().map(|s| s.to_string()).collect(),
        sections: Vec::new(),
    }
}

fn view_with(
    courses: Vec<Course>,
    uid: Option<&str>,
) -> (Arc<InMemoryCourseService>, CourseDetailView) {
    let service = Arc::new(InMemoryCourseService::new(courses));
    let auth = Arc::new(FixedAuth::new(uid.map(|u| u.to_string())));
    let view = CourseDetailView::new(service.clone(), auth);
    (service, view)
}

struct EnrollAlwaysFails {
    course: Course,
}

#[async_trait]
impl CourseService for EnrollAlwaysFails {
    async fn fetch_all_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(vec![self.course.clone()])
    }

    async fn fetch_course(&self, _id: &str) -> Result<Course, AppError> {
        Ok(self.course.clone())
    }

    async fn enroll(&self, _course_id: &str, _user_id: &str) -> Result<(), AppError> {
        Err(AppError::Service("enroll rejected".to_string()))
    }
}

#[tokio::test]
async fn missing_id_surfaces_the_exact_message() {
    let (service, mut view) = view_with(vec![course("c-1", &[])], Some("u-1"));

    view.load(None).await;

    assert!(!view.is_loading());
    assert_eq!(view.error(), Some("Course ID is missing"));
    assert!(view.course().is_none());
    assert_eq!(view.enrollment_state(), EnrollmentState::Unloaded);
    assert_eq!(service.enroll_calls(), 0);
}

#[tokio::test]
async fn unknown_course_reports_not_found() {
    let (_service, mut view) = view_with(vec![course("c-1", &[])], Some("u-1"));

    view.load(Some("nope")).await;

    assert_eq!(view.error(), Some("Course not found"));
    assert!(view.course().is_none());
}

#[tokio::test]
async fn membership_derives_the_enrolled_state() {
    let (_service, mut view) = view_with(vec![course("c-1", &["u-1", "u-2"])], Some("u-1"));

    view.load(Some("c-1")).await;

    assert_eq!(view.enrollment_state(), EnrollmentState::Enrolled);
    assert!(view.is_enrolled());
    assert!(view.sections_unlocked());
    assert!(!view.dialog_open());
}

#[tokio::test]
async fn non_member_starts_not_enrolled_with_sections_locked() {
    let (_service, mut view) = view_with(vec![course("c-1", &["u-2"])], Some("u-1"));

    view.load(Some("c-1")).await;

    assert_eq!(view.enrollment_state(), EnrollmentState::NotEnrolled);
    assert!(!view.sections_unlocked());
}

#[tokio::test]
async fn request_and_cancel_never_contact_the_service() {
    let (service, mut view) = view_with(vec![course("c-1", &[])], Some("u-1"));
    view.load(Some("c-1")).await;

    view.request_enrollment();
    assert!(view.dialog_open());

    view.cancel_enrollment();
    assert!(!view.dialog_open());
    assert_eq!(view.enrollment_state(), EnrollmentState::NotEnrolled);
    assert_eq!(service.enroll_calls(), 0);
}

#[tokio::test]
async fn request_is_ignored_when_already_enrolled() {
    let (_service, mut view) = view_with(vec![course("c-1", &["u-1"])], Some("u-1"));
    view.load(Some("c-1")).await;

    view.request_enrollment();
    assert!(!view.dialog_open());
}

#[tokio::test]
async fn confirm_enrolls_exactly_once() {
    let (service, mut view) = view_with(vec![course("c-1", &[])], Some("u-1"));
    view.load(Some("c-1")).await;

    view.request_enrollment();
    view.confirm_enrollment().await;

    assert_eq!(service.enroll_calls(), 1);
    assert_eq!(view.enrollment_state(), EnrollmentState::Enrolled);
    assert!(!view.dialog_open());
    assert!(view.error().is_none());

    let members = &view.course().unwrap().enrolled_students;
    assert_eq!(members.iter().filter(|uid| *uid == "u-1").count(), 1);

    // the dialog is closed, so a second confirm is a no-op
    view.confirm_enrollment().await;
    assert_eq!(service.enroll_calls(), 1);
}

#[tokio::test]
async fn failed_enroll_keeps_the_user_not_enrolled() {
    let service = Arc::new(EnrollAlwaysFails {
        course: course("c-1", &[]),
    });
    let auth = Arc::new(FixedAuth::new(Some("u-1".to_string())));
    let mut view = CourseDetailView::new(service, auth);
    view.load(Some("c-1")).await;

    view.request_enrollment();
    view.confirm_enrollment().await;

    assert_eq!(
        view.error(),
        Some("Failed to enroll in the course. Please try again.")
    );
    assert_eq!(view.enrollment_state(), EnrollmentState::NotEnrolled);
    assert!(!view.dialog_open());
    assert!(view.course().unwrap().enrolled_students.is_empty());

    // still eligible to retry
    view.request_enrollment();
    assert!(view.dialog_open());
}

#[tokio::test]
async fn signed_out_confirm_closes_the_dialog_silently() {
    let (service, mut view) = view_with(vec![course("c-1", &[])], None);
    view.load(Some("c-1")).await;

    assert_eq!(view.enrollment_state(), EnrollmentState::NotEnrolled);
    view.request_enrollment();
    view.confirm_enrollment().await;

    assert!(!view.dialog_open());
    assert!(view.error().is_none());
    assert_eq!(view.enrollment_state(), EnrollmentState::NotEnrolled);
    assert_eq!(service.enroll_calls(), 0);
}
