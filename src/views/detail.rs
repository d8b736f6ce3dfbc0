use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::CourseService;
use crate::auth::AuthProvider;
use crate::error::AppError;
use crate::models::Course;

/// Enrollment lifecycle of the detail view.
///
/// ```text
/// unloaded     → not_enrolled
///              → enrolled
/// not_enrolled → pending
/// pending      → enrolled
///              → not_enrolled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    Unloaded,
    NotEnrolled,
    Pending,
    Enrolled,
}

impl EnrollmentState {
    /// Valid next states from the current state.
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unloaded => &[Self::NotEnrolled, Self::Enrolled],
            Self::NotEnrolled => &[Self::Pending],
            Self::Pending => &[Self::Enrolled, Self::NotEnrolled],
            Self::Enrolled => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::NotEnrolled => "not_enrolled",
            Self::Pending => "pending",
            Self::Enrolled => "enrolled",
        }
    }
}

impl fmt::Display for EnrollmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State container for the course detail page.
///
/// Holds one course record, the derived enrollment state and the confirmation
/// dialog visibility. Errors from the collaborators are converted into a
/// single message here and never propagate further.
pub struct CourseDetailView {
    service: Arc<dyn CourseService>,
    auth: Arc<dyn AuthProvider>,
    course: Option<Course>,
    state: EnrollmentState,
    dialog_open: bool,
    loading: bool,
    error: Option<String>,
}

impl CourseDetailView {
    pub fn new(service: Arc<dyn CourseService>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            service,
            auth,
            course: None,
            state: EnrollmentState::Unloaded,
            dialog_open: false,
            loading: true,
            error: None,
        }
    }

    /// Fetch one course record and derive the enrollment state from the
    /// current user's membership in its enrolled-student list.
    pub async fn load(&mut self, id: Option<&str>) {
        self.loading = true;
        self.error = None;

        let result = match id {
            Some(id) => self.service.fetch_course(id).await,
            None => Err(AppError::MissingCourseId),
        };

        match result {
            Ok(course) => {
                self.state = self.derive_state(&course);
                self.course = Some(course);
            }
            Err(e) => {
                error!("failed to load course: {}", e);
                self.error = Some(match e {
                    AppError::MissingCourseId => "Course ID is missing".to_string(),
                    AppError::NotFound(_) => "Course not found".to_string(),
                    _ => "Failed to load course details".to_string(),
                });
            }
        }
        self.loading = false;
    }

    /// Open the enrollment confirmation dialog. Ignored unless the loaded
    /// course is in the not-enrolled state; nothing is sent to the service.
    pub fn request_enrollment(&mut self) {
        if self.state == EnrollmentState::NotEnrolled {
            self.dialog_open = true;
        }
    }

    /// Dismiss the confirmation dialog without contacting the service.
    pub fn cancel_enrollment(&mut self) {
        self.dialog_open = false;
    }

    /// Confirm the open dialog: call the enroll operation and, on success,
    /// optimistically append the user to the local enrolled-student list.
    /// On failure the view stays not-enrolled and surfaces a message. The
    /// dialog closes either way.
    pub async fn confirm_enrollment(&mut self) {
        if !self.dialog_open || self.state != EnrollmentState::NotEnrolled {
            self.dialog_open = false;
            return;
        }

        let course_id = self.course.as_ref().map(|course| course.id.clone());
        let (Some(course_id), Some(user)) = (course_id, self.auth.current_user()) else {
            self.dialog_open = false;
            return;
        };

        self.error = None;
        self.state = EnrollmentState::Pending;
        match self.service.enroll(&course_id, &user.uid).await {
            Ok(()) => {
                if let Some(course) = self.course.as_mut() {
                    if !course.is_enrolled(&user.uid) {
                        course.enrolled_students.push(user.uid.clone());
                    }
                }
                info!("enrolled user {} in course {}", user.uid, course_id);
                self.state = EnrollmentState::Enrolled;
            }
            Err(e) => {
                error!("failed to enroll in course {}: {}", course_id, e);
                self.error =
                    Some("Failed to enroll in the course. Please try again.".to_string());
                self.state = EnrollmentState::NotEnrolled;
            }
        }
        self.dialog_open = false;
    }

    fn derive_state(&self, course: &Course) -> EnrollmentState {
        let enrolled = self
            .auth
            .current_user()
            .map(|user| course.is_enrolled(&user.uid))
            .unwrap_or(false);
        if enrolled {
            EnrollmentState::Enrolled
        } else {
            EnrollmentState::NotEnrolled
        }
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn enrollment_state(&self) -> EnrollmentState {
        self.state
    }

    pub fn is_enrolled(&self) -> bool {
        self.state == EnrollmentState::Enrolled
    }

    /// Whether course content sections are unlocked for the current user.
    pub fn sections_unlocked(&self) -> bool {
        self.is_enrolled()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
