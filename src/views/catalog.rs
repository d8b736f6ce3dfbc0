use std::sync::Arc;

use tracing::error;

use crate::api::CourseService;
use crate::models::Course;

/// The predicate pair driving catalog filtering.
///
/// The term is matched case-insensitively against title or description; the
/// category is matched by exact equality, with the empty string selecting all
/// categories. Both predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub term: String,
    pub category: String,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        let term = self.term.to_lowercase();
        (course.title.to_lowercase().contains(&term)
            || course.description.to_lowercase().contains(&term))
            && (self.category.is_empty() || course.category == self.category)
    }
}

/// The ordered subsequence of `courses` matching `filter`. The source slice
/// is never mutated.
pub fn filter_courses(courses: &[Course], filter: &CourseFilter) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| filter.matches(course))
        .cloned()
        .collect()
}

/// State container for the course catalog listing.
///
/// Loads the collection once and re-derives the displayed subset
/// synchronously on every predicate change. No debouncing.
pub struct CatalogView {
    service: Arc<dyn CourseService>,
    courses: Vec<Course>,
    filtered: Vec<Course>,
    filter: CourseFilter,
    loading: bool,
    error: Option<String>,
}

impl CatalogView {
    pub fn new(service: Arc<dyn CourseService>) -> Self {
        Self {
            service,
            courses: Vec::new(),
            filtered: Vec::new(),
            filter: CourseFilter::default(),
            loading: true,
            error: None,
        }
    }

    /// Fetch the full course collection and derive the displayed list.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.service.fetch_all_courses().await {
            Ok(courses) => {
                self.courses = courses;
                self.apply_filter();
            }
            Err(e) => {
                error!("failed to fetch courses: {}", e);
                self.error = Some("Failed to load courses".to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filter.term = term.to_lowercase();
        self.apply_filter();
    }

    pub fn set_category(&mut self, category: &str) {
        self.filter.category = category.to_string();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.filtered = filter_courses(&self.courses, &self.filter);
    }

    /// The last-loaded full collection.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The displayed subset, always a subsequence of [`Self::courses`].
    pub fn filtered_courses(&self) -> &[Course] {
        &self.filtered
    }

    pub fn filter(&self) -> &CourseFilter {
        &self.filter
    }

    /// Distinct category values of the loaded collection, sorted, for
    /// populating a category selector.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .courses
            .iter()
            .map(|course| course.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
