use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursehub::api::{ApiConfig, HttpCourseService};
use coursehub::auth::FixedAuth;
use coursehub::models::Course;
use coursehub::views::{CatalogView, CourseDetailView};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coursehub=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::new_from_env()?;
    let service = Arc::new(HttpCourseService::new(config)?);
    let auth = Arc::new(FixedAuth::new(std::env::var("COURSE_USER_ID").ok()));

    let mut catalog = CatalogView::new(service.clone());
    catalog.load().await;
    if let Some(message) = catalog.error() {
        eprintln!("{}", message);
        return Ok(());
    }

    let term = input("Search term (empty for all): ")?;
    catalog.set_search_term(&term);

    let categories = catalog.categories();
    if !categories.is_empty() {
        println!("Categories: {}", categories.join(", "));
    }
    let category = input("Category (empty for all): ")?;
    catalog.set_category(&category);

    println!();
    print_courses(catalog.filtered_courses());

    let id = input("\nCourse id to open (empty to quit): ")?;
    if id.is_empty() {
        return Ok(());
    }

    let mut detail = CourseDetailView::new(service, auth);
    detail.load(Some(id.as_str())).await;
    if let Some(message) = detail.error() {
        eprintln!("{}", message);
        return Ok(());
    }

    if let Some(course) = detail.course() {
        println!("\n{} by {}", course.title, course.instructor_name);
        println!("{}", course.description);
        println!("₮{} | {} | {}", course.price, course.duration, course.level);
        println!("Status: {}", detail.enrollment_state());
        for section in &course.sections {
            let marker = if detail.sections_unlocked() { "open" } else { "locked" };
            println!("  [{}] {}", marker, section.title);
        }
    }

    if !detail.is_enrolled() {
        let answer = input("\nEnroll in this course? [y/N]: ")?;
        if answer.eq_ignore_ascii_case("y") {
            detail.request_enrollment();
            detail.confirm_enrollment().await;
            if let Some(message) = detail.error() {
                eprintln!("{}", message);
            } else {
                println!("Status: {}", detail.enrollment_state());
            }
        }
    }

    Ok(())
}

fn print_courses(courses: &[Course]) {
    if courses.is_empty() {
        println!("No courses found");
        return;
    }
    for course in courses {
        let rating = course
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{}  {} [{}] by {} ({} students, rating {})",
            course.id,
            course.title,
            course.category,
            course.instructor_name,
            course.enrolled_students.len(),
            rating,
        );
    }
}

fn input(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
