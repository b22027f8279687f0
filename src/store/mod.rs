//! Retrieval backend for course metadata and content chunks.
//!
//! The rest of the crate only sees the [`CourseIndex`] trait; the in-memory
//! implementation lives in [`memory`].

mod memory;

pub use memory::InMemoryCourseIndex;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Course, CourseChunk};

#[derive(Debug, Error)]
pub enum SearchError {
    /// The course-name filter resolved to no known course. Distinct from
    /// an empty match list, which is a normal outcome.
    #[error("No course found matching '{0}'")]
    CourseNotFound(String),

    #[error("index error: {0}")]
    Backend(String),
}

/// One ranked search hit with its course/lesson metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub content: String,
    pub course_title: String,
    pub lesson_number: Option<u32>,
}

/// Store of indexed courses, queryable by text with optional filters.
#[async_trait]
pub trait CourseIndex: Send + Sync {
    /// Register a course's metadata (title, links, lessons).
    async fn add_course_metadata(&self, course: Course) -> anyhow::Result<()>;

    /// Index content chunks for previously registered courses.
    async fn add_course_content(&self, chunks: Vec<CourseChunk>) -> anyhow::Result<()>;

    /// Ranked content search. An unresolvable `course_name` filter is an
    /// error; a query matching nothing returns an empty vec.
    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<u32>,
    ) -> Result<Vec<SearchMatch>, SearchError>;

    /// Full course metadata for a fuzzily-matched course name.
    async fn outline(&self, course_name: &str) -> Option<Course>;

    /// Link for one lesson of a course, when known.
    async fn lesson_link(&self, course_title: &str, lesson_number: u32) -> Option<String>;

    /// Link for a course page, when known.
    async fn course_link(&self, course_title: &str) -> Option<String>;

    /// Titles of all indexed courses, in registration order.
    async fn course_titles(&self) -> Vec<String>;

    /// Number of indexed courses.
    async fn course_count(&self) -> usize;

    /// Drop all metadata and content.
    async fn clear_all(&self) -> anyhow::Result<()>;
}
