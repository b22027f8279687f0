//! Domain types shared across the indexing and retrieval layers.

use serde::{Deserialize, Serialize};

/// A single lesson within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Position of the lesson within the course (1-based)
    pub lesson_number: u32,

    /// Lesson title
    pub title: String,

    /// Link to the lesson page, when known
    pub lesson_link: Option<String>,
}

/// Metadata for one course in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Full course title (unique across the corpus)
    pub title: String,

    /// Link to the course page, when known
    pub course_link: Option<String>,

    /// Instructor name, when known
    pub instructor: Option<String>,

    /// Lessons in ascending lesson-number order
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Look up a lesson by number.
    pub fn lesson(&self, lesson_number: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.lesson_number == lesson_number)
    }
}

/// One indexed piece of course text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseChunk {
    /// The chunk text
    pub content: String,

    /// Title of the course this chunk belongs to
    pub course_title: String,

    /// Lesson the chunk came from, if the document had lesson sections
    pub lesson_number: Option<u32>,

    /// Position of the chunk within the course document
    pub chunk_index: usize,
}

/// A citation identifying where retrieved text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display label, e.g. "Course X - Lesson 2"
    pub text: String,

    /// Link to the cited lesson or course, when known
    pub link: Option<String>,
}

impl Source {
    pub fn new(text: impl Into<String>, link: Option<String>) -> Self {
        Self {
            text: text.into(),
            link,
        }
    }
}
