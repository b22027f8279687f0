//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::models::Source;

/// Request to answer a question.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// The user's question
    pub query: String,

    /// Session to thread conversation history through; a new session is
    /// allocated when absent
    pub session_id: Option<String>,
}

/// Response to a query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// The generated answer
    pub answer: String,

    /// Citations for the retrieved content backing the answer
    pub sources: Vec<Source>,

    /// Session the exchange was recorded under
    pub session_id: String,
}

/// Corpus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CourseStatsResponse {
    /// Number of indexed courses
    pub total_courses: usize,

    /// Titles of all indexed courses
    pub course_titles: Vec<String>,
}

/// Confirmation that a session was cleared.
#[derive(Debug, Clone, Serialize)]
pub struct ClearSessionResponse {
    pub message: String,
    pub session_id: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Error body returned on failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
