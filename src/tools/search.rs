//! Course content search tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolOutput};
use crate::models::Source;
use crate::store::{CourseIndex, SearchError};

/// Searches indexed course content with optional course/lesson filters.
pub struct CourseSearchTool {
    store: Arc<dyn CourseIndex>,
}

impl CourseSearchTool {
    pub fn new(store: Arc<dyn CourseIndex>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CourseSearchTool {
    fn name(&self) -> &str {
        "search_course_content"
    }

    fn description(&self) -> &str {
        "Search course materials with smart course name matching and lesson filtering"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search for in the course content"
                },
                "course_name": {
                    "type": "string",
                    "description": "Course title (partial matches work, e.g. 'MCP', 'Introduction')"
                },
                "lesson_number": {
                    "type": "integer",
                    "description": "Specific lesson number to search within (e.g. 1, 2, 3)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: &Value) -> anyhow::Result<ToolOutput> {
        let query = args["query"].as_str().unwrap_or_default();
        let course_name = args["course_name"].as_str();
        let lesson_number = args["lesson_number"].as_u64().map(|n| n as u32);

        let matches = match self.store.search(query, course_name, lesson_number).await {
            Ok(matches) => matches,
            Err(SearchError::CourseNotFound(name)) => {
                return Ok(ToolOutput::text_only(format!(
                    "No course found matching '{}'",
                    name
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if matches.is_empty() {
            return Ok(ToolOutput::text_only(empty_result_message(
                course_name,
                lesson_number,
            )));
        }

        let mut blocks = Vec::with_capacity(matches.len());
        let mut sources = Vec::with_capacity(matches.len());

        for hit in &matches {
            let header = match hit.lesson_number {
                Some(n) => format!("[{} - Lesson {}]", hit.course_title, n),
                None => format!("[{}]", hit.course_title),
            };
            blocks.push(format!("{}\n{}", header, hit.content));

            let label = match hit.lesson_number {
                Some(n) => format!("{} - Lesson {}", hit.course_title, n),
                None => hit.course_title.clone(),
            };
            let link = match hit.lesson_number {
                Some(n) => match self.store.lesson_link(&hit.course_title, n).await {
                    Some(link) => Some(link),
                    None => self.store.course_link(&hit.course_title).await,
                },
                None => self.store.course_link(&hit.course_title).await,
            };
            sources.push(Source::new(label, link));
        }

        Ok(ToolOutput {
            text: blocks.join("\n\n"),
            sources,
        })
    }
}

fn empty_result_message(course_name: Option<&str>, lesson_number: Option<u32>) -> String {
    let mut message = String::from("No relevant content found");
    if let Some(name) = course_name {
        message.push_str(&format!(" in course '{}'", name));
    }
    if let Some(n) = lesson_number {
        message.push_str(&format!(" in lesson {}", n));
    }
    message
}
