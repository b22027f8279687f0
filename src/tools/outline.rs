//! Course outline tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolOutput};
use crate::models::Source;
use crate::store::CourseIndex;

/// Returns a course's full outline: title, link, instructor, and lessons.
pub struct CourseOutlineTool {
    store: Arc<dyn CourseIndex>,
}

impl CourseOutlineTool {
    pub fn new(store: Arc<dyn CourseIndex>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CourseOutlineTool {
    fn name(&self) -> &str {
        "get_course_outline"
    }

    fn description(&self) -> &str {
        "Get the complete outline of a course: title, link, instructor, and all lessons"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "course_name": {
                    "type": "string",
                    "description": "Course title (partial matches work, e.g. 'MCP', 'Introduction')"
                }
            },
            "required": ["course_name"]
        })
    }

    async fn execute(&self, args: &Value) -> anyhow::Result<ToolOutput> {
        let course_name = args["course_name"].as_str().unwrap_or_default();

        let Some(course) = self.store.outline(course_name).await else {
            return Ok(ToolOutput::text_only(format!(
                "No course found matching '{}'",
                course_name
            )));
        };

        let mut text = format!("Course: {}", course.title);
        if let Some(link) = &course.course_link {
            text.push_str(&format!("\nCourse Link: {}", link));
        }
        if let Some(instructor) = &course.instructor {
            text.push_str(&format!("\nInstructor: {}", instructor));
        }

        text.push_str(&format!("\n\nLessons ({}):", course.lessons.len()));
        let mut lessons = course.lessons.clone();
        lessons.sort_by_key(|l| l.lesson_number);
        for lesson in &lessons {
            text.push_str(&format!("\n{}. {}", lesson.lesson_number, lesson.title));
            if let Some(link) = &lesson.lesson_link {
                text.push_str(&format!(" ({})", link));
            }
        }

        let source = Source::new(course.title.clone(), course.course_link.clone());

        Ok(ToolOutput {
            text,
            sources: vec![source],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Lesson};
    use crate::store::InMemoryCourseIndex;

    async fn index_with_course() -> Arc<InMemoryCourseIndex> {
        let index = Arc::new(InMemoryCourseIndex::new(5));
        index
            .add_course_metadata(Course {
                title: "Complete Programming Course".to_string(),
                course_link: Some("https://example.com/course".to_string()),
                instructor: Some("Jane Doe".to_string()),
                lessons: vec![
                    Lesson {
                        lesson_number: 3,
                        title: "Functions".to_string(),
                        lesson_link: Some("https://example.com/3".to_string()),
                    },
                    Lesson {
                        lesson_number: 1,
                        title: "Introduction".to_string(),
                        lesson_link: Some("https://example.com/1".to_string()),
                    },
                    Lesson {
                        lesson_number: 2,
                        title: "Variables".to_string(),
                        lesson_link: Some("https://example.com/2".to_string()),
                    },
                ],
            })
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn outline_lists_metadata_and_lessons_in_order() {
        let tool = CourseOutlineTool::new(index_with_course().await);
        let output = tool
            .execute(&json!({"course_name": "Complete Programming Course"}))
            .await
            .unwrap();

        assert!(output.text.contains("Complete Programming Course"));
        assert!(output.text.contains("Jane Doe"));
        assert!(output.text.contains("https://example.com/course"));
        assert!(output.text.contains("1. Introduction"));
        assert!(output.text.contains("2. Variables"));
        assert!(output.text.contains("3. Functions"));

        let intro = output.text.find("1. Introduction").unwrap();
        let functions = output.text.find("3. Functions").unwrap();
        assert!(intro < functions);
    }

    #[tokio::test]
    async fn partial_course_name_resolves() {
        let tool = CourseOutlineTool::new(index_with_course().await);
        let output = tool
            .execute(&json!({"course_name": "Complete"}))
            .await
            .unwrap();

        assert!(output.text.contains("Complete Programming Course"));
    }

    #[tokio::test]
    async fn outline_records_a_course_level_source() {
        let tool = CourseOutlineTool::new(index_with_course().await);
        let output = tool
            .execute(&json!({"course_name": "Complete"}))
            .await
            .unwrap();

        assert_eq!(output.sources.len(), 1);
        assert_eq!(output.sources[0].text, "Complete Programming Course");
        assert_eq!(
            output.sources[0].link.as_deref(),
            Some("https://example.com/course")
        );
    }

    #[tokio::test]
    async fn unknown_course_is_a_displayable_message() {
        let tool = CourseOutlineTool::new(Arc::new(InMemoryCourseIndex::new(5)));
        let output = tool
            .execute(&json!({"course_name": "Nonexistent Course"}))
            .await
            .unwrap();

        assert!(output.text.contains("No course found matching"));
        assert!(output.sources.is_empty());
    }
}
