//! In-memory course index (non-persistent).
//!
//! Chunks are ranked by cosine similarity over term-frequency vectors.
//! Course-name filters resolve fuzzily: case-insensitive substring match
//! first, then best token overlap against the known titles.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CourseIndex, SearchError, SearchMatch};
use crate::models::{Course, CourseChunk};

struct IndexedChunk {
    chunk: CourseChunk,
    terms: HashMap<String, f32>,
    norm: f32,
}

#[derive(Default)]
struct IndexState {
    courses: Vec<Course>,
    chunks: Vec<IndexedChunk>,
}

#[derive(Clone)]
pub struct InMemoryCourseIndex {
    state: Arc<RwLock<IndexState>>,
    max_results: usize,
}

impl InMemoryCourseIndex {
    pub fn new(max_results: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(IndexState::default())),
            max_results,
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn term_frequencies(text: &str) -> HashMap<String, f32> {
    let mut terms: HashMap<String, f32> = HashMap::new();
    for token in tokenize(text) {
        *terms.entry(token).or_insert(0.0) += 1.0;
    }
    terms
}

fn vector_norm(terms: &HashMap<String, f32>) -> f32 {
    terms.values().map(|w| w * w).sum::<f32>().sqrt()
}

fn cosine_score(query: &HashMap<String, f32>, query_norm: f32, doc: &IndexedChunk) -> f32 {
    if query_norm == 0.0 || doc.norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = query
        .iter()
        .filter_map(|(term, weight)| doc.terms.get(term).map(|w| w * weight))
        .sum();
    dot / (query_norm * doc.norm)
}

impl IndexState {
    /// Fuzzy-resolve a user-supplied course name against known titles.
    fn resolve_course_name(&self, name: &str) -> Option<String> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        // Substring match wins outright.
        for course in &self.courses {
            if course.title.to_lowercase().contains(&needle) {
                return Some(course.title.clone());
            }
        }

        // Otherwise the title sharing the most query tokens.
        let query_tokens = tokenize(&needle);
        let mut best: Option<(usize, &Course)> = None;
        for course in &self.courses {
            let title_tokens = tokenize(&course.title);
            let overlap = query_tokens
                .iter()
                .filter(|t| title_tokens.contains(t))
                .count();
            if overlap > 0 && best.map_or(true, |(score, _)| overlap > score) {
                best = Some((overlap, course));
            }
        }
        best.map(|(_, course)| course.title.clone())
    }

    fn course(&self, title: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.title == title)
    }
}

#[async_trait]
impl CourseIndex for InMemoryCourseIndex {
    async fn add_course_metadata(&self, course: Course) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        // Re-adding a title replaces its metadata.
        state.courses.retain(|c| c.title != course.title);
        state.courses.push(course);
        Ok(())
    }

    async fn add_course_content(&self, chunks: Vec<CourseChunk>) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        for chunk in chunks {
            let terms = term_frequencies(&chunk.content);
            let norm = vector_norm(&terms);
            state.chunks.push(IndexedChunk { chunk, terms, norm });
        }
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<u32>,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        let state = self.state.read().await;

        let course_filter = match course_name {
            Some(name) => Some(
                state
                    .resolve_course_name(name)
                    .ok_or_else(|| SearchError::CourseNotFound(name.to_string()))?,
            ),
            None => None,
        };

        let query_terms = term_frequencies(query);
        let query_norm = vector_norm(&query_terms);

        let mut scored: Vec<(f32, &IndexedChunk)> = state
            .chunks
            .iter()
            .filter(|indexed| {
                course_filter
                    .as_deref()
                    .map_or(true, |title| indexed.chunk.course_title == title)
            })
            .filter(|indexed| {
                lesson_number.map_or(true, |n| indexed.chunk.lesson_number == Some(n))
            })
            .map(|indexed| (cosine_score(&query_terms, query_norm, indexed), indexed))
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, indexed)| SearchMatch {
                content: indexed.chunk.content.clone(),
                course_title: indexed.chunk.course_title.clone(),
                lesson_number: indexed.chunk.lesson_number,
            })
            .collect())
    }

    async fn outline(&self, course_name: &str) -> Option<Course> {
        let state = self.state.read().await;
        let title = state.resolve_course_name(course_name)?;
        state.course(&title).cloned()
    }

    async fn lesson_link(&self, course_title: &str, lesson_number: u32) -> Option<String> {
        let state = self.state.read().await;
        state
            .course(course_title)
            .and_then(|c| c.lesson(lesson_number))
            .and_then(|l| l.lesson_link.clone())
    }

    async fn course_link(&self, course_title: &str) -> Option<String> {
        let state = self.state.read().await;
        state.course(course_title).and_then(|c| c.course_link.clone())
    }

    async fn course_titles(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.courses.iter().map(|c| c.title.clone()).collect()
    }

    async fn course_count(&self) -> usize {
        self.state.read().await.courses.len()
    }

    async fn clear_all(&self) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.courses.clear();
        state.chunks.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lesson;

    fn course(title: &str) -> Course {
        Course {
            title: title.to_string(),
            course_link: None,
            instructor: None,
            lessons: vec![],
        }
    }

    fn chunk(content: &str, course_title: &str, lesson: u32, index: usize) -> CourseChunk {
        CourseChunk {
            content: content.to_string(),
            course_title: course_title.to_string(),
            lesson_number: Some(lesson),
            chunk_index: index,
        }
    }

    #[tokio::test]
    async fn search_returns_ranked_matches() {
        let index = InMemoryCourseIndex::new(5);
        index.add_course_metadata(course("Programming Course")).await.unwrap();
        index
            .add_course_content(vec![
                chunk(
                    "Python is a programming language used for web development.",
                    "Programming Course",
                    1,
                    0,
                ),
                chunk(
                    "JavaScript is used for frontend web development.",
                    "Programming Course",
                    2,
                    1,
                ),
            ])
            .await
            .unwrap();

        let matches = index.search("Python programming", None, None).await.unwrap();
        assert!(!matches.is_empty());
        assert!(matches[0].content.contains("Python"));
    }

    #[tokio::test]
    async fn search_filters_by_course() {
        let index = InMemoryCourseIndex::new(5);
        index.add_course_metadata(course("Python Course")).await.unwrap();
        index.add_course_metadata(course("JavaScript Course")).await.unwrap();
        index
            .add_course_content(vec![
                chunk("Python basics and syntax", "Python Course", 1, 0),
                chunk("JavaScript basics and DOM manipulation", "JavaScript Course", 1, 1),
            ])
            .await
            .unwrap();

        let matches = index
            .search("basics", Some("Python Course"), None)
            .await
            .unwrap();
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.course_title == "Python Course"));
    }

    #[tokio::test]
    async fn search_filters_by_lesson() {
        let index = InMemoryCourseIndex::new(5);
        index.add_course_metadata(course("Test Course")).await.unwrap();
        index
            .add_course_content(vec![
                chunk("Lesson 1 content about variables", "Test Course", 1, 0),
                chunk("Lesson 2 content about functions", "Test Course", 2, 1),
            ])
            .await
            .unwrap();

        let matches = index
            .search("content", Some("Test Course"), Some(2))
            .await
            .unwrap();
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.content.contains("functions")));
    }

    #[tokio::test]
    async fn unknown_course_filter_is_an_error() {
        let index = InMemoryCourseIndex::new(5);
        let err = index
            .search("anything", Some("Nonexistent Course"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::CourseNotFound(_)));
        assert!(format!("{}", err).contains("No course found"));
    }

    #[tokio::test]
    async fn unrelated_query_matches_nothing() {
        let index = InMemoryCourseIndex::new(5);
        index.add_course_metadata(course("Test Course")).await.unwrap();
        index
            .add_course_content(vec![chunk("Rust ownership rules", "Test Course", 1, 0)])
            .await
            .unwrap();

        let matches = index.search("gardening tips", None, None).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn partial_names_resolve_to_full_titles() {
        let index = InMemoryCourseIndex::new(5);
        index
            .add_course_metadata(course("Machine Learning with Python"))
            .await
            .unwrap();

        let outline = index.outline("Machine Learning").await.unwrap();
        assert_eq!(outline.title, "Machine Learning with Python");

        let outline = index.outline("Python").await.unwrap();
        assert_eq!(outline.title, "Machine Learning with Python");

        assert!(index.outline("Nonexistent Course").await.is_none());
    }

    #[tokio::test]
    async fn lesson_links_resolve_by_number() {
        let index = InMemoryCourseIndex::new(5);
        index
            .add_course_metadata(Course {
                title: "Test Course".to_string(),
                course_link: Some("https://example.com".to_string()),
                instructor: None,
                lessons: vec![
                    Lesson {
                        lesson_number: 1,
                        title: "Intro".to_string(),
                        lesson_link: Some("https://example.com/1".to_string()),
                    },
                    Lesson {
                        lesson_number: 2,
                        title: "Advanced".to_string(),
                        lesson_link: Some("https://example.com/2".to_string()),
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(
            index.lesson_link("Test Course", 1).await.as_deref(),
            Some("https://example.com/1")
        );
        assert_eq!(
            index.lesson_link("Test Course", 2).await.as_deref(),
            Some("https://example.com/2")
        );
        assert!(index.lesson_link("Test Course", 99).await.is_none());
        assert_eq!(
            index.course_link("Test Course").await.as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn clear_all_empties_the_index() {
        let index = InMemoryCourseIndex::new(5);
        index.add_course_metadata(course("Test Course")).await.unwrap();
        index
            .add_course_content(vec![chunk("Test content", "Test Course", 1, 0)])
            .await
            .unwrap();
        assert_eq!(index.course_count().await, 1);

        index.clear_all().await.unwrap();
        assert_eq!(index.course_count().await, 0);
        assert!(index.search("test", None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn results_are_capped_at_max_results() {
        let index = InMemoryCourseIndex::new(2);
        index.add_course_metadata(course("Big Course")).await.unwrap();
        let chunks = (0..6)
            .map(|i| chunk(&format!("variables note number {}", i), "Big Course", 1, i))
            .collect();
        index.add_course_content(chunks).await.unwrap();

        let matches = index.search("variables", None, None).await.unwrap();
        assert_eq!(matches.len(), 2);
    }
}
