//! Top-level RAG system wiring the index, tools, generator, and sessions.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::agent::AnswerGenerator;
use crate::config::Config;
use crate::ingest::DocumentProcessor;
use crate::llm::LlmClient;
use crate::models::{Course, Source};
use crate::session::SessionManager;
use crate::store::{CourseIndex, InMemoryCourseIndex};
use crate::tools::{CourseOutlineTool, CourseSearchTool, ToolManager};

/// Corpus statistics for the analytics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CourseAnalytics {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

/// The assembled retrieval-augmented assistant.
///
/// Owns one tool manager, so independent queries are answered one at a
/// time; citation state is keyed to the most recent execution.
pub struct RagSystem {
    index: Arc<dyn CourseIndex>,
    processor: DocumentProcessor,
    generator: AnswerGenerator,
    tools: ToolManager,
    pub sessions: SessionManager,
}

impl RagSystem {
    pub fn new(config: &Config, llm: Arc<dyn LlmClient>) -> Self {
        let index: Arc<dyn CourseIndex> =
            Arc::new(InMemoryCourseIndex::new(config.max_results));

        let mut tools = ToolManager::new();
        tools.register(Arc::new(CourseSearchTool::new(index.clone())));
        tools.register(Arc::new(CourseOutlineTool::new(index.clone())));

        Self {
            index,
            processor: DocumentProcessor::new(config.chunk_size, config.chunk_overlap),
            generator: AnswerGenerator::new(llm, config.max_tool_rounds),
            tools,
            sessions: SessionManager::new(config.max_history),
        }
    }

    /// Answer a question, optionally inside an existing session.
    ///
    /// Returns the answer text plus the citations gathered by whichever
    /// search ran last. Citation state is reset before returning so it
    /// never leaks into the next query.
    pub async fn query(
        &self,
        query: &str,
        session_id: Option<&str>,
    ) -> anyhow::Result<(String, Vec<Source>)> {
        let history = match session_id {
            Some(id) => self.sessions.history(id).await,
            None => None,
        };

        let prompt = format!("Answer this question about course materials: {}", query);
        let schemas = self.tools.schemas();

        let answer = self
            .generator
            .generate(&prompt, history.as_deref(), Some(&schemas), Some(&self.tools))
            .await?;

        let sources = self.tools.last_sources().await;
        self.tools.reset_sources().await;

        if let Some(id) = session_id {
            self.sessions.add_exchange(id, query, &answer).await;
        }

        Ok((answer, sources))
    }

    /// Parse one course document and add it to the index.
    pub async fn add_course_document(&self, path: &Path) -> anyhow::Result<(Course, usize)> {
        let (course, chunks) = self.processor.process_course_document(path)?;
        let chunk_count = chunks.len();
        self.index.add_course_metadata(course.clone()).await?;
        self.index.add_course_content(chunks).await?;
        Ok((course, chunk_count))
    }

    /// Index every `.txt` course document in a folder, skipping titles
    /// that are already present. Returns (courses added, chunks added).
    pub async fn add_course_folder(
        &self,
        path: &Path,
        clear_existing: bool,
    ) -> anyhow::Result<(usize, usize)> {
        if !path.is_dir() {
            warn!("Course folder {} does not exist", path.display());
            return Ok((0, 0));
        }

        if clear_existing {
            self.index.clear_all().await?;
        }

        let existing = self.index.course_titles().await;
        let mut courses_added = 0;
        let mut chunks_added = 0;

        for entry in WalkDir::new(path)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let file_path = entry.path();
            if !file_path.is_file()
                || file_path.extension().and_then(|e| e.to_str()) != Some("txt")
            {
                continue;
            }

            match self.processor.process_course_document(file_path) {
                Ok((course, chunks)) => {
                    if existing.contains(&course.title) {
                        continue;
                    }
                    chunks_added += chunks.len();
                    courses_added += 1;
                    self.index.add_course_metadata(course.clone()).await?;
                    self.index.add_course_content(chunks).await?;
                    info!("Indexed course: {}", course.title);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file_path.display(), e);
                }
            }
        }

        Ok((courses_added, chunks_added))
    }

    /// Corpus statistics for the analytics endpoint.
    pub async fn analytics(&self) -> CourseAnalytics {
        CourseAnalytics {
            total_courses: self.index.course_count().await,
            course_titles: self.index.course_titles().await,
        }
    }
}
