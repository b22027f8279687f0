//! Course document parsing and chunking.
//!
//! Course documents are plain text with a metadata header followed by
//! lesson sections:
//!
//! ```text
//! Course Title: Test Course on Programming
//! Course Link: https://example.com/test-course
//! Course Instructor: John Smith
//!
//! Lesson 1: Introduction to Python
//! Lesson Link: https://example.com/lesson1
//! Welcome to Python programming. ...
//! ```

use std::path::Path;

use anyhow::Context;
use regex::Regex;

use crate::models::{Course, CourseChunk, Lesson};

/// Parses course documents and splits lesson prose into indexable chunks.
pub struct DocumentProcessor {
    chunk_size: usize,
    chunk_overlap: usize,
    lesson_header: Regex,
}

impl DocumentProcessor {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            lesson_header: Regex::new(r"^Lesson\s+(\d+):\s*(.+)$").unwrap(),
        }
    }

    /// Read and parse one course document into its metadata and chunks.
    pub fn process_course_document(
        &self,
        path: &Path,
    ) -> anyhow::Result<(Course, Vec<CourseChunk>)> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading course document {}", path.display()))?;
        if raw.trim().is_empty() {
            anyhow::bail!("course document {} is empty", path.display());
        }

        let fallback_title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled Course".to_string());

        self.parse(&raw, &fallback_title)
    }

    fn parse(&self, raw: &str, fallback_title: &str) -> anyhow::Result<(Course, Vec<CourseChunk>)> {
        let mut title = None;
        let mut course_link = None;
        let mut instructor = None;

        let mut lessons: Vec<Lesson> = Vec::new();
        let mut chunks: Vec<CourseChunk> = Vec::new();

        // Prose accumulated for the lesson currently being read. Text
        // before the first lesson header is indexed without a lesson number.
        let mut current_lesson: Option<u32> = None;
        let mut prose = String::new();
        let mut chunk_index = 0;

        for line in raw.lines() {
            let trimmed = line.trim();

            if let Some(value) = trimmed.strip_prefix("Course Title:") {
                title = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("Course Link:") {
                course_link = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("Course Instructor:") {
                instructor = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("Lesson Link:") {
                if let Some(lesson) = lessons.last_mut() {
                    lesson.lesson_link = Some(value.trim().to_string());
                }
                continue;
            }

            if let Some(captures) = self.lesson_header.captures(trimmed) {
                let resolved_title = title.as_deref().unwrap_or(fallback_title);
                self.flush_prose(
                    &mut prose,
                    current_lesson,
                    resolved_title,
                    &mut chunk_index,
                    &mut chunks,
                );

                let number: u32 = captures[1].parse().unwrap_or(0);
                lessons.push(Lesson {
                    lesson_number: number,
                    title: captures[2].trim().to_string(),
                    lesson_link: None,
                });
                current_lesson = Some(number);
                continue;
            }

            if !trimmed.is_empty() {
                if !prose.is_empty() {
                    prose.push(' ');
                }
                prose.push_str(trimmed);
            }
        }

        let resolved_title = title.clone().unwrap_or_else(|| fallback_title.to_string());
        self.flush_prose(
            &mut prose,
            current_lesson,
            &resolved_title,
            &mut chunk_index,
            &mut chunks,
        );

        lessons.sort_by_key(|l| l.lesson_number);

        let course = Course {
            title: resolved_title,
            course_link,
            instructor,
            lessons,
        };

        Ok((course, chunks))
    }

    /// Chunk the accumulated prose for one lesson and append the results.
    fn flush_prose(
        &self,
        prose: &mut String,
        lesson_number: Option<u32>,
        course_title: &str,
        chunk_index: &mut usize,
        out: &mut Vec<CourseChunk>,
    ) {
        for piece in chunk_text(prose, self.chunk_size, self.chunk_overlap) {
            out.push(CourseChunk {
                content: piece,
                course_title: course_title.to_string(),
                lesson_number,
                chunk_index: *chunk_index,
            });
            *chunk_index += 1;
        }
        prose.clear();
    }
}

/// Split prose into chunks of roughly `chunk_size` characters on sentence
/// boundaries, with `overlap` characters carried between adjacent chunks.
fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let sentences = split_sentences(text);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        if !current.is_empty() && current.len() + sentence.len() + 1 > chunk_size {
            let finished = current.clone();
            let tail = overlap_tail(&finished, overlap);
            chunks.push(finished);
            current = tail;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&sentence);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        }
    }
    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Last `overlap` characters of a chunk, aligned to a word boundary.
fn overlap_tail(chunk: &str, overlap: usize) -> String {
    if overlap == 0 || chunk.len() <= overlap {
        return String::new();
    }
    let start = chunk.len() - overlap;
    let mut idx = start;
    while idx < chunk.len() && !chunk.is_char_boundary(idx) {
        idx += 1;
    }
    match chunk[idx..].find(' ') {
        Some(space) => chunk[idx + space + 1..].to_string(),
        None => chunk[idx..].to_string(),
    }
}
