//! # Course Assistant
//!
//! A retrieval-augmented assistant for course materials.
//!
//! This library provides:
//! - An HTTP API for asking questions about indexed courses
//! - A bounded "tools in a loop" answer generator driving the reasoning engine
//! - Search and outline tools over an in-memory course index
//! - Per-session conversation history
//!
//! ## Architecture
//!
//! The assistant follows the "tools in a loop" pattern:
//! 1. Receive a question via the API
//! 2. Call the reasoning engine with the search/outline tool schemas
//! 3. Execute any requested tools against the course index, feed results back
//! 4. Repeat up to the round limit, then force a final textual answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use course_assistant::{config::Config, llm::AnthropicClient, rag::RagSystem};
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(AnthropicClient::new(
//!     config.api_key.clone(),
//!     config.model.clone(),
//!     config.base_url.clone(),
//! ));
//! let rag = RagSystem::new(&config, llm);
//! let (answer, sources) = rag.query("What is covered in lesson 2?", None).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod rag;
pub mod session;
pub mod store;
pub mod tools;

pub use config::Config;
