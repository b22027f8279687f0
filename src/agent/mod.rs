//! Agent module - the answer-generation core.
//!
//! The generator follows a "tools in a loop" pattern:
//! 1. Send the user query with the available tool schemas
//! 2. If the engine requests tools, execute them and feed results back
//! 3. Repeat up to the configured round limit
//! 4. Force a final tool-less call so the loop always ends with text

mod generator;
mod prompt;

pub use generator::AnswerGenerator;
pub use prompt::{build_system_content, SYSTEM_PROMPT};
