//! Agent System
//!
//! ```text
//! extracted text
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Prompt    │  → fixed template + text
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  LLMAdapter │  → one call, no retries
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Parser    │  → fenced JSON → validated MindMap
//! └─────────────┘
//! ```

pub mod mind_map;
pub mod prompt;
pub mod response_parser;

pub use mind_map::MindMapAgent;
pub use prompt::build_prompt;
pub use response_parser::parse_mind_map;
