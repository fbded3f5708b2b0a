// NoteMap - turns uploaded documents into AI-generated mind maps

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod llm;
pub mod documents;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
