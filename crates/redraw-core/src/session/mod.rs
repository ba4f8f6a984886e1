//! Processing orchestration: one page, its mask editor, the generation
//! parameters and the inpainting round trip.

mod orchestrator;
mod state;

pub use orchestrator::Session;
pub use state::{ProcessedResult, SessionState};
