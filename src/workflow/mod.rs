pub mod pipeline;
pub mod stage;

pub use pipeline::{Pipeline, RunReport, REQUESTED_KEYS};
pub use stage::Stage;
