//! Hint routing and published render state

pub mod classifier;
pub mod render_store;

pub use classifier::{Classification, HintClassifier};
pub use render_store::{RenderStateStore, Snapshot};
