pub mod add_labels;
pub mod generate;
pub mod runner;

pub use add_labels::LabelRun;
pub use runner::Runner;
