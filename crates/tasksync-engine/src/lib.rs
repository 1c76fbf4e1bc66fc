pub mod driver;
pub mod formatter;
pub mod graph;
pub mod report;
pub mod sequencer;

pub use driver::{SyncDriver, SyncOptions};
pub use graph::TaskGraph;
pub use report::SyncReport;
pub use sequencer::{sequence, SequenceWarning, Sequenced};
