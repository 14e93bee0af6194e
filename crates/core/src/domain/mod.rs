pub mod record;
pub mod summary;
pub mod timestamp;

pub use record::{Details, Record, RecordKind, Status, UnknownStatus};
pub use summary::DashboardSummary;
pub use timestamp::Timestamp;
