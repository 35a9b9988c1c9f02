pub mod envelope;
pub mod filters;
pub mod kind;

pub use envelope::{ReportEnvelope, ReportRow};
pub use filters::{DateRangeFilters, FilterError, ReportFilters, StockFilters};
pub use kind::{FormLayout, ReportKind, UnknownReportKind};
