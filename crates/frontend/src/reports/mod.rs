pub mod api;
pub mod data_table;
pub mod page;
pub mod search_form;

pub use page::{ActiveReport, ReportPage};
