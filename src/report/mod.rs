pub mod daily;

pub use daily::{DailyAggregator, DailyReport, DailyStats, ReportGrade};
