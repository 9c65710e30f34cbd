use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

const ENABLE_LOGS: bool = true;

use crate::log_info;

const REPORT_FILE_PREFIX: &str = "posture-report";

/// Longer-horizon totals shown in the daily report. Kept separate from the
/// live session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_hours: f64,
    pub times_stood_up: u32,
    pub average_posture_score: u8,
    pub alert_count: u32,
    pub breaks_taken: u32,
}

impl Default for DailyStats {
    fn default() -> Self {
        Self {
            total_hours: 6.5,
            times_stood_up: 12,
            average_posture_score: 78,
            alert_count: 5,
            breaks_taken: 8,
        }
    }
}

impl DailyStats {
    pub fn grade(&self) -> ReportGrade {
        ReportGrade::from_score(self.average_posture_score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReportGrade {
    Good,
    Fair,
    Poor,
}

impl ReportGrade {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ReportGrade::Good
        } else if score >= 60 {
            ReportGrade::Fair
        } else {
            ReportGrade::Poor
        }
    }
}

/// Exported artifact: the stats flattened next to the report date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub stats: DailyStats,
}

impl DailyReport {
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", REPORT_FILE_PREFIX, self.date.format("%Y-%m-%d"))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize daily report")
    }

    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write daily report to {}", path.display()))?;
        log_info!("daily report written to {}", path.display());
        Ok(path)
    }
}

/// Holds the daily snapshot for reporting. Nothing in the live session feeds
/// it.
#[derive(Debug, Clone, Default)]
pub struct DailyAggregator {
    stats: DailyStats,
}

impl DailyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &DailyStats {
        &self.stats
    }

    pub fn export_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DailyReport {
        DailyReport {
            date: now.date_naive(),
            stats: self.stats.clone(),
        }
    }

    pub fn export(&self) -> DailyReport {
        self.export_at(&Local::now())
    }
}
