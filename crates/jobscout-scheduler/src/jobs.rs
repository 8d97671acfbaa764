//! Run bookkeeping types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What asked for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum TriggerSource {
    Scheduled,
    Manual,
}

/// A finished run and what it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord<T> {
    pub id: String,
    pub source: TriggerSource,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let at = DateTime::parse_from_rfc3339("2026-02-17T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = RunRecord {
            id: "run-1".to_string(),
            source: TriggerSource::Manual,
            started_at: at,
            finished_at: at,
            outcome: 3_u32,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "Manual");
        assert_eq!(json["outcome"], 3);

        let back: RunRecord<u32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
