//! Payment Transaction
//!
//! The record returned by `GET /transactions`, plus the helpers the dashboard
//! uses to classify, count, and display it.

use crate::consts::cli_consts::SHORT_ID_LEN;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Processing status reported by the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Completed,
    Success,
    Rejected,
    Failed,
    Error,
    Pending,
    /// Any status string this client does not know about.
    #[serde(other)]
    Other,
}

/// Coarse grouping of statuses used for colors and stats.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StatusCategory {
    Success,
    Failure,
    Pending,
    Other,
}

impl TransactionStatus {
    pub fn category(&self) -> StatusCategory {
        match self {
            Self::Approved | Self::Completed | Self::Success => StatusCategory::Success,
            Self::Rejected | Self::Failed | Self::Error => StatusCategory::Failure,
            Self::Pending => StatusCategory::Pending,
            Self::Other => StatusCategory::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend-assigned identifier (a UUID in practice)
    pub id: String,
    pub amount: f64,
    pub status: TransactionStatus,
    /// ISO-8601 creation time as sent by the backend
    pub timestamp: String,
    /// Where the payment was made, when the device reported it
    #[serde(default)]
    pub location: Option<String>,
}

impl Transaction {
    #[allow(unused)]
    pub fn new(id: impl Into<String>, amount: f64, status: TransactionStatus) -> Self {
        Self {
            id: id.into(),
            amount,
            status,
            timestamp: Local::now().to_rfc3339(),
            location: None,
        }
    }

    /// First characters of the ID followed by an ellipsis.
    pub fn short_id(&self) -> String {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((cut, _)) => format!("{}...", &self.id[..cut]),
            None => self.id.clone(),
        }
    }

    pub fn format_amount(&self) -> String {
        format!("${:.2}", self.amount)
    }

    /// Timestamp in local time as `dd/mm/YYYY HH:MM:SS`, or the raw value if it can't be parsed.
    pub fn format_timestamp(&self) -> String {
        match parse_timestamp(&self.timestamp) {
            Some(time) => time.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  {:>10}  {:<9}  {}",
            self.short_id(),
            self.format_amount(),
            self.status,
            self.format_timestamp()
        )
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(chrono::Utc.from_utc_datetime(&naive).with_timezone(&Local))
}

/// Counts over the whole cached list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Self::default(), |mut stats, transaction| {
                stats.total += 1;
                match transaction.status.category() {
                    StatusCategory::Success => stats.approved += 1,
                    StatusCategory::Failure => stats.rejected += 1,
                    StatusCategory::Pending => stats.pending += 1,
                    StatusCategory::Other => {}
                }
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Known statuses map to their category, unknown ones become Other.
    fn test_status_deserialization_and_category() {
        let statuses: Vec<TransactionStatus> = serde_json::from_str(
            r#"["approved","completed","success","rejected","failed","error","pending","refunded"]"#,
        )
        .unwrap();
        let categories: Vec<StatusCategory> = statuses.iter().map(|s| s.category()).collect();
        assert_eq!(
            categories,
            vec![
                StatusCategory::Success,
                StatusCategory::Success,
                StatusCategory::Success,
                StatusCategory::Failure,
                StatusCategory::Failure,
                StatusCategory::Failure,
                StatusCategory::Pending,
                StatusCategory::Other,
            ]
        );
        assert_eq!(statuses[7], TransactionStatus::Other);
    }

    #[test]
    // The list endpoint also sends a nullable location; it must not break decoding.
    fn test_deserialize_backend_row() {
        let json = r#"{
            "id": "0b6f8a52-6f1c-4c0e-9f1e-3f3c2a1d9e10",
            "amount": 42.5,
            "status": "approved",
            "timestamp": "2025-03-01T10:15:30.123456+00:00",
            "location": null
        }"#;
        let transaction: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.amount, 42.5);
        assert_eq!(transaction.status, TransactionStatus::Approved);
        assert_eq!(transaction.location, None);
        assert_eq!(transaction.short_id(), "0b6f8a52...");
        assert_eq!(transaction.format_amount(), "$42.50");
    }

    #[test]
    fn test_short_id_keeps_short_values() {
        let transaction = Transaction::new("abc", 1.0, TransactionStatus::Pending);
        assert_eq!(transaction.short_id(), "abc");
    }

    #[test]
    fn test_format_timestamp() {
        let mut transaction = Transaction::new("t-1", 1.0, TransactionStatus::Pending);
        transaction.timestamp = "2025-03-01T10:15:30+00:00".to_string();
        let expected = DateTime::parse_from_rfc3339("2025-03-01T10:15:30+00:00")
            .unwrap()
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string();
        assert_eq!(transaction.format_timestamp(), expected);

        // Naive timestamps are accepted as UTC
        transaction.timestamp = "2025-03-01T10:15:30.5".to_string();
        assert_eq!(transaction.format_timestamp(), expected);

        transaction.timestamp = "yesterday".to_string();
        assert_eq!(transaction.format_timestamp(), "yesterday");
    }

    #[test]
    fn test_stats_counts_by_category() {
        let transactions = vec![
            Transaction::new("1", 10.0, TransactionStatus::Approved),
            Transaction::new("2", 150.0, TransactionStatus::Rejected),
            Transaction::new("3", 20.0, TransactionStatus::Completed),
            Transaction::new("4", 30.0, TransactionStatus::Pending),
            Transaction::new("5", 30.0, TransactionStatus::Other),
        ];
        let stats = TransactionStats::from_transactions(&transactions);
        assert_eq!(
            stats,
            TransactionStats {
                total: 5,
                approved: 2,
                rejected: 1,
                pending: 1,
            }
        );
    }
}
