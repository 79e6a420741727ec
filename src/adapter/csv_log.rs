//! Audit log backed by an append-only CSV file.
//!
//! Rows follow the spreadsheet contract:
//! `YYYY-MM-DD HH:MM:SS,SYMBOL,price,recipient,trigger` with the price
//! rendered to two decimals. The file outlives the process and is never
//! rewritten, only appended to.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::{AlertRecord, Symbol, Trigger};
use crate::error::{Error, Result};
use crate::port::AuditLog;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvAuditLog {
    path: PathBuf,
}

impl CsvAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn format_row(record: &AlertRecord) -> String {
        format!(
            "{},{},{:.2},{},{}\n",
            record.at.format(TIMESTAMP_FORMAT),
            record.symbol,
            record.price,
            record.recipient,
            record.trigger.label(),
        )
    }

    fn parse_row(line: &str) -> Option<AlertRecord> {
        let mut fields = line.splitn(5, ',');
        let at = NaiveDateTime::parse_from_str(fields.next()?, TIMESTAMP_FORMAT).ok()?;
        let symbol = Symbol::new(fields.next()?).ok()?;
        let price = fields.next()?.parse().ok()?;
        let recipient = fields.next()?.to_owned();
        let trigger = Trigger::from_label(fields.next()?)?;
        Some(AlertRecord {
            at,
            symbol,
            price,
            recipient,
            trigger,
        })
    }

    fn sink_error(e: std::io::Error) -> Error {
        Error::LogSink(e.to_string())
    }
}

#[async_trait]
impl AuditLog for CsvAuditLog {
    async fn append(&self, record: &AlertRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(Self::sink_error)?;
        file.write_all(Self::format_row(record).as_bytes())
            .await
            .map_err(Self::sink_error)?;
        file.flush().await.map_err(Self::sink_error)?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<AlertRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::sink_error(e)),
        };
        Ok(content.lines().filter_map(Self::parse_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(symbol: &str, trigger: Trigger) -> AlertRecord {
        AlertRecord {
            at: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            symbol: Symbol::new(symbol).unwrap(),
            price: dec!(19.5),
            recipient: "whatsapp:+15550100".into(),
            trigger,
        }
    }

    #[test]
    fn row_matches_the_spreadsheet_contract() {
        let row = CsvAuditLog::format_row(&record("TEST.SR", Trigger::Auto));
        assert_eq!(
            row,
            "2024-03-15 10:30:00,TEST.SR,19.50,whatsapp:+15550100,Auto\n"
        );
    }

    #[tokio::test]
    async fn append_then_read_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvAuditLog::new(dir.path().join("alerts.csv"));

        log.append(&record("AAA.SR", Trigger::Auto)).await.unwrap();
        log.append(&record("BBB.SR", Trigger::Manual)).await.unwrap();

        let rows = log.read_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol.as_str(), "AAA.SR");
        assert_eq!(rows[0].trigger, Trigger::Auto);
        assert_eq!(rows[1].symbol.as_str(), "BBB.SR");
        assert_eq!(rows[1].trigger, Trigger::Manual);
        assert_eq!(rows[0].price, dec!(19.50));
    }

    #[tokio::test]
    async fn reading_a_missing_file_is_an_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvAuditLog::new(dir.path().join("never-written.csv"));
        assert!(log.read_all().await.unwrap().is_empty());
    }
}
