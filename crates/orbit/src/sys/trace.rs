use crate::events::EngineInput;
use async_channel::Sender;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// One line of a recorded session.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "at_ms")]
    pub at: Duration,
    pub input: EngineInput,
}

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed trace record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Streams a newline-delimited JSON trace file into `tx`.
pub async fn read_trace(
    path: impl AsRef<Path>,
    tx: Sender<TraceRecord>,
) -> Result<usize, TraceError> {
    let file = tokio::fs::File::open(path.as_ref()).await?;
    forward_records(BufReader::new(file), tx).await
}

/// Blank lines and lines starting with `#` are skipped. Stops early, without
/// error, if the receiver is dropped.
pub async fn forward_records<R: AsyncBufRead + Unpin>(
    reader: R,
    tx: Sender<TraceRecord>,
) -> Result<usize, TraceError> {
    let mut lines = reader.lines();
    let mut line_no = 0;
    let mut sent = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let record: TraceRecord =
            serde_json::from_str(line).map_err(|source| TraceError::Parse {
                line: line_no,
                source,
            })?;
        if tx.send(record).await.is_err() {
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
