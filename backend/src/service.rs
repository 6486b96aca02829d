use std::sync::{Arc, Mutex};

use anyhow::Result;
use common::req::{
    HistoryInfo, Metric, NewReading, TimeSeriesPoint, WeatherHistory, WeatherSnapshot,
    WeatherSummary,
};

use crate::db::{Db, NewWeatherReading, WeatherReading};
use crate::utils::{local_hh_mm, MS_PER_HOUR};

pub const HISTORY_WINDOW_MS: i64 = 24 * MS_PER_HOUR;

pub type SharedService = Arc<Mutex<WeatherService>>;

/// Owns the store and the in-memory current snapshot.
pub struct WeatherService {
    db: Db,
    snapshot: Option<WeatherSnapshot>,
    last_timestamp: Option<i64>,
    started_at: i64,
}

impl WeatherService {
    pub fn new(mut db: Db, started_at: i64) -> Result<Self> {
        let last_timestamp = db.latest_reading()?.map(|r| r.timestamp);
        Ok(Self {
            db,
            snapshot: None,
            last_timestamp,
            started_at,
        })
    }

    pub fn into_shared(self) -> SharedService {
        Arc::new(Mutex::new(self))
    }

    /// Stores a reading stamped with `now` and makes it the current snapshot.
    ///
    /// Timestamps never go backwards: if the clock stepped back since the last
    /// ingestion the previous timestamp is reused. The snapshot only changes
    /// once the row is written.
    pub fn ingest(&mut self, reading: &NewReading, now: i64) -> Result<WeatherSnapshot> {
        let timestamp = self.last_timestamp.map_or(now, |last| now.max(last));

        self.db.insert_reading(&NewWeatherReading {
            temperature: reading.temperature,
            humidity: reading.humidity,
            timestamp,
        })?;
        self.last_timestamp = Some(timestamp);

        let snapshot = self.snapshot.unwrap_or_default().merged(reading, timestamp);
        self.snapshot = Some(snapshot);
        log::debug!("ingested {:?}", snapshot);

        Ok(snapshot)
    }

    /// Current snapshot. Before the first ingestion of this process it is
    /// loaded from the newest stored row; with an empty store the all-zero
    /// placeholder stamped with the start time is returned.
    pub fn current(&mut self) -> Result<WeatherSnapshot> {
        if let Some(snapshot) = self.snapshot {
            return Ok(snapshot);
        }

        match self.db.latest_reading()? {
            Some(row) => {
                log::info!("restoring snapshot from stored reading {}", row.id);
                let snapshot = snapshot_from_row(&row);
                self.snapshot = Some(snapshot);
                Ok(snapshot)
            }
            None => Ok(WeatherSnapshot::placeholder(self.started_at)),
        }
    }

    /// Readings of the last 24 hours as one time series per metric.
    pub fn history(&mut self, now: i64) -> Result<WeatherHistory> {
        let rows = self.db.readings_since(now - HISTORY_WINDOW_MS)?;
        Ok(history_from_rows(&rows))
    }

    pub fn summary(&mut self, now: i64) -> Result<WeatherSummary> {
        Ok(self.history(now)?.summary())
    }

    pub fn info(&mut self) -> Result<HistoryInfo> {
        self.db.reading_info()
    }
}

fn snapshot_from_row(row: &WeatherReading) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: row.temperature,
        humidity: row.humidity,
        timestamp: row.timestamp,
        ..Default::default()
    }
}

fn history_from_rows(rows: &[WeatherReading]) -> WeatherHistory {
    let mut history = WeatherHistory::default();
    for row in rows {
        let time = local_hh_mm(row.timestamp);
        history.push(
            Metric::Temperature,
            TimeSeriesPoint {
                time: time.clone(),
                value: row.temperature,
            },
        );
        history.push(
            Metric::Humidity,
            TimeSeriesPoint {
                time,
                value: row.humidity,
            },
        );
    }
    history
}
