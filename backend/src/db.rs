use crate::schema::*;
use anyhow::Result;
use common::req::HistoryInfo;
use diesel::connection::SimpleConnection;
use diesel::dsl::{max, min};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

const CREATE_WEATHER_HISTORY: &str =
    include_str!("../migrations/2024-05-01-120000_create_weather_history/up.sql");

#[derive(Debug, Default, Clone, Copy, Insertable)]
#[diesel(table_name=weather_history)]
pub struct NewWeatherReading {
    pub temperature: Option<f64>, // °C
    pub humidity: Option<f64>,    // percent
    pub timestamp: i64,           // ms since epoch
}

#[derive(Debug, Clone, Copy, PartialEq, Queryable)]
pub struct WeatherReading {
    pub id: i64,
    pub temperature: Option<f64>, // °C
    pub humidity: Option<f64>,    // percent
    pub timestamp: i64,           // ms since epoch
}

pub struct Db {
    conn: SqliteConnection,
}

impl Db {
    /// Opens (or creates) the database and makes sure `weather_history` exists.
    pub fn connect(database_url: &str) -> Result<Self> {
        let mut conn = SqliteConnection::establish(database_url)?;
        conn.batch_execute(CREATE_WEATHER_HISTORY)?;

        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Self::connect(":memory:")
    }

    pub fn insert_reading(&mut self, reading: &NewWeatherReading) -> Result<()> {
        log::debug!("Insert into db: {:?}", reading);

        diesel::insert_into(weather_history::table)
            .values(reading)
            .execute(&mut self.conn)?;

        Ok(())
    }

    pub fn latest_reading(&mut self) -> Result<Option<WeatherReading>> {
        use crate::schema::weather_history::dsl::*;
        let res = weather_history
            .order((timestamp.desc(), id.desc()))
            .first::<WeatherReading>(&mut self.conn)
            .optional()?;

        Ok(res)
    }

    /// Readings at or after `cutoff`, oldest first.
    pub fn readings_since(&mut self, cutoff: i64) -> Result<Vec<WeatherReading>> {
        use crate::schema::weather_history::dsl::*;
        let res = weather_history
            .filter(timestamp.ge(cutoff))
            .order((timestamp.asc(), id.asc()))
            .load::<WeatherReading>(&mut self.conn)?;

        Ok(res)
    }

    pub fn reading_info(&mut self) -> Result<HistoryInfo> {
        use crate::schema::weather_history::dsl::*;
        let count = weather_history.count().get_result::<i64>(&mut self.conn)?;
        let (from_timestamp, to_timestamp) = weather_history
            .select((min(timestamp), max(timestamp)))
            .first::<(Option<i64>, Option<i64>)>(&mut self.conn)?;

        Ok(HistoryInfo {
            count,
            from_timestamp,
            to_timestamp,
        })
    }
}
