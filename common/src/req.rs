use std::collections::BTreeMap;

/// Metric keys of the history response, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    RainProbability,
    UvIndex,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Pressure,
        Metric::WindSpeed,
        Metric::RainProbability,
        Metric::UvIndex,
    ];

    /// Only temperature and humidity have columns in `weather_history`.
    pub fn is_persisted(&self) -> bool {
        matches!(self, Metric::Temperature | Metric::Humidity)
    }
}

/// Body of `POST /api/weather`.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewReading {
    #[serde(default)]
    pub temperature: Option<f64>, // °C
    #[serde(default)]
    pub humidity: Option<f64>, // percent
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct IngestResponse {
    pub status: String,
}

impl IngestResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// Body of `GET /api/weather`.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>, // °C
    pub humidity: Option<f64>,    // percent
    pub pressure: f64,            // hPa
    pub wind_speed: f64,          // km/h
    pub rain_probability: f64,    // percent
    pub uv_index: f64,
    pub timestamp: i64, // ms since epoch
}

impl WeatherSnapshot {
    /// All-zero shape served before anything was ingested.
    pub fn placeholder(timestamp: i64) -> Self {
        Self {
            temperature: Some(0.0),
            humidity: Some(0.0),
            timestamp,
            ..Default::default()
        }
    }

    /// Applies a reading on top of this snapshot. Fields the reading does not
    /// carry keep their current value.
    pub fn merged(&self, reading: &NewReading, timestamp: i64) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            timestamp,
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TimeSeriesPoint {
    pub time: String, // local HH:MM
    pub value: Option<f64>,
}

/// Body of `GET /api/weather/minmax`. Every metric key is always present.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherHistory {
    pub temperature: Vec<TimeSeriesPoint>,
    pub humidity: Vec<TimeSeriesPoint>,
    pub pressure: Vec<TimeSeriesPoint>,
    pub wind_speed: Vec<TimeSeriesPoint>,
    pub rain_probability: Vec<TimeSeriesPoint>,
    pub uv_index: Vec<TimeSeriesPoint>,
}

impl WeatherHistory {
    pub fn series(&self, metric: Metric) -> &[TimeSeriesPoint] {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::Pressure => &self.pressure,
            Metric::WindSpeed => &self.wind_speed,
            Metric::RainProbability => &self.rain_probability,
            Metric::UvIndex => &self.uv_index,
        }
    }

    fn series_mut(&mut self, metric: Metric) -> &mut Vec<TimeSeriesPoint> {
        match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
            Metric::Pressure => &mut self.pressure,
            Metric::WindSpeed => &mut self.wind_speed,
            Metric::RainProbability => &mut self.rain_probability,
            Metric::UvIndex => &mut self.uv_index,
        }
    }

    pub fn push(&mut self, metric: Metric, point: TimeSeriesPoint) {
        self.series_mut(metric).push(point);
    }

    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|m| self.series(*m).is_empty())
    }

    /// Smallest and largest value of a series, `None` if it holds no values.
    pub fn extent(&self, metric: Metric) -> Option<MetricExtent> {
        self.series(metric)
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| match acc {
                None => Some(MetricExtent { min: v, max: v }),
                Some(ext) => Some(MetricExtent {
                    min: ext.min.min(v),
                    max: ext.max.max(v),
                }),
            })
    }

    pub fn summary(&self) -> WeatherSummary {
        Metric::ALL
            .iter()
            .filter_map(|m| self.extent(*m).map(|ext| (*m, ext)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MetricExtent {
    pub min: f64,
    pub max: f64,
}

/// Body of `GET /api/weather/summary`, only metrics with data are listed.
pub type WeatherSummary = BTreeMap<Metric, MetricExtent>;

/// Body of `GET /api/weather/info`.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryInfo {
    pub count: i64,
    pub from_timestamp: Option<i64>,
    pub to_timestamp: Option<i64>,
}
