//! 天気ウィジェット（OpenWeatherMap）
//!
//! 現在の天気と数日分の予報を取得して表示用の文字列にする。
//! 失敗時はプレースホルダ表示。

use chrono::NaiveDate;
use url::Url;

use crate::config::WeatherConfig;
use crate::error::{FetchError, PageError};
use crate::models::{CurrentWeather, ForecastResponse};
use crate::selection::{pick_forecast_days, ForecastDay};
use crate::utils::fetch::{fetch_json, Transport};
use crate::utils::log_trace::log_error;

pub const PLACEHOLDER: &str = "--";
pub const UNAVAILABLE_TEXT: &str = "Unable to load weather right now.";
pub const MISSING_KEY_TEXT: &str = "Add your OpenWeatherMap API key to the site configuration.";

/// 画面に出す内容
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature: String,
    pub description: String,
    pub forecast: Vec<String>,
}

impl WeatherReport {
    pub fn unavailable() -> Self {
        Self {
            temperature: PLACEHOLDER.to_string(),
            description: UNAVAILABLE_TEXT.to_string(),
            forecast: Vec::new(),
        }
    }

    pub fn missing_key() -> Self {
        Self {
            temperature: PLACEHOLDER.to_string(),
            description: MISSING_KEY_TEXT.to_string(),
            forecast: Vec::new(),
        }
    }
}

fn endpoint(config: &WeatherConfig, path: &str) -> Result<String, PageError> {
    let base = format!("{}/{}", config.base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&base).map_err(|e| PageError::Config(format!("{}: {}", base, e)))?;
    url.query_pairs_mut()
        .append_pair("q", &config.city_query)
        .append_pair("units", &config.units)
        .append_pair("appid", &config.api_key);
    Ok(url.into())
}

pub fn current_url(config: &WeatherConfig) -> Result<String, PageError> {
    endpoint(config, "weather")
}

pub fn forecast_url(config: &WeatherConfig) -> Result<String, PageError> {
    endpoint(config, "forecast")
}

/// 四捨五入して "21°C"。値が無ければ "--"
pub fn format_temp_c(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}°C", (v + 0.5).floor() as i64),
        _ => PLACEHOLDER.to_string(),
    }
}

/// "Sun, Oct 18: 21°C — clear sky"
pub fn forecast_line(day: &ForecastDay) -> String {
    format!(
        "{}: {} — {}",
        day.date.format("%a, %b %-d"),
        format_temp_c(day.entry.main.temp),
        day.entry.description().unwrap_or("—")
    )
}

/// 現在の天気 → 予報の順に取得
pub async fn fetch_report<X: Transport>(
    transport: &X,
    config: &WeatherConfig,
    today: NaiveDate,
) -> Result<WeatherReport, FetchError> {
    let current: CurrentWeather = fetch_json(transport, &current_url(config)?).await?;
    let forecast: ForecastResponse = fetch_json(transport, &forecast_url(config)?).await?;

    let days = pick_forecast_days(&forecast.list, config.forecast_days, today);
    Ok(WeatherReport {
        temperature: format_temp_c(current.main.temp),
        description: current.description().unwrap_or(PLACEHOLDER).to_string(),
        forecast: days.iter().map(forecast_line).collect(),
    })
}

/// APIキーが無ければ案内、失敗時はログを残してプレースホルダ
pub async fn load_report<X: Transport>(transport: &X, config: &WeatherConfig, today: NaiveDate) -> WeatherReport {
    if config.api_key.trim().is_empty() {
        return WeatherReport::missing_key();
    }
    match fetch_report(transport, config, today).await {
        Ok(report) => report,
        Err(e) => {
            log_error("weather", &e.to_string());
            WeatherReport::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastEntry, MainReading, Condition};
    use crate::utils::fetch::tests::StubTransport;
    use futures::executor::block_on;

    fn config() -> WeatherConfig {
        WeatherConfig {
            api_key: "k3y".to_string(),
            ..WeatherConfig::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    const CURRENT: &str = r#"{"main":{"temp":18.6},"weather":[{"description":"few clouds"}]}"#;
    const FORECAST: &str = r#"{"list":[
        {"dt_txt":"2026-10-17 12:00:00","main":{"temp":19.0},"weather":[{"description":"sun"}]},
        {"dt_txt":"2026-10-18 12:00:00","main":{"temp":21.4},"weather":[{"description":"clear sky"}]},
        {"dt_txt":"2026-10-19 12:00:00","main":{"temp":16.5},"weather":[]}
    ]}"#;

    #[test]
    fn test_urls_encode_query() {
        let cfg = config();
        assert_eq!(
            current_url(&cfg).unwrap(),
            "https://api.openweathermap.org/data/2.5/weather?q=Tarija%2CBO&units=metric&appid=k3y"
        );
        assert!(forecast_url(&cfg).unwrap().starts_with("https://api.openweathermap.org/data/2.5/forecast?"));

        let bad = WeatherConfig { base_url: "not a url".to_string(), ..config() };
        assert!(matches!(current_url(&bad), Err(PageError::Config(_))));
    }

    #[test]
    fn test_format_temp() {
        assert_eq!(format_temp_c(Some(18.6)), "19°C");
        assert_eq!(format_temp_c(Some(18.5)), "19°C");
        assert_eq!(format_temp_c(Some(-2.5)), "-2°C");
        assert_eq!(format_temp_c(Some(f64::NAN)), "--");
        assert_eq!(format_temp_c(None), "--");
    }

    #[test]
    fn test_forecast_line() {
        let day = ForecastDay {
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            entry: ForecastEntry {
                dt_txt: None,
                main: MainReading { temp: Some(21.4) },
                weather: vec![Condition { description: Some("clear sky".to_string()) }],
            },
        };
        assert_eq!(forecast_line(&day), "Sun, Oct 18: 21°C — clear sky");
    }

    #[test]
    fn test_report_success() {
        let cfg = config();
        let transport = StubTransport::default()
            .with(&current_url(&cfg).unwrap(), 200, CURRENT)
            .with(&forecast_url(&cfg).unwrap(), 200, FORECAST);
        let report = block_on(load_report(&transport, &cfg, today()));
        assert_eq!(report.temperature, "19°C");
        assert_eq!(report.description, "few clouds");
        assert_eq!(
            report.forecast,
            vec!["Sun, Oct 18: 21°C — clear sky", "Mon, Oct 19: 17°C — —"]
        );
    }

    #[test]
    fn test_report_failure_degrades() {
        let cfg = config();
        let transport = StubTransport::default()
            .with(&current_url(&cfg).unwrap(), 200, CURRENT)
            .with(&forecast_url(&cfg).unwrap(), 401, r#"{"cod":401}"#);
        assert_eq!(block_on(load_report(&transport, &cfg, today())), WeatherReport::unavailable());
    }

    #[test]
    fn test_missing_key_skips_requests() {
        let cfg = WeatherConfig { api_key: "  ".to_string(), ..WeatherConfig::default() };
        let transport = StubTransport::default();
        assert_eq!(block_on(load_report(&transport, &cfg, today())), WeatherReport::missing_key());
    }
}
