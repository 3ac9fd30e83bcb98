use std::sync::Arc;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

use crate::application::errors::ForecastError;
use crate::domain::entities::{Day, Query, RegionTable};
use crate::domain::traits::ForecastSource;

/// Clock returning the current calendar date
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub const ASK_FOR_REGION: &str = "地域を指定してください。（例：東京の明日の天気）";
pub const PAST_DAY_UNAVAILABLE: &str = "過去の天気予報は取得できません。";
pub const FORECAST_NOT_FOUND: &str = "天気情報が見つかりませんでした。";

pub fn unsupported_region(region: &str) -> String {
    format!("「{}」の天気情報には対応していません。", region)
}

pub fn fetch_failed(error: &ForecastError) -> String {
    format!("天気情報の取得中にエラーが発生しました: {}", error)
}

pub fn forecast_reply(region: &str, day: Day, date: NaiveDate, summary: &str) -> String {
    format!(
        "{} の {} ({}) の天気は「{}」です。",
        region,
        day.label(),
        date.format("%Y-%m-%d"),
        summary
    )
}

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Calendar date in Japan (UTC+9) at `now`
pub fn date_in_japan(now: DateTime<Utc>) -> NaiveDate {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => now.with_timezone(&jst).date_naive(),
        None => now.date_naive(),
    }
}

/// Current date in Japan, the forecast source's calendar
pub fn today_in_japan() -> NaiveDate {
    date_in_japan(Utc::now())
}

/// Locate the day-indexed weather summary in a JMA forecast document.
///
/// Scans `[0].timeSeries` for the first block whose first area carries a
/// `weathers` list and takes element `index` of that list. Any missing key,
/// short list or non-string element yields `None`.
pub fn find_weather_summary(doc: &Value, index: usize) -> Option<&str> {
    let series = doc.get(0)?.get("timeSeries")?.as_array()?;
    let weathers = series
        .iter()
        .find_map(|block| block.get("areas")?.get(0)?.get("weathers")?.as_array())?;
    weathers.get(index)?.as_str()
}

/// Turns a (region, day) query into a reply. Every outcome is a string.
#[derive(Clone)]
pub struct WeatherResolver {
    regions: Arc<RegionTable>,
    source: Arc<dyn ForecastSource>,
    today: Clock,
}

impl WeatherResolver {
    pub fn new(regions: Arc<RegionTable>, source: Arc<dyn ForecastSource>) -> Self {
        Self {
            regions,
            source,
            today: Arc::new(today_in_japan),
        }
    }

    /// Replace the clock used for reply dates
    pub fn with_today<F>(mut self, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.today = Arc::new(today);
        self
    }

    pub async fn resolve_query(&self, query: &Query) -> String {
        self.resolve(query.region(), query.day).await
    }

    pub async fn resolve(&self, region: Option<&str>, day: Day) -> String {
        let Some(region) = region else {
            return ASK_FOR_REGION.to_string();
        };

        let Some(code) = self.regions.code(region) else {
            tracing::debug!("Unsupported region: {}", region);
            return unsupported_region(region);
        };

        // The source only publishes forecasts, never past days
        let Some(index) = day.forecast_index() else {
            return PAST_DAY_UNAVAILABLE.to_string();
        };

        match self.lookup(code, index).await {
            Ok(Some(summary)) => {
                let today = (self.today)();
                let date = today
                    .checked_add_days(Days::new(index as u64))
                    .unwrap_or(today);
                forecast_reply(region, day, date, &summary)
            }
            Ok(None) => {
                tracing::warn!("No weather summary at index {} for area {}", index, code);
                FORECAST_NOT_FOUND.to_string()
            }
            Err(e) => {
                tracing::error!("Forecast fetch failed for area {}: {}", code, e);
                fetch_failed(&e)
            }
        }
    }

    async fn lookup(&self, code: &str, index: usize) -> Result<Option<String>, ForecastError> {
        let doc = self.source.fetch(code).await?;
        Ok(find_weather_summary(&doc, index).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Forecast source returning a canned result and counting calls
    struct StubSource {
        result: Result<Value, u16>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn ok(doc: Value) -> Arc<Self> {
            Arc::new(Self { result: Ok(doc), calls: AtomicUsize::new(0) })
        }

        fn status(code: u16) -> Arc<Self> {
            Arc::new(Self { result: Err(code), calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl ForecastSource for StubSource {
        async fn fetch(&self, _area_code: &str) -> Result<Value, ForecastError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(doc) => Ok(doc.clone()),
                Err(code) => Err(ForecastError::Status(*code)),
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver(source: Arc<StubSource>) -> WeatherResolver {
        WeatherResolver::new(Arc::new(RegionTable::builtin()), source)
            .with_today(|| NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn sample() -> Value {
        json!([{"timeSeries": [{"areas": [{"weathers": ["晴れ", "曇り"]}]}]}])
    }

    #[tokio::test]
    async fn test_missing_region_prompts() {
        let source = StubSource::ok(sample());
        let reply = resolver(source.clone()).resolve(None, Day::Tomorrow).await;
        assert_eq!(reply, ASK_FOR_REGION);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_region() {
        let reply = resolver(StubSource::ok(sample()))
            .resolve(Some("存在しない市"), Day::Today)
            .await;
        assert!(reply.contains("存在しない市"));
        assert_eq!(reply, unsupported_region("存在しない市"));
    }

    #[tokio::test]
    async fn test_yesterday_short_circuits() {
        let source = StubSource::status(500);
        let reply = resolver(source.clone()).resolve(Some("東京"), Day::Yesterday).await;
        assert_eq!(reply, PAST_DAY_UNAVAILABLE);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_today_and_tomorrow() {
        let r = resolver(StubSource::ok(sample()));
        assert_eq!(
            r.resolve(Some("東京"), Day::Today).await,
            "東京 の 今日 (2026-10-18) の天気は「晴れ」です。"
        );
        assert_eq!(
            r.resolve(Some("東京"), Day::Tomorrow).await,
            "東京 の 明日 (2026-10-19) の天気は「曇り」です。"
        );
    }

    #[tokio::test]
    async fn test_resolve_query() {
        let r = resolver(StubSource::ok(sample()));
        let query = Query::new(Some("東京".to_string()), Day::Today);
        assert!(r.resolve_query(&query).await.contains("晴れ"));
    }

    #[tokio::test]
    async fn test_short_list_is_not_found() {
        let doc = json!([{"timeSeries": [{"areas": [{"weathers": ["晴れ"]}]}]}]);
        let reply = resolver(StubSource::ok(doc)).resolve(Some("東京"), Day::Tomorrow).await;
        assert_eq!(reply, FORECAST_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_not_found() {
        let r = resolver(StubSource::ok(json!({"unexpected": true})));
        assert_eq!(r.resolve(Some("東京"), Day::Today).await, FORECAST_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_error_is_reported() {
        let reply = resolver(StubSource::status(500)).resolve(Some("東京"), Day::Today).await;
        assert_eq!(reply, fetch_failed(&ForecastError::Status(500)));
        assert!(reply.contains("500"));
    }

    #[test]
    fn test_find_summary_skips_blocks_without_weathers() {
        let doc = json!([{"timeSeries": [
            {"areas": [{"pops": ["10", "20"]}]},
            {"areas": [{"weathers": ["雨", "雪"]}]}
        ]}]);
        assert_eq!(find_weather_summary(&doc, 0), Some("雨"));
        assert_eq!(find_weather_summary(&doc, 1), Some("雪"));
        assert_eq!(find_weather_summary(&doc, 2), None);
    }

    #[test]
    fn test_find_summary_uses_first_list_only() {
        let doc = json!([{"timeSeries": [
            {"areas": [{"weathers": ["晴れ"]}]},
            {"areas": [{"weathers": ["雨", "雪"]}]}
        ]}]);
        assert_eq!(find_weather_summary(&doc, 1), None);
    }

    #[test]
    fn test_find_summary_rejects_non_strings() {
        let doc = json!([{"timeSeries": [{"areas": [{"weathers": [1, 2]}]}]}]);
        assert_eq!(find_weather_summary(&doc, 0), None);
        assert_eq!(find_weather_summary(&json!([]), 0), None);
        assert_eq!(find_weather_summary(&json!([{"timeSeries": []}]), 0), None);
    }

    #[test]
    fn test_japan_date_rolls_over_at_utc_15() {
        let before = DateTime::parse_from_rfc3339("2026-10-18T14:59:59Z").unwrap().with_timezone(&Utc);
        let after = DateTime::parse_from_rfc3339("2026-10-18T15:00:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(date_in_japan(before), date(2026, 10, 18));
        assert_eq!(date_in_japan(after), date(2026, 10, 19));
    }

    #[test]
    fn test_forecast_reply_format() {
        assert_eq!(
            forecast_reply("大阪", Day::Today, date(2026, 1, 5), "くもり"),
            "大阪 の 今日 (2026-01-05) の天気は「くもり」です。"
        );
    }
}
