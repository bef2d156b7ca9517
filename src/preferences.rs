//! 表示設定と最終訪問日時

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::config::StorageKeys;
use crate::models::{DirectoryView, Theme};
use crate::utils::storage::KeyValueStore;

const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub struct Preferences<S: KeyValueStore> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// 保存済みテーマ。未保存・不明値は None（ページ既定のまま）
    pub fn theme(&self) -> Option<Theme> {
        self.store.get_item(&self.keys.theme).as_deref().and_then(Theme::parse)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set_item(&self.keys.theme, theme.as_str());
    }

    pub fn directory_view(&self) -> DirectoryView {
        DirectoryView::parse(self.store.get_item(&self.keys.directory_view).as_deref())
    }

    pub fn set_directory_view(&self, view: DirectoryView) {
        self.store.set_item(&self.keys.directory_view, view.as_str());
    }

    /// 前回訪問から訪問メッセージを作り、今回の時刻を保存する
    pub fn record_visit(&self, now_ms: i64) -> String {
        let last = self
            .store
            .get_item(&self.keys.last_visit)
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        self.store.set_item(&self.keys.last_visit, &now_ms.to_string());
        visit_message(last, now_ms)
    }
}

/// 日別訪問カウンタの結果
#[derive(Debug, Clone, PartialEq)]
pub struct DailyVisit {
    /// 今日（UTC日付）の訪問回数。今回を含む
    pub count: u32,
    pub last_seen: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore> Preferences<S> {
    /// 今日の回数を数え、前回訪問時刻を今回で上書きする。日付が変われば回数は1から
    pub fn record_daily_visit(&self, now: DateTime<Utc>) -> DailyVisit {
        let today = now.format("%Y-%m-%d").to_string();
        let last_seen = self
            .store
            .get_item(&self.keys.visit_last_seen)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let same_day = self.store.get_item(&self.keys.visit_day).as_deref() == Some(today.as_str());
        let previous = if same_day {
            self.store
                .get_item(&self.keys.visit_count)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .unwrap_or(0)
        } else {
            self.store.set_item(&self.keys.visit_day, &today);
            0
        };
        let count = previous.saturating_add(1);

        self.store.set_item(&self.keys.visit_count, &count.to_string());
        self.store
            .set_item(&self.keys.visit_last_seen, &now.to_rfc3339_opts(SecondsFormat::Millis, true));
        DailyVisit { count, last_seen }
    }
}

/// 日別カウンタ用のメッセージ（経過日数は切り捨て）
pub fn daily_visit_message(last_seen: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last_seen else {
        return "Welcome! Come back soon.".to_string();
    };
    match (now - last).num_days() {
        days if days <= 0 => "Back again today — nice!".to_string(),
        1 => "You last visited 1 day ago.".to_string(),
        days => format!("You last visited {} days ago.", days),
    }
}

/// 前回訪問の表示。指定タイムゾーンで整形する
pub fn last_seen_label<Tz: TimeZone>(last_seen: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match last_seen {
        Some(last) => last.with_timezone(tz).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => "This is your first visit.".to_string(),
    }
}

pub fn visit_message(last_ms: Option<i64>, now_ms: i64) -> String {
    let last = match last_ms {
        Some(ms) if ms > 0 => ms,
        _ => return "Welcome! Let us know if you have any questions.".to_string(),
    };

    let diff = now_ms - last;
    if diff < ONE_DAY_MS {
        return "Back so soon! Awesome!".to_string();
    }
    let days = diff / ONE_DAY_MS;
    format!("You last visited {} {} ago.", days, if days == 1 { "day" } else { "days" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;
    use chrono::Duration;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn prefs(store: &MemoryStore) -> Preferences<&MemoryStore> {
        Preferences::new(store, StorageKeys::default())
    }

    #[test]
    fn test_theme_defaults_and_persist() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        assert_eq!(p.theme(), None);
        p.set_theme(Theme::Dark);
        assert_eq!(store.get_item("tcc-theme").as_deref(), Some("dark"));
        assert_eq!(p.theme(), Some(Theme::Dark));
        store.set_item("tcc-theme", "sepia");
        assert_eq!(p.theme(), None);
    }

    #[test]
    fn test_directory_view_default_grid() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        assert_eq!(p.directory_view(), DirectoryView::Grid);
        p.set_directory_view(DirectoryView::List);
        assert_eq!(p.directory_view(), DirectoryView::List);
        assert_eq!(store.get_item("directoryView").as_deref(), Some("list"));
    }

    #[test]
    fn test_visit_messages() {
        let now = 1_760_000_000_000;
        assert_eq!(visit_message(None, now), "Welcome! Let us know if you have any questions.");
        assert_eq!(visit_message(Some(0), now), "Welcome! Let us know if you have any questions.");
        assert_eq!(visit_message(Some(now - 1000), now), "Back so soon! Awesome!");
        assert_eq!(visit_message(Some(now - ONE_DAY_MS), now), "You last visited 1 day ago.");
        assert_eq!(visit_message(Some(now - 3 * ONE_DAY_MS - 5), now), "You last visited 3 days ago.");
    }

    #[test]
    fn test_record_visit_stores_now() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        let first = p.record_visit(10 * ONE_DAY_MS);
        assert!(first.starts_with("Welcome"));
        assert_eq!(store.get_item("ht-last-visit"), Some((10 * ONE_DAY_MS).to_string()));
        let second = p.record_visit(12 * ONE_DAY_MS);
        assert_eq!(second, "You last visited 2 days ago.");

        store.set_item("ht-last-visit", "garbage");
        assert!(p.record_visit(13 * ONE_DAY_MS).starts_with("Welcome"));
    }

    #[test]
    fn test_daily_visit_counts_and_resets() {
        let store = MemoryStore::new();
        let p = prefs(&store);

        let first = p.record_daily_visit(at("2026-10-17T09:00:00Z"));
        assert_eq!(first, DailyVisit { count: 1, last_seen: None });
        assert_eq!(store.get_item("visitDay").as_deref(), Some("2026-10-17"));
        assert_eq!(store.get_item("lastVisit").as_deref(), Some("2026-10-17T09:00:00.000Z"));

        let second = p.record_daily_visit(at("2026-10-17T18:30:00Z"));
        assert_eq!(second.count, 2);
        assert_eq!(second.last_seen, Some(at("2026-10-17T09:00:00Z")));
        assert_eq!(store.get_item("visitCount").as_deref(), Some("2"));

        // 日付が変わると1から数え直す
        let next_day = p.record_daily_visit(at("2026-10-18T07:00:00Z"));
        assert_eq!(next_day.count, 1);
        assert_eq!(store.get_item("visitDay").as_deref(), Some("2026-10-18"));
    }

    #[test]
    fn test_daily_visit_ignores_corrupt_values() {
        let store = MemoryStore::new();
        store.set_item("visitDay", "2026-10-17");
        store.set_item("visitCount", "many");
        store.set_item("lastVisit", "yesterday-ish");
        let visit = prefs(&store).record_daily_visit(at("2026-10-17T12:00:00Z"));
        assert_eq!(visit, DailyVisit { count: 1, last_seen: None });
    }

    #[test]
    fn test_daily_visit_messages() {
        let now = at("2026-10-17T12:00:00Z");
        assert_eq!(daily_visit_message(None, now), "Welcome! Come back soon.");
        assert_eq!(daily_visit_message(Some(now - Duration::hours(5)), now), "Back again today — nice!");
        assert_eq!(daily_visit_message(Some(now - Duration::hours(30)), now), "You last visited 1 day ago.");
        assert_eq!(daily_visit_message(Some(now - Duration::days(4)), now), "You last visited 4 days ago.");
    }

    #[test]
    fn test_last_seen_label() {
        assert_eq!(last_seen_label(None, &Utc), "This is your first visit.");
        assert_eq!(last_seen_label(Some(at("2026-10-16T21:05:09Z")), &Utc), "10/16/2026, 9:05:09 PM");
    }
}
