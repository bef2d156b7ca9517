//! 表示対象の選択ロジック
//!
//! シャッフル、おすすめ抽出、スポットライト抽出、予報の日付選択、
//! フィールド一致フィルタ。すべて入力を変更せず新しいVecを返す。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::Rng;
use std::collections::BTreeMap;

use crate::models::{ForecastEntry, Member, Record};

/// おすすめ枠で優先する件数の上限
pub const FEATURED_FLAGGED_CAP: usize = 4;

/// 正午からこの秒数以内を「昼の予報」とみなす
const NOON_WINDOW_SECS: i64 = 3 * 3600;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================
// シャッフル
// ============================================

/// Fisher–Yates（末尾から1まで、i以下の添字と交換）
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(list: &[T], rng: &mut R) -> Vec<T> {
    let mut items = list.to_vec();
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}

// ============================================
// おすすめ抽出（層別サンプリング）
// ============================================

/// フラグ付きを最大4件ランダムに選び、残り枠を未使用のフラグ付き＋その他から埋める。
/// 件数は `min(total, list.len())`、順序は毎回ランダム。
pub fn pick_featured_with<T, F, R>(list: &[T], total: usize, is_flagged: F, rng: &mut R) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    R: Rng + ?Sized,
{
    let (flagged, other): (Vec<T>, Vec<T>) = list.iter().cloned().partition(|item| is_flagged(item));

    let flagged = shuffle_with(&flagged, rng);
    let other = shuffle_with(&other, rng);

    let flagged_count = FEATURED_FLAGGED_CAP.min(flagged.len()).min(total);
    let mut picks: Vec<T> = flagged[..flagged_count].to_vec();
    let remaining = total - picks.len();

    let mut pool: Vec<T> = flagged[flagged_count..].to_vec();
    pool.extend(other);
    picks.extend(shuffle_with(&pool, rng).into_iter().take(remaining));

    shuffle_with(&picks, rng)
}

pub fn pick_featured<T, F>(list: &[T], total: usize, is_flagged: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    pick_featured_with(list, total, is_flagged, &mut rand::thread_rng())
}

// ============================================
// スポットライト（chamberサイト）
// ============================================

/// gold/silver会員から、3件以上いれば3件、そうでなければ最大2件
pub fn pick_spotlights_with<R: Rng + ?Sized>(members: &[Member], rng: &mut R) -> Vec<Member> {
    let eligible: Vec<Member> = members
        .iter()
        .filter(|m| m.level().is_featured())
        .cloned()
        .collect();
    let count = if eligible.len() >= 3 { 3 } else { 2 };
    shuffle_with(&eligible, rng).into_iter().take(count).collect()
}

pub fn pick_spotlights(members: &[Member]) -> Vec<Member> {
    pick_spotlights_with(members, &mut rand::thread_rng())
}

// ============================================
// 予報の日付選択
// ============================================

/// 1日分の代表エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub entry: ForecastEntry,
}

fn parse_dt_txt(entry: &ForecastEntry) -> Option<NaiveDateTime> {
    let raw = entry.dt_txt.as_deref()?.trim();
    NaiveDateTime::parse_from_str(raw, DT_TXT_FORMAT).ok()
}

fn seconds_from_noon(time: NaiveTime) -> i64 {
    (i64::from(time.num_seconds_from_midnight()) - 12 * 3600).abs()
}

/// 日ごとに正午に最も近いエントリを選ぶ。正午帯で `n` 日に満たなければ
/// 各日の最初のエントリで補う。今日は除外し、日付昇順で最大 `n` 件。
pub fn pick_forecast_days(list: &[ForecastEntry], n: usize, today: NaiveDate) -> Vec<ForecastDay> {
    let parsed: Vec<(NaiveDateTime, &ForecastEntry)> = list
        .iter()
        .filter_map(|entry| parse_dt_txt(entry).map(|dt| (dt, entry)))
        .collect();

    // 1周目: 正午帯の中で最も正午に近いもの（同距離なら先勝ち）
    let mut by_day: BTreeMap<NaiveDate, (i64, &ForecastEntry)> = BTreeMap::new();
    for (dt, entry) in parsed.iter().copied() {
        let distance = seconds_from_noon(dt.time());
        if distance > NOON_WINDOW_SECS {
            continue;
        }
        let slot = by_day.entry(dt.date()).or_insert((distance, entry));
        if distance < slot.0 {
            *slot = (distance, entry);
        }
    }

    // 2周目: 足りない日は最初に出てきたエントリ
    let upcoming = by_day.keys().filter(|d| **d != today).count();
    if upcoming < n {
        for (dt, entry) in parsed.iter().copied() {
            by_day.entry(dt.date()).or_insert((i64::MAX, entry));
        }
    }

    by_day
        .into_iter()
        .filter(|(date, _)| *date != today)
        .take(n)
        .map(|(date, (_, entry))| ForecastDay { date, entry: entry.clone() })
        .collect()
}

// ============================================
// フィルタ
// ============================================

/// フィールド完全一致。"all" または空文字は全件
pub fn filter_by_field<T: Record + Clone>(list: &[T], field: &str, value: &str) -> Vec<T> {
    if value.is_empty() || value == "all" {
        return list.to_vec();
    }
    list.iter()
        .filter(|item| item.field(field).as_deref() == Some(value))
        .cloned()
        .collect()
}
