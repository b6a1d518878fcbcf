//! # プロセス稼働時間
//!
//! プロセス起動時刻を保持する [`ProcessClock`] と、稼働時間の文字列表現を提供する。
//!
//! 起動時刻はグローバル変数に置かず、`main` で一度だけ生成した値を
//! ハンドラの State に渡して共有する。

use std::time::{Duration, Instant};

/// プロセス起動時刻
///
/// 生成後は変更されない。`Copy` なので State への受け渡しに同期は不要。
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started_at: Instant,
}

impl ProcessClock {
    /// 現在時刻を起動時刻として記録する
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// 任意の時刻を起動時刻とする
    pub fn started_at(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// 起動からの経過時間
    pub fn uptime(&self) -> Duration {
        self.uptime_at(Instant::now())
    }

    /// 指定時刻時点での経過時間（起動時刻より前なら 0）
    pub fn uptime_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// 経過時間を人間が読める形式に整形する
///
/// 1 秒以上は `1h2m3.5s` のように時・分・秒で、1 秒未満は
/// `250ms` / `1.5µs` / `800ns` のように最も大きい単位で表す。
/// 小数部の末尾の 0 は出力しない。
pub fn format_uptime(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos, 1_000_000));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let second_nanos = u128::from(total_secs % 60) * 1_000_000_000 + u128::from(duration.subsec_nanos());

    let mut formatted = String::new();
    if hours > 0 {
        formatted.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        formatted.push_str(&format!("{minutes}m"));
    }
    formatted.push_str(&decimal(second_nanos, 1_000_000_000));
    formatted.push('s');
    formatted
}

/// `value / unit` を末尾の 0 を除いた小数表記にする（`unit` は 10 の累乗）
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
