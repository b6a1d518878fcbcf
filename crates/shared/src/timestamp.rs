//! # タイムスタンプ
//!
//! レスポンスに埋め込むタイムスタンプの書式を一箇所に集約する。

use chrono::{DateTime, SecondsFormat, Utc};

/// 現在時刻を RFC 3339（秒精度、UTC の `Z` 表記）で返す
///
/// 例: `2024-05-01T09:30:00Z`
pub fn now_rfc3339() -> String {
    format_rfc3339(Utc::now())
}

/// 指定時刻を RFC 3339（秒精度、UTC の `Z` 表記）で返す
pub fn format_rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_rfc3339が秒精度のz表記になる() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        assert_eq!(format_rfc3339(at), "2024-05-01T09:30:00Z");
    }

    #[test]
    fn test_now_rfc3339がパース可能な文字列を返す() {
        let now = now_rfc3339();

        assert!(DateTime::parse_from_rfc3339(&now).is_ok(), "{now}");
    }
}
