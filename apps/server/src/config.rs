//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! - すべての項目にデフォルト値を持ち、読み込みは失敗しない
//! - 環境変数が未設定・空文字の場合はデフォルト値を使う
//! - 数値・真偽値・列挙値のパースに失敗した場合もデフォルト値を使い、
//!   その旨を [`ConfigWarning`] として記録する（トレーシング初期化後に出力する）
//! - `.env` ファイルの読み込みは `main` で行う（実環境変数が優先される）
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `PORT` | `8080` | 待ち受けポート |
//! | `GIN_MODE` | `debug` | 動作モード（debug/release/test） |
//! | `HOST` | `localhost` | 起動ログに表示するホスト名 |
//! | `BASE_PATH` | `/api/v1` | API グループのベースパス |
//! | `DB_HOST` | `localhost` | PostgreSQL ホスト |
//! | `DB_PORT` | `5432` | PostgreSQL ポート |
//! | `DB_USER` | `postgres` | PostgreSQL ユーザー |
//! | `DB_PASSWORD` | `password` | PostgreSQL パスワード |
//! | `DB_NAME` | `tomato_clock` | データベース名 |
//! | `DB_SSLMODE` | `disable` | SSL モード |
//! | `DB_TIMEZONE` | `UTC` | タイムゾーン |
//! | `REDIS_HOST` | `localhost` | Redis ホスト |
//! | `REDIS_PORT` | `6379` | Redis ポート |
//! | `REDIS_PASSWORD` | (空) | Redis パスワード |
//! | `REDIS_DB` | `0` | Redis 論理 DB 番号 |
//! | `SESSION_SECRET` | `tomato-clock-secret-key` | セッション署名鍵 |
//! | `SESSION_TIMEOUT` | `7200` | セッション有効期間（秒） |
//! | `SESSION_COOKIE_NAME` | `session_id` | Cookie 名 |
//! | `SESSION_COOKIE_SECURE` | `false` | Secure 属性 |
//! | `SESSION_COOKIE_HTTPONLY` | `true` | HttpOnly 属性 |
//! | `LOG_LEVEL` | `debug` | ログレベル（trace/debug/info/warn/error/off） |
//! | `LOG_FORMAT` | `text` | ログ形式（text/json） |
//! | `LOG_OUTPUT` | `stdout` | ログ出力先（stdout/stderr） |
//!
//! データベース・Redis・セッションの設定は将来のルート用に予約されている。

use std::{env, fmt, str::FromStr};

use tomato_clock_shared::observability::{LogFormat, LogOutput};
use tracing::level_filters::LevelFilter;

/// 動作モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Debug,
    Release,
    Test,
}

impl RunMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debug" => Some(Self::Debug),
            "release" => Some(Self::Release),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port:      u16,
    pub mode:      RunMode,
    pub host:      String,
    /// API グループのベースパス（例: `/api/v1`）
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port:      8080,
            mode:      RunMode::Debug,
            host:      "localhost".to_string(),
            base_path: "/api/v1".to_string(),
        }
    }
}

/// データベース接続設定（予約）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host:     String,
    pub port:     u16,
    pub user:     String,
    pub password: String,
    pub name:     String,
    pub ssl_mode: String,
    pub timezone: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host:     "localhost".to_string(),
            port:     5432,
            user:     "postgres".to_string(),
            password: "password".to_string(),
            name:     "tomato_clock".to_string(),
            ssl_mode: "disable".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

/// Redis 接続設定（予約）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host:     String,
    pub port:     u16,
    pub password: String,
    /// 論理 DB 番号
    pub db:       i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host:     "localhost".to_string(),
            port:     6379,
            password: String::new(),
            db:       0,
        }
    }
}

/// セッション設定（予約）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub secret:       String,
    pub timeout_secs: u64,
    pub cookie_name:  String,
    pub secure:       bool,
    pub http_only:    bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret:       "tomato-clock-secret-key".to_string(),
            timeout_secs: 7200,
            cookie_name:  "session_id".to_string(),
            secure:       false,
            http_only:    true,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level:  String,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level:  "debug".to_string(),
            format: LogFormat::Text,
            output: LogOutput::Stdout,
        }
    }
}

/// 不正な値のためデフォルト値にフォールバックした設定項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key:   &'static str,
    pub value: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?} is invalid, using default", self.key, self.value)
    }
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、以降は読み取り専用で共有する。
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server:   ServerConfig,
    pub database: DatabaseConfig,
    pub redis:    RedisConfig,
    pub session:  SessionConfig,
    pub log:      LogConfig,
    warnings:     Vec<ConfigWarning>,
}

impl AppConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` はキーに対応する値を返す。テストでは環境変数を書き換えずに
    /// `HashMap` などを渡す。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resolver = Resolver::new(lookup);
        let defaults = Self::default();

        let server = ServerConfig {
            port:      resolver.parsed("PORT", defaults.server.port),
            mode:      resolver.choice("GIN_MODE", defaults.server.mode, RunMode::parse),
            host:      resolver.string("HOST", &defaults.server.host),
            base_path: resolver.string("BASE_PATH", &defaults.server.base_path),
        };

        let database = DatabaseConfig {
            host:     resolver.string("DB_HOST", &defaults.database.host),
            port:     resolver.parsed("DB_PORT", defaults.database.port),
            user:     resolver.string("DB_USER", &defaults.database.user),
            password: resolver.string("DB_PASSWORD", &defaults.database.password),
            name:     resolver.string("DB_NAME", &defaults.database.name),
            ssl_mode: resolver.string("DB_SSLMODE", &defaults.database.ssl_mode),
            timezone: resolver.string("DB_TIMEZONE", &defaults.database.timezone),
        };

        let redis = RedisConfig {
            host:     resolver.string("REDIS_HOST", &defaults.redis.host),
            port:     resolver.parsed("REDIS_PORT", defaults.redis.port),
            password: resolver.string("REDIS_PASSWORD", &defaults.redis.password),
            db:       resolver.parsed("REDIS_DB", defaults.redis.db),
        };

        let session = SessionConfig {
            secret:       resolver.string("SESSION_SECRET", &defaults.session.secret),
            timeout_secs: resolver.parsed("SESSION_TIMEOUT", defaults.session.timeout_secs),
            cookie_name:  resolver.string("SESSION_COOKIE_NAME", &defaults.session.cookie_name),
            secure:       resolver.flag("SESSION_COOKIE_SECURE", defaults.session.secure),
            http_only:    resolver.flag("SESSION_COOKIE_HTTPONLY", defaults.session.http_only),
        };

        let log = LogConfig {
            level:  resolver.choice("LOG_LEVEL", defaults.log.level.clone(), parse_log_level),
            format: resolver.choice("LOG_FORMAT", defaults.log.format, LogFormat::parse),
            output: resolver.choice("LOG_OUTPUT", defaults.log.output, LogOutput::parse),
        };

        Self {
            server,
            database,
            redis,
            session,
            log,
            warnings: resolver.warnings,
        }
    }

    /// デフォルト値にフォールバックした項目
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// PostgreSQL の接続文字列（key=value 形式）
    pub fn database_dsn(&self) -> String {
        let db = &self.database;
        format!(
            "host={} user={} password={} dbname={} port={} sslmode={} TimeZone={}",
            db.host, db.user, db.password, db.name, db.port, db.ssl_mode, db.timezone
        )
    }

    /// Redis のアドレス（`host:port`）
    pub fn redis_addr(&self) -> String {
        format!("{}:{}", self.redis.host, self.redis.port)
    }
}

/// 設定値の解決処理
///
/// 各項目の解決は独立しており、1 項目の失敗が他の項目に影響しない。
struct Resolver<F> {
    lookup:   F,
    warnings: Vec<ConfigWarning>,
}

impl<F> Resolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            warnings: Vec::new(),
        }
    }

    /// 空文字は未設定として扱う
    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&mut self, key: &'static str, default: T) -> T {
        self.choice(key, default, |value| value.parse().ok())
    }

    fn flag(&mut self, key: &'static str, default: bool) -> bool {
        self.choice(key, default, parse_bool)
    }

    fn choice<T>(&mut self, key: &'static str, default: T, parse: impl Fn(&str) -> Option<T>) -> T {
        let Some(value) = self.raw(key) else {
            return default;
        };

        match parse(&value) {
            Some(parsed) => parsed,
            None => {
                self.warnings.push(ConfigWarning { key, value });
                default
            }
        }
    }
}

/// ログレベルをパースする
///
/// `trace` / `debug` / `info` / `warn` / `error` / `off` を大文字小文字を区別せずに受け付け、
/// 小文字に正規化する。フィルタディレクティブとして解釈できない値は `None`。
fn parse_log_level(value: &str) -> Option<String> {
    let level = value.to_ascii_lowercase();
    LevelFilter::from_str(&level).ok()?;
    Some(level)
}

/// 真偽値をパースする
///
/// `1 t T TRUE true True` を真、`0 f F FALSE false False` を偽とする。
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// テスト間で環境変数の競合を避けるため、HashMap を参照元にする
    fn load_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_未設定の場合はすべてデフォルト値になる() {
        let config = load_from(&[]);

        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.mode, RunMode::Debug);
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.base_path, "/api/v1");
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.redis.db, 0);
        assert_eq!(config.redis.password, "");
        assert_eq!(config.session.timeout_secs, 7200);
        assert!(!config.session.secure);
        assert!(config.session.http_only);
        assert_eq!(config.log, LogConfig::default());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_設定された値で上書きされる() {
        let config = load_from(&[
            ("PORT", "9000"),
            ("GIN_MODE", "release"),
            ("HOST", "example.com"),
            ("BASE_PATH", "/api/v2"),
            ("DB_HOST", "db"),
            ("DB_PORT", "15432"),
            ("REDIS_DB", "3"),
            ("SESSION_TIMEOUT", "60"),
            ("SESSION_COOKIE_SECURE", "true"),
            ("SESSION_COOKIE_HTTPONLY", "0"),
            ("LOG_LEVEL", "warn"),
            ("LOG_FORMAT", "json"),
            ("LOG_OUTPUT", "stderr"),
        ]);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.mode, RunMode::Release);
        assert_eq!(config.server.host, "example.com");
        assert_eq!(config.server.base_path, "/api/v2");
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 15432);
        assert_eq!(config.redis.db, 3);
        assert_eq!(config.session.timeout_secs, 60);
        assert!(config.session.secure);
        assert!(!config.session.http_only);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.output, LogOutput::Stderr);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_空文字は未設定として扱う() {
        let config = load_from(&[("HOST", ""), ("PORT", ""), ("SESSION_COOKIE_HTTPONLY", "")]);

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        assert!(config.session.http_only);
        assert!(config.warnings().is_empty());
    }

    #[rstest]
    #[case("PORT", "abc")]
    #[case("PORT", "70000")]
    #[case("DB_PORT", "-1")]
    #[case("REDIS_DB", "zero")]
    #[case("SESSION_TIMEOUT", "2h")]
    #[case("SESSION_COOKIE_SECURE", "yes")]
    #[case("SESSION_COOKIE_HTTPONLY", "on")]
    #[case("GIN_MODE", "production")]
    #[case("LOG_FORMAT", "pretty")]
    #[case("LOG_OUTPUT", "file")]
    #[case("LOG_LEVEL", "verbose")]
    #[case("LOG_LEVEL", "info,debug")]
    fn test_不正な値はデフォルト値にフォールバックし警告を記録する(
        #[case] key: &str,
        #[case] value: &str,
    ) {
        let config = load_from(&[(key, value)]);
        let defaults = AppConfig::default();

        assert_eq!(config.server, defaults.server);
        assert_eq!(config.database, defaults.database);
        assert_eq!(config.redis, defaults.redis);
        assert_eq!(config.session, defaults.session);
        assert_eq!(config.log, defaults.log);
        assert_eq!(config.warnings().len(), 1);
        assert_eq!(config.warnings()[0].key, key);
        assert_eq!(config.warnings()[0].value, value);
    }

    #[test]
    fn test_不正な値があっても他の項目は解決される() {
        let config = load_from(&[("PORT", "not-a-port"), ("HOST", "api.local"), ("REDIS_DB", "5")]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "api.local");
        assert_eq!(config.redis.db, 5);
        assert_eq!(config.warnings().len(), 1);
        assert_eq!(
            config.warnings()[0].to_string(),
            r#"PORT="not-a-port" is invalid, using default"#
        );
    }

    #[test]
    fn test_負のredis_db番号はそのまま受け入れる() {
        let config = load_from(&[("REDIS_DB", "-2")]);

        assert_eq!(config.redis.db, -2);
    }

    #[rstest]
    #[case("debug", Some("debug"))]
    #[case("WARN", Some("warn"))]
    #[case("Error", Some("error"))]
    #[case("off", Some("off"))]
    #[case("verbose", None)]
    #[case("info,debug", None)]
    fn test_parse_log_level(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_log_level(input).as_deref(), expected);
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case("t", Some(true))]
    #[case("T", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("true", Some(true))]
    #[case("True", Some(true))]
    #[case("0", Some(false))]
    #[case("f", Some(false))]
    #[case("F", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("false", Some(false))]
    #[case("False", Some(false))]
    #[case("tRuE", None)]
    #[case("yes", None)]
    fn test_parse_bool(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(input), expected);
    }

    #[test]
    fn test_database_dsnの書式() {
        let config = load_from(&[("DB_PASSWORD", "secret"), ("DB_TIMEZONE", "Asia/Tokyo")]);

        assert_eq!(
            config.database_dsn(),
            "host=localhost user=postgres password=secret dbname=tomato_clock port=5432 \
             sslmode=disable TimeZone=Asia/Tokyo"
        );
    }

    #[test]
    fn test_redis_addrの書式() {
        let config = load_from(&[("REDIS_HOST", "cache"), ("REDIS_PORT", "6380")]);

        assert_eq!(config.redis_addr(), "cache:6380");
    }

    #[test]
    fn test_loadはプロセス環境に関わらず失敗しない() {
        let config = AppConfig::load();

        assert!(!config.server.base_path.is_empty());
        assert!(!config.log.level.is_empty());
    }
}
