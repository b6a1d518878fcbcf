//! # Observability 基盤
//!
//! トレーシング初期化、リクエストスパン、Request ID 生成を提供する。
//!
//! ログ設定（`LOG_LEVEL` / `LOG_FORMAT` / `LOG_OUTPUT`）はサーバーの設定読み込みで
//! 解決され、[`TracingConfig`] として渡される。

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Text,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 未知の値は `None` を返す。フォールバックは呼び出し元が決める。
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

/// ログ出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
}

impl LogOutput {
    /// 文字列から出力先をパースする
    ///
    /// 未知の値は `None` を返す。
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（呼び出し元の `app` スパンに付与する）
    pub service_name: String,
    /// `RUST_LOG` 未設定時に使うログレベル（例: `debug`）
    pub level:        String,
    pub log_format:   LogFormat,
    pub log_output:   LogOutput,
}

impl TracingConfig {
    pub fn new(
        service_name: impl Into<String>,
        level: impl Into<String>,
        log_format: LogFormat,
        log_output: LogOutput,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            level: level.into(),
            log_format,
            log_output,
        }
    }

    /// `RUST_LOG` 未設定時のフィルタディレクティブ
    ///
    /// 自クレートと tower-http は設定レベル、それ以外は `info` とする。
    pub fn default_directive(&self) -> String {
        format!(
            "info,tomato_clock={level},tower_http={level}",
            level = self.level
        )
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数が設定されていればそれを優先する。
/// 設定レベルが不正でディレクティブを組み立てられない場合は `info` にする。
///
/// JSON モードでは `timestamp`, `level`, `target`, `message` がトップレベルに出力される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt::writer::BoxMakeWriter,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match config.log_output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// HTTP リクエストごとのスパンを作成する
///
/// `TraceLayer::make_span_with` に渡す。`x-request-id` ヘッダーの値を
/// `request_id` フィールドとして記録し、スパン内のすべてのログに含める。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// UUID v7 で Request ID を生成する
///
/// 時刻順にソート可能なため、ログの突き合わせに使いやすい。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", Some(LogFormat::Json))]
    #[case("text", Some(LogFormat::Text))]
    #[case("JSON", None)]
    #[case("pretty", None)]
    #[case("", None)]
    fn test_log_format_parse(#[case] input: &str, #[case] expected: Option<LogFormat>) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[rstest]
    #[case("stdout", Some(LogOutput::Stdout))]
    #[case("stderr", Some(LogOutput::Stderr))]
    #[case("file", None)]
    fn test_log_output_parse(#[case] input: &str, #[case] expected: Option<LogOutput>) {
        assert_eq!(LogOutput::parse(input), expected);
    }

    #[test]
    fn test_デフォルトはtextとstdout() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
        assert_eq!(LogOutput::default(), LogOutput::Stdout);
    }

    #[test]
    fn test_default_directiveに設定レベルが反映される() {
        let config = TracingConfig::new("server", "warn", LogFormat::Json, LogOutput::Stdout);

        assert_eq!(
            config.default_directive(),
            "info,tomato_clock=warn,tower_http=warn"
        );
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_make_request_uuid_v7がuuid_v7を生成する() {
        use tower_http::request_id::MakeRequestId;

        let request = http::Request::builder().uri("/health").body(()).unwrap();
        let request_id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let value = request_id.header_value().to_str().unwrap();
        let uuid = uuid::Uuid::parse_str(value).unwrap();
        assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
    }
}
