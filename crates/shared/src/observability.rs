//! # ログとリクエスト追跡
//!
//! 3 サービス共通のトレーシング初期化と、axum のレイヤーに渡す部品。
//!
//! | 環境変数 | 既定値 | 内容 |
//! |----------|--------|------|
//! | `RUST_LOG` | `info,staffdesk=debug` | レベルフィルタ |
//! | `LOG_FORMAT` | `pretty` | `json` なら 1 行 1 イベントの JSON |

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,staffdesk=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 知らない値は `Err` に元の文字列を入れて返す。呼び出し側は Pretty で続行してよい。
    pub fn from_value(value: &str) -> Result<Self, String> {
        match value.trim() {
            "json" => Ok(Self::Json),
            "pretty" | "" => Ok(Self::Pretty),
            other => Err(other.to_string()),
        }
    }
}

/// トレーシング初期化の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// 起動ログに出すサービス名
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `LOG_FORMAT` が解釈できなかったときの値
    pub unknown_format: Option<String>,
}

impl TracingConfig {
    /// 環境変数から読み込む
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let (log_format, unknown_format) = match lookup("LOG_FORMAT") {
            None => (LogFormat::default(), None),
            Some(raw) => match LogFormat::from_value(&raw) {
                Ok(format) => (format, None),
                Err(unknown) => (LogFormat::Pretty, Some(unknown)),
            },
        };

        Self {
            service_name: service_name.into(),
            log_format,
            unknown_format,
        }
    }
}

/// グローバルな subscriber を登録する
///
/// `tracing_error::ErrorLayer` も積むので、`InfraError` の `SpanTrace` に
/// ハンドラからリポジトリまでのスパンが残る。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let output = if config.log_format == LogFormat::Json {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();

    if let Some(unknown) = &config.unknown_format {
        tracing::warn!(log_format = %unknown, "LOG_FORMAT を解釈できないため pretty で出力します");
    }
    tracing::debug!(
        service = %config.service_name,
        format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

/// `X-Request-Id` の採番（UUID v7）
///
/// クライアントが送ってきた `X-Request-Id` があれば `SetRequestIdLayer` はそちらを使う。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        http::HeaderValue::from_str(&uuid::Uuid::now_v7().to_string())
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer` 用のリクエストスパン
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
