//! # インフラ層エラー
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）に加えて、生成時点の [`SpanTrace`] を持つ。
//! ハンドラは 500 を返す前にこのトレースをログに出し、どのリポジトリ呼び出しで
//! 失敗したかを追えるようにする。

use std::fmt;

use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Error)]
#[error("{kind}")]
pub struct InfraError {
    #[source]
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQL の実行失敗、接続失敗、制約違反
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しない状態（モックの故障注入や、起こりえない行の欠落など）
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::Unexpected(msg.into()))
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 違反した制約名（FK・CHECK・NOT NULL など）
    pub fn violated_constraint(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::Database(sqlx::Error::Database(e)) => e.constraint(),
            _ => None,
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SpanTrace の Debug は長いので Display で出す
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &format_args!("{}", self.span_trace))
            .finish()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::new(InfraErrorKind::Database(source))
    }
}
