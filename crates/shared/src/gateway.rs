//! # ゲートウェイ契約
//!
//! 各ハンドラが受け取るイベントと返すレスポンスの形を定義する。
//!
//! ```text
//! 入力: { httpMethod, queryStringParameters?, body? }
//! 出力: { statusCode, headers, body, isBase64Encoded? }
//! ```
//!
//! ハンドラはこの型だけを扱い、HTTP サーバーの詳細を知らない。
//! axum サーバーとの変換は `http` feature の [`GatewayEvent::from_http_parts`] と
//! [`GatewayResponse::into_http`] が担う。
//!
//! JSON レスポンスは必ず `Content-Type: application/json` と
//! `Access-Control-Allow-Origin: *` を持つ。

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::ErrorResponse;

/// プリフライト応答のキャッシュ秒数
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// ゲートウェイから渡されるイベント
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub http_method:             Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body:                    Option<String>,
}

impl GatewayEvent {
    /// メソッドを指定してイベントを作る
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            ..Self::default()
        }
    }

    /// クエリパラメータを追加する
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// ボディを設定する
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// HTTP メソッド（大文字）。未指定なら `default` を使う
    pub fn method_or(&self, default: &str) -> String {
        self.http_method
            .as_deref()
            .unwrap_or(default)
            .to_ascii_uppercase()
    }

    /// クエリパラメータを取得する
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// ボディ文字列。未指定または空なら `{}` として扱う
    pub fn body_or_empty_object(&self) -> &str {
        match self.body.as_deref() {
            None | Some("") => "{}",
            Some(body) => body,
        }
    }
}

/// CORS プリフライトで返す許可内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

/// ハンドラが返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code:       u16,
    pub headers:           BTreeMap<String, String>,
    pub body:              String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_base64_encoded: Option<bool>,
}

impl GatewayResponse {
    /// JSON レスポンスを作る
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        let (status_code, body) = match serde_json::to_string(payload) {
            Ok(body) => (status_code, body),
            // 自前の Serialize 型しか渡さないため通常は到達しない
            Err(_) => {
                let message = ErrorResponse::internal_error().error;
                (500, format!(r#"{{"error":"{message}"}}"#))
            }
        };

        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);

        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: None,
        }
    }

    /// `{ "error": ... }` のレスポンスを作る
    pub fn error(status_code: u16, error: &ErrorResponse) -> Self {
        Self::json(status_code, error)
    }

    /// CORS プリフライト応答（200、空ボディ）
    pub fn preflight(policy: &CorsPolicy) -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                policy.allow_methods.to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                policy.allow_headers.to_string(),
            ),
            (
                "Access-Control-Max-Age".to_string(),
                PREFLIGHT_MAX_AGE.to_string(),
            ),
        ]);

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: None,
        }
    }

    /// `isBase64Encoded: false` を明示する
    pub fn not_base64(mut self) -> Self {
        self.is_base64_encoded = Some(false);
        self
    }

    /// ヘッダーを取得する
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(feature = "http")]
mod http_conversion {
    use std::collections::HashMap;

    use http::{HeaderName, HeaderValue, Method, Response, StatusCode};

    use super::{GatewayEvent, GatewayResponse};

    impl GatewayEvent {
        /// HTTP リクエストの構成要素からイベントを作る
        ///
        /// クエリが空なら `queryStringParameters` は `None`、
        /// ボディが空なら `body` は `None` になる。
        pub fn from_http_parts(
            method: &Method,
            query: HashMap<String, String>,
            body: String,
        ) -> Self {
            Self {
                http_method:             Some(method.as_str().to_string()),
                query_string_parameters: (!query.is_empty()).then_some(query),
                body:                    (!body.is_empty()).then_some(body),
            }
        }
    }

    impl GatewayResponse {
        /// HTTP レスポンスに変換する
        ///
        /// 不正なステータスコードは 500、不正なヘッダーは読み飛ばす。
        pub fn into_http(self) -> Response<String> {
            let mut response = Response::new(self.body);
            *response.status_mut() =
                StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            for (name, value) in self.headers {
                if let (Ok(name), Ok(value)) = (
                    HeaderName::from_bytes(name.as_bytes()),
                    HeaderValue::from_str(&value),
                ) {
                    response.headers_mut().insert(name, value);
                }
            }

            response
        }
    }
}


#[cfg(all(test, feature = "http"))]
mod http_tests {
    use std::collections::HashMap;

    use http::{Method, StatusCode};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_http_partsから空のクエリとボディはnoneになる() {
        let event = GatewayEvent::from_http_parts(&Method::OPTIONS, HashMap::new(), String::new());

        assert_eq!(event, GatewayEvent::new("OPTIONS"));
    }

    #[test]
    fn test_into_httpでステータスとヘッダーを引き継ぐ() {
        let response = GatewayResponse::json(422, &ErrorResponse::new("email: email")).into_http();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.body(), r#"{"error":"email: email"}"#);
    }
}
