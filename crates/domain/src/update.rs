//! # 部分更新
//!
//! PUT リクエストで指定されたフィールドだけを書き換えるための表現。
//!
//! 更新可能なカラムは各エンティティの更新スキーマ（[`crate::task::TaskUpdate`],
//! [`crate::employee::EmployeeUpdate`]）が固定の許可リストとして持つ。
//! インフラ層は [`Assignment`] の列から SET 句を組み立てるだけで、
//! カラム名をリクエストから受け取ることはない。

/// SET 句に書き込む値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// テキストカラム（`None` は NULL）
    Text(Option<String>),
    /// 整数カラム（`None` は NULL）
    Integer(Option<i32>),
    /// サーバー側の現在時刻（`CURRENT_TIMESTAMP`）
    CurrentTimestamp,
}

/// SET 句の 1 項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// カラム名（許可リスト由来の静的文字列）
    pub column: &'static str,
    /// 書き込む値
    pub value:  ColumnValue,
}

impl Assignment {
    pub fn text(column: &'static str, value: Option<String>) -> Self {
        Self {
            column,
            value: ColumnValue::Text(value),
        }
    }

    pub fn integer(column: &'static str, value: Option<i32>) -> Self {
        Self {
            column,
            value: ColumnValue::Integer(value),
        }
    }

    pub fn current_timestamp(column: &'static str) -> Self {
        Self {
            column,
            value: ColumnValue::CurrentTimestamp,
        }
    }
}
