/// SERIAL 主キーをラップする ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i32` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `from_i32()`: DB から取得した値から復元
/// - `as_i32()`: 内部値の取得
///
/// JSON 上は数値そのもの（`#[serde(transparent)]`）として表現される。
///
/// # 使用例
///
/// ```rust
/// use staffdesk_domain::group::GroupId;
///
/// let id = GroupId::from_i32(3);
/// assert_eq!(id.as_i32(), 3);
/// assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(3));
/// ```
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(i32);

        impl $Name {
            /// 既存の値から ID を作成する
            pub fn from_i32(value: i32) -> Self {
                Self(value)
            }

            /// 内部の値を取得する
            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $Name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }
    };
}
