//! 基本型モジュール
//!
//! - `Square`: 升目（0-63、段優先）
//! - `Value`: 石差スコア（[-64, 64]）

mod square;
mod value;

pub use square::Square;
pub use value::Value;
