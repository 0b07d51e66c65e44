//! # rothello-core
//!
//! オセロ終盤の厳密解（ミニマックス値）を大量局面に対して計算するコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Square, Value）
//! - `bitboard`: ビットボード演算（flip, mobility, final_score）
//! - `board`: 局面表現（me/op の64bitマスク対）
//! - `movegen`: 合法手列挙（MobilityGenerator, MoveList）
//! - `tt`: 置換表（CRC-64キー、証明済み上下界の区間を格納）
//! - `search`: 探索（再帰リファレンス実装と明示スタック版 PVS）
//! - `batch`: バッチ並列ソルバと逐次検算
//! - `random`: 乱数プレイアウトによる終盤局面生成
//!

// 基本型
pub mod types;

// 盤面表現
pub mod bitboard;
pub mod board;

// 合法手列挙
pub mod movegen;

// 置換表
pub mod tt;

// 探索
pub mod search;

// バッチ並列化
pub mod batch;

// 局面生成（テスト・CLI用）
pub mod random;

pub use batch::{solve_batch, verify_batch, BatchOptions, Problem, ProblemError};
pub use board::Board;
pub use search::{solve_recursive, EndgameSolver, SearchParams};
pub use types::{Square, Value};
