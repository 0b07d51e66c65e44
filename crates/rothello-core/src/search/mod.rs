//! 探索モジュール
//!
//! 終盤局面の厳密ミニマックス値を計算する2つのエンジンを提供する。
//!
//! - `solve_recursive`: 素朴な再帰 alpha-beta。ordering も置換表も使わない
//!   検算用リファレンス実装。
//! - `EndgameSolver`: 本番エンジン。明示スタック（固定容量の
//!   フレームアリーナ）上で動く状態機械として alpha-beta を実行し、
//!   fewest-replies-first の手順並べ替え・置換表・null window 探索
//!   （fail-soft PVS）を組み合わせる。
//!
//! どちらも決定的な純関数で、同じ入力には必ず同じ値を返す。エラー状態は
//! 存在せず、前提条件違反（`alpha >= beta` 等）は assert で落とす。

mod driver;
mod frame;
mod recursive;


pub use driver::EndgameSolver;
pub use recursive::solve_recursive;

/// 探索チューニングパラメータ
///
/// 閾値はどちらも経験的な調整値であり、正しさには影響しない
/// （リファレンス実装との一致で検証する）。
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// この石数以上の局面では置換表を使わない
    /// （浅い終盤のキャッシュ利得は表の汚染に見合わない）
    pub use_table_threshold: u32,
    /// この石数以上の局面では null window 探索を無効化する
    /// （浅い部分木では簿記コストの方が高い）
    pub null_window_threshold: u32,
    /// フレームアリーナの容量
    ///
    /// 最悪ケースは根 + 着手60手 + 各手に挟まるパスフレームで高々122段
    /// （連続パスは即終局するのでパスは着手間に1つまで）。既定値は
    /// これを覆う128。
    pub stack_capacity: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            use_table_threshold: 56,
            null_window_threshold: 54,
            stack_capacity: 128,
        }
    }
}
