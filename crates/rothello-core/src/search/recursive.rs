//! 再帰リファレンスエンジン
//!
//! 空きマスをビット順に走査するだけの素朴な fail-soft alpha-beta。
//! 並べ替えなし・置換表なし・ネイティブ再帰（深さは高々60+パスで
//! スタック的に安全）。`EndgameSolver` の検算オラクルとして使う。

use crate::bitboard::flip;
use crate::board::Board;
use crate::types::{Square, Value};

/// 局面の厳密ミニマックス値を再帰探索で求める
///
/// # Panics
/// `alpha >= beta`、またはマスクが重なっている場合（前提条件違反）。
pub fn solve_recursive(board: Board, alpha: Value, beta: Value) -> Value {
    assert!(alpha < beta, "degenerate search window: {alpha} >= {beta}");
    assert!(board.me & board.op == 0, "overlapping occupancy masks");
    alpha_beta(board, alpha, beta, false)
}

fn alpha_beta(board: Board, alpha: Value, beta: Value, passed_prev: bool) -> Value {
    let mut alpha = alpha;
    let mut result = Value::MIN;
    let mut moved = false;
    let mut bits = board.empty();
    while bits != 0 {
        let bit = bits & bits.wrapping_neg();
        bits &= bits - 1;
        let sq = Square::from_bit(bit);
        let flips = flip(board.me, board.op, sq);
        if flips != 0 {
            moved = true;
            result = result.max(-alpha_beta(board.apply(flips, sq), -beta, -alpha, false));
            if result >= beta {
                return result;
            }
            alpha = alpha.max(result);
        }
    }
    if !moved {
        if passed_prev {
            // 両者パス: 終局
            return board.final_score();
        }
        result = -alpha_beta(board.pass(), -beta, -alpha, true);
    }
    result
}
