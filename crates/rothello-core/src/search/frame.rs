//! 探索フレーム
//!
//! 明示スタックエンジンの1段分の状態。生成時に合法手を列挙して
//! 「着手後の相手の着手可能数」昇順に並べ替え、子の生成時には
//! 置換表の証明済み区間で窓を狭める。

use crate::bitboard::{flip, mobility_count};
use crate::board::Board;
use crate::movegen::{MobilityGenerator, MoveList};
use crate::tt::Table;
use crate::types::{Square, Value};

use super::SearchParams;

/// 直近に積んだ子フレームの種別
///
/// null window 探索の進行をフレーム上の状態として明示する。
/// `Research` の結果は常にそのまま受理されるため、同じ手の再々探索は
/// 表現できない（退化した再探索はここで構造的に終端する）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChildKind {
    /// 全幅窓で探索中
    Full,
    /// null window で「floor より良いか」を検査中
    Probe { floor: Value, sq: Square },
    /// probe が fail-high した手の全幅再探索中
    Research,
}

/// 探索スタックの1段
///
/// `alpha` はフレーム生成時の窓下端のまま動かさない。走査中の実効下端は
/// `floor() = max(alpha, result)` で都度計算する（fail-soft）。
#[derive(Debug, Clone, Copy)]
pub(super) struct Frame {
    pub board: Board,
    pub alpha: Value,
    pub beta: Value,
    /// これまでに確定した最善値（初期値 -64）
    pub result: Value,
    pub moves: MoveList,
    pub cursor: usize,
    /// 直前の手がパスだったか（連続パス=終局の検出用）
    pub prev_passed: bool,
    /// 置換表の区間だけで決着したフレーム
    pub cut: bool,
    pub pending: ChildKind,
}

impl Frame {
    /// 合法手を列挙・並べ替えてフレームを構築する
    pub fn new(board: Board, alpha: Value, beta: Value, prev_passed: bool) -> Frame {
        debug_assert!(board.me & board.op == 0, "overlapping occupancy masks");
        let mut moves = MoveList::new();
        let mut mg = MobilityGenerator::new(board);
        while !mg.completed() {
            let bit = mg.next_bit();
            let sq = Square::from_bit(bit);
            let flips = flip(board.me, board.op, sq);
            if flips != 0 {
                let child = board.apply(flips, sq);
                moves.push(sq, mobility_count(child.me, child.op) as i8);
            }
        }
        moves.sort_by_score();
        Frame {
            board,
            alpha,
            beta,
            result: Value::MIN,
            moves,
            cursor: 0,
            prev_passed,
            cut: false,
            pending: ChildKind::Full,
        }
    }

    /// 置換表の区間だけで決着したフレーム（手の列挙は不要）
    fn cut_off(board: Board, alpha: Value, beta: Value, prev_passed: bool, result: Value) -> Frame {
        Frame {
            board,
            alpha,
            beta,
            result,
            moves: MoveList::new(),
            cursor: 0,
            prev_passed,
            cut: true,
            pending: ChildKind::Full,
        }
    }

    /// 子フレームを生成する
    ///
    /// 子局面の石数が閾値未満なら置換表を引き、証明済み区間と希望窓を
    /// 交差させる。交差が空なら探索不要: 希望窓の下端が既に上界を
    /// 支配していれば上界を、そうでなければ下界を結果として `cut` を立てる
    /// （fail-soft規約で親がそのまま折り込める値になる）。
    pub fn child(
        board: Board,
        want_alpha: Value,
        want_beta: Value,
        prev_passed: bool,
        table: &Table,
        params: &SearchParams,
    ) -> Frame {
        if board.stones() >= params.use_table_threshold {
            return Frame::new(board, want_alpha, want_beta, prev_passed);
        }
        match table.get(board) {
            Some(bounds) => {
                let alpha = want_alpha.max(bounds.lower);
                let beta = want_beta.min(bounds.upper);
                if alpha >= beta {
                    let result = if want_alpha >= bounds.upper {
                        bounds.upper
                    } else {
                        bounds.lower
                    };
                    Frame::cut_off(board, alpha, beta, prev_passed, result)
                } else {
                    Frame::new(board, alpha, beta, prev_passed)
                }
            }
            None => Frame::new(board, want_alpha, want_beta, prev_passed),
        }
    }

    /// 実効的な窓下端
    #[inline]
    pub fn floor(&self) -> Value {
        self.alpha.max(self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_orders_moves_by_opponent_mobility() {
        let frame = Frame::new(Board::INITIAL, Value::MIN, Value::MAX, false);
        assert_eq!(frame.moves.len(), 4);
        let scores: Vec<i8> = frame.moves.as_slice().iter().map(|m| m.score).collect();
        let mut sorted = scores.clone();
        sorted.sort();
        assert_eq!(scores, sorted);
    }

    #[test]
    fn test_child_cut_by_table_bounds() {
        let params = SearchParams::default();
        let mut table = Table::new(64);
        let board = Board::INITIAL;
        // 真値 >= 10 が証明済みの局面に上端 10 の窓で来れば探索不要
        table.update(board, Value::new(-20), Value::new(10), Value::new(10));
        let frame = Frame::child(board, Value::new(-5), Value::new(10), false, &table, &params);
        assert!(frame.cut);
        assert_eq!(frame.result, Value::new(10));
    }

    #[test]
    fn test_child_tightens_window() {
        let params = SearchParams::default();
        let mut table = Table::new(64);
        let board = Board::INITIAL;
        table.update(board, Value::new(-20), Value::new(10), Value::new(10));
        let frame = Frame::child(board, Value::new(-30), Value::new(30), false, &table, &params);
        assert!(!frame.cut);
        assert_eq!(frame.alpha, Value::new(10));
        assert_eq!(frame.beta, Value::new(30));
    }

    #[test]
    fn test_child_skips_table_when_nearly_full() {
        let params = SearchParams::default();
        let mut table = Table::new(64);
        // 58石の局面は表を引かない
        let me = (1u64 << 30) - 1;
        let op = ((1u64 << 58) - 1) ^ me;
        let board = Board::new(me, op);
        table.update(board, Value::new(-20), Value::new(20), Value::new(0));
        let frame = Frame::child(board, Value::new(-64), Value::new(-30), false, &table, &params);
        // 表が引かれていれば exact 0 で cut しているはず
        assert!(!frame.cut);
    }
}
