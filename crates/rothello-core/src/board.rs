//! 局面表現（Board）
//!
//! 手番側・相手側の占有マスク対。手番視点の相対表現なので、着手やパスの
//! たびに2つのマスクが役割ごと入れ替わる。

use crate::bitboard::{final_score, popcount, stones_count};
use crate::types::{Square, Value};

/// 局面
///
/// 不変条件: `me & op == 0`。どちらのマスクにも無いマスが空きマス。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// 手番側の占有マスク
    pub me: u64,
    /// 相手側の占有マスク
    pub op: u64,
}

impl Board {
    /// 標準初期配置（黒番視点）
    pub const INITIAL: Board = Board {
        me: (1 << 28) | (1 << 35),
        op: (1 << 27) | (1 << 36),
    };

    /// マスク対から生成
    ///
    /// # Panics
    /// デバッグビルドではマスクが重なっている場合に落ちる。
    #[inline]
    pub const fn new(me: u64, op: u64) -> Board {
        debug_assert!(me & op == 0);
        Board { me, op }
    }

    /// 空きマスク
    #[inline]
    pub const fn empty(self) -> u64 {
        !(self.me | self.op)
    }

    /// 空きマス数
    #[inline]
    pub const fn empty_count(self) -> u32 {
        popcount(self.empty())
    }

    /// 盤上の石数
    #[inline]
    pub const fn stones(self) -> u32 {
        stones_count(self.me, self.op)
    }

    /// 着手を適用した次局面（手番交代済み）
    ///
    /// `flips` は `bitboard::flip` の戻り値であること。
    #[inline]
    pub const fn apply(self, flips: u64, sq: Square) -> Board {
        Board {
            me: self.op ^ flips,
            op: (self.me ^ flips) | sq.bit(),
        }
    }

    /// `apply` の逆操作
    ///
    /// 同じ `flips` / `sq` を渡すと着手前の局面を厳密に復元する。
    #[inline]
    pub const fn undo(self, flips: u64, sq: Square) -> Board {
        Board {
            me: (self.op ^ flips) ^ sq.bit(),
            op: self.me ^ flips,
        }
    }

    /// パス（手番交代のみ）
    #[inline]
    pub const fn pass(self) -> Board {
        Board {
            me: self.op,
            op: self.me,
        }
    }

    /// 手番視点の終局スコア
    #[inline]
    pub fn final_score(self) -> Value {
        final_score(self.me, self.op)
    }
}

impl std::fmt::Display for Board {
    /// デバッグ用の盤面グリッド（x=手番側, o=相手側, .=空き）
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in 0..8 {
            for file in 0..8 {
                let bit = 1u64 << (rank * 8 + file);
                let c = if self.me & bit != 0 {
                    'x'
                } else if self.op & bit != 0 {
                    'o'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::flip;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_initial_board() {
        let b = Board::INITIAL;
        assert_eq!(b.stones(), 4);
        assert_eq!(b.empty_count(), 60);
        assert_eq!(b.me & b.op, 0);
    }

    #[test]
    fn test_apply_undo_roundtrip() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        // 初期局面からの乱数プレイアウトで move/unmove の往復を検証
        let mut board = Board::INITIAL;
        let mut passed = false;
        for _ in 0..60 {
            let mut candidates = Vec::new();
            let mut empties = board.empty();
            while empties != 0 {
                let bit = empties & empties.wrapping_neg();
                empties &= empties - 1;
                let sq = Square::from_bit(bit);
                let flips = flip(board.me, board.op, sq);
                if flips != 0 {
                    candidates.push((sq, flips));
                }
            }
            if candidates.is_empty() {
                if passed {
                    break;
                }
                passed = true;
                board = board.pass();
                continue;
            }
            passed = false;
            let (sq, flips) = candidates[rng.random_range(0..candidates.len())];
            let next = board.apply(flips, sq);
            // 分離不変条件は着手後も維持される
            assert_eq!(next.me & next.op, 0);
            assert_eq!(next.undo(flips, sq), board);
            board = next;
        }
    }

    #[test]
    fn test_pass_swaps_roles() {
        let b = Board::new(0b01, 0b10);
        let p = b.pass();
        assert_eq!(p.me, 0b10);
        assert_eq!(p.op, 0b01);
        assert_eq!(p.pass(), b);
    }

    #[test]
    fn test_display_grid() {
        let s = Board::INITIAL.to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], "...ox...");
        assert_eq!(lines[4], "...xo...");
    }
}
