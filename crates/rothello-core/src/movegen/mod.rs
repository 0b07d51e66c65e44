//! 合法手列挙モジュール
//!
//! - `MobilityGenerator`: 未調査の空きマスを1つずつ取り出す使い切り列挙器。
//!   四隅を優先して返すため、生成順がそのまま安価な事前orderingになる。
//! - `MoveList`: 着手候補の固定長バッファ。相手の着手可能数を鍵とした
//!   安定挿入ソートで fewest-replies-first に並べ替える。

use crate::board::Board;
use crate::types::Square;

/// 未調査マス列挙器
///
/// 2つのマスク x = !op / y = !me を保持し、`x & y` がちょうど
/// 「未調査の空きマス」になるよう調査済みマスを両マスクから消し込む。
/// 局面ごとに1インスタンスを使い切る。
#[derive(Debug, Clone, Copy)]
pub struct MobilityGenerator {
    x: u64,
    y: u64,
}

impl MobilityGenerator {
    /// 局面から生成
    #[inline]
    pub const fn new(board: Board) -> MobilityGenerator {
        MobilityGenerator {
            x: !board.op,
            y: !board.me,
        }
    }

    /// 未調査の空きマスク
    #[inline]
    const fn not_checked_yet(self) -> u64 {
        self.x & self.y
    }

    /// 未調査マスを1つ取り出して調査済みにする
    ///
    /// 四隅が残っていれば四隅を、なければ最小番号のマスを返す。
    /// `completed()` が偽であること。
    #[inline]
    pub fn next_bit(&mut self) -> u64 {
        let p = self.not_checked_yet();
        let q = p & Square::CORNER_MASK;
        let bit = if q != 0 {
            q & q.wrapping_neg()
        } else {
            p & p.wrapping_neg()
        };
        self.x ^= bit;
        self.y ^= bit;
        bit
    }

    /// 全マス調査済みか
    #[inline]
    pub const fn completed(self) -> bool {
        self.not_checked_yet() == 0
    }
}

/// 1局面の合法手数の上限（実測の最大値 ~33 に対する安全マージン）
pub const MAX_LEGAL_MOVES: usize = 46;

/// スコア付き着手
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// 着手マス
    pub sq: Square,
    /// 並べ替え鍵（着手後の相手の着手可能数）
    pub score: i8,
}

/// 着手候補バッファ
///
/// ヒートパスでのヒープ確保を避けるためのインライン固定長配列。
/// 容量超過は切り捨てずに assert で落とす。
#[derive(Debug, Clone, Copy)]
pub struct MoveList {
    moves: [ScoredMove; MAX_LEGAL_MOVES],
    len: usize,
}

impl MoveList {
    /// 空のMoveListを作成
    #[inline]
    pub const fn new() -> Self {
        const EMPTY: ScoredMove = ScoredMove {
            sq: Square::from_bit(1),
            score: 0,
        };
        Self {
            moves: [EMPTY; MAX_LEGAL_MOVES],
            len: 0,
        }
    }

    /// 着手の数
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// i番目の着手を取得
    #[inline]
    pub fn at(&self, i: usize) -> ScoredMove {
        debug_assert!(i < self.len);
        self.moves[i]
    }

    /// 着手を追加
    #[inline]
    pub fn push(&mut self, sq: Square, score: i8) {
        assert!(self.len < MAX_LEGAL_MOVES, "move list overflow");
        self.moves[self.len] = ScoredMove { sq, score };
        self.len += 1;
    }

    /// 鍵の昇順に安定ソート
    ///
    /// 要素数は高々46なので挿入ソートで十分（追加確保なし）。
    pub fn sort_by_score(&mut self) {
        for i in 1..self.len {
            let mut j = i;
            while j > 0 && self.moves[j].score < self.moves[j - 1].score {
                self.moves.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    /// スライスとして取得
    #[inline]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}
