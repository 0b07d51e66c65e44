//! 置換表モジュール
//!
//! 探索済み局面の「証明済み値域」をキャッシュする固定容量ハッシュ表。
//!
//! - キー: 局面マスク対の CRC-64（`crc::hash_board`）
//! - 値: 真のミニマックス値 v に対する証明済み区間 `lower <= v <= upper`
//! - 衝突処理: チェイニングなし。キー不一致のスロットは無条件上書き、
//!   参照時のキー不一致はミス扱い（エラーにはならない）
//!
//! 表はワーカーごとに1つ所有され、ロックは不要（バッチ間の共有なし）。

mod crc;

pub use crc::hash_board;

use crate::board::Board;
use crate::types::Value;

/// 証明済み値域
///
/// 不変条件: 同一局面へのupdateでは区間は狭まる方向にしか動かない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// 下界（真値はこれ以上）
    pub lower: Value,
    /// 上界（真値はこれ以下）
    pub upper: Value,
}

impl Bounds {
    /// 無情報区間 [-64, 64]
    pub const UNKNOWN: Bounds = Bounds {
        lower: Value::MIN,
        upper: Value::MAX,
    };
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    me: u64,
    op: u64,
    bounds: Bounds,
    occupied: bool,
}

impl Entry {
    const EMPTY: Entry = Entry {
        me: 0,
        op: 0,
        bounds: Bounds::UNKNOWN,
        occupied: false,
    };
}

/// 置換表
pub struct Table {
    entries: Vec<Entry>,
}

impl Table {
    /// 指定エントリ数で作成
    pub fn new(capacity: usize) -> Table {
        assert!(capacity > 0, "table capacity must be positive");
        Table {
            entries: vec![Entry::EMPTY; capacity],
        }
    }

    /// エントリ数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// 全消去
    pub fn clear(&mut self) {
        self.entries.fill(Entry::EMPTY);
    }

    #[inline]
    fn slot(&self, board: Board) -> usize {
        (hash_board(board.me, board.op) % self.entries.len() as u64) as usize
    }

    /// 局面の証明済み値域を参照
    ///
    /// スロットのキーが一致しない場合（未登録・衝突とも）はNone。
    pub fn get(&self, board: Board) -> Option<Bounds> {
        let e = &self.entries[self.slot(board)];
        if e.occupied && e.me == board.me && e.op == board.op {
            Some(e.bounds)
        } else {
            None
        }
    }

    /// 探索結果を登録
    ///
    /// `value` は窓 `(window_lower, window_upper)` での fail-soft 探索の
    /// 戻り値であること。窓との位置関係から新しい証明区間を分類する:
    ///
    /// - `value <= window_lower`: fail-low。真値は value 以下
    /// - `value >= window_upper`: fail-high。真値は value 以上
    /// - それ以外: 真値そのもの
    ///
    /// 既存エントリのキーが一致する場合は区間同士を交差させる
    /// （情報は蓄積するだけで失われない）。キー不一致なら上書き。
    /// 退化した窓（`window_lower >= window_upper`）では何も証明できない
    /// ため無視する。
    pub fn update(&mut self, board: Board, window_lower: Value, window_upper: Value, value: Value) {
        if window_lower >= window_upper {
            return;
        }
        let new = if value <= window_lower {
            Bounds {
                lower: Value::MIN,
                upper: value,
            }
        } else if value >= window_upper {
            Bounds {
                lower: value,
                upper: Value::MAX,
            }
        } else {
            Bounds {
                lower: value,
                upper: value,
            }
        };
        let slot = self.slot(board);
        let e = &mut self.entries[slot];
        let bounds = if e.occupied && e.me == board.me && e.op == board.op {
            Bounds {
                lower: new.lower.max(e.bounds.lower),
                upper: new.upper.min(e.bounds.upper),
            }
        } else {
            new
        };
        *e = Entry {
            me: board.me,
            op: board.op,
            bounds,
            occupied: true,
        };
    }
}
