//! 明示スタックエンジン
//!
//! ネイティブ再帰の代わりに、事前確保した固定容量のフレームアリーナを
//! 深さインデックスで使う alpha-beta 状態機械。1タスクあたりのメモリ
//! 上限が固定されるため、ワーカーごとの資源計画が立てやすい。
//!
//! フレームの遷移は INIT → ITERATING → {CUT | PASS | EXHAUSTED}:
//!
//! - 最初の子は継承した全幅窓 `(-beta, -floor)` で探索する
//! - 石数が `null_window_threshold` 未満の深い領域では、2手目以降の子を
//!   幅1の null window `(-(floor+1), -floor)` で検査し、窓内で fail-high
//!   した手だけを全幅で一度だけ再探索する（fail-soft PVS）
//! - 子の解決のたびに `result = max(result, -子の値)`。`result >= beta` で
//!   残りの兄弟を捨てる（beta カット）
//! - 合法手ゼロは直前がパスなら終局、でなければパスして1回だけ再帰
//! - ポップ時、石数が `use_table_threshold` 未満の局面は自分が実際に
//!   探索した窓に対する結果を置換表へ登録する（cut したフレームは
//!   新情報を持たないので登録しない）

use log::trace;

use crate::batch::Problem;
use crate::bitboard::flip;
use crate::board::Board;
use crate::tt::Table;
use crate::types::Value;

use super::frame::{ChildKind, Frame};
use super::SearchParams;

/// ループ1周分の遷移
enum Step {
    /// 子フレームを積む
    Descend(Frame),
    /// 先頭フレームを値で解決する（bool: 置換表へ登録するか）
    Resolve(Value, bool),
}

/// 子フレームの構築依頼
///
/// 親フレームの可変借用中に集めた情報だけを持ち、借用を抜けてから
/// 置換表を引いて `Frame` に変換する。
#[derive(Clone, Copy)]
struct ChildRequest {
    board: Board,
    alpha: Value,
    beta: Value,
    prev_passed: bool,
}

impl ChildRequest {
    fn build(self, table: &Table, params: &SearchParams) -> Frame {
        Frame::child(self.board, self.alpha, self.beta, self.prev_passed, table, params)
    }
}

/// 終盤ソルバ本体
///
/// ワーカー1本が占有する資源一式: 置換表1つとフレームアリーナ1つ。
/// 問題間で共有されるのは置換表の内容だけで、フレームは問題ごとに
/// 使い回す。
pub struct EndgameSolver {
    table: Table,
    stack: Vec<Frame>,
    params: SearchParams,
    nodes: u64,
}

impl EndgameSolver {
    /// 置換表容量とパラメータを指定して作成
    pub fn new(table_capacity: usize, params: SearchParams) -> EndgameSolver {
        EndgameSolver {
            table: Table::new(table_capacity),
            stack: Vec::with_capacity(params.stack_capacity),
            params,
            nodes: 0,
        }
    }

    /// 既定パラメータで作成
    pub fn with_capacity(table_capacity: usize) -> EndgameSolver {
        EndgameSolver::new(table_capacity, SearchParams::default())
    }

    /// 置換表への参照（検査用）
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// これまでに生成したフレーム総数
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 1問を厳密に解く
    ///
    /// # Panics
    /// 窓が退化している（`alpha >= beta`）、マスクが重なっている、
    /// またはフレームアリーナの容量を使い切った場合。いずれも呼び出し側の
    /// バグであり、リトライ対象ではない。
    pub fn solve(&mut self, problem: &Problem) -> Value {
        assert!(
            problem.alpha < problem.beta,
            "degenerate search window: {} >= {}",
            problem.alpha,
            problem.beta
        );
        assert!(
            problem.board.me & problem.board.op == 0,
            "overlapping occupancy masks"
        );
        self.stack.clear();
        // 根も子と同じ経路で置換表を引く（解決済みの局面は即 cut で返る）
        let root = Frame::child(
            problem.board,
            problem.alpha,
            problem.beta,
            false,
            &self.table,
            &self.params,
        );
        self.push(root);

        loop {
            let step = self.next_step();
            match step {
                Step::Descend(frame) => self.push(frame),
                Step::Resolve(value, record) => {
                    let done = self.stack.pop().expect("resolve on empty stack");
                    if record && done.board.stones() < self.params.use_table_threshold {
                        self.table.update(done.board, done.alpha, done.beta, value);
                    }
                    if self.stack.is_empty() {
                        trace!("solved: value={value} nodes={}", self.nodes);
                        return value;
                    }
                    if let Some(research) = self.absorb(value) {
                        self.push(research);
                    }
                }
            }
        }
    }

    /// 先頭フレームを1歩進めて次の遷移を決める
    ///
    /// 子を積む場合はカーソルと `pending` を先に更新してから、
    /// スタックの可変借用を抜けて子フレームを構築する。
    fn next_step(&mut self) -> Step {
        let params = self.params;
        let request: ChildRequest;
        {
            let top = self.stack.last_mut().expect("step on empty stack");
            if top.cut {
                // 置換表だけで決着済み
                return Step::Resolve(top.result, false);
            }
            if top.moves.is_empty() {
                if top.prev_passed {
                    // 両者パス: 終局
                    return Step::Resolve(top.board.final_score(), true);
                }
                if top.cursor > 0 {
                    return Step::Resolve(top.result, true);
                }
                // パスして1回だけ再帰
                top.cursor = 1;
                top.pending = ChildKind::Full;
                request = ChildRequest {
                    board: top.board.pass(),
                    alpha: -top.beta,
                    beta: -top.floor(),
                    prev_passed: true,
                };
            } else if top.cursor < top.moves.len() {
                let mv = top.moves.at(top.cursor);
                top.cursor += 1;
                let first = top.cursor == 1;
                let floor = top.floor();
                let flips = flip(top.board.me, top.board.op, mv.sq);
                debug_assert!(flips != 0, "ordered move list holds a legal move");
                let child_board = top.board.apply(flips, mv.sq);
                let deep = top.board.stones() < params.null_window_threshold;
                if deep && !first {
                    top.pending = ChildKind::Probe { floor, sq: mv.sq };
                    request = ChildRequest {
                        board: child_board,
                        alpha: -(floor + 1),
                        beta: -floor,
                        prev_passed: false,
                    };
                } else {
                    top.pending = ChildKind::Full;
                    request = ChildRequest {
                        board: child_board,
                        alpha: -top.beta,
                        beta: -floor,
                        prev_passed: false,
                    };
                }
            } else {
                return Step::Resolve(top.result, true);
            }
        }
        Step::Descend(request.build(&self.table, &params))
    }

    /// 解決済みの子の値を親に折り込む
    ///
    /// null window probe が窓内で fail-high した場合は、その手の全幅
    /// 再探索フレームを返す（それ以外はNone）。
    fn absorb(&mut self, child_value: Value) -> Option<Frame> {
        let params = self.params;
        let parent = self.stack.last_mut().expect("absorb without parent");
        let score = -child_value;
        if let ChildKind::Probe { floor, sq } = parent.pending {
            if score > floor && score < parent.beta {
                // probe が下界 score を証明した手だけ全幅で開き直す
                parent.result = parent.result.max(score);
                parent.pending = ChildKind::Research;
                let flips = flip(parent.board.me, parent.board.op, sq);
                let request = ChildRequest {
                    board: parent.board.apply(flips, sq),
                    alpha: -parent.beta,
                    beta: -parent.floor(),
                    prev_passed: false,
                };
                return Some(request.build(&self.table, &params));
            }
        }
        parent.result = parent.result.max(score);
        if parent.result >= parent.beta {
            // beta カット: 残りの兄弟を捨てて次の訪問で解決させる。
            // パスフレームは moves が空で cursor=1 が「パス済み」の印
            // なので、カーソルを巻き戻してはならない
            parent.cursor = parent.cursor.max(parent.moves.len());
        }
        None
    }

    /// フレームを積み、ノード数を数える
    fn push(&mut self, frame: Frame) {
        assert!(
            self.stack.len() < self.params.stack_capacity,
            "search stack overflow (capacity {})",
            self.params.stack_capacity
        );
        self.nodes += 1;
        self.stack.push(frame);
    }
}
