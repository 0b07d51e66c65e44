//! バッチソルバ
//!
//! 複数の終盤問題をワーカースレッドに分配して解く。問題同士は完全に
//! 独立で、ワーカーは置換表とフレームアリーナを1本ずつ私有するため、
//! 解探索のホットパスに同期は一切ない。共有されるのは検算時の偏差
//! 集計だけ（Mutexで保護）。
//!
//! 分配は連続チャンク方式: N問をceil(N/workers)個ずつ前から順に切る。
//! 出力順は入力順と常に一致する。

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::thread;

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::Board;
use crate::search::{solve_recursive, EndgameSolver, SearchParams};
use crate::types::Value;

/// 問題定義の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    /// `alpha >= beta`
    #[error("degenerate search window: alpha {alpha} >= beta {beta}")]
    DegenerateWindow { alpha: Value, beta: Value },
    /// 自分と相手のマスクが重なっている
    #[error("overlapping occupancy masks: {overlap:#018x}")]
    OverlappingMasks { overlap: u64 },
}

/// 1件の終盤問題
///
/// 局面と探索窓の組。窓は半開区間ではなく開区間 `(alpha, beta)` として
/// 扱われ、真値が窓外なら fail-soft な界が返る。
#[derive(Debug, Clone, Copy)]
pub struct Problem {
    pub board: Board,
    pub alpha: Value,
    pub beta: Value,
}

impl Problem {
    /// 全幅窓の問題を作成
    pub fn new(board: Board) -> Problem {
        Problem {
            board,
            alpha: Value::MIN,
            beta: Value::MAX,
        }
    }

    /// 窓を指定して問題を作成
    pub fn with_window(board: Board, alpha: Value, beta: Value) -> Result<Problem, ProblemError> {
        if alpha >= beta {
            return Err(ProblemError::DegenerateWindow { alpha, beta });
        }
        let overlap = board.me & board.op;
        if overlap != 0 {
            return Err(ProblemError::OverlappingMasks { overlap });
        }
        Ok(Problem { board, alpha, beta })
    }
}

/// バッチ実行オプション
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// ワーカースレッド数
    pub workers: NonZeroUsize,
    /// ワーカーごとの置換表エントリ数
    pub table_capacity: usize,
    /// 探索パラメータ（全ワーカー共通）
    pub params: SearchParams,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            workers: thread::available_parallelism()
                .unwrap_or(NonZeroUsize::new(1).unwrap()),
            table_capacity: 1 << 20,
            params: SearchParams::default(),
        }
    }
}

/// 問題列を並列に解き、入力順の値列を返す
pub fn solve_batch(problems: &[Problem], options: &BatchOptions) -> Vec<Value> {
    if problems.is_empty() {
        return Vec::new();
    }
    let workers = options.workers.get().min(problems.len());
    let chunk = problems.len().div_ceil(workers);
    info!(
        "solving batch: {} problems, {} workers, chunk size {}",
        problems.len(),
        workers,
        chunk
    );
    let mut results = vec![Value::DRAW; problems.len()];
    thread::scope(|s| {
        for (id, (jobs, out)) in problems
            .chunks(chunk)
            .zip(results.chunks_mut(chunk))
            .enumerate()
        {
            s.spawn(move || {
                let mut solver = EndgameSolver::new(options.table_capacity, options.params);
                for (problem, slot) in jobs.iter().zip(out.iter_mut()) {
                    *slot = solver.solve(problem);
                }
                debug!(
                    "worker {id}: {} problems, {} nodes",
                    jobs.len(),
                    solver.nodes()
                );
            });
        }
    });
    results
}

/// 解を逐次リファレンスで検算し、絶対偏差の合計を返す
///
/// 0 なら全問一致。fail-soft な窓外の界は実装ごとに異なりうるため、
/// 両者を問題の窓へクランプしてから比較する（全幅窓なら生の値の
/// 厳密比較と同じ）。不一致は個別に warn ログへ出す。検算もワーカーへ
/// 分配するが、集計カウンタだけは Mutex で共有する。
pub fn verify_batch(problems: &[Problem], results: &[Value], options: &BatchOptions) -> u64 {
    assert_eq!(
        problems.len(),
        results.len(),
        "problem/result length mismatch"
    );
    if problems.is_empty() {
        return 0;
    }
    let workers = options.workers.get().min(problems.len());
    let chunk = problems.len().div_ceil(workers);
    let deviation = Mutex::new(0u64);
    thread::scope(|s| {
        for (base, (jobs, got)) in problems
            .chunks(chunk)
            .zip(results.chunks(chunk))
            .enumerate()
            .map(|(i, pair)| (i * chunk, pair))
        {
            let deviation = &deviation;
            s.spawn(move || {
                let mut local = 0u64;
                for (offset, (problem, &value)) in jobs.iter().zip(got.iter()).enumerate() {
                    let reference = solve_recursive(problem.board, problem.alpha, problem.beta)
                        .clamp(problem.alpha, problem.beta);
                    let value = value.clamp(problem.alpha, problem.beta);
                    if reference != value {
                        warn!(
                            "verification mismatch at problem {}: got {value}, reference {reference}",
                            base + offset
                        );
                        local += value.raw().abs_diff(reference.raw()) as u64;
                    }
                }
                if local != 0 {
                    *deviation.lock().expect("deviation lock poisoned") += local;
                }
            });
        }
    });
    let total = deviation.into_inner().expect("deviation lock poisoned");
    if total == 0 {
        info!("verification passed: {} problems", problems.len());
    } else {
        warn!("verification failed: total deviation {total}");
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::random_endgame;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn options(workers: usize) -> BatchOptions {
        BatchOptions {
            workers: NonZeroUsize::new(workers).unwrap(),
            table_capacity: 1 << 12,
            params: SearchParams::default(),
        }
    }

    fn corpus(count: usize, empties: u32) -> Vec<Problem> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0xC0FFEE);
        (0..count)
            .map(|_| Problem::new(random_endgame(&mut rng, empties)))
            .collect()
    }

    #[test]
    fn test_problem_with_window_rejects_degenerate() {
        let err = Problem::with_window(Board::INITIAL, Value::new(5), Value::new(5)).unwrap_err();
        assert_eq!(
            err,
            ProblemError::DegenerateWindow {
                alpha: Value::new(5),
                beta: Value::new(5)
            }
        );
    }

    #[test]
    fn test_problem_with_window_rejects_overlap() {
        let board = Board { me: 0b11, op: 0b10 };
        let err = Problem::with_window(board, Value::MIN, Value::MAX).unwrap_err();
        assert_eq!(err, ProblemError::OverlappingMasks { overlap: 0b10 });
    }

    #[test]
    fn test_solve_batch_empty() {
        assert!(solve_batch(&[], &options(4)).is_empty());
    }

    #[test]
    fn test_solve_batch_matches_reference() {
        let problems = corpus(12, 8);
        let results = solve_batch(&problems, &options(3));
        assert_eq!(results.len(), problems.len());
        for (problem, &value) in problems.iter().zip(&results) {
            assert_eq!(
                value,
                solve_recursive(problem.board, problem.alpha, problem.beta)
            );
        }
    }

    #[test]
    fn test_solve_batch_worker_count_is_immaterial() {
        // 分配方法は値に影響しない
        let problems = corpus(10, 7);
        let one = solve_batch(&problems, &options(1));
        let many = solve_batch(&problems, &options(4));
        let oversub = solve_batch(&problems, &options(32));
        assert_eq!(one, many);
        assert_eq!(one, oversub);
    }

    #[test]
    fn test_verify_batch_accepts_correct_results() {
        let problems = corpus(8, 6);
        let results = solve_batch(&problems, &options(2));
        assert_eq!(verify_batch(&problems, &results, &options(2)), 0);
    }

    #[test]
    fn test_verify_batch_reports_deviation() {
        let problems = corpus(4, 5);
        let mut results = solve_batch(&problems, &options(2));
        let truth = results[1];
        results[1] = if truth == Value::MAX {
            Value::new(truth.raw() - 2)
        } else {
            Value::new(truth.raw().min(62) + 2)
        };
        let dev = verify_batch(&problems, &results, &options(2));
        assert_eq!(dev, 2);
    }
}
