//! rothello-cli: オセロ終盤バッチソルバ
//!
//! b81形式の問題ファイル（1行1局面）を読み込み、全問の厳密な石差を
//! 並列に計算して「b81 石差」の行として書き出す。`--verify` で逐次
//! リファレンスとの突き合わせ、`--random` で問題生成もできる。

use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::Serialize;

use rothello_core::random::random_endgame;
use rothello_core::{solve_batch, verify_batch, BatchOptions, Problem, SearchParams};

mod codec;

#[derive(Parser, Debug)]
#[command(name = "rothello-cli", version, about = "Exact Othello endgame batch solver")]
struct Args {
    /// b81問題ファイル（1行1局面）。--random と排他
    input: Option<PathBuf>,

    /// 結果の書き出し先（省略時は標準出力）
    #[arg(long)]
    out: Option<PathBuf>,

    /// ワーカースレッド数（既定: 論理コア数）
    #[arg(long)]
    threads: Option<NonZeroUsize>,

    /// ワーカーごとの置換表エントリ数
    #[arg(long, default_value_t = 1 << 20)]
    table_capacity: usize,

    /// ワーカーごとの探索スタック（フレームアリーナ）容量
    #[arg(long, default_value_t = 128)]
    stack_capacity: usize,

    /// 置換表を使い始める石数の上限
    #[arg(long, default_value_t = 56)]
    use_table_threshold: u32,

    /// null window 探索を使う石数の上限
    #[arg(long, default_value_t = 54)]
    null_window_threshold: u32,

    /// 全問を逐次リファレンスで検算する
    #[arg(long)]
    verify: bool,

    /// 問題ファイルの代わりにランダム終盤局面を生成する
    #[arg(long, value_name = "COUNT", conflicts_with = "input")]
    random: Option<usize>,

    /// --random の空きマス数
    #[arg(long, default_value_t = 12)]
    empties: u32,

    /// --random の乱数シード
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 実行サマリをJSONで標準エラーへ出す
    #[arg(long)]
    summary_json: bool,
}

#[derive(Serialize)]
struct Summary {
    problems: usize,
    workers: usize,
    elapsed_ms: u128,
    verified: bool,
    deviation: u64,
}

fn load_problems(path: &PathBuf) -> Result<Vec<Problem>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut problems = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let board = codec::decode(line)
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
        problems.push(Problem::new(board));
    }
    Ok(problems)
}

fn generate_problems(count: usize, empties: u32, seed: u64) -> Vec<Problem> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..count)
        .map(|_| Problem::new(random_endgame(&mut rng, empties)))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let problems = match (&args.input, args.random) {
        (Some(path), None) => load_problems(path)?,
        (None, Some(count)) => generate_problems(count, args.empties, args.seed),
        (None, None) => bail!("either an input file or --random COUNT is required"),
        (Some(_), Some(_)) => unreachable!("clap rejects this combination"),
    };
    info!("loaded {} problems", problems.len());

    let options = BatchOptions {
        workers: args.threads.unwrap_or(BatchOptions::default().workers),
        table_capacity: args.table_capacity,
        params: SearchParams {
            use_table_threshold: args.use_table_threshold,
            null_window_threshold: args.null_window_threshold,
            stack_capacity: args.stack_capacity,
        },
    };

    let started = Instant::now();
    let results = solve_batch(&problems, &options);
    let deviation = if args.verify {
        verify_batch(&problems, &results, &options)
    } else {
        0
    };
    let elapsed = started.elapsed();

    let mut lines = String::new();
    for (problem, value) in problems.iter().zip(&results) {
        lines.push_str(&codec::encode(problem.board));
        lines.push(' ');
        lines.push_str(&value.to_string());
        lines.push('\n');
    }
    match &args.out {
        Some(path) => fs::write(path, &lines)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(lines.as_bytes())
            .context("failed to write results to stdout")?,
    }

    if args.verify && deviation != 0 {
        bail!("verification failed: total deviation {deviation}");
    }
    if args.summary_json {
        let summary = Summary {
            problems: problems.len(),
            workers: options.workers.get(),
            elapsed_ms: elapsed.as_millis(),
            verified: args.verify,
            deviation,
        };
        eprintln!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
