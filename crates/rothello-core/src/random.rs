//! ランダム終盤局面の生成
//!
//! 初期局面からランダム着手で打ち進め、指定した空きマス数の局面を作る。
//! ベンチマークと検算コーパスの入力源。乱数器を外から渡すため、同じ
//! シードからは常に同じ局面列が得られる。

use rand::Rng;

use crate::bitboard::flip;
use crate::board::Board;
use crate::movegen::{MobilityGenerator, MoveList};
use crate::types::Square;

/// 空きマスが `empties` 個になるまでランダムに打ち進めた局面を返す
///
/// 目標に到達する前に終局（連続パス）した場合は初期局面からやり直す。
/// `empties` は初期局面の空き数（60）以下であること。
pub fn random_endgame<R: Rng>(rng: &mut R, empties: u32) -> Board {
    assert!(
        empties <= Board::INITIAL.empty_count(),
        "empties out of range: {empties}"
    );
    loop {
        if let Some(board) = try_playout(rng, empties) {
            return board;
        }
    }
}

fn try_playout<R: Rng>(rng: &mut R, empties: u32) -> Option<Board> {
    let mut board = Board::INITIAL;
    let mut passed = false;
    while board.empty_count() > empties {
        let moves = legal_moves(board);
        if moves.is_empty() {
            if passed {
                // 終局: 目標の空き数に届かなかった
                return None;
            }
            passed = true;
            board = board.pass();
            continue;
        }
        passed = false;
        let pick = moves.at(rng.random_range(0..moves.len()));
        let flips = flip(board.me, board.op, pick.sq);
        board = board.apply(flips, pick.sq);
    }
    Some(board)
}

fn legal_moves(board: Board) -> MoveList {
    let mut moves = MoveList::new();
    let mut mg = MobilityGenerator::new(board);
    while !mg.completed() {
        let bit = mg.next_bit();
        let sq = Square::from_bit(bit);
        if flip(board.me, board.op, sq) != 0 {
            moves.push(sq, 0);
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_random_endgame_reaches_target() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for empties in [0, 4, 10, 20] {
            let board = random_endgame(&mut rng, empties);
            assert_eq!(board.empty_count(), empties);
            assert_eq!(board.me & board.op, 0);
        }
    }

    #[test]
    fn test_random_endgame_is_deterministic() {
        let mut a = Xoshiro256StarStar::seed_from_u64(42);
        let mut b = Xoshiro256StarStar::seed_from_u64(42);
        for _ in 0..8 {
            let x = random_endgame(&mut a, 8);
            let y = random_endgame(&mut b, 8);
            assert_eq!((x.me, x.op), (y.me, y.op));
        }
    }
}
