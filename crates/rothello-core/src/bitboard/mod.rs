//! ビットボードモジュール
//!
//! 64マスの盤面を手番側・相手側2つの64bitマスクで表現し、
//! 反転計算・着手可能判定・終局スコアを純粋なビット演算で提供する。
//!
//! - `flip`: 1マスへの着手で裏返る相手石のマスク（非合法なら0）
//! - `mobility` / `mobility_count`: 着手可能マスクとその数
//! - `final_score`: 終局時の石差スコア
//!
//! 反転計算は4方向ペア（縦・横・両斜め）それぞれについて outflank
//! （相手石の連続列を挟む自石）をビット演算だけで検出する。マスごとの
//! ループは存在しない。

use crate::types::{Square, Value};

/// 立っているビット数
#[inline]
pub const fn popcount(x: u64) -> u32 {
    x.count_ones()
}

/// 手番・相手合わせた石数
#[inline]
pub const fn stones_count(me: u64, op: u64) -> u32 {
    popcount(me | op)
}

/// 最上位ビットだけを残す
///
/// `x | x>>1 | x>>2 | ...` の倍加スミアで最上位ビット以下を全て立ててから
/// 1つ上のビットとの差分を取る。
#[inline]
pub const fn upper_bit(x: u64) -> u64 {
    let mut x = x;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x |= x >> 32;
    x & !(x >> 1)
}

// 方向ごとのレイマスク。添字0=縦、1=横、2=斜め(NE-SW)、3=斜め(NW-SE)。
// MASK_LOW を 63-pos だけ右シフトすると pos から低位側へ伸びるレイ、
// MASK_HIGH を pos だけ左シフトすると高位側へ伸びるレイになる。
const FLIP_MASK_LOW: [u64; 4] = [
    0x0080_8080_8080_8080,
    0x7F00_0000_0000_0000,
    0x0102_0408_1020_4000,
    0x0040_2010_0804_0201,
];
const FLIP_MASK_HIGH: [u64; 4] = [
    0x0101_0101_0101_0100,
    0x0000_0000_0000_00FE,
    0x0002_0408_1020_4080,
    0x8040_2010_0804_0200,
];

// 横・斜め方向では盤端の折り返しを防ぐため相手石をA/H筋抜きで扱う
const EDGE_GUARD: u64 = 0x7E7E_7E7E_7E7E_7E7E;

#[inline]
fn flip_dir(me: u64, op: u64, pos: u8, dir: usize) -> u64 {
    let om = if dir == 0 { op } else { op & EDGE_GUARD };

    // 低位側レイ: pos から見て最も近い自石（outflank）を upper_bit で検出
    let mask = FLIP_MASK_LOW[dir] >> (63 - pos);
    let outflank = upper_bit(!om & mask) & me;
    let mut flipped = (outflank.wrapping_neg() << 1) & mask;

    // 高位側レイ: 連続する相手石を桁上がりで飛び越して outflank を検出
    let mask = FLIP_MASK_HIGH[dir] << pos;
    let outflank = mask & (om | !mask).wrapping_add(1) & me;
    flipped |= outflank.wrapping_sub((outflank != 0) as u64) & mask;

    flipped
}

/// `sq` への着手で裏返る相手石のマスク
///
/// 裏返る石が1つもない（＝その着手が非合法な）場合は0を返す。
/// 着手は `flips` と着手ビットの XOR で適用・巻き戻しでき、往復で元の
/// マスク対が厳密に復元される。
#[inline]
pub fn flip(me: u64, op: u64, sq: Square) -> u64 {
    let pos = sq.raw();
    flip_dir(me, op, pos, 0) | flip_dir(me, op, pos, 1) | flip_dir(me, op, pos, 2) | flip_dir(me, op, pos, 3)
}

/// 手番側の着手可能マスク
pub fn mobility(me: u64, op: u64) -> u64 {
    let mut moves = 0u64;
    let mut empties = !(me | op);
    while empties != 0 {
        let bit = empties & empties.wrapping_neg();
        empties &= empties - 1;
        if flip(me, op, Square::from_bit(bit)) != 0 {
            moves |= bit;
        }
    }
    moves
}

/// 手番側の着手可能数（ordering用）
#[inline]
pub fn mobility_count(me: u64, op: u64) -> i32 {
    popcount(mobility(me, op)) as i32
}

/// 終局時の石差スコア
///
/// 同数なら0。多い側は空きマスを全て自分の石とみなす慣例で
/// `64 - 2*少ない側の石数`。`final_score(a, b) == -final_score(b, a)` を満たす。
#[inline]
pub fn final_score(me: u64, op: u64) -> Value {
    let mcnt = popcount(me) as i8;
    let ocnt = popcount(op) as i8;
    if mcnt == ocnt {
        Value::DRAW
    } else if mcnt > ocnt {
        Value::new(64 - 2 * ocnt)
    } else {
        Value::new(2 * mcnt - 64)
    }
}
