//! CRC-64ハッシュ
//!
//! 局面キー用の64bitハッシュ。誤り検出ではなく、分布の良い高速ハッシュ
//! として使う。多項式はECMA-182系の `0x42F0E1EBA9EA3693`。

use std::sync::LazyLock;

/// CRC-64多項式
pub const POLY: u64 = 0x42F0_E1EB_A9EA_3693;

/// バイト単位還元テーブル（256エントリ）
static CRC_TABLE: LazyLock<[u64; 256]> = LazyLock::new(make_table);

fn make_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        let mut c = i as u64;
        for _ in 0..8 {
            c = if c & 1 != 0 { POLY ^ (c >> 1) } else { c >> 1 };
        }
        *slot = c;
    }
    table
}

/// 局面マスク対のハッシュ
///
/// me・opをリトルエンディアン16バイトとして、テーブル駆動で
/// 1バイトずつ16ラウンド還元する。
#[inline]
pub fn hash_board(me: u64, op: u64) -> u64 {
    let table = &*CRC_TABLE;
    let mut crc = !0u64;
    for b in me.to_le_bytes().into_iter().chain(op.to_le_bytes()) {
        crc = table[((crc ^ b as u64) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}
