//! 升目（Square）

/// 升目（0-63）
///
/// 配置: 段優先。bit i は段 `i / 8`・筋 `i % 8` に対応し、
/// bit 0 が盤面左上（a1）になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升目の数
    pub const NUM: usize = 64;

    /// 四隅のマスク（a1, h1, a8, h8）
    pub const CORNER_MASK: u64 = 0x8100_0000_0000_0081;

    /// u8から生成（範囲チェックあり）
    #[inline]
    pub const fn from_index(n: u8) -> Option<Square> {
        if n < 64 { Some(Square(n)) } else { None }
    }

    /// 孤立ビットから生成
    ///
    /// # Panics
    /// デバッグビルドでは bit が1ビットちょうどでない場合に落ちる。
    #[inline]
    pub const fn from_bit(bit: u64) -> Square {
        debug_assert!(bit.count_ones() == 1);
        Square(bit.trailing_zeros() as u8)
    }

    /// 対応する占有マスク
    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// 筋（0-7）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// 段（0-7）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_from_index() {
        assert_eq!(Square::from_index(0).unwrap().raw(), 0);
        assert_eq!(Square::from_index(63).unwrap().raw(), 63);
        assert!(Square::from_index(64).is_none());
    }

    #[test]
    fn test_square_bit_roundtrip() {
        for i in 0..64u8 {
            let sq = Square::from_index(i).unwrap();
            assert_eq!(Square::from_bit(sq.bit()), sq);
        }
    }

    #[test]
    fn test_square_file_rank() {
        let sq = Square::from_index(10).unwrap();
        assert_eq!(sq.file(), 2);
        assert_eq!(sq.rank(), 1);
        assert_eq!(sq.to_string(), "c2");
    }

    #[test]
    fn test_corner_mask() {
        // a1, h1, a8, h8
        let corners = [0u8, 7, 56, 63];
        let mask: u64 = corners.iter().map(|&i| 1u64 << i).sum();
        assert_eq!(mask, Square::CORNER_MASK);
    }
}
