//! 石差スコア（Value）
//!
//! 終局時の石差に基づくスコア。常に [-64, 64] の範囲に収まり、
//! 手番交代では符号が反転する（negamax規約）。

/// 石差スコア
///
/// `MIN`（全滅負け）から `MAX`（全滅勝ち）までの整数。探索窓（alpha/beta）と
/// 探索結果の両方をこの型で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(i8);

impl Value {
    /// 最小スコア（-64）
    pub const MIN: Value = Value(-64);
    /// 最大スコア（+64）
    pub const MAX: Value = Value(64);
    /// 引き分け
    pub const DRAW: Value = Value(0);

    /// 値から生成
    #[inline]
    pub const fn new(v: i8) -> Value {
        debug_assert!(-64 <= v && v <= 64);
        Value(v)
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i8 {
        self.0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::DRAW
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add<i8> for Value {
    type Output = Value;

    /// null window 構成（`floor + 1`）用。結果は [-64, 64] に収まること。
    #[inline]
    fn add(self, rhs: i8) -> Value {
        Value::new(self.0 + rhs)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
