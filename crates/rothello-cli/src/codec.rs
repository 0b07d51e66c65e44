//! 局面のテキスト表現（b81形式）
//!
//! 1局面 = 81文字の1行。先頭64文字が rank-major の盤面
//! （`x`=手番側, `o`=相手側, `-`=空き）、残り17文字は予約領域で、
//! 読み込み時は無視し、書き出し時は `-` で埋める。

use rothello_core::Board;
use thiserror::Error;

/// 1行の長さ
pub const LINE_LEN: usize = 81;
/// 盤面部の長さ
const BOARD_LEN: usize = 64;

/// b81デコードエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("line must be {LINE_LEN} chars, got {0}")]
    BadLength(usize),
    #[error("unexpected char {ch:?} at column {column}")]
    BadChar { column: usize, ch: char },
}

/// b81の1行を局面へ復号する
pub fn decode(line: &str) -> Result<Board, CodecError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != LINE_LEN {
        return Err(CodecError::BadLength(chars.len()));
    }
    let mut me = 0u64;
    let mut op = 0u64;
    for (i, &c) in chars[..BOARD_LEN].iter().enumerate() {
        let bit = 1u64 << i;
        match c {
            'x' => me |= bit,
            'o' => op |= bit,
            '-' => {}
            _ => return Err(CodecError::BadChar { column: i, ch: c }),
        }
    }
    Ok(Board::new(me, op))
}

/// 局面をb81の1行へ符号化する
pub fn encode(board: Board) -> String {
    let mut line = String::with_capacity(LINE_LEN);
    for i in 0..BOARD_LEN as u32 {
        let bit = 1u64 << i;
        line.push(if board.me & bit != 0 {
            'x'
        } else if board.op & bit != 0 {
            'o'
        } else {
            '-'
        });
    }
    for _ in BOARD_LEN..LINE_LEN {
        line.push('-');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_initial() {
        let line = encode(Board::INITIAL);
        assert_eq!(line.len(), LINE_LEN);
        assert_eq!(&line[24..32], "---ox---");
        assert_eq!(&line[32..40], "---xo---");
        assert!(line[64..].chars().all(|c| c == '-'));
    }

    #[test]
    fn test_decode_roundtrip() {
        let board = Board::INITIAL;
        assert_eq!(decode(&encode(board)), Ok(board));
    }

    #[test]
    fn test_decode_ignores_tail() {
        let mut line = encode(Board::INITIAL);
        line.replace_range(64..81, "0123456789abcdefg");
        assert_eq!(decode(&line), Ok(Board::INITIAL));
    }

    #[test]
    fn test_decode_rejects_short_line() {
        assert_eq!(decode("xo-"), Err(CodecError::BadLength(3)));
    }

    #[test]
    fn test_decode_rejects_bad_char() {
        let mut line = encode(Board::INITIAL);
        line.replace_range(5..6, "?");
        assert_eq!(
            decode(&line),
            Err(CodecError::BadChar {
                column: 5,
                ch: '?'
            })
        );
    }
}
