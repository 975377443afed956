//! 詞與字符導航
//!
//! 詞的邊界由字符類別決定：字母數字與底線是一類，空白是一類，
//! 其餘符號各自成段。跨行搜尋時空行本身是一個停留點。

use crate::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Space,
    Word,
    Special,
}

pub fn classify(ch: char) -> CharClass {
    if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else if ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r' {
        CharClass::Space
    } else {
        CharClass::Special
    }
}

/// 自 col 起向右讀到類別改變為止，回傳第一個不符合的索引（可能是行長）
fn read_while_forward(line: &[char], col: usize, class: CharClass) -> usize {
    let mut col = col;
    while col < line.len() && classify(line[col]) == class {
        col += 1;
    }
    col
}

/// 自 col 起向左讀到類別改變為止，回傳段首索引；讀出行首回傳 `None`
fn read_while_backwards(line: &[char], col: usize, class: CharClass) -> Option<usize> {
    let mut col = col;
    loop {
        if classify(line[col]) != class {
            return Some(col + 1);
        }
        if col == 0 {
            return None;
        }
        col -= 1;
    }
}

/// 下一個詞首（`w`）：跳過當前段與其後空白
pub fn find_next_word_start(
    text: &TextBuffer,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    let line = text.line(row)?;
    let mut row = row;
    let mut col = if col < line.len() {
        read_while_forward(line, col, classify(line[col]))
    } else {
        col
    };

    loop {
        let line = text.line(row)?;
        col = read_while_forward(line, col, CharClass::Space);
        if col < line.len() {
            return Some((row, col));
        }
        if row + 1 >= text.line_count() {
            return None;
        }
        row += 1;
        col = 0;
        if text.line_len(row) == Some(0) {
            // 空行是停留點
            return Some((row, 0));
        }
    }
}

/// 下一個詞尾（`e`）：先前進一格，跳過空白，停在該段最後一個字符
pub fn find_next_word_end(text: &TextBuffer, row: usize, col: usize) -> Option<(usize, usize)> {
    let mut row = row;
    let mut col = col + 1;

    loop {
        let line = text.line(row)?;
        if col >= line.len() {
            if row + 1 >= text.line_count() {
                return None;
            }
            row += 1;
            col = 0;
            if text.line_len(row) == Some(0) {
                return Some((row, 0));
            }
            continue;
        }
        let class = classify(line[col]);
        if class == CharClass::Space {
            col += 1;
            continue;
        }
        let end = read_while_forward(line, col, class);
        return Some((row, end - 1));
    }
}

/// 上一個詞首（`b`）：先後退一格，跳過空白，退到該段首字符
pub fn find_prev_word_start(
    text: &TextBuffer,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    let (mut row, mut col) = step_backwards(text, row, col)?;

    loop {
        if text.line_len(row) == Some(0) {
            return Some((row, 0));
        }
        let line = text.line(row)?;
        let class = classify(line[col]);
        if class == CharClass::Space {
            let (r, c) = step_backwards(text, row, col)?;
            row = r;
            col = c;
            continue;
        }
        return match read_while_backwards(line, col, class) {
            Some(start) => Some((row, start)),
            None => Some((row, 0)),
        };
    }
}

/// 上一個詞尾（`ge`）：先後退一格，跳過空白，停在遇到的第一個非空白字符
pub fn find_prev_word_end(text: &TextBuffer, row: usize, col: usize) -> Option<(usize, usize)> {
    let (mut row, mut col) = step_backwards(text, row, col)?;

    loop {
        if text.line_len(row) == Some(0) {
            return Some((row, 0));
        }
        let line = text.line(row)?;
        if classify(line[col]) == CharClass::Space {
            let (r, c) = step_backwards(text, row, col)?;
            row = r;
            col = c;
            continue;
        }
        return Some((row, col));
    }
}

/// 後退一個位置；行首退到上一行最後一個字符（空行停在 0）
fn step_backwards(text: &TextBuffer, row: usize, col: usize) -> Option<(usize, usize)> {
    if col > 0 {
        return Some((row, col - 1));
    }
    if row == 0 {
        return None;
    }
    let len = text.line_len(row - 1)?;
    Some((row - 1, len.saturating_sub(1)))
}

/// 自 (row, col) 之後搜尋字符；`multiline` 時跨行繼續
pub fn find_char_forwards(
    text: &TextBuffer,
    ch: char,
    row: usize,
    col: usize,
    multiline: bool,
) -> Option<(usize, usize)> {
    let mut row = row;
    let mut col = col + 1;

    loop {
        let line = text.line(row)?;
        while col < line.len() {
            if line[col] == ch {
                return Some((row, col));
            }
            col += 1;
        }
        if !multiline || row + 1 >= text.line_count() {
            return None;
        }
        row += 1;
        col = 0;
    }
}

/// 自 (row, col) 之前反向搜尋字符；`multiline` 時跨行繼續
pub fn find_char_backwards(
    text: &TextBuffer,
    ch: char,
    row: usize,
    col: usize,
    multiline: bool,
) -> Option<(usize, usize)> {
    let mut row = row;
    let mut col = col;

    loop {
        let line = text.line(row)?;
        while col > 0 {
            col -= 1;
            if line[col] == ch {
                return Some((row, col));
            }
        }
        if !multiline || row == 0 {
            return None;
        }
        row -= 1;
        col = text.line_len(row)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines)
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('a'), CharClass::Word);
        assert_eq!(classify('9'), CharClass::Word);
        assert_eq!(classify('_'), CharClass::Word);
        assert_eq!(classify(' '), CharClass::Space);
        assert_eq!(classify('\t'), CharClass::Space);
        assert_eq!(classify('.'), CharClass::Special);
        assert_eq!(classify('*'), CharClass::Special);
    }

    #[test]
    fn test_next_word_start_same_line() {
        let t = text(&["select * from t"]);
        assert_eq!(find_next_word_start(&t, 0, 0), Some((0, 7)));
        assert_eq!(find_next_word_start(&t, 0, 7), Some((0, 9)));
        assert_eq!(find_next_word_start(&t, 0, 9), Some((0, 14)));
        assert_eq!(find_next_word_start(&t, 0, 14), None);
    }

    #[test]
    fn test_next_word_start_special_run_is_own_word() {
        let t = text(&["foo.bar"]);
        assert_eq!(find_next_word_start(&t, 0, 0), Some((0, 3)));
        assert_eq!(find_next_word_start(&t, 0, 3), Some((0, 4)));
    }

    #[test]
    fn test_next_word_start_wraps_and_stops_on_empty_line() {
        let t = text(&["abc", "", "def"]);
        assert_eq!(find_next_word_start(&t, 0, 0), Some((1, 0)));
        assert_eq!(find_next_word_start(&t, 1, 0), Some((2, 0)));
    }

    #[test]
    fn test_next_word_end_sequence() {
        let t = text(&["foo.bar baz"]);
        assert_eq!(find_next_word_end(&t, 0, 0), Some((0, 2)));
        assert_eq!(find_next_word_end(&t, 0, 2), Some((0, 3)));
        assert_eq!(find_next_word_end(&t, 0, 3), Some((0, 6)));
        assert_eq!(find_next_word_end(&t, 0, 6), Some((0, 10)));
        assert_eq!(find_next_word_end(&t, 0, 10), None);
    }

    #[test]
    fn test_next_word_end_stops_on_empty_line() {
        let t = text(&["ab", "", "cd"]);
        assert_eq!(find_next_word_end(&t, 0, 1), Some((1, 0)));
        assert_eq!(find_next_word_end(&t, 1, 0), Some((2, 1)));
    }

    #[test]
    fn test_prev_word_start() {
        let t = text(&["select * from t"]);
        assert_eq!(find_prev_word_start(&t, 0, 14), Some((0, 9)));
        assert_eq!(find_prev_word_start(&t, 0, 9), Some((0, 7)));
        assert_eq!(find_prev_word_start(&t, 0, 7), Some((0, 0)));
        assert_eq!(find_prev_word_start(&t, 0, 0), None);
    }

    #[test]
    fn test_prev_word_start_mid_word_goes_to_run_start() {
        let t = text(&["foo bar"]);
        assert_eq!(find_prev_word_start(&t, 0, 6), Some((0, 4)));
        assert_eq!(find_prev_word_start(&t, 0, 4), Some((0, 0)));
    }

    #[test]
    fn test_prev_word_start_wraps_and_stops_on_empty_line() {
        let t = text(&["abc", "", "def"]);
        assert_eq!(find_prev_word_start(&t, 2, 0), Some((1, 0)));
        assert_eq!(find_prev_word_start(&t, 1, 0), Some((0, 0)));
    }

    #[test]
    fn test_prev_word_end() {
        let t = text(&["foo bar"]);
        assert_eq!(find_prev_word_end(&t, 0, 4), Some((0, 2)));
        assert_eq!(find_prev_word_end(&t, 0, 2), Some((0, 1)));
        assert_eq!(find_prev_word_end(&t, 0, 0), None);
    }

    #[test]
    fn test_find_char_forwards() {
        let t = text(&["a(b)", "c)d"]);
        assert_eq!(find_char_forwards(&t, ')', 0, 0, false), Some((0, 3)));
        assert_eq!(find_char_forwards(&t, ')', 0, 3, false), None);
        assert_eq!(find_char_forwards(&t, ')', 0, 3, true), Some((1, 1)));
        // 起點本身不算
        assert_eq!(find_char_forwards(&t, '(', 0, 1, false), None);
    }

    #[test]
    fn test_find_char_backwards() {
        let t = text(&["a(b)", "c(d"]);
        assert_eq!(find_char_backwards(&t, '(', 1, 2, false), Some((1, 1)));
        assert_eq!(find_char_backwards(&t, '(', 1, 1, false), None);
        assert_eq!(find_char_backwards(&t, '(', 1, 0, true), Some((0, 1)));
    }
}
