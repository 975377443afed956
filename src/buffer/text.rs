//! 行導向文字緩衝區
//!
//! 緩衝區是一個有序的行列表，每行是一串 Unicode 字符。
//! 初始化之後永遠至少保有一行：邏輯上的空文件就是一個空行。
//! 所有範圍操作對越界參數一律靜默無操作（呼叫端自行保證游標有效）。

use std::fmt;

/// 一行文字（字符序列）
pub type Line = Vec<char>;

/// 將字串轉為行
pub fn line_from_str(s: &str) -> Line {
    s.chars().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Line>,
}

impl TextBuffer {
    /// 建立只含一個空行的緩衝區
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    /// 零行片段（用於複製/剪下結果；文件緩衝區永遠非零行）
    pub fn empty_fragment() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        if lines.is_empty() {
            return Self::new();
        }
        Self {
            lines: lines.iter().map(|s| line_from_str(s)).collect(),
        }
    }

    /// 以 `\n` 分割字串建立緩衝區
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(line_from_str).collect(),
        }
    }

    pub fn from_line_vec(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 指定行的長度；越界回傳 `None`（呼叫端必須先檢查）
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.lines.get(row).map(|l| l.len())
    }

    pub fn line(&self, row: usize) -> Option<&[char]> {
        self.lines.get(row).map(|l| l.as_slice())
    }

    pub fn line_string(&self, row: usize) -> String {
        self.lines
            .get(row)
            .map(|l| l.iter().collect())
            .unwrap_or_default()
    }

    pub fn first_line(&self) -> &[char] {
        self.lines.first().map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn last_line(&self) -> &[char] {
        self.lines.last().map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn set_line(&mut self, row: usize, line: Line) {
        if row < self.lines.len() {
            self.lines[row] = line;
        }
    }

    pub fn replace_char(&mut self, row: usize, col: usize, ch: char) {
        if let Some(line) = self.lines.get_mut(row) {
            if col < line.len() {
                line[col] = ch;
            }
        }
    }

    /// 在 (row, col) 處插入片段。
    ///
    /// 單行片段直接拼接進該行；多行片段將該行於 col 處切開，
    /// 片段首行接在左半之後、末行接在右半之前，中間行原樣插入。
    pub fn insert_at(&mut self, row: usize, col: usize, fragment: &TextBuffer) {
        if fragment.lines.is_empty() {
            return;
        }

        // 零行緩衝區的首次插入：直接採用片段內容，不得產生零行結果
        if self.lines.is_empty() {
            self.lines = fragment.lines.clone();
            return;
        }

        let Some(len) = self.line_len(row) else {
            log::debug!("insert_at: row {} out of range", row);
            return;
        };
        if col > len {
            log::debug!("insert_at: col {} past end of line {}", col, row);
            return;
        }

        if fragment.lines.len() == 1 {
            self.lines[row].splice(col..col, fragment.lines[0].iter().copied());
        } else {
            let tail: Line = self.lines[row][col..].to_vec();

            let mut head: Line = self.lines[row][..col].to_vec();
            head.extend_from_slice(fragment.first_line());

            let mut last: Line = fragment.last_line().to_vec();
            last.extend(tail);

            let mut inserted: Vec<Line> =
                fragment.lines[1..fragment.lines.len() - 1].to_vec();
            inserted.push(last);

            self.lines[row] = head;
            self.lines.splice(row + 1..row + 1, inserted);
        }
    }

    /// 於 start 之前插入整行（start == line_count 時為附加）
    pub fn insert_lines(&mut self, start: usize, lines: &[&str]) {
        let new_lines: Vec<Line> = lines.iter().map(|s| line_from_str(s)).collect();
        if start <= self.lines.len() {
            self.lines.splice(start..start, new_lines);
        } else {
            self.lines.extend(new_lines);
        }
    }

    /// 刪除含首尾的整行範圍
    pub fn delete_lines(&mut self, start: usize, end: usize) {
        if start <= end && end < self.lines.len() {
            self.lines.drain(start..=end);
        }
    }

    /// 刪除 (row_start, col_start) 到 (row_end, col_end) 的封閉範圍。
    ///
    /// 首行保留 col_start 之前的前綴，尾行保留 col_end 之後的後綴，
    /// 兩者合併為一行；被完整覆蓋的中間行移除。
    /// 邊界沿用原始語義：`col_end` 必須嚴格小於尾行長度，否則無操作。
    pub fn delete_range(
        &mut self,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) {
        if self.lines.is_empty() || row_start > row_end {
            return;
        }
        let (Some(start_len), Some(end_len)) =
            (self.line_len(row_start), self.line_len(row_end))
        else {
            return;
        };
        if col_start > start_len || col_end >= end_len {
            return;
        }

        let suffix: Line = self.lines[row_end][col_end + 1..].to_vec();
        self.lines[row_start].truncate(col_start);
        self.lines[row_start].extend(suffix);

        if row_end > row_start {
            self.delete_lines(row_start + 1, row_end);
        }
    }

    /// `delete_range` 的唯讀版本：複製封閉範圍為片段
    pub fn copy_range(
        &self,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) -> TextBuffer {
        if self.lines.is_empty() || row_start > row_end {
            return Self::empty_fragment();
        }
        let (Some(start_len), Some(end_len)) =
            (self.line_len(row_start), self.line_len(row_end))
        else {
            return Self::empty_fragment();
        };
        if col_start > start_len || col_end >= end_len {
            return Self::empty_fragment();
        }

        if row_start == row_end {
            return Self {
                lines: vec![self.lines[row_start][col_start..=col_end].to_vec()],
            };
        }

        let mut lines: Vec<Line> = vec![self.lines[row_start][col_start..].to_vec()];
        lines.extend(self.lines[row_start + 1..row_end].iter().cloned());
        lines.push(self.lines[row_end][..=col_end].to_vec());
        Self { lines }
    }

    /// 單行子字串（col_end 不含），失敗時回傳單一空行片段
    pub fn substr_at(&self, row: usize, col_start: usize, col_end: usize) -> TextBuffer {
        if let Some(len) = self.line_len(row) {
            if col_start <= col_end && col_end <= len {
                return Self {
                    lines: vec![self.lines[row][col_start..col_end].to_vec()],
                };
            }
        }
        Self::from_lines(&[""])
    }

    /// 移除並回傳單行子字串（col_end 不含）
    pub fn delete_substr_at(
        &mut self,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) -> TextBuffer {
        if let Some(len) = self.line_len(row) {
            if col_start <= col_end && col_end <= len {
                let removed: Line = self.lines[row].drain(col_start..col_end).collect();
                return Self {
                    lines: vec![removed],
                };
            }
        }
        Self::from_lines(&[""])
    }

    /// 將第 row 行接到上一行末尾（Insert 模式行首退格的合併語義）
    pub fn merge_line_up(&mut self, row: usize) {
        if row == 0 || row >= self.lines.len() {
            return;
        }
        let line = self.lines.remove(row);
        self.lines[row - 1].extend(line);
    }

    /// 不帶行尾標記空格的純文字（供宿主匯出）
    pub fn contents(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for TextBuffer {
    /// 每行以一個換行結尾，行尾額外保留一個空格，
    /// 讓游標可以落在行末（append 位置）
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            for ch in line {
                write!(f, "{}", ch)?;
            }
            writeln!(f, " ")?;
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
