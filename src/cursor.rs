use crate::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize, // 邏輯行號 (0-based)
    pub col: usize, // 邏輯列號 (0-based)
}

impl Cursor {
    pub fn new() -> Self {
        Self { row: 0, col: 0 }
    }

    pub fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 上移一行，列夾到新行的最後一個字符
    pub fn move_up(&mut self, text: &TextBuffer) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col(text);
        }
    }

    /// 下移一行，列夾到新行的最後一個字符
    pub fn move_down(&mut self, text: &TextBuffer) {
        if self.row + 1 < text.line_count() {
            self.row += 1;
            self.clamp_col(text);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        }
    }

    /// 右移一列；允許停在行長位置（附加位置）
    pub fn move_right(&mut self, text: &TextBuffer) {
        let len = text.line_len(self.row).unwrap_or(0);
        if self.col < len {
            self.col += 1;
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
    }

    /// 移到行末最後一個字符（空行停在 0）
    pub fn move_to_line_end(&mut self, text: &TextBuffer) {
        let len = text.line_len(self.row).unwrap_or(0);
        self.col = len.saturating_sub(1);
    }

    fn clamp_col(&mut self, text: &TextBuffer) {
        let len = text.line_len(self.row).unwrap_or(0);
        self.col = self.col.min(len.saturating_sub(1));
    }
}
