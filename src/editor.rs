//! 模態編輯器核心
//!
//! 按鍵在這裡解釋成緩衝區操作。編輯器不直接畫終端，
//! 每次按鍵處理回傳一個事件值，並可隨時向它要一份渲染框架，
//! 由宿主決定怎麼呈現。

use crate::buffer::{EditorState, History, Line, TextBuffer};
use crate::cursor::Cursor;
use crate::highlight::{color_for, Color, Highlight, TokenType, Tokenizer};
use crate::input::Key;
use crate::motion;

/// 編輯器歷史槽位數
const HISTORY_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Visual,
}

/// 等待目標的運算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Delete,
    Yank,
}

/// Normal 模式下尚未完成的多鍵命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    None,
    Replace,
    Operator(Op),
    OperatorInside(Op),
}

/// 一次按鍵處理的結果，宿主據此決定後續動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    None,
    ModeChanged(Mode),
    /// Visual 模式送出選取文字執行
    Execute(String),
    /// Normal 模式按 q，把焦點還給宿主
    Released,
}

/// Visual 模式的整行選取：起始行與行數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualSelect {
    pub start: usize,
    pub size: usize,
}

/// 渲染框架中一段同色文字；`cursor` 是游標在這段裡的偏移
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSpan {
    pub text: String,
    pub color: Color,
    pub cursor: Option<usize>,
}

/// 一份完整的畫面描述：依序輸出 spans 即為全文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub spans: Vec<RenderSpan>,
    /// Visual 模式選取的行範圍（含首尾）
    pub selection: Option<(usize, usize)>,
    /// 游標的邏輯位置，供宿主捲動用
    pub cursor: (usize, usize),
}

pub struct Editor {
    text: TextBuffer,
    cursor: Cursor,
    mode: Mode,
    pending: Pending,
    yanked: TextBuffer,
    selected: VisualSelect,
    history: History,

    tokenizer: Tokenizer,
    highlights: Vec<Highlight>,
    full_text: Vec<char>,
    modified: bool,

    use_line_numbers: bool,
    numbers_shift: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            text: TextBuffer::from_lines(&["-- SQL ", ""]),
            cursor: Cursor::new(),
            mode: Mode::Normal,
            pending: Pending::None,
            yanked: TextBuffer::empty_fragment(),
            selected: VisualSelect { start: 0, size: 1 },
            history: History::new(HISTORY_SLOTS),
            tokenizer: Tokenizer::new(""),
            highlights: Vec::new(),
            full_text: Vec::new(),
            modified: true,
            use_line_numbers: false,
            numbers_shift: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor.row, self.cursor.col)
    }

    pub fn enable_line_numbers(&mut self, enable: bool) {
        self.use_line_numbers = enable;
        self.modified = true;
    }

    /// 以宿主提供的文字取代整份緩衝區，游標回到左上
    pub fn set_text(&mut self, text: &str) {
        self.save_history();
        self.cursor = Cursor::new();
        self.text = if text.is_empty() {
            TextBuffer::new()
        } else {
            TextBuffer::from_text(text)
        };
        self.modified = true;
    }

    /// 匯出緩衝區純文字
    pub fn contents(&self) -> String {
        self.text.contents()
    }

    pub fn set_yanked(&mut self, fragment: TextBuffer) {
        self.yanked = fragment;
    }

    fn save_history(&mut self) {
        self.history.push(EditorState::new(
            self.text.clone(),
            self.cursor.row,
            self.cursor.col,
        ));
    }

    fn restore(&mut self, state: EditorState) {
        self.text = state.text;
        self.cursor = Cursor::at(state.row, state.col);
        self.modified = true;
    }

    fn set_mode(&mut self, mode: Mode) -> EditorEvent {
        self.mode = mode;
        EditorEvent::ModeChanged(mode)
    }

    /// 處理一個按鍵，回傳給宿主的事件
    pub fn handle_key(&mut self, key: Key) -> EditorEvent {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Insert => self.handle_insert_key(key),
            Mode::Visual => self.handle_visual_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: Key) -> EditorEvent {
        if self.pending != Pending::None {
            match key {
                Key::Char(ch) => return self.handle_pending_key(ch),
                // 非字符鍵取消未完成的命令，再照常處理
                _ => self.pending = Pending::None,
            }
        }

        match key {
            Key::Char('q') => return EditorEvent::Released,
            Key::Char('j') | Key::Down => self.move_cursor_down(),
            Key::Char('k') | Key::Up => self.move_cursor_up(),
            Key::Char('l') | Key::Right => self.cursor.move_right(&self.text),
            Key::Char('h') | Key::Left => self.cursor.move_left(),
            Key::Char('w') => {
                if let Some((row, col)) =
                    motion::find_next_word_start(&self.text, self.cursor.row, self.cursor.col)
                {
                    self.cursor = Cursor::at(row, col);
                }
            }
            Key::Char('e') => {
                if let Some((row, col)) =
                    motion::find_next_word_end(&self.text, self.cursor.row, self.cursor.col)
                {
                    self.cursor = Cursor::at(row, col);
                }
            }
            Key::Char('b') => {
                if let Some((row, col)) =
                    motion::find_prev_word_start(&self.text, self.cursor.row, self.cursor.col)
                {
                    self.cursor = Cursor::at(row, col);
                }
            }
            Key::Char('0') => self.cursor.move_to_line_start(),
            Key::Char('$') => {
                if self.line_len(self.cursor.row) != 0 {
                    self.cursor.move_to_line_end(&self.text);
                }
            }
            Key::Char('v') => {
                self.selected = VisualSelect {
                    start: self.cursor.row,
                    size: 1,
                };
                return self.set_mode(Mode::Visual);
            }
            Key::Char('i') => {
                self.save_history();
                return self.set_mode(Mode::Insert);
            }
            Key::Char('a') => {
                self.save_history();
                self.cursor.move_right(&self.text);
                return self.set_mode(Mode::Insert);
            }
            Key::Char('x') => {
                let (row, col) = (self.cursor.row, self.cursor.col);
                if col < self.line_len(row) {
                    self.save_history();
                    self.text.delete_range(row, col, row, col);
                    self.modified = true;
                }
            }
            Key::Char('o') => {
                self.save_history();
                self.text.insert_lines(self.cursor.row + 1, &[""]);
                self.modified = true;
                self.move_cursor_down();
                self.cursor.move_to_line_start();
                return self.set_mode(Mode::Insert);
            }
            Key::Char('O') => {
                self.save_history();
                self.text.insert_lines(self.cursor.row, &[""]);
                self.modified = true;
                self.cursor.move_to_line_start();
                return self.set_mode(Mode::Insert);
            }
            Key::Char('p') => self.paste_yanked(),
            Key::Char('D') => {
                let (row, col) = (self.cursor.row, self.cursor.col);
                let len = self.line_len(row);
                if col < len {
                    self.save_history();
                    self.yanked = self.text.delete_substr_at(row, col, len);
                    self.modified = true;
                }
            }
            Key::Char('Y') => {
                let (row, col) = (self.cursor.row, self.cursor.col);
                let len = self.line_len(row);
                if col < len {
                    self.yanked = self.text.substr_at(row, col, len);
                }
            }
            Key::Char('r') => self.pending = Pending::Replace,
            Key::Char('d') => self.pending = Pending::Operator(Op::Delete),
            Key::Char('y') => self.pending = Pending::Operator(Op::Yank),
            Key::Char('u') => {
                // 當前槽位是空的「下一格」時，先存一份現況再退回，
                // 讓第一次 undo 能回到最後的快照而不是自己
                if self.history.current_state().is_none() {
                    self.save_history();
                    self.history.undo();
                }
                if let Some(state) = self.history.undo() {
                    self.restore(state);
                }
            }
            Key::CtrlR => {
                if let Some(state) = self.history.redo() {
                    self.restore(state);
                }
            }
            _ => {}
        }

        EditorEvent::None
    }

    fn handle_pending_key(&mut self, ch: char) -> EditorEvent {
        match self.pending {
            Pending::Replace => {
                let (row, col) = (self.cursor.row, self.cursor.col);
                if col < self.line_len(row) {
                    self.save_history();
                    self.text.replace_char(row, col, ch);
                    self.modified = true;
                }
            }
            Pending::Operator(op) | Pending::OperatorInside(op) => {
                let inside = matches!(self.pending, Pending::OperatorInside(_));
                match ch {
                    'i' => {
                        // 第二個 i 放棄命令
                        self.pending = if inside {
                            Pending::None
                        } else {
                            Pending::OperatorInside(op)
                        };
                        return EditorEvent::None;
                    }
                    'w' => match op {
                        Op::Delete => self.delete_word(inside),
                        Op::Yank => self.yank_word(inside),
                    },
                    '$' => {
                        let (row, col) = (self.cursor.row, self.cursor.col);
                        let len = self.line_len(row);
                        if col < len {
                            match op {
                                Op::Delete => {
                                    self.save_history();
                                    self.yanked = self.text.delete_substr_at(row, col, len);
                                    self.modified = true;
                                }
                                Op::Yank => {
                                    self.yanked = self.text.substr_at(row, col, len);
                                }
                            }
                        }
                    }
                    'd' if op == Op::Delete && !inside => self.delete_yank_current_line(),
                    'y' if op == Op::Yank && !inside => self.yank_current_line(),
                    '\'' | '"' | '(' | ')' | '[' | ']' | '{' | '}' => {
                        self.delete_or_yank_span(ch, op == Op::Delete, inside);
                    }
                    _ => {}
                }
            }
            Pending::None => {}
        }

        self.pending = Pending::None;
        EditorEvent::None
    }

    fn handle_insert_key(&mut self, key: Key) -> EditorEvent {
        match key {
            Key::Escape => return self.set_mode(Mode::Normal),
            Key::Down => self.move_cursor_down(),
            Key::Up => self.move_cursor_up(),
            Key::Right => self.cursor.move_right(&self.text),
            Key::Left => self.cursor.move_left(),
            Key::Backspace => {
                let n_lines = self.text.line_count();
                let prev_len = if self.cursor.row > 0 {
                    self.line_len(self.cursor.row - 1)
                } else {
                    0
                };

                self.delete_char_before(self.cursor.row, self.cursor.col);

                if self.cursor.row > 0 && n_lines > self.text.line_count() {
                    // 兩行合併，游標落在接縫處
                    self.cursor.row -= 1;
                    self.cursor.col = prev_len;
                } else {
                    self.cursor.move_left();
                }
            }
            Key::Enter => {
                self.text.insert_lines(self.cursor.row + 1, &[""]);
                self.modified = true;
                self.move_cursor_down();
                self.cursor.move_to_line_start();
            }
            Key::Char(ch) => {
                let fragment = TextBuffer::from_line_vec(vec![vec![ch]]);
                self.text
                    .insert_at(self.cursor.row, self.cursor.col, &fragment);
                self.modified = true;
                self.cursor.move_right(&self.text);
            }
            _ => {}
        }

        EditorEvent::None
    }

    fn handle_visual_key(&mut self, key: Key) -> EditorEvent {
        match key {
            Key::Char('q') | Key::Escape => return self.set_mode(Mode::Normal),
            Key::Char('j') => {
                if self.selected.start == self.cursor.row {
                    if self.selected.start + self.selected.size < self.text.line_count() {
                        self.selected.size += 1;
                    }
                } else if self.selected.start < self.cursor.row {
                    self.selected.start += 1;
                    self.selected.size -= 1;
                }
            }
            Key::Char('k') => {
                if self.selected.start == self.cursor.row && self.selected.size > 1 {
                    self.selected.size -= 1;
                } else if self.selected.start > 0 {
                    self.selected.start -= 1;
                    self.selected.size += 1;
                }
            }
            Key::CtrlX => return EditorEvent::Execute(self.selected_text()),
            _ => {}
        }

        EditorEvent::None
    }

    /// Visual 選取的各行，每行補一個空格與換行
    pub fn selected_text(&self) -> String {
        if self.mode != Mode::Visual {
            return String::new();
        }
        let mut out = String::new();
        for row in self.selected.start..self.selected.start + self.selected.size {
            out.push_str(&self.text.line_string(row));
            out.push_str(" \n");
        }
        out
    }

    fn line_len(&self, row: usize) -> usize {
        self.text.line_len(row).unwrap_or(0)
    }

    fn move_cursor_up(&mut self) {
        self.cursor.move_up(&self.text);
    }

    fn move_cursor_down(&mut self) {
        self.cursor.move_down(&self.text);
    }

    fn delete_char_before(&mut self, row: usize, col: usize) {
        if col == 0 {
            if row > 0 {
                self.text.merge_line_up(row);
            }
        } else {
            self.text.delete_range(row, col - 1, row, col - 1);
        }
        self.modified = true;
    }

    /// `dw` / `diw`：刪除游標下（或游標起）的詞並放入暫存
    fn delete_word(&mut self, from_start: bool) {
        let (row, col) = (self.cursor.row, self.cursor.col);

        let start = if from_start {
            motion::find_prev_word_start(&self.text, row, col)
        } else {
            Some((row, col))
        };
        let end = motion::find_next_word_end(&self.text, row, col);

        let (Some((y_start, x_start)), Some((y_end, x_end))) = (start, end) else {
            return;
        };
        if y_start != y_end {
            return;
        }

        let x_end = (x_end + 1).min(self.line_len(y_end));
        self.save_history();
        self.yanked = self.text.delete_substr_at(y_start, x_start, x_end);
        self.cursor.col = x_start;
        self.modified = true;
    }

    /// `yw` / `yiw`
    fn yank_word(&mut self, from_start: bool) {
        let (row, col) = (self.cursor.row, self.cursor.col);

        let start = if from_start {
            motion::find_prev_word_start(&self.text, row, col)
        } else {
            Some((row, col))
        };
        let end = motion::find_next_word_end(&self.text, row, col);

        let (Some((y_start, x_start)), Some((y_end, x_end))) = (start, end) else {
            return;
        };
        if y_start != y_end {
            return;
        }

        let x_end = (x_end + 1).min(self.line_len(y_end));
        self.yanked = self.text.substr_at(y_start, x_start, x_end);
    }

    /// 成對分隔符內（或含分隔符）的刪除/複製。
    /// 引號不跨行，括號類可跨行。找不到成對分隔符則無操作。
    fn delete_or_yank_span(&mut self, ch: char, del: bool, inside: bool) {
        let (open, close) = match ch {
            '(' | ')' => ('(', ')'),
            '[' | ']' => ('[', ']'),
            '{' | '}' => ('{', '}'),
            _ => (ch, ch),
        };
        let multiline = ch != '\'' && ch != '"';
        let (row, col) = (self.cursor.row, self.cursor.col);

        let Some((y_start, mut x_start)) =
            motion::find_char_backwards(&self.text, open, row, col, multiline)
        else {
            return;
        };
        let Some((y_end, mut x_end)) =
            motion::find_char_forwards(&self.text, close, row, col, multiline)
        else {
            return;
        };

        if inside {
            if x_end == 0 {
                return;
            }
            x_start += 1;
            x_end -= 1;
        }
        if y_start == y_end && x_start > x_end {
            // 空內容，如 ()
            return;
        }

        self.yanked = self.text.copy_range(y_start, x_start, y_end, x_end);

        if del {
            self.save_history();
            self.text.delete_range(y_start, x_start, y_end, x_end);
            self.cursor = Cursor::at(y_start, x_start);
            self.modified = true;
        }
    }

    /// `yy`：整行放入暫存，前置空行標記整行語義
    fn yank_current_line(&mut self) {
        let line: Line = self
            .text
            .line(self.cursor.row)
            .map(|l| l.to_vec())
            .unwrap_or_default();
        self.yanked = TextBuffer::from_line_vec(vec![Line::new(), line]);
    }

    /// `dd`：整行刪除；最後一行刪除後留下一個空行
    fn delete_yank_current_line(&mut self) {
        self.yank_current_line();
        self.save_history();

        if self.text.line_count() > 1 {
            self.text.delete_lines(self.cursor.row, self.cursor.row);
        } else {
            self.text = TextBuffer::new();
        }

        self.cursor.row = self.cursor.row.min(self.text.line_count() - 1);
        self.modified = true;
    }

    fn insert_yanked_after(&mut self, row: usize, col: usize) {
        self.save_history();
        let col = (col + 1).min(self.line_len(row));
        let fragment = self.yanked.clone();
        self.text.insert_at(row, col, &fragment);
        self.modified = true;
    }

    /// `p`：首行為空的暫存視為整行貼上（貼到下一行），否則貼在游標後
    fn paste_yanked(&mut self) {
        if self.yanked.line_count() == 0 {
            return;
        }
        if self.yanked.line_len(0) == Some(0) {
            let end = self.line_len(self.cursor.row);
            self.insert_yanked_after(self.cursor.row, end);
            self.cursor.row += 1;
        } else {
            self.insert_yanked_after(self.cursor.row, self.cursor.col);
            self.cursor.col += self.yanked.line_len(0).unwrap_or(0);
        }
    }

    fn num_digits(mut n: usize) -> usize {
        let mut count = 0;
        while n != 0 {
            n /= 10;
            count += 1;
        }
        count
    }

    /// 全文字符流：可選的行號欄 + 每行內容 + 行尾空格 + 換行
    fn build_full_text(&mut self) -> Vec<char> {
        if self.use_line_numbers {
            self.numbers_shift = Self::num_digits(self.text.line_count()).max(2) + 2;
        } else {
            self.numbers_shift = 0;
        }

        let mut out = Vec::new();
        for row in 0..self.text.line_count() {
            if self.use_line_numbers {
                let gutter = format!("{:>width$} ", row + 1, width = self.numbers_shift - 1);
                out.extend(gutter.chars());
            }
            if let Some(line) = self.text.line(row) {
                out.extend_from_slice(line);
            }
            out.push(' ');
            out.push('\n');
        }
        out
    }

    fn colorize(ttype: TokenType) -> bool {
        matches!(
            ttype,
            TokenType::Number
                | TokenType::Str
                | TokenType::Type
                | TokenType::Keyword
                | TokenType::Comment
        )
    }

    /// 緩衝區變動後重建高亮區段；乾淨時直接沿用上一次的結果
    fn gen_highlights(&mut self) {
        if !self.modified {
            return;
        }
        self.modified = false;

        self.highlights.clear();
        self.full_text = self.build_full_text();

        let input: String = self.full_text.iter().collect();
        self.tokenizer.set_input(&input);

        let mut normal_start = 0;
        while !self.tokenizer.is_end() {
            let token = self.tokenizer.next_token();
            if !Self::colorize(token.ttype) {
                continue;
            }
            if normal_start < token.start {
                self.highlights.push(Highlight {
                    start: normal_start,
                    end: token.start,
                    color: Color::White,
                });
            }
            if let Some(color) = color_for(token.ttype) {
                self.highlights.push(Highlight {
                    start: token.start,
                    end: token.start + token.size,
                    color,
                });
            }
            normal_start = token.start + token.size;
        }

        if normal_start < self.full_text.len() {
            self.highlights.push(Highlight {
                start: normal_start,
                end: self.full_text.len(),
                color: Color::White,
            });
        }
    }

    /// 游標在全文字符流中的絕對偏移
    fn cursor_offset(&self) -> usize {
        let mut pos = 0;
        for row in 0..self.cursor.row {
            pos += self.line_len(row) + self.numbers_shift + 2;
        }
        pos + self.cursor.col + self.numbers_shift
    }

    /// 產生當前畫面描述
    pub fn render(&mut self) -> RenderFrame {
        self.gen_highlights();

        let pos = self.cursor_offset();
        let mut spans = Vec::with_capacity(self.highlights.len());

        for hl in &self.highlights {
            let text: String = self.full_text[hl.start..hl.end].iter().collect();
            let cursor = if self.mode != Mode::Visual && pos >= hl.start && pos < hl.end {
                Some(pos - hl.start)
            } else {
                None
            };
            spans.push(RenderSpan {
                text,
                color: hl.color,
                cursor,
            });
        }

        let selection = if self.mode == Mode::Visual {
            Some((
                self.selected.start,
                self.selected.start + self.selected.size - 1,
            ))
        } else {
            None
        };

        RenderFrame {
            spans,
            selection,
            cursor: (self.cursor.row, self.cursor.col),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
