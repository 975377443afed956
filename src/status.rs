//! 狀態/命令列
//!
//! 單行的編輯器特化：共用緩衝區與快照歷史。Show 模式純顯示訊息，
//! Prompt 模式接受輸入，Up/Down 瀏覽送出過的命令，
//! 瀏覽途中未送出的草稿會保留，按 Down 回到底部時還原。

use crate::buffer::{EditorState, History, TextBuffer};
use crate::input::Key;

/// 命令列歷史槽位數
const HISTORY_SLOTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    Show,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    None,
    /// Enter 送出的一行命令
    Submitted(String),
    /// Escape 放棄輸入
    Cancelled,
}

/// 命令列的畫面描述；`cursor` 是游標在字串中的偏移
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRender {
    pub text: String,
    pub cursor: Option<usize>,
}

pub struct StatusLine {
    text: TextBuffer,
    draft: Option<TextBuffer>,
    prompt: String,
    cursor: usize,
    mode: StatusMode,
    history: History,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            text: TextBuffer::new(),
            draft: None,
            prompt: String::new(),
            cursor: 0,
            mode: StatusMode::Show,
            history: History::new(HISTORY_SLOTS),
        }
    }

    pub fn mode(&self) -> StatusMode {
        self.mode
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    pub fn set_mode(&mut self, mode: StatusMode) {
        self.mode = mode;
        if mode == StatusMode::Prompt {
            self.clear();
        }
    }

    /// Show 模式的訊息顯示
    pub fn set_text(&mut self, text: &str) {
        self.text.set_line(0, text.chars().collect());
    }

    pub fn text(&self) -> String {
        self.text.line_string(0)
    }

    fn clear(&mut self) {
        self.cursor = 0;
        self.text.set_line(0, Vec::new());
    }

    fn line_len(&self) -> usize {
        self.text.line_len(0).unwrap_or(0)
    }

    fn save_history(&mut self) {
        self.history
            .push(EditorState::new(self.text.clone(), 0, self.cursor));
    }

    /// Up：回放上一條歷史；第一次離開底部時把未送出的內容存成草稿
    fn history_prev(&mut self) {
        if let Some(state) = self.history.undo() {
            if self.draft.is_none() {
                self.draft = Some(self.text.clone());
            }
            self.text = state.text;
        }
        self.cursor = self.line_len();
    }

    /// Down：往新的方向回放；到底之後還原草稿
    fn history_next(&mut self) {
        if let Some(state) = self.history.redo() {
            self.text = state.text;
        } else if let Some(draft) = self.draft.take() {
            self.text = draft;
        }
        self.cursor = self.line_len();
    }

    pub fn handle_key(&mut self, key: Key) -> StatusEvent {
        if self.mode != StatusMode::Prompt {
            return StatusEvent::None;
        }

        match key {
            Key::Escape => {
                self.clear();
                self.mode = StatusMode::Show;
                return StatusEvent::Cancelled;
            }
            Key::Enter => {
                if self.line_len() != 0 {
                    self.save_history();
                }
                let line = self.text.line_string(0);
                self.clear();
                return StatusEvent::Submitted(line);
            }
            Key::Up => self.history_prev(),
            Key::Down => self.history_next(),
            Key::Right => {
                if self.cursor < self.line_len() {
                    self.cursor += 1;
                }
            }
            Key::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.text.delete_range(0, self.cursor - 1, 0, self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            Key::Char(ch) => {
                // 輸入任何字符都跳回歷史底部並放棄草稿
                self.history.redo_to_last();
                self.draft = None;

                let fragment = TextBuffer::from_line_vec(vec![vec![ch]]);
                self.text.insert_at(0, self.cursor, &fragment);
                self.cursor += 1;
            }
            _ => {}
        }

        StatusEvent::None
    }

    pub fn render(&self) -> StatusRender {
        if self.mode == StatusMode::Prompt {
            let mut out = self.prompt.clone();
            out.push_str(&self.text.line_string(0));
            // 留兩格讓游標能停在行尾
            out.push_str("  ");
            StatusRender {
                text: out,
                cursor: Some(self.cursor + self.prompt.chars().count()),
            }
        } else {
            StatusRender {
                text: self.text.line_string(0),
                cursor: None,
            }
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_line() -> StatusLine {
        let mut s = StatusLine::new();
        s.set_mode(StatusMode::Prompt);
        s
    }

    fn type_str(s: &mut StatusLine, input: &str) {
        for ch in input.chars() {
            s.handle_key(Key::Char(ch));
        }
    }

    #[test]
    fn test_type_and_submit() {
        let mut s = prompt_line();
        type_str(&mut s, "tables");
        let event = s.handle_key(Key::Enter);
        assert_eq!(event, StatusEvent::Submitted("tables".to_string()));
        // 送出後清空，仍在 Prompt
        assert_eq!(s.text(), "");
        assert_eq!(s.mode(), StatusMode::Prompt);
    }

    #[test]
    fn test_escape_cancels_and_clears() {
        let mut s = prompt_line();
        type_str(&mut s, "half");
        let event = s.handle_key(Key::Escape);
        assert_eq!(event, StatusEvent::Cancelled);
        assert_eq!(s.text(), "");
        assert_eq!(s.mode(), StatusMode::Show);
    }

    #[test]
    fn test_empty_submit_skips_history() {
        let mut s = prompt_line();
        let event = s.handle_key(Key::Enter);
        assert_eq!(event, StatusEvent::Submitted(String::new()));
        // 沒有歷史可回放
        s.handle_key(Key::Up);
        assert_eq!(s.text(), "");
    }

    #[test]
    fn test_backspace_and_cursor_moves() {
        let mut s = prompt_line();
        type_str(&mut s, "abc");
        s.handle_key(Key::Left);
        s.handle_key(Key::Backspace);
        assert_eq!(s.text(), "ac");
        s.handle_key(Key::Right);
        type_str(&mut s, "d");
        assert_eq!(s.text(), "acd");
    }

    #[test]
    fn test_history_browse_up_down() {
        let mut s = prompt_line();
        type_str(&mut s, "one");
        s.handle_key(Key::Enter);
        type_str(&mut s, "two");
        s.handle_key(Key::Enter);

        s.handle_key(Key::Up);
        assert_eq!(s.text(), "two");
        s.handle_key(Key::Up);
        assert_eq!(s.text(), "one");
        s.handle_key(Key::Down);
        assert_eq!(s.text(), "two");
    }

    #[test]
    fn test_draft_preserved_while_browsing() {
        let mut s = prompt_line();
        type_str(&mut s, "sent");
        s.handle_key(Key::Enter);

        type_str(&mut s, "draft");
        s.handle_key(Key::Up);
        assert_eq!(s.text(), "sent");
        s.handle_key(Key::Down);
        // 回到底部還原未送出的草稿
        assert_eq!(s.text(), "draft");
    }

    #[test]
    fn test_typing_while_browsing_drops_draft() {
        let mut s = prompt_line();
        type_str(&mut s, "sent");
        s.handle_key(Key::Enter);

        type_str(&mut s, "draft");
        s.handle_key(Key::Up);
        type_str(&mut s, "!");
        assert_eq!(s.text(), "sent!");
        // 草稿已放棄
        s.handle_key(Key::Down);
        assert_eq!(s.text(), "sent!");
    }

    #[test]
    fn test_browse_sets_cursor_to_line_end() {
        let mut s = prompt_line();
        type_str(&mut s, "abcde");
        s.handle_key(Key::Enter);
        s.handle_key(Key::Up);
        let render = s.render();
        assert_eq!(render.cursor, Some(5));
    }

    #[test]
    fn test_render_with_prompt_prefix() {
        let mut s = prompt_line();
        s.set_prompt("> ");
        type_str(&mut s, "ab");
        let render = s.render();
        assert_eq!(render.text, "> ab  ");
        assert_eq!(render.cursor, Some(4));
    }

    #[test]
    fn test_show_mode_displays_message_and_ignores_keys() {
        let mut s = StatusLine::new();
        s.set_text("3 rows");
        assert_eq!(s.handle_key(Key::Char('x')), StatusEvent::None);
        assert_eq!(s.text(), "3 rows");
        let render = s.render();
        assert_eq!(render.text, "3 rows");
        assert_eq!(render.cursor, None);
    }
}
