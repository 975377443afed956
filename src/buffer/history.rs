//! 固定槽位的快照歷史
//!
//! 每個快照是整份緩衝區加游標位置的深拷貝。槽位滿了就整體左移，
//! 丟掉最舊的一筆。undo 之後的新快照會清掉所有 redo 槽位。

use crate::buffer::text::TextBuffer;

/// 一份可完整還原的編輯器快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub text: TextBuffer,
    pub row: usize,
    pub col: usize,
}

impl EditorState {
    pub fn new(text: TextBuffer, row: usize, col: usize) -> Self {
        Self { text, row, col }
    }
}

#[derive(Debug)]
pub struct History {
    states: Vec<Option<EditorState>>,
    current: usize,
}

impl History {
    /// 建立指定容量的歷史（容量下限為 1）
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            states: vec![None; capacity],
            current: 0,
        }
    }

    /// 寫入一份快照。
    /// 游標在最後一格時，該格已佔用就整體左移再寫入，游標不動；
    /// 否則寫入當前格、前進一格，並清空之後的所有槽位。
    pub fn push(&mut self, state: EditorState) {
        let last = self.states.len() - 1;
        if self.current == last {
            if self.states[last].is_some() {
                self.states.remove(0);
                self.states.push(None);
            }
            self.states[last] = Some(state);
        } else {
            self.states[self.current] = Some(state);
            self.current += 1;
            for slot in self.states[self.current..].iter_mut() {
                *slot = None;
            }
        }
    }

    /// 退一格並回傳該格快照的拷貝；已在最前則回傳 `None`
    pub fn undo(&mut self) -> Option<EditorState> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        self.states[self.current].clone()
    }

    /// 進一格並回傳該格快照的拷貝；無可重做則回傳 `None`
    pub fn redo(&mut self) -> Option<EditorState> {
        if self.current + 1 >= self.states.len() {
            return None;
        }
        if self.states[self.current + 1].is_none() {
            return None;
        }
        self.current += 1;
        self.states[self.current].clone()
    }

    /// 前進到最後一份已佔用的快照（命令列歷史回到最新輸入用）
    pub fn redo_to_last(&mut self) {
        while self.current + 1 < self.states.len() && self.states[self.current + 1].is_some() {
            self.current += 1;
        }
    }

    /// 當前槽位的快照拷貝（通常是空的「下一格」，undo 特例需要分辨）
    pub fn current_state(&self) -> Option<EditorState> {
        self.states[self.current].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(s: &str) -> EditorState {
        EditorState::new(TextBuffer::from_lines(&[s]), 0, 0)
    }

    #[test]
    fn test_undo_returns_pushed_state() {
        let mut h = History::new(5);
        h.push(snap("one"));
        let restored = h.undo().unwrap();
        assert_eq!(restored.text.line_string(0), "one");
        assert!(h.undo().is_none());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut h = History::new(5);
        h.push(snap("a"));
        h.push(snap("b"));
        h.push(snap("c"));

        assert_eq!(h.undo().unwrap().text.line_string(0), "c");
        assert_eq!(h.undo().unwrap().text.line_string(0), "b");
        assert_eq!(h.redo().unwrap().text.line_string(0), "c");
    }

    #[test]
    fn test_push_clears_redo_tail() {
        let mut h = History::new(5);
        h.push(snap("a"));
        h.push(snap("b"));
        h.undo();
        h.undo();
        h.push(snap("c"));
        // b 已被覆蓋，redo 不可回到它
        assert!(h.redo().is_none());
        assert_eq!(h.undo().unwrap().text.line_string(0), "c");
    }

    #[test]
    fn test_full_ring_drops_oldest() {
        let mut h = History::new(3);
        h.push(snap("1"));
        h.push(snap("2"));
        h.push(snap("3"));
        h.push(snap("4")); // 擠掉 "1"

        assert_eq!(h.undo().unwrap().text.line_string(0), "3");
        assert_eq!(h.undo().unwrap().text.line_string(0), "2");
        assert!(h.undo().is_none());
    }

    #[test]
    fn test_redo_to_last() {
        let mut h = History::new(5);
        h.push(snap("a"));
        h.push(snap("b"));
        h.push(snap("c"));
        h.undo();
        h.undo();
        h.undo();
        h.redo_to_last();
        assert_eq!(h.current_state().unwrap().text.line_string(0), "c");
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut h = History::new(3);
        let mut text = TextBuffer::from_lines(&["abc"]);
        h.push(EditorState::new(text.clone(), 0, 0));
        text.replace_char(0, 0, 'X');
        assert_eq!(h.undo().unwrap().text.line_string(0), "abc");
    }

    #[test]
    fn test_capacity_floor_is_one() {
        let mut h = History::new(0);
        h.push(snap("x"));
        h.push(snap("y"));
        // 單槽位時游標始終在第 0 格，undo 沒有可退之處
        assert!(h.undo().is_none());
        assert_eq!(h.current_state().unwrap().text.line_string(0), "y");
    }
}
