/// 編輯器核心認得的按鍵。與終端後端解耦，
/// 測試可以直接餵 `Key` 而不經過事件迴圈。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    CtrlR,
    CtrlX,
}
