// SQL 語法高亮主模組

pub mod tokenizer;

pub use tokenizer::{Token, TokenType, Tokenizer};

/// 高亮色票（由宿主映射到實際終端色彩）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Violet,
    Yellow,
    Red,
    Wheat,
    Turquoise,
}

/// 渲染字串中一段半開區間 `[start, end)` 的顏色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

/// 各類 token 的顏色；不在表內的以預設色顯示
pub fn color_for(ttype: TokenType) -> Option<Color> {
    match ttype {
        TokenType::Keyword => Some(Color::Violet),
        TokenType::Str => Some(Color::Yellow),
        TokenType::Number => Some(Color::Red),
        TokenType::Comment => Some(Color::Wheat),
        TokenType::Type => Some(Color::Turquoise),
        TokenType::Ident | TokenType::Other | TokenType::End => None,
    }
}
