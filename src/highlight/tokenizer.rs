//! 單趟 SQL 分詞器
//!
//! 逐字符掃描輸入，不回溯。識別字以大小寫不敏感的 FNV-1a 雜湊
//! 對照關鍵字表與型別表分類。lock/rollback 提供一層還原點，
//! 讓呼叫端可以先試掃再決定是否消耗。

use once_cell::sync::Lazy;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Ident,
    Number,
    Str,
    Type,
    Keyword,
    Comment,
    Other,
    End,
}

/// 一個詞位。`start` 與 `size` 是以字符計的偏移與長度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub ttype: TokenType,
    pub line: usize,
    pub col: usize,
    pub start: usize,
    pub size: usize,
}

const KEYWORD_WORDS: &[&str] = &[
    "add", "all", "alter", "from", "any", "replace", "asc", "between", "by", "case", "check",
    "column", "create", "left", "default", "delete", "desc", "where", "and", "drop", "exec",
    "exists", "foreign", "distinct", "full", "group", "having", "in", "index", "inner", "insert",
    "into", "is", "join", "key", "database", "like", "limit", "not", "null", "or", "order",
    "outer", "primary", "view", "as", "right", "rownum", "select", "set", "table", "top",
    "truncate", "union", "unique", "update", "values", "constraint", "procedure",
];

const TYPE_WORDS: &[&str] = &[
    "boolean", "char", "character", "varchar", "date", "precision", "integer", "int", "numeric",
    "decimal", "real", "smallint", "timestamp",
];

const fn fnv1a32(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut hash = 0x811c_9dc5u32;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(0x0100_0193);
        i += 1;
    }
    hash
}

static KEYWORDS: Lazy<HashSet<u32>> =
    Lazy::new(|| KEYWORD_WORDS.iter().map(|w| fnv1a32(w)).collect());

static TYPES: Lazy<HashSet<u32>> = Lazy::new(|| TYPE_WORDS.iter().map(|w| fnv1a32(w)).collect());

#[derive(Debug, Clone, Copy, Default)]
struct Lock {
    pos: usize,
    line: usize,
    col: usize,
    active: bool,
}

#[derive(Debug)]
pub struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    lock: Lock,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 0,
            col: 0,
            lock: Lock::default(),
        }
    }

    /// 換上新輸入並回到起點，既有的還原點作廢
    pub fn set_input(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.pos = 0;
        self.line = 0;
        self.col = 0;
        self.lock = Lock::default();
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// 記下還原點
    pub fn lock(&mut self) {
        self.lock = Lock {
            pos: self.pos,
            line: self.line,
            col: self.col,
            active: true,
        };
    }

    /// 確認消耗，放棄還原點
    pub fn commit(&mut self) {
        self.lock.active = false;
    }

    /// 回到還原點；沒有作用中的還原點則無操作
    pub fn rollback(&mut self) {
        if self.lock.active {
            self.pos = self.lock.pos;
            self.line = self.lock.line;
            self.col = self.lock.col;
            self.lock.active = false;
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.pos + n).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            if ch == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn eat_spaces(&mut self) {
        while matches!(self.current(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    /// 讀取下一個詞位；輸入耗盡回傳長度為零的 `End`
    pub fn next_token(&mut self) -> Token {
        self.eat_spaces();

        let line = self.line;
        let col = self.col;
        let start = self.pos;

        let Some(ch) = self.current() else {
            return Token {
                ttype: TokenType::End,
                line,
                col,
                start,
                size: 0,
            };
        };

        let ttype = if ch == '-' && self.peek(1) == Some('-') {
            // 行註解到行尾為止，換行本身不屬於註解
            self.advance();
            self.advance();
            while let Some(c) = self.current() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            TokenType::Comment
        } else if ch == '/' && self.peek(1) == Some('*') {
            self.advance();
            self.advance();
            loop {
                match self.current() {
                    None => break,
                    Some('*') if self.peek(1) == Some('/') => {
                        self.advance();
                        self.advance();
                        break;
                    }
                    Some(_) => self.advance(),
                }
            }
            TokenType::Comment
        } else if ch.is_ascii_digit()
            || (ch == '.' && matches!(self.peek(1), Some(c) if c.is_ascii_digit()))
        {
            while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            if self.current() == Some('.') {
                self.advance();
                while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
                    self.advance();
                }
            }
            TokenType::Number
        } else if ch == '\'' || ch == '"' {
            // 含首尾引號；未閉合則吃到輸入結尾
            let delim = ch;
            self.advance();
            while let Some(c) = self.current() {
                self.advance();
                if c == delim {
                    break;
                }
            }
            TokenType::Str
        } else if ch.is_alphanumeric() || ch == '_' {
            let mut word = String::new();
            while let Some(c) = self.current() {
                if !(c.is_alphanumeric() || c == '_') {
                    break;
                }
                word.push(c.to_ascii_lowercase());
                self.advance();
            }
            let hash = fnv1a32(&word);
            if KEYWORDS.contains(&hash) {
                TokenType::Keyword
            } else if TYPES.contains(&hash) {
                TokenType::Type
            } else {
                TokenType::Ident
            }
        } else {
            self.advance();
            TokenType::Other
        };

        Token {
            ttype,
            line,
            col,
            start,
            size: self.pos - start,
        }
    }
}
