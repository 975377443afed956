//! 示範主控台
//!
//! 把編輯核心、命令列與一個假的查詢後端接成可互動的終端程式。
//! 編輯器在 Normal 模式按 q 釋放焦點到命令列；Visual 模式 Ctrl+X
//! 把選取的 SQL 丟給後端，結果摘要顯示在命令列上。

use crate::terminal::Terminal;
use crate::utils;
use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{self, Attribute},
    terminal::{self, ClearType},
};
use sqed::editor::Mode;
use sqed::highlight::Color;
use sqed::{
    translate_key_event, Editor, EditorEvent, QueryBackend, QueryOutput, StatusEvent, StatusLine,
    StatusMode,
};
use std::io::{self, Write};

/// 沒接資料庫時的替身後端：原樣回吐收到的 SQL
pub struct EchoBackend {
    executed: usize,
}

impl EchoBackend {
    pub fn new() -> Self {
        Self { executed: 0 }
    }
}

impl QueryBackend for EchoBackend {
    fn execute_query(&mut self, sql: &str) -> Result<QueryOutput, String> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err("empty query".to_string());
        }
        self.executed += 1;
        Ok(QueryOutput {
            columns: vec!["echo".to_string()],
            rows: sql
                .lines()
                .map(|l| vec![l.trim_end().to_string()])
                .collect(),
        })
    }

    fn list_tables(&mut self) -> Result<Vec<String>, String> {
        Err("not connected".to_string())
    }

    fn describe_table(&mut self, name: &str) -> Result<QueryOutput, String> {
        Err(format!("not connected, cannot describe '{}'", name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Status,
}

pub struct Console {
    editor: Editor,
    status: StatusLine,
    backend: EchoBackend,
    terminal: Terminal,
    focus: Focus,
    should_quit: bool,
}

impl Console {
    pub fn new(line_numbers: bool, initial_text: Option<String>) -> Result<Self> {
        let mut editor = Editor::new();
        editor.enable_line_numbers(line_numbers);
        if let Some(text) = initial_text {
            editor.set_text(&text);
        }

        let mut status = StatusLine::new();
        status.set_prompt(": ");
        status.set_text("Ctrl+X in visual mode runs the selection, q for the command line");

        Ok(Self {
            editor,
            status,
            backend: EchoBackend::new(),
            terminal: Terminal::new()?,
            focus: Focus::Editor,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        Terminal::enter_raw_mode()?;
        Terminal::clear_screen()?;

        while !self.should_quit {
            self.draw()?;

            let key_event = self.terminal.read_key()?;
            let Some(key) = translate_key_event(key_event) else {
                continue;
            };

            match self.focus {
                Focus::Editor => {
                    let event = self.editor.handle_key(key);
                    self.handle_editor_event(event);
                }
                Focus::Status => {
                    let event = self.status.handle_key(key);
                    self.handle_status_event(event);
                }
            }
        }

        Terminal::exit_raw_mode()?;
        Ok(())
    }

    fn handle_editor_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Execute(sql) => {
                let message = match self.backend.execute_query(&sql) {
                    Ok(output) => output.summary(),
                    Err(err) => format!("error: {}", err),
                };
                self.status.set_text(&message);
            }
            EditorEvent::Released => {
                self.focus = Focus::Status;
                self.status.set_mode(StatusMode::Prompt);
            }
            EditorEvent::ModeChanged(_) | EditorEvent::None => {}
        }
    }

    fn handle_status_event(&mut self, event: StatusEvent) {
        match event {
            StatusEvent::Submitted(command) => {
                self.run_command(&command);
                self.status.set_mode(StatusMode::Show);
                self.focus = Focus::Editor;
            }
            StatusEvent::Cancelled => {
                self.focus = Focus::Editor;
            }
            StatusEvent::None => {}
        }
    }

    fn run_command(&mut self, command: &str) {
        match command.trim() {
            "" => {}
            "q" | "quit" => self.should_quit = true,
            "clear" => {
                self.editor.set_text("");
                self.status.set_text("cleared");
            }
            "tables" => {
                let message = match self.backend.list_tables() {
                    Ok(names) => names.join(", "),
                    Err(err) => format!("error: {}", err),
                };
                self.status.set_text(&message);
            }
            other => {
                if let Some(name) = other.strip_prefix("describe ") {
                    let message = match self.backend.describe_table(name.trim()) {
                        Ok(output) => output.summary(),
                        Err(err) => format!("error: {}", err),
                    };
                    self.status.set_text(&message);
                } else {
                    self.status.set_text(&format!("unknown command: {}", other));
                }
            }
        }
    }

    fn map_color(color: Color) -> style::Color {
        match color {
            Color::White => style::Color::White,
            Color::Violet => style::Color::Magenta,
            Color::Yellow => style::Color::Yellow,
            Color::Red => style::Color::Red,
            Color::Wheat => style::Color::DarkYellow,
            Color::Turquoise => style::Color::Cyan,
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = self.editor.render();
        let (cols, rows) = self.terminal.size();
        let (cols, rows) = (cols as usize, rows as usize);
        let text_rows = rows.saturating_sub(1);

        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::Hide,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All)
        )?;

        let mut row = 0;
        let mut width = 0;

        'spans: for span in &frame.spans {
            queue!(
                stdout,
                style::SetForegroundColor(Self::map_color(span.color))
            )?;

            for (idx, ch) in span.text.chars().enumerate() {
                if ch == '\n' {
                    row += 1;
                    width = 0;
                    if row >= text_rows {
                        break 'spans;
                    }
                    queue!(stdout, cursor::MoveTo(0, row as u16))?;
                    continue;
                }

                let ch_width = utils::char_width(ch);
                if width + ch_width > cols {
                    // 超出螢幕寬度的部分不畫
                    continue;
                }

                let selected = frame
                    .selection
                    .is_some_and(|(start, end)| row >= start && row <= end);
                let cursor_here = self.focus == Focus::Editor && span.cursor == Some(idx);

                if selected || cursor_here {
                    queue!(stdout, style::SetAttribute(Attribute::Reverse))?;
                }
                queue!(stdout, style::Print(ch))?;
                if selected || cursor_here {
                    queue!(stdout, style::SetAttribute(Attribute::NoReverse))?;
                }
                width += ch_width;
            }
        }

        self.draw_status_bar(cols, rows)?;
        stdout.flush()?;
        Ok(())
    }

    fn draw_status_bar(&self, cols: usize, rows: usize) -> Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1) as u16))?;
        queue!(stdout, style::SetBackgroundColor(style::Color::DarkGrey))?;
        queue!(stdout, style::SetForegroundColor(style::Color::White))?;

        let mode_tag = match self.editor.mode() {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
        };
        let render = self.status.render();
        let bar = format!(" {} | {}", mode_tag, render.text);

        // 依視覺寬度截斷並補滿整行
        let mut shown = String::new();
        let mut width = 0;
        for ch in bar.chars() {
            let ch_width = utils::char_width(ch);
            if width + ch_width > cols {
                break;
            }
            shown.push(ch);
            width += ch_width;
        }
        while width < cols {
            shown.push(' ');
            width += 1;
        }

        queue!(stdout, style::Print(shown))?;
        queue!(stdout, style::ResetColor)?;

        // 命令列持有焦點時顯示實體游標
        if self.focus == Focus::Status {
            if let Some(offset) = render.cursor {
                let prefix = format!(" {} | ", mode_tag).chars().count();
                queue!(
                    stdout,
                    cursor::MoveTo(
                        (prefix + offset).min(cols.saturating_sub(1)) as u16,
                        rows.saturating_sub(1) as u16,
                    ),
                    cursor::Show
                )?;
            }
        }

        Ok(())
    }
}
