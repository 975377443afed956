//! sqed - 互動式 SQL 主控台的模態（vi 風格）編輯核心

// 導出公開模組
pub mod buffer;
pub mod cursor;
pub mod editor;
pub mod highlight;
pub mod input;
pub mod motion;
pub mod query;
pub mod status;

// 重新導出常用類型
pub use buffer::TextBuffer;
pub use cursor::Cursor;
pub use editor::{Editor, EditorEvent, Mode, RenderFrame, RenderSpan};
pub use input::{translate_key_event, Key};
pub use query::{QueryBackend, QueryOutput};
pub use status::{StatusEvent, StatusLine, StatusMode, StatusRender};
