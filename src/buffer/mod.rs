pub mod history;
pub mod text;

pub use history::{EditorState, History};
pub use text::{line_from_str, Line, TextBuffer};
