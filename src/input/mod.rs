pub mod key;
pub mod keymap;

pub use key::Key;
pub use keymap::translate_key_event;
