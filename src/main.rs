mod console;
mod terminal;
mod utils;

use anyhow::{Context, Result};
use console::Console;
use std::path::PathBuf;

const HELP: &str = "\
sqed - a modal (vi-style) SQL console editor

USAGE:
  sqed [OPTIONS] [FILE]

ARGS:
  [FILE]              SQL file to load into the buffer

OPTIONS:
  -n, --line-numbers  Show the line number gutter
      --debug         Enable debug logging
  -h, --help          Print help
  -V, --version       Print version

KEYS:

  Normal mode:
    h j k l 0 $ w e b   Move around
    i a o O             Enter insert mode
    x D Y p r           Edit / yank / paste
    d y  + w $ d/y ('\"([{  Operator with a target (i = inside)
    u Ctrl+R            Undo / redo
    v                   Visual line selection
    q                   Leave the editor for the command line

  Visual mode:
    j k                 Grow / shrink the selection
    Ctrl+X              Run the selected SQL
    q                   Back to normal mode

  Command line:
    q | quit            Exit
    clear               Empty the buffer
    tables              List tables
    describe <name>     Describe a table
";

struct Args {
    file: Option<PathBuf>,
    debug: bool,
    line_numbers: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    if pargs.contains(["-V", "--version"]) {
        println!("sqed {}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    let args = Args {
        debug: pargs.contains("--debug"),
        line_numbers: pargs.contains(["-n", "--line-numbers"]),
        file: pargs.opt_free_from_str()?,
    };

    Ok(Some(args))
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // 初始化日誌
    utils::init_logger(args.debug);

    let initial_text = match &args.file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?,
        ),
        None => None,
    };

    // 設置 panic hook 以確保終端正常恢復
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::Terminal::exit_raw_mode();
        let _ = terminal::Terminal::show_cursor();
        original_hook(panic_info);
    }));

    let mut console = Console::new(args.line_numbers, initial_text)?;
    console.run()?;

    Ok(())
}
