#![allow(clippy::module_inception)]

use std::{fs, path::Path, rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// Line number and file name of a source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=turtle_lexer=debug`
/// or `RUST_LOG=turtle_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Text of the 1-based `line` in `file`, without its line terminator.
pub fn get_source_line(file: &Path, line: u32) -> Option<String> {
    let content = fs::read_to_string(file).ok()?;
    let index = (line as usize).checked_sub(1)?;

    content
        .lines()
        .nth(index)
        .map(|text| text.trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    #[test]
    fn test_get_source_line() {
        let file = Path::new("tests/programs/square.logo");

        assert_eq!(
            super::get_source_line(file, 1).as_deref(),
            Some("% Draws a shrinking square spiral")
        );
        assert_eq!(
            super::get_source_line(file, 5).as_deref(),
            Some("  fd side rt 90")
        );
        assert_eq!(super::get_source_line(file, 0), None);
        assert_eq!(super::get_source_line(file, 100), None);
    }

    #[test]
    fn test_render_error() {
        let file = Path::new("tests/programs/broken.logo");
        let error = crate::lexer::lexer::Scanner::open_default(file)
            .and_then(|mut scanner| loop {
                if scanner.scan()?.is_eof() {
                    break Ok(());
                }
            })
            .unwrap_err();

        let rendered = super::render_error(&error, file);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "Error: MalformedNumber (Expected a digit after `9.`, found `x`)"
        );
        assert_eq!(lines[1], "-> tests/programs/broken.logo");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | rt 9.x");
    }
}

pub fn render_error(error: &Error, file: &Path) -> String {
    /*
        Error: message
        -> square.logo
          |
        2 | rt 9.x
    */

    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };

    rendered.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    match get_source_line(file, position.0) {
        Some(line_text) => {
            rendered.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        }
        None => rendered.push_str(&format!("{} | {}\n", line_string, error)),
    }

    rendered
}

pub fn display_error(error: &Error, file: &Path) {
    eprint!("{}", render_error(error, file));
}
