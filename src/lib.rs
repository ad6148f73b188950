//! gdcolor - line-based GDScript syntax colorizer
//!
//! A [`GdScriptHighlighter`] colors one line of a [`TextBuffer`] at a
//! time, using the buffer's region table to carry strings and comments
//! across lines.

pub mod buffer;
pub mod error;
pub mod render;
pub mod syntax;
pub mod theme;
pub mod tokenizer;

use std::sync::Once;

pub use buffer::{TextBuffer, TextSource};
pub use error::{HighlightError, Result};
pub use syntax::{ColorMap, GdScriptHighlighter, SyntaxHighlighter};
pub use theme::Theme;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
