//! Syntax highlighting
//!
//! This module provides the GDScript line colorizer:
//! - Colors, spans and the per-line color map
//! - Color regions and the per-line region table
//! - Entry-region resolution and token classification

mod classifier;
mod color;
mod color_map;
mod highlight_state;
mod highlighter;
mod region;
mod resolver;

pub use color::{Color, Span};
pub use color_map::ColorMap;
pub use highlight_state::{HighlightState, ThemeSource};
pub use highlighter::{GdScriptHighlighter, HighlightSource, SyntaxHighlighter};
pub use region::{
    scan_line, LineRegions, Region, RegionColor, RegionId, RegionMarker, RegionRole, RegionTable,
};
pub use resolver::resolve_entry_region;
