//! Text buffer - lines of source with their region table
//!
//! The buffer owns the registered color regions and keeps one
//! [`LineRegions`] per line, refreshed by the region scan pass whenever
//! a line changes.

use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;
use crate::syntax::{scan_line, LineRegions, Region, RegionColor, RegionId, RegionMarker, RegionTable};

/// Read-only access to line text
pub trait TextSource {
    /// Number of lines
    fn line_count(&self) -> usize;

    /// Text of a line (without trailing newline)
    fn line_text(&self, line: usize) -> Option<&str>;
}

/// A single line of text and its scanned regions
#[derive(Debug, Clone, Default)]
struct Line {
    text: String,
    /// Region open when this line was last scanned
    entry: Option<RegionId>,
    regions: LineRegions,
}

impl Line {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

/// A buffer of lines with per-line region facts
#[derive(Debug)]
pub struct TextBuffer {
    /// Lines of text (always at least one)
    lines: Vec<Line>,
    /// Registered regions, indexed by `RegionId`
    regions: Vec<Region>,
}

impl TextBuffer {
    /// Create a new buffer with one empty line and no regions
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            regions: Vec::new(),
        }
    }

    /// Create a buffer from text, splitting on newlines
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded buffer");
        Ok(Self::from_text(&content))
    }

    /// Register the GDScript color regions
    pub fn with_gdscript_regions(mut self) -> Self {
        for region in gdscript_regions() {
            self.add_region(region);
        }
        self
    }

    /// Register a region and rescan every line
    pub fn add_region(&mut self, region: Region) -> RegionId {
        let id = RegionId(self.regions.len());
        debug!(name = %region.name, ?id, "registered region");
        self.regions.push(region);
        self.rescan_all();
        id
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: &str) {
        self.lines = if text.is_empty() {
            vec![Line::default()]
        } else {
            text.lines().map(Line::new).collect()
        };
        self.rescan_all();
    }

    /// Replace the text of one line
    ///
    /// Returns false if the line does not exist.
    pub fn set_line(&mut self, idx: usize, text: &str) -> bool {
        if idx >= self.lines.len() {
            return false;
        }
        self.lines[idx].text = text.to_string();
        self.rescan(idx);
        true
    }

    /// Insert a line before `idx` (or append when `idx == line_count`)
    pub fn insert_line(&mut self, idx: usize, text: &str) -> bool {
        if idx > self.lines.len() {
            return false;
        }
        self.lines.insert(idx, Line::new(text));
        self.rescan(idx);
        true
    }

    /// Remove a line, keeping at least one
    pub fn remove_line(&mut self, idx: usize) -> bool {
        if idx < self.lines.len() && self.lines.len() > 1 {
            self.lines.remove(idx);
            if idx < self.lines.len() {
                self.rescan(idx);
            }
            true
        } else {
            false
        }
    }

    /// Rescan `idx` and every following line whose entry region changed
    fn rescan(&mut self, idx: usize) {
        for i in idx..self.lines.len() {
            let entry = if i == 0 { None } else { self.lines[i - 1].regions.ending };
            if i > idx && self.lines[i].entry == entry {
                break;
            }
            let regions = scan_line(&self.regions, &self.lines[i].text, entry);
            trace!(line = i, markers = regions.markers.len(), ending = ?regions.ending, "rescanned line");
            self.lines[i].entry = entry;
            self.lines[i].regions = regions;
        }
    }

    fn rescan_all(&mut self) {
        let mut entry = None;
        for line in &mut self.lines {
            line.entry = entry;
            line.regions = scan_line(&self.regions, &line.text, entry);
            entry = line.regions.ending;
        }
        debug!(lines = self.lines.len(), "rescanned buffer");
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| l.text.as_str())
    }
}

impl RegionTable for TextBuffer {
    fn ending_region(&self, line: usize) -> Option<RegionId> {
        self.lines.get(line).and_then(|l| l.regions.ending)
    }

    fn region_markers(&self, line: usize) -> &[RegionMarker] {
        self.lines
            .get(line)
            .map(|l| l.regions.markers.as_slice())
            .unwrap_or(&[])
    }

    fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    fn region_starting_at(&self, text: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, r)| text.starts_with(r.start_key.as_str()))
            .max_by_key(|(_, r)| r.start_key.len())
            .map(|(i, _)| RegionId(i))
    }
}

/// The GDScript color regions
///
/// `#` comments run to end of line, `"""` blocks may span lines and use
/// the comment color, `"` and `'` strings honor `\` escapes.
pub fn gdscript_regions() -> Vec<Region> {
    [
        Region::new("comment", "#", "", RegionColor::Comment, true),
        Region::with_escape("multiline", "\"\"\"", "\"\"\"", RegionColor::Comment, false, '\\'),
        Region::with_escape("string", "\"", "\"", RegionColor::String, false, '\\'),
        Region::with_escape("string_single", "'", "'", RegionColor::String, false, '\\'),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::RegionRole;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::from_text(text).with_gdscript_regions()
    }

    #[test]
    fn test_from_text() {
        let buf = TextBuffer::from_text("a\nb\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_text(1), Some("b"));
        assert_eq!(buf.line_text(2), None);
        assert_eq!(TextBuffer::from_text("").line_count(), 1);
    }

    #[test]
    fn test_regions_scanned_on_register() {
        let buf = buffer("x = 1\n\"\"\"doc\nend\"\"\"");
        assert_eq!(buf.ending_region(0), None);
        assert_eq!(buf.ending_region(1), Some(RegionId(1)));
        // Entered inside the region, the key is recorded as its far end
        assert_eq!(buf.region_markers(2)[0].role, RegionRole::End);
        assert_eq!(buf.ending_region(2), None);
        assert!(buf.region_markers(7).is_empty());
    }

    #[test]
    fn test_edit_propagates_entry_region() {
        let mut buf = buffer("a = 1\nb = \"x\"\nc = 2");
        assert_eq!(buf.region_markers(1).len(), 2);

        assert!(buf.set_line(0, "\"\"\" open"));
        assert_eq!(buf.ending_region(2), Some(RegionId(1)));
        // Inside the multi-line region the string quotes are not keys
        assert!(buf.region_markers(1).is_empty());

        assert!(buf.insert_line(2, "\"\"\""));
        assert_eq!(buf.ending_region(2), None);
        assert_eq!(buf.ending_region(3), None);

        assert!(buf.remove_line(2));
        assert_eq!(buf.ending_region(2), Some(RegionId(1)));
    }

    #[test]
    fn test_edit_rescans_line() {
        let mut buf = buffer("x = 1");
        assert!(buf.region_markers(0).is_empty());
        assert!(buf.set_line(0, "x = 1 # note"));
        assert_eq!(buf.region_markers(0).len(), 1);
        assert!(buf.insert_line(1, "'''"));
        assert_eq!(buf.line_count(), 2);
        assert!(!buf.set_line(5, "nope"));
        assert!(buf.remove_line(1));
        assert!(!buf.remove_line(0));
    }

    #[test]
    fn test_region_starting_at_prefers_longest() {
        let buf = buffer("");
        assert_eq!(buf.region_starting_at("\"\"\" tail"), Some(RegionId(1)));
        assert_eq!(buf.region_starting_at("\"x"), Some(RegionId(2)));
        assert_eq!(buf.region_starting_at("# c"), Some(RegionId(0)));
        assert_eq!(buf.region_starting_at("x"), None);
    }
}
