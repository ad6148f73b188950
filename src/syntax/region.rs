//! Color regions
//!
//! A region is a delimited span (string, comment) that may cross lines
//! and is painted in a single color. Regions are registered once and
//! referenced by [`RegionId`]; a separate scan pass records, per line,
//! where region keys occur ([`RegionMarker`]) and which region is still
//! open at the end of the line. The highlighter reads those facts
//! through [`RegionTable`].

use regex::Regex;

use super::color::Color;

/// Stable identifier of a registered region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// Whether a marker opens or closes its region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRole {
    Start,
    End,
}

/// One region key occurrence on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionMarker {
    /// Character column of the key's first character
    pub column: usize,
    pub region: RegionId,
    pub role: RegionRole,
}

impl RegionMarker {
    pub fn new(column: usize, region: RegionId, role: RegionRole) -> Self {
        Self { column, region, role }
    }
}

/// How a region's color is chosen
///
/// Theme roles are looked up in the highlight state at coloring time,
/// so regions follow theme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionColor {
    Fixed(Color),
    Comment,
    String,
}

impl From<Color> for RegionColor {
    fn from(color: Color) -> Self {
        RegionColor::Fixed(color)
    }
}

/// A registered region definition
pub struct Region {
    /// Name for debugging
    pub name: String,
    /// Key that opens the region
    pub start_key: String,
    /// Key that closes the region (empty = end of line)
    pub end_key: String,
    /// Color for the whole span
    pub color: RegionColor,
    /// Whether the region always ends with its line
    pub line_only: bool,
    /// Escape character that suppresses a following key
    pub escape_char: Option<char>,
    start: Regex,
    end: Option<Regex>,
}

impl Region {
    /// Create a new region definition
    ///
    /// Returns `None` when the start key is empty.
    pub fn new(
        name: &str,
        start_key: &str,
        end_key: &str,
        color: impl Into<RegionColor>,
        line_only: bool,
    ) -> Option<Self> {
        if start_key.is_empty() {
            return None;
        }
        let start = Regex::new(&regex::escape(start_key)).ok()?;
        let end = if end_key.is_empty() {
            None
        } else {
            Some(Regex::new(&regex::escape(end_key)).ok()?)
        };
        Some(Self {
            name: name.to_string(),
            start_key: start_key.to_string(),
            end_key: end_key.to_string(),
            color: color.into(),
            line_only: line_only || end_key.is_empty(),
            escape_char: None,
            start,
            end,
        })
    }

    /// Create a region whose keys can be escaped
    pub fn with_escape(
        name: &str,
        start_key: &str,
        end_key: &str,
        color: impl Into<RegionColor>,
        line_only: bool,
        escape_char: char,
    ) -> Option<Self> {
        let mut region = Self::new(name, start_key, end_key, color, line_only)?;
        region.escape_char = Some(escape_char);
        Some(region)
    }

    /// Whether the same key opens and closes this region
    pub fn is_symmetric(&self) -> bool {
        self.start_key == self.end_key
    }

    /// Start key length in characters
    pub fn start_len(&self) -> usize {
        self.start_key.chars().count()
    }

    /// End key length in characters
    pub fn end_len(&self) -> usize {
        self.end_key.chars().count()
    }

    /// Whether `marker` closes this region once it is open
    ///
    /// A table scanned without the carried-in state records symmetric
    /// keys as openers, so any of their markers toggles.
    pub fn is_closed_by(&self, id: RegionId, marker: &RegionMarker) -> bool {
        marker.region == id && (marker.role == RegionRole::End || self.is_symmetric())
    }

    /// Find the first unescaped start key at or after byte `from`
    ///
    /// Returns the byte range of the key.
    pub fn find_start(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        self.find_unescaped(&self.start, text, from)
    }

    /// Find the first unescaped end key at or after byte `from`
    pub fn find_end(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let end = self.end.as_ref()?;
        self.find_unescaped(end, text, from)
    }

    fn find_unescaped(&self, pattern: &Regex, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut pos = from;
        while pos <= text.len() {
            let m = pattern.find_at(text, pos)?;
            if !self.is_escaped(text, m.start()) {
                return Some((m.start(), m.end()));
            }
            pos = m.end();
        }
        None
    }

    fn is_escaped(&self, text: &str, at: usize) -> bool {
        match self.escape_char {
            Some(escape) => {
                let count = text[..at].chars().rev().take_while(|&c| c == escape).count();
                count % 2 == 1
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("name", &self.name)
            .field("start_key", &self.start_key)
            .field("end_key", &self.end_key)
            .field("color", &self.color)
            .field("line_only", &self.line_only)
            .finish()
    }
}

/// Per-line region facts produced by the scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRegions {
    /// Key occurrences ordered by column
    pub markers: Vec<RegionMarker>,
    /// Region left open at the end of the line
    pub ending: Option<RegionId>,
}

/// Read-only access to regions and their per-line table
pub trait RegionTable {
    /// Region still open at the end of `line`, if any
    fn ending_region(&self, line: usize) -> Option<RegionId>;

    /// Region key markers on `line`, ordered by column
    fn region_markers(&self, line: usize) -> &[RegionMarker];

    /// Definition of a registered region
    fn region(&self, id: RegionId) -> Option<&Region>;

    /// Region whose start key begins `text` (longest key wins)
    fn region_starting_at(&self, text: &str) -> Option<RegionId>;
}

/// Scan one line and record its region markers
///
/// `entry` is the region open at the start of the line. A line entered
/// inside a region records only that region's end key (if any). The
/// leftmost start key wins; on a tie the longest key wins. Inside a
/// region only its end key is searched for.
pub fn scan_line(regions: &[Region], text: &str, entry: Option<RegionId>) -> LineRegions {
    let mut out = LineRegions {
        markers: Vec::new(),
        ending: entry.filter(|id| regions.get(id.0).is_some_and(|r| !r.line_only)),
    };
    let mut pos = 0;
    let column_of = |byte: usize| text[..byte].chars().count();

    loop {
        if let Some(id) = out.ending {
            let region = &regions[id.0];
            match region.find_end(text, pos) {
                Some((start, end)) => {
                    out.markers.push(RegionMarker::new(column_of(start), id, RegionRole::End));
                    out.ending = None;
                    pos = end;
                }
                None => break,
            }
        } else {
            let best = regions
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.find_start(text, pos).map(|(s, e)| (s, e, i)))
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
            match best {
                Some((start, end, i)) => {
                    out.markers.push(RegionMarker::new(column_of(start), RegionId(i), RegionRole::Start));
                    out.ending = Some(RegionId(i));
                    pos = end;
                }
                None => break,
            }
        }
    }

    if out.ending.is_some_and(|id| regions[id.0].line_only) {
        out.ending = None;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

    fn regions() -> Vec<Region> {
        vec![
            Region::new("comment", "#", "", GRAY, true).unwrap(),
            Region::with_escape("doc", "\"\"\"", "\"\"\"", GRAY, false, '\\').unwrap(),
            Region::with_escape("string", "\"", "\"", Color::WHITE, false, '\\').unwrap(),
        ]
    }

    #[test]
    fn test_region_requires_start_key() {
        assert!(Region::new("bad", "", "x", GRAY, false).is_none());
        assert!(Region::new("eol", "#", "", GRAY, false).unwrap().line_only);
    }

    #[test]
    fn test_find_end_respects_escape() {
        let region = Region::with_escape("string", "\"", "\"", GRAY, false, '\\').unwrap();
        assert_eq!(region.find_end(r#"a\"b""#, 0), Some((4, 5)));
        assert_eq!(region.find_end(r#"a\\"b"#, 0), Some((3, 4)));
    }

    #[test]
    fn test_scan_string_and_comment() {
        let line = scan_line(&regions(), r#"x = "a # b" # real"#, None);
        assert_eq!(
            line.markers,
            vec![
                RegionMarker::new(4, RegionId(2), RegionRole::Start),
                RegionMarker::new(10, RegionId(2), RegionRole::End),
                RegionMarker::new(12, RegionId(0), RegionRole::Start),
            ]
        );
        assert_eq!(line.ending, None);
    }

    #[test]
    fn test_scan_prefers_longest_key() {
        let line = scan_line(&regions(), "\"\"\"doc", None);
        assert_eq!(line.markers, vec![RegionMarker::new(0, RegionId(1), RegionRole::Start)]);
        assert_eq!(line.ending, Some(RegionId(1)));
    }

    #[test]
    fn test_scan_symmetric_alternates() {
        let line = scan_line(&regions(), "\"\"\"a\"\"\" \"\"\"", None);
        let roles: Vec<RegionRole> = line.markers.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![RegionRole::Start, RegionRole::End, RegionRole::Start]);
        assert_eq!(line.ending, Some(RegionId(1)));
    }

    #[test]
    fn test_scan_counts_characters() {
        let line = scan_line(&regions(), "é = \"x\"", None);
        assert_eq!(line.markers[0].column, 4);
    }

    #[test]
    fn test_scan_with_carried_region() {
        let line = scan_line(&regions(), "end\"\"\" # x", Some(RegionId(1)));
        assert_eq!(
            line.markers,
            vec![
                RegionMarker::new(3, RegionId(1), RegionRole::End),
                RegionMarker::new(7, RegionId(0), RegionRole::Start),
            ]
        );
        assert_eq!(line.ending, None);

        let line = scan_line(&regions(), "still inside", Some(RegionId(1)));
        assert!(line.markers.is_empty());
        assert_eq!(line.ending, Some(RegionId(1)));
    }

    #[test]
    fn test_symmetric_marker_closes() {
        let regions = regions();
        let start = RegionMarker::new(0, RegionId(1), RegionRole::Start);
        assert!(regions[1].is_closed_by(RegionId(1), &start));
        assert!(!regions[1].is_closed_by(RegionId(2), &start));
    }
}
