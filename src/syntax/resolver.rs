//! Region carry-over
//!
//! The region table only holds per-line facts, so whether a line starts
//! inside a region is found by folding every earlier line in order.

use tracing::trace;

use super::region::{RegionId, RegionTable};

/// Region already open at column 0 of `line`
///
/// Replays lines `0..line`: a line entered outside any region
/// contributes its ending region; a line entered inside region `R` is
/// walked marker by marker so that `R` can close and another region can
/// open on the same line.
pub fn resolve_entry_region<T: RegionTable + ?Sized>(table: &T, line: usize) -> Option<RegionId> {
    let mut in_region = None;
    for i in 0..line {
        in_region = match in_region {
            None => table.ending_region(i),
            Some(open) => fold_open_line(table, i, open),
        };
    }
    trace!(line, ?in_region, "resolved entry region");
    in_region
}

/// State at the end of `line` when it starts inside `open`
fn fold_open_line<T: RegionTable + ?Sized>(table: &T, line: usize, open: RegionId) -> Option<RegionId> {
    let mut state = Some(open);
    // Markers before this column belong to a key already handled
    let mut after = 0;

    for marker in table.region_markers(line) {
        if marker.column < after {
            continue;
        }
        match state {
            Some(id) => {
                let region = table.region(id)?;
                if region.is_closed_by(id, marker) {
                    state = None;
                    after = marker.column + region.end_len();
                }
            }
            None => {
                let Some(region) = table.region(marker.region) else {
                    continue;
                };
                if region.line_only {
                    return None;
                }
                state = Some(marker.region);
                after = marker.column + region.start_len();
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{gdscript_regions, TextBuffer};
    use crate::syntax::{scan_line, LineRegions, Region, RegionMarker};

    const MULTILINE: RegionId = RegionId(1);
    const STRING: RegionId = RegionId(2);

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_text(&lines.join("\n")).with_gdscript_regions()
    }

    /// A table whose lines were each scanned without the region left
    /// open by the line before, so symmetric keys are all openers
    struct Isolated {
        regions: Vec<Region>,
        lines: Vec<LineRegions>,
    }

    impl Isolated {
        fn new(lines: &[&str]) -> Self {
            let regions = gdscript_regions();
            let lines = lines.iter().map(|l| scan_line(&regions, l, None)).collect();
            Self { regions, lines }
        }
    }

    impl RegionTable for Isolated {
        fn ending_region(&self, line: usize) -> Option<RegionId> {
            self.lines.get(line).and_then(|l| l.ending)
        }

        fn region_markers(&self, line: usize) -> &[RegionMarker] {
            self.lines.get(line).map(|l| l.markers.as_slice()).unwrap_or(&[])
        }

        fn region(&self, id: RegionId) -> Option<&Region> {
            self.regions.get(id.0)
        }

        fn region_starting_at(&self, _text: &str) -> Option<RegionId> {
            None
        }
    }

    #[test]
    fn test_carry_over_fold() {
        let buf = buffer(&["\"\"\"", "text", "\"\"\""]);
        assert_eq!(resolve_entry_region(&buf, 0), None);
        assert_eq!(resolve_entry_region(&buf, 1), Some(MULTILINE));
        // Line 2 still starts inside; its key closes the region
        assert_eq!(resolve_entry_region(&buf, 2), Some(MULTILINE));
        assert_eq!(resolve_entry_region(&buf, 3), None);
    }

    #[test]
    fn test_region_spanning_many_lines() {
        let mut lines = vec!["x = 1", "\"\"\" start"];
        lines.extend(std::iter::repeat("body").take(50));
        lines.push("end \"\"\"");
        lines.push("y = 2");
        let buf = buffer(&lines);
        assert_eq!(resolve_entry_region(&buf, 30), Some(MULTILINE));
        assert_eq!(resolve_entry_region(&buf, 53), None);
    }

    #[test]
    fn test_close_then_reopen_on_same_line() {
        let buf = buffer(&["\"\"\"", "end\"\"\" x = \"\"\"again", "tail"]);
        assert_eq!(resolve_entry_region(&buf, 2), Some(MULTILINE));
    }

    #[test]
    fn test_close_then_other_region_opens() {
        let buf = buffer(&["\"\"\"", "end\"\"\" x = \"abc", "tail"]);
        assert_eq!(resolve_entry_region(&buf, 2), Some(STRING));
    }

    #[test]
    fn test_close_then_comment() {
        let buf = buffer(&["\"\"\"", "end\"\"\" # \"\"\"", "tail"]);
        assert_eq!(resolve_entry_region(&buf, 2), None);
    }

    #[test]
    fn test_toggle_twice_on_one_line() {
        let buf = buffer(&["\"\"\"", "a\"\"\" b \"\"\" c \"\"\"", "tail"]);
        // close, open, close
        assert_eq!(resolve_entry_region(&buf, 2), None);
    }

    #[test]
    fn test_fold_over_isolated_table() {
        let table = Isolated::new(&["\"\"\"", "text", "\"\"\""]);
        // The closing key was recorded as an opener
        assert_eq!(table.region_markers(2)[0].role, crate::syntax::RegionRole::Start);
        assert_eq!(resolve_entry_region(&table, 2), Some(MULTILINE));
        assert_eq!(resolve_entry_region(&table, 3), None);

        let table = Isolated::new(&["\"\"\"", "end\"\"\" x = \"\"\"again", "tail"]);
        assert_eq!(resolve_entry_region(&table, 2), Some(MULTILINE));

        let table = Isolated::new(&["\"\"\"", "a\"\"\" b \"\"\" c \"\"\"", "tail"]);
        assert_eq!(resolve_entry_region(&table, 2), None);
    }
}
