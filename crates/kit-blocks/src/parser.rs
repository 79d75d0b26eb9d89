//! Locating marker-delimited regions.

/// The opening and closing markers of a managed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

impl MarkerPair {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }
}

/// A located region, as byte offsets into the searched content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Offset of the first byte of the start marker.
    pub start: usize,
    /// Offset one past the last byte of the end marker.
    pub end: usize,
    /// Text strictly between the markers, without the newline that
    /// immediately follows the start marker or precedes the end marker.
    pub inner: String,
}

/// Find the first region delimited by `markers`.
///
/// The end marker must follow the start marker. A start marker without a
/// matching end marker does not form a region.
///
/// # Example
/// ```
/// use kit_blocks::{MarkerPair, find_region};
///
/// const MARKERS: MarkerPair = MarkerPair::new("<!-- S -->", "<!-- E -->");
/// let content = "intro\n<!-- S -->\nbody\n<!-- E -->\noutro";
///
/// let region = find_region(content, MARKERS).unwrap();
/// assert_eq!(region.inner, "body");
/// assert_eq!(&content[region.end..], "\noutro");
/// ```
pub fn find_region(content: &str, markers: MarkerPair) -> Option<Region> {
    let start = content.find(markers.start)?;
    let inner_start = start + markers.start.len();
    let Some(offset) = content[inner_start..].find(markers.end) else {
        tracing::warn!(marker = markers.start, "Start marker has no matching end marker");
        return None;
    };
    let inner_end = inner_start + offset;
    let end = inner_end + markers.end.len();

    let raw = &content[inner_start..inner_end];
    let raw = raw.strip_prefix('\n').unwrap_or(raw);
    let raw = raw.strip_suffix('\n').unwrap_or(raw);

    Some(Region {
        start,
        end,
        inner: raw.to_string(),
    })
}

/// Whether `content` contains a complete region.
pub fn has_region(content: &str, markers: MarkerPair) -> bool {
    find_region(content, markers).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: MarkerPair = MarkerPair::new("<!-- START -->", "<!-- END -->");

    #[test]
    fn no_markers_no_region() {
        assert!(find_region("plain text", MARKERS).is_none());
    }

    #[test]
    fn dangling_start_is_not_a_region() {
        assert!(!has_region("<!-- START -->\nbody", MARKERS));
    }

    #[test]
    fn end_before_start_is_not_a_region() {
        assert!(!has_region("<!-- END -->\n<!-- START -->", MARKERS));
    }

    #[test]
    fn offsets_cover_both_markers() {
        let content = "a\n<!-- START -->\nx\n<!-- END -->\nb";
        let region = find_region(content, MARKERS).unwrap();
        assert_eq!(&content[region.start..region.end], "<!-- START -->\nx\n<!-- END -->");
    }

    #[test]
    fn empty_inner_region() {
        let region = find_region("<!-- START --><!-- END -->", MARKERS).unwrap();
        assert_eq!(region.inner, "");
    }
}
