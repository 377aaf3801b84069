//! Output file naming.
//!
//! Downloaded files are named
//! `<title>___<artist>__ytId__<catalogId>___trackId_<sourceTrackId>.<ext>`
//! so a later run can recover both identifiers from the directory listing
//! alone. [`build_file_name`] and [`IdentityPatterns`] must stay inverse.

use regex::Regex;

const MAX_COMPONENT_CHARS: usize = 200;
const ARTIST_SEPARATOR: &str = "___";
const CATALOG_MARKER: &str = "__ytId__";
const TRACK_MARKER: &str = "___trackId_";

/// Build the output file name for one track
pub fn build_file_name(
    title: &str,
    artist: &str,
    catalog_id: &str,
    source_track_id: &str,
    extension: &str,
) -> String {
    format!(
        "{}{}{}{}{}{}{}.{}",
        sanitize_component(title),
        ARTIST_SEPARATOR,
        sanitize_component(artist),
        CATALOG_MARKER,
        catalog_id,
        TRACK_MARKER,
        source_track_id,
        extension
    )
}

/// Make a title/artist safe to embed in a file name.
///
/// Removes characters that are invalid on common filesystems and control
/// characters, collapses whitespace runs to one space, trims, and caps the
/// result at 200 characters.
pub fn sanitize_component(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let capped: String = collapsed.chars().take(MAX_COMPONENT_CHARS).collect();
    let trimmed = capped.trim();

    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Patterns that pull identifiers back out of output file names
#[derive(Debug, Clone)]
pub struct IdentityPatterns {
    source_track_id: Regex,
    catalog_id: Regex,
}

impl IdentityPatterns {
    /// Compile the patterns for files with the given extension
    pub fn new(extension: &str) -> Result<Self, regex::Error> {
        let ext = regex::escape(extension.trim_start_matches('.'));
        // Leading greedy `.*` anchors on the LAST marker, so titles that
        // happen to contain a marker don't confuse extraction.
        let source_track_id = Regex::new(&format!(
            r"^.*{}(.+)\.(?i:{})$",
            regex::escape(TRACK_MARKER),
            ext
        ))?;
        let catalog_id = Regex::new(&format!(
            r"^.*{}(.+){}.*\.(?i:{})$",
            regex::escape(CATALOG_MARKER),
            regex::escape(TRACK_MARKER),
            ext
        ))?;
        Ok(Self {
            source_track_id,
            catalog_id,
        })
    }

    pub fn source_track_id<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        capture(&self.source_track_id, file_name)
    }

    pub fn catalog_id<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        capture(&self.catalog_id, file_name)
    }
}

fn capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_name() {
        let name = build_file_name("Song: Part 1", "AC/DC", "dQw4w9WgXcQ", "4uLU6hMC", "mp3");
        assert_eq!(
            name,
            "Song Part 1___ACDC__ytId__dQw4w9WgXcQ___trackId_4uLU6hMC.mp3"
        );
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("AC/DC"), "ACDC");
        assert_eq!(sanitize_component("  What  is\tthis?  "), "What is this");
        assert_eq!(sanitize_component("a<b>c|d\"e*f"), "abcdef");
        assert_eq!(sanitize_component("line\nbreak\u{7}"), "line break");
        assert_eq!(sanitize_component("???"), "Unknown");
        assert_eq!(sanitize_component("Björk – Jóga"), "Björk – Jóga");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_component(&long).chars().count(), 200);

        // Truncation never leaves trailing whitespace
        let spaced = format!("{} tail", "y".repeat(199));
        assert_eq!(sanitize_component(&spaced), "y".repeat(199));
    }

    #[test]
    fn test_extract_identifiers() {
        let patterns = IdentityPatterns::new("mp3").unwrap();
        let name = "Song___Artist__ytId__ab_c-DEF123___trackId_4uLU6hMCjMI75M1A2tKUQC.mp3";

        assert_eq!(patterns.catalog_id(name), Some("ab_c-DEF123"));
        assert_eq!(patterns.source_track_id(name), Some("4uLU6hMCjMI75M1A2tKUQC"));
    }

    #[test]
    fn test_extract_requires_matching_extension() {
        let patterns = IdentityPatterns::new("mp3").unwrap();
        let name = "Song___Artist__ytId__abc___trackId_X.opus";

        assert_eq!(patterns.catalog_id(name), None);
        assert_eq!(patterns.source_track_id(name), None);
        assert_eq!(
            patterns.source_track_id("Song___Artist__ytId__abc___trackId_X.MP3"),
            Some("X")
        );
    }

    #[test]
    fn test_extract_ignores_unrelated_files() {
        let patterns = IdentityPatterns::new("mp3").unwrap();
        assert_eq!(patterns.catalog_id("Some Song - Artist.mp3"), None);
        assert_eq!(patterns.source_track_id("Some Song - Artist.mp3"), None);
    }

    #[test]
    fn test_marker_inside_title() {
        let patterns = IdentityPatterns::new("m4a").unwrap();
        let name = build_file_name("My __ytId__ Song", "Band___trackId_", "real_id", "realTrack", "m4a");

        assert_eq!(patterns.catalog_id(&name), Some("real_id"));
        assert_eq!(patterns.source_track_id(&name), Some("realTrack"));
    }
}
