//! Surgical region replacement inside the template document
//!
//! The template is an opaque legacy document; the only structure this module
//! relies on is a fixed set of literal anchors delimiting the regions that
//! get regenerated. Every span is located against the original text before
//! any splicing happens, so a fragment that happens to contain anchor-like
//! text can never shift a later region.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// The eight patchable regions of the document, in no particular order
///
/// Identified by the interactive function they feed: the printable window,
/// the WhatsApp composer, the order preview and the PDF row builder, plus
/// the visible table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Region {
    /// the `<tbody>` holding the item rows
    TableBody = 0,
    /// variable block of the print function
    PrintVars,
    /// row-emitting conditionals of the print function
    PrintRows,
    /// variable block and conditionals of the WhatsApp composer
    WhatsappBody,
    /// variable block of the preview function
    PreviewVars,
    /// row-emitting conditionals of the preview function
    PreviewRows,
    /// variable block of the PDF row builder
    PdfVars,
    /// row-collecting conditionals of the PDF row builder
    PdfRows,
}

impl Region {
    pub const COUNT: usize = 8;

    /// Human-readable region name for diagnostics
    pub fn name(self) -> &'static str {
        use Region::*;
        match self {
            TableBody => "table body",
            PrintVars => "print variables",
            PrintRows => "print rows",
            WhatsappBody => "WhatsApp body",
            PreviewVars => "preview variables",
            PreviewRows => "preview rows",
            PdfVars => "PDF variables",
            PdfRows => "PDF rows",
        }
    }

    /// The literal markers delimiting this region
    fn anchor(self) -> Anchor {
        use Region::*;
        match self {
            TableBody => Anchor {
                start: &["<tbody id=\"myTable\">"],
                inclusive: false,
                end: "</tbody>",
            },
            PrintVars => Anchor {
                start: &["function Printf(){", "var serial = 0;\n"],
                inclusive: false,
                end: "\n\n\n var mywindow = window.open",
            },
            PrintRows => Anchor {
                start: &["function Printf(){", "if(namevar1==0 )"],
                inclusive: true,
                end: " mywindow.document.write('<tr class=\"heading2\"> <td",
            },
            WhatsappBody => Anchor {
                start: &["function mywht(){", "var serial = 0;\n"],
                inclusive: false,
                end: "\nvar url=\"https://wa.me",
            },
            PreviewVars => Anchor {
                start: &["function myfun(){", "var serial = 0;\n"],
                inclusive: false,
                end: "\nmyWindow=window.open",
            },
            PreviewRows => Anchor {
                start: &["function myfun(){", "if(namevar1==0 )"],
                inclusive: true,
                end: " myWindow.document.write('<tr class=\"heading2\"> <td",
            },
            PdfVars => Anchor {
                start: &["function createRows(count) {", "  const rows = [];\n\n"],
                inclusive: false,
                end: "var serial = 0;",
            },
            PdfRows => Anchor {
                start: &["function createRows(count) {", "if(namevar1==0 )"],
                inclusive: true,
                end: "\nvar totitem=",
            },
        }
    }
}

/// A pair of markers delimiting one region
///
/// The `start` literals are located left to right, each searched for after
/// the previous one; the region opens after the last of them, or at its
/// first byte when `inclusive` (for regions whose old content begins with a
/// recognizable literal rather than following one).
struct Anchor {
    start: &'static [&'static str],
    inclusive: bool,
    end: &'static str,
}

/// Ways in which a template can fail the anchor contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchError {
    /// one of the fixed anchor pairs cannot be located
    MissingAnchor(Region),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::MissingAnchor(region) => {
                write!(f, "cannot locate the {} region in the template", region.name())
            }
        }
    }
}

impl PatchError {
    /// What message to show to help fix the template
    pub fn fix_hint(self) -> String {
        match self {
            PatchError::MissingAnchor(_) => {
                "use a template generated from the original offer-list layout".to_string()
            }
        }
    }
}

/// Replace every region with its fragment, leaving all other text untouched
///
/// Fails closed: if any anchor pair is missing nothing is returned, never a
/// partially patched document.
pub fn patch(template: &str, fragments: &[String; Region::COUNT]) -> Result<String, PatchError> {
    let mut spans = Vec::with_capacity(Region::COUNT);
    for idx in 0..Region::COUNT {
        let region = Region::from_usize(idx).unwrap();
        let (lo, hi) = locate(template, region)?;
        spans.push((lo, hi, &fragments[idx]));
    }
    spans.sort_by_key(|&(lo, _, _)| lo);

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for (lo, hi, fragment) in spans {
        assert!(cursor <= lo, "overlapping template regions");
        out.push_str(&template[cursor..lo]);
        out.push_str(fragment);
        cursor = hi;
    }
    out.push_str(&template[cursor..]);
    Ok(out)
}

/// Byte span of one region within the original template
fn locate(template: &str, region: Region) -> Result<(usize, usize), PatchError> {
    let anchor = region.anchor();
    let mut open = 0;
    let mut cursor = 0;
    for marker in anchor.start {
        match template[cursor..].find(marker) {
            Some(pos) => {
                open = cursor + pos;
                cursor = open + marker.len();
            }
            None => return Err(PatchError::MissingAnchor(region)),
        }
    }
    let lo = if anchor.inclusive { open } else { cursor };
    match template[cursor..].find(anchor.end) {
        Some(pos) => Ok((lo, cursor + pos)),
        None => Err(PatchError::MissingAnchor(region)),
    }
}

/// Replace the text between a marker sequence and a closing literal
///
/// Best-effort single substitution for scalar template fields; returns
/// whether the markers were found.
pub fn splice_between(document: &mut String, start: &[&str], end: &str, replacement: &str) -> bool {
    let mut cursor = 0;
    for marker in start {
        match document[cursor..].find(marker) {
            Some(pos) => cursor = cursor + pos + marker.len(),
            None => return false,
        }
    }
    match document[cursor..].find(end) {
        Some(pos) => {
            document.replace_range(cursor..cursor + pos, replacement);
            true
        }
        None => false,
    }
}

/// Replace a whitespace-then-digit-run right after a marker
///
/// Covers the scalar fields written as `<label> 000123` in the document
/// body; `extra` widens the digit run to accept date separators.
pub fn splice_number(
    document: &mut String,
    start: &[&str],
    extra: &[char],
    replacement: &str,
) -> bool {
    let mut cursor = 0;
    for marker in start {
        match document[cursor..].find(marker) {
            Some(pos) => cursor = cursor + pos + marker.len(),
            None => return false,
        }
    }
    let tail = &document[cursor..];
    let skip = tail.len() - tail.trim_start().len();
    let run = tail[skip..]
        .find(|c: char| !c.is_ascii_digit() && !extra.contains(&c))
        .unwrap_or(tail.len() - skip);
    if run == 0 {
        return false;
    }
    document.replace_range(cursor..cursor + skip + run, replacement);
    true
}

#[cfg(test)]
mod test {
    use super::{locate, patch, splice_between, splice_number, PatchError, Region};

    fn fragments() -> [String; Region::COUNT] {
        let mut fragments: [String; Region::COUNT] = Default::default();
        for (idx, f) in fragments.iter_mut().enumerate() {
            *f = format!("[{}]", Region::from_usize(idx).unwrap().name());
        }
        fragments
    }

    use num_traits::FromPrimitive;

    #[test]
    fn all_regions_located_and_replaced() {
        let template = crate::emit::test_template();
        let patched = patch(&template, &fragments()).unwrap();
        for idx in 0..Region::COUNT {
            let tag = format!("[{}]", Region::from_usize(idx).unwrap().name());
            assert!(patched.contains(&tag), "missing fragment {}", tag);
        }
        // text outside the regions is untouched
        assert!(patched.contains("<tbody id=\"myTable\">[table body]</tbody>"));
        assert!(patched.contains("var url=\"https://wa.me"));
        assert!(patched.contains("var totitem="));
    }

    #[test]
    fn missing_anchor_fails_closed() {
        let template = crate::emit::test_template().replace("<tbody id=\"myTable\">", "<tbody>");
        assert_eq!(
            patch(&template, &fragments()),
            Err(PatchError::MissingAnchor(Region::TableBody))
        );
    }

    #[test]
    fn inclusive_regions_start_at_the_marker() {
        let template = crate::emit::test_template();
        let (lo, _) = locate(&template, Region::PrintRows).unwrap();
        assert!(template[lo..].starts_with("if(namevar1==0 )"));
    }

    #[test]
    fn splice_between_is_best_effort() {
        let mut doc = String::from("var LISTNO_GLOBAL = \"000001\";");
        assert!(splice_between(&mut doc, &["var LISTNO_GLOBAL = \""], "\"", "000085"));
        assert_eq!(doc, "var LISTNO_GLOBAL = \"000085\";");
        assert!(!splice_between(&mut doc, &["var NOPE = \""], "\"", "x"));
        assert_eq!(doc, "var LISTNO_GLOBAL = \"000085\";");
    }

    #[test]
    fn splice_number_spans_the_digit_run() {
        let mut doc = String::from("<b>List No : </b>\n   000001\nrest");
        assert!(splice_number(&mut doc, &["<b>List No : </b>"], &[], "\n000085"));
        assert_eq!(doc, "<b>List No : </b>\n000085\nrest");

        let mut doc = String::from("<b>List Date </b> :\n01/01/2020 end");
        assert!(splice_number(&mut doc, &["<b>List Date </b> :"], &['/'], "\n07/08/2026"));
        assert_eq!(doc, "<b>List Date </b> :\n07/08/2026 end");
    }
}
