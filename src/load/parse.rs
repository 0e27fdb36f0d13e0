//! Convert the contents of a data file into a list of entries

use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::entry::Entry;
use crate::load::error;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/pricelist.pest"]
pub struct PriceListParser;

// extract two-element inner
macro_rules! pair {
    ( $node:expr ) => {{
        let mut items = $node.into_inner().into_iter();
        let fst = items.next().unwrap_or_else(|| panic!("No 1st"));
        let snd = items.next().unwrap_or_else(|| panic!("No 2nd"));
        assert!(items.next().is_none());
        (fst, snd)
    }};
}

/// Get the entries of the data text loaded from `path`
///
/// The grammar accepts any text (lines without the separator are junk), so
/// the parser itself virtually never fails; what can go wrong is recorded in
/// `errs` as nonfatal warnings. Caller should determine the success of this
/// function by querying `errs`, not by looking at the returned list.
pub fn extract(path: &str, errs: &mut error::Record, contents: &str) -> Vec<Entry> {
    match PriceListParser::parse(Rule::document, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.make("Parsing failure").from(e.with_path(path));
            Vec::new()
        }
    }
}

/// Check all lines
///
/// Accumulates the well-formed rows into entries; a line that carries the
/// separator but no usable name is reported and skipped, everything else
/// without a separator is silently ignored.
fn validate(path: &str, errs: &mut error::Record, pairs: Pairs) -> Vec<Entry> {
    let mut entries = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::row => {
                if let Some(entry) = validate_row(path, errs, pair) {
                    entries.push(entry);
                }
            }
            Rule::junk => {
                if pair.as_str().contains("-----") {
                    let loc = (path, pair.as_span());
                    errs.make("Nameless entry")
                        .nonfatal()
                        .span(&loc, "this line")
                        .text("A separator was found but no name precedes it")
                        .hint("write the entry as 'Name----- value'");
                }
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    entries
}

/// Check a single `name-----value` row
///
/// The grammar guarantees the shape, not that the name survives trimming
fn validate_row(path: &str, errs: &mut error::Record, pair: Pair) -> Option<Entry> {
    let span = pair.as_span();
    let (name, value) = pair!(pair);
    assert_eq!(name.as_rule(), Rule::name);
    assert_eq!(value.as_rule(), Rule::value);
    let name = name.as_str().trim();
    if name.is_empty() {
        let loc = (path, span);
        errs.make("Nameless entry")
            .nonfatal()
            .span(&loc, "this line")
            .text("The name before the separator is blank")
            .hint("write the entry as 'Name----- value'");
        return None;
    }
    Some(Entry::new(name, value.as_str().trim()))
}

#[cfg(test)]
mod test {
    use super::extract;
    use crate::lib::value::DiscountKind;
    use crate::load::error::Record;

    macro_rules! parsed {
        ( $text:expr ) => {{
            let mut errs = Record::new();
            let entries = extract("<test>", &mut errs, $text);
            assert!(!errs.is_fatal(), "unexpected fatal error:\n{}", errs);
            (entries, errs)
        }};
    }

    #[test]
    fn basic_lines() {
        let (entries, _) = parsed!("Panadol-----10%\nAspirin-----TP,\nZincovit-----140 NET\n");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name(), "Panadol");
        assert_eq!(entries[0].raw(), "10%");
        assert_eq!(entries[1].kind(), &DiscountKind::TradePrice("TP,".to_string()));
        assert_eq!(entries[2].raw(), "140 NET");
    }

    #[test]
    fn blank_lines_and_junk_are_skipped() {
        let (entries, errs) = parsed!("\nPanadol-----10%\n\nsome stray note\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(errs.count_warnings(), 0);
    }

    #[test]
    fn arrow_prefix_is_stripped() {
        let (entries, _) = parsed!("12 → Panadol----- 10%");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "Panadol");
        assert_eq!(entries[0].raw(), "10%");
    }

    #[test]
    fn name_and_value_are_trimmed() {
        let (entries, _) = parsed!("  Panadol  -----  10% ");
        assert_eq!(entries[0].name(), "Panadol");
        assert_eq!(entries[0].raw(), "10%");
    }

    #[test]
    fn nameless_rows_warn() {
        let (entries, errs) = parsed!("-----10%\n   -----5%\nPanadol-----10%\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(errs.count_warnings(), 2);
    }

    #[test]
    fn value_may_be_empty() {
        let (entries, _) = parsed!("Panadol-----");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), &DiscountKind::Bare(String::new()));
    }

    #[test]
    fn crlf_input() {
        let (entries, _) = parsed!("Panadol-----10%\r\nAspirin-----TP,\r\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name(), "Aspirin");
    }
}
