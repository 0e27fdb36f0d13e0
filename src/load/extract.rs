//! Recover entry lines from an already-generated offer document
//!
//! The reverse direction of the compiler: given a legacy document, pull the
//! item rows back out and re-emit the `Name----- value` text format, with an
//! optional across-the-board decrease of the advertised rates.
//!
//! The document is scanned with the same literal forward search the patcher
//! uses; the row/cell markup is part of the fixed template contract, so no
//! general HTML parsing is involved.

/// Scan settings
pub struct Options {
    /// amount subtracted from every percentage or plain-numeric rate
    pub decrease: f64,
    /// stock-format documents shift the name one cell to the right
    pub stock: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            decrease: 0.0,
            stock: false,
        }
    }
}

/// One recovered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub name: String,
    pub discount: String,
}

/// Pull all item rows out of a legacy document
///
/// A row needs at least four cells; when the discount cell reads `0.00%`
/// the bonus cell (if any) takes its place, as the rate then lives there.
pub fn scan(document: &str, opts: &Options) -> Vec<Extracted> {
    let name_idx = if opts.stock { 2 } else { 1 };
    let mut items = Vec::new();
    let mut cursor = 0;
    while let Some(pos) = document[cursor..].find("<tr class=\"item\"") {
        let start = cursor + pos;
        let end = document[start..]
            .find("</tr>")
            .map(|p| start + p)
            .unwrap_or(document.len());
        cursor = end;
        let cells = cells(&document[start..end]);
        if cells.len() < 4 {
            continue;
        }
        let name = title_case(&cells[name_idx]);
        let mut discount = cells[3].clone();
        if discount == "0.00%" && cells.len() >= 5 {
            discount = cells[4].clone();
        }
        items.push(Extracted {
            name,
            discount: adjust(&discount, opts.decrease),
        });
    }
    items
}

/// Re-emit recovered rows as data-file lines
///
/// The separator is appended to each value unless already present, so that
/// feeding the output back to the parser round-trips.
pub fn to_lines(items: &[Extracted], separator: &str) -> String {
    items
        .iter()
        .map(|item| {
            if !separator.is_empty() && !item.discount.ends_with(separator) {
                format!("{}----- {}{}", item.name, item.discount, separator)
            } else {
                format!("{}----- {}", item.name, item.discount)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text contents of each `<td>` of one row, tags stripped and trimmed
fn cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cursor = 0;
    while let Some(pos) = row[cursor..].find("<td") {
        let open = cursor + pos;
        let body = match row[open..].find('>') {
            Some(gt) => open + gt + 1,
            None => break,
        };
        let end = row[body..]
            .find("</td>")
            .map(|p| body + p)
            .unwrap_or(row.len());
        cells.push(strip_tags(&row[body..end]).trim().to_string());
        cursor = end;
    }
    cells
}

/// Drop every `<...>` span, keep the text in between
fn strip_tags(fragment: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => (),
        }
    }
    out
}

/// Capitalize letters that follow a non-letter, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

/// Decrease a rate, flooring at zero
///
/// Percentage rates keep whatever trailed the `%` sign; values that parse as
/// neither a percentage nor a plain number are kept untouched.
fn adjust(discount: &str, decrease: f64) -> String {
    match discount.find('%') {
        Some(cut) => {
            let trailing = &discount[cut + 1..];
            match discount[..cut].trim().parse::<f64>() {
                Ok(v) => format!("{:.2}%{}", (v - decrease).max(0.0), trailing),
                Err(_) => discount.to_string(),
            }
        }
        None => match discount.trim().parse::<f64>() {
            Ok(v) => format!("{:.2}", (v - decrease).max(0.0)),
            Err(_) => discount.to_string(),
        },
    }
}

#[cfg(test)]
mod test {
    use super::{adjust, scan, title_case, to_lines, Options};

    const DOC: &str = r#"<table><tbody>
<tr class="item"><td align="center">
 1
</td><td style=" text-align: left;" >
          PANADOL TABS
<input type="hidden" id="itnameid1" value='PANADOL TABS'>
</td><td align="center">
<input type="number" class="qty" id="nameid1">
</td><td align="center">   10.00%,
</td><td colspan="3" align="center">

</td></tr>
<tr class="item"><td align="center">
 2
</td><td style=" text-align: left;" >
          ASPIRIN
</td><td align="center">
</td><td align="center">0.00%
</td><td colspan="3" align="center">
5+5
</td></tr>
</tbody></table>"#;

    #[test]
    fn scans_rows() {
        let items = scan(DOC, &Options::default());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Panadol Tabs");
        assert_eq!(items[0].discount, "10.00%,");
    }

    #[test]
    fn zero_rate_falls_back_to_bonus_cell() {
        let items = scan(DOC, &Options::default());
        assert_eq!(items[1].name, "Aspirin");
        assert_eq!(items[1].discount, "5+5");
    }

    #[test]
    fn decrease_floors_at_zero() {
        assert_eq!(adjust("10.00%,", 1.0), "9.00%,");
        assert_eq!(adjust("0.50%", 1.0), "0.00%");
        assert_eq!(adjust("15", 1.0), "14.00");
        assert_eq!(adjust("TP,", 1.0), "TP,");
    }

    #[test]
    fn stock_format_shifts_the_name_cell() {
        let doc = r#"<tr class="item"><td>77</td><td>code</td><td>ZINCOVIT</td><td>140 NET</td></tr>"#;
        let items = scan(
            doc,
            &Options {
                stock: true,
                ..Options::default()
            },
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Zincovit");
        assert_eq!(items[0].discount, "140 NET");
    }

    #[test]
    fn lines_round_trip_the_separator() {
        let items = scan(DOC, &Options::default());
        let text = to_lines(&items, ",");
        assert_eq!(text, "Panadol Tabs----- 10.00%,\nAspirin----- 5+5,");
    }

    #[test]
    fn titles() {
        assert_eq!(title_case("PANADOL EXTRA 500MG"), "Panadol Extra 500Mg");
        assert_eq!(title_case("co-amoxiclav"), "Co-Amoxiclav");
    }
}
