//! Render entries into the visible table body
//!
//! Column layout is fixed-width to line up with the legacy documents:
//! serial left-justified to 4, name upper-cased to 28 (plus a hidden
//! duplicate padded to 50 that the scripts read back), discount to 9,
//! bonus to 44.

use std::fmt;

use crate::lib::entry::Entry;
use crate::lib::value::DiscountKind;

const BONUS_WIDTH: usize = 44;

/// The `<tbody>` contents: item rows, optional section headers, and the
/// total-products trailer
pub struct TableBody<'e> {
    entries: &'e [Entry],
    sections: bool,
}

impl<'e> TableBody<'e> {
    pub fn from(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            sections: false,
        }
    }

    /// Insert a header row at every letter boundary
    pub fn with_sections(mut self) -> Self {
        self.sections = true;
        self
    }
}

impl fmt::Display for TableBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if self.sections {
                let letter = entry.section();
                if current != Some(letter) {
                    current = Some(letter);
                    write_section_header(f, letter)?;
                }
            }
            write_item_row(f, idx + 1, entry)?;
        }
        write!(
            f,
            "<tr class=\"heading2\"> <td style=\" text-align: CENTER; border-radius: 0px 0px 16px 16px; padding-left: 10px;\" colspan=\"5\" >Total Products :\n  {}\n</td></tr>\n",
            self.entries.len()
        )
    }
}

fn write_section_header(f: &mut fmt::Formatter<'_>, letter: char) -> fmt::Result {
    write!(
        f,
        "<tr><td colspan=\"7\" align=\"center\" style=\" background: rgb(12,146,252); background: radial-gradient(circle, rgba(12,146,252,1) 50%, rgba(255,255,255,1) 100%); color:white;\" ><b>{}</b></td></tr>",
        letter
    )
}

fn write_item_row(f: &mut fmt::Formatter<'_>, serial: usize, entry: &Entry) -> fmt::Result {
    let (discount, bonus) = columns(entry);
    write!(
        f,
        "<tr class=\"item\"><td align=\"center\">\n {serial:<4}\n</td><td style=\" text-align: left;\" >\n          {name:<28}\n<input type=\"hidden\" id=\"itnameid{serial}\" value='{name:<50}'>\n</td><td align=\"center\">\n<input type=\"number\" min=\"0\" max=\"1000\" class=\"qty\" placeholder=\"Qty\" id=\"nameid{serial}\">\n</td><td align=\"center\">{discount}\n</td><td colspan=\"3\" align=\"center\">\n{bonus}\n</td></tr>\n",
        serial = serial,
        name = entry.upper(),
        discount = discount,
        bonus = bonus,
    )
}

/// Discount and bonus column text for one entry
///
/// Net prices are shown verbatim at their own width; everything else fits
/// the 9-wide discount column, with the percentage trailing note widening
/// it when no `/`-bonus claimed the bonus column.
fn columns(entry: &Entry) -> (String, String) {
    use DiscountKind::*;
    let bonus = entry.bonus();
    match entry.kind() {
        NetPrice(label, _) => (label.clone(), bonus_column(bonus)),
        TradePrice(label) => (format!("{:>9}", label), bonus_column(bonus)),
        Percentage(value, note) => {
            if !bonus.is_empty() {
                (format!("{:>9}", format!("{:.2}%", value)), bonus_column(bonus))
            } else if !note.is_empty() {
                let text = format!("{:.2}%{}", value, note);
                (format!("{:>width$}", text, width = 9 + note.len()), bonus_column(""))
            } else {
                (format!("{:>9}", format!("{:.2}%", value)), bonus_column(""))
            }
        }
        PlainNumber(value) => (
            format!("{:>9}", format!("{:.2}%", value)),
            bonus_column(bonus),
        ),
        Bare(label) => {
            let text = format!("0.00%{}", label);
            (
                format!("{:>width$}", text, width = 9 + label.len()),
                bonus_column(""),
            )
        }
    }
}

/// Left-justified to the bonus width, all spaces when unused
fn bonus_column(bonus: &str) -> String {
    format!("{:<width$}", bonus, width = BONUS_WIDTH)
}
