//! Render entries into the generated script blocks
//!
//! Four interactive functions consume the same entry list: the print
//! window, the order preview, the WhatsApp composer and the PDF row
//! builder. Each wants its own literal shapes, but every shape is derived
//! from the same classified entry, keyed by the same serial as the visible
//! table row, so the five representations can never disagree.

use std::fmt;

use crate::lib::entry::Entry;
use crate::lib::value::DiscountKind;

/// The three shapes of the per-entry variable block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarStyle {
    /// print and preview: plain two-decimal rates
    Full,
    /// WhatsApp composer: width-8 unquoted rates
    Simple,
    /// PDF row builder: `%`-suffixed rates plus a spacer variable
    CreateRows,
}

/// Variable declarations for one script function
pub struct Vars<'e> {
    entries: &'e [Entry],
    style: VarStyle,
}

impl<'e> Vars<'e> {
    pub fn full(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            style: VarStyle::Full,
        }
    }

    pub fn simple(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            style: VarStyle::Simple,
        }
    }

    pub fn create_rows(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            style: VarStyle::CreateRows,
        }
    }
}

impl fmt::Display for Vars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            let serial = idx + 1;
            if self.style != VarStyle::CreateRows {
                writeln!(f)?;
            }
            writeln!(f, "var ITMCODE{} = \"{}\";", serial, serial)?;
            writeln!(
                f,
                "var ITMNAME{} =document.getElementById(\"itnameid{}\").value;",
                serial, serial
            )?;
            writeln!(f, "var ITMBONUS{} = {};", serial, bonus_literal(entry))?;
            write_disc(f, self.style, serial, entry)?;
            writeln!(
                f,
                "var namevar{}=document.getElementById(\"nameid{}\").value;",
                serial, serial
            )?;
            if self.style == VarStyle::CreateRows {
                writeln!(f, "\nvar namevarr{} = \" \";", serial)?;
                match entry.kind() {
                    DiscountKind::TradePrice(_) => {
                        writeln!(f, "// Don't append % to non-numeric values like TP")?;
                    }
                    DiscountKind::NetPrice(..) => {
                        writeln!(f, "// Don't append % to NET values")?;
                    }
                    _ => (),
                }
            }
        }
        Ok(())
    }
}

/// The `ITMDISC` line, the one declaration whose literal shape varies
fn write_disc(
    f: &mut fmt::Formatter<'_>,
    style: VarStyle,
    serial: usize,
    entry: &Entry,
) -> fmt::Result {
    use DiscountKind::*;
    match entry.kind() {
        TradePrice(label) | NetPrice(label, _) => {
            writeln!(f, "var ITMDISC{} = \"{}\";", serial, label)
        }
        Percentage(..) | PlainNumber(_) | Bare(_) => {
            let rate = entry.kind().amount();
            match style {
                VarStyle::Full => writeln!(f, "var ITMDISC{} = \"{:.2}\";", serial, rate),
                VarStyle::Simple => {
                    writeln!(f, "var ITMDISC{} =       {:8.2}    ;", serial, rate)
                }
                VarStyle::CreateRows => {
                    writeln!(f, "var ITMDISC{} = \"{:.2}%\";", serial, rate)
                }
            }
        }
    }
}

/// The `ITMBONUS` literal: the `/`-bonus, else the percentage trailing
/// note, else (for a bare token) the token itself, else empty
fn bonus_literal(entry: &Entry) -> String {
    use DiscountKind::*;
    let text = if !entry.bonus().is_empty() {
        entry.bonus()
    } else {
        match entry.kind() {
            Percentage(_, note) => note.as_str(),
            Bare(label) => label.as_str(),
            NetPrice(..) | TradePrice(_) | PlainNumber(_) => "",
        }
    };
    format!("\"{}\"", text)
}

/// The four shapes of the per-entry conditional block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowTarget {
    /// `mywindow.document.write` rows
    Print,
    /// `myWindow.document.write` rows
    Preview,
    /// text-accumulator rows with header and total
    Whatsapp,
    /// `rows.push` rows
    Pdf,
}

/// Guarded row-emitting blocks for one script function
///
/// Each block skips its entry when the quantity field is empty, otherwise
/// bumps the running serial and emits the row.
pub struct Rows<'e> {
    entries: &'e [Entry],
    target: RowTarget,
}

impl<'e> Rows<'e> {
    pub fn print(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            target: RowTarget::Print,
        }
    }

    pub fn preview(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            target: RowTarget::Preview,
        }
    }

    pub fn whatsapp(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            target: RowTarget::Whatsapp,
        }
    }

    pub fn pdf(entries: &'e [Entry]) -> Self {
        Self {
            entries,
            target: RowTarget::Pdf,
        }
    }
}

impl fmt::Display for Rows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            let serial = idx + 1;
            let last = idx + 1 == self.entries.len();
            match self.target {
                RowTarget::Print => write_window_block(f, "mywindow", serial, entry)?,
                RowTarget::Preview => write_window_block(f, "myWindow", serial, entry)?,
                RowTarget::Whatsapp => write_whatsapp_block(f, serial, entry, last)?,
                RowTarget::Pdf => write_pdf_block(f, serial)?,
            }
        }
        Ok(())
    }
}

/// A verbatim label must not get the `%` suffix the window targets append
fn verbatim(entry: &Entry) -> bool {
    matches!(
        entry.kind(),
        DiscountKind::TradePrice(_) | DiscountKind::NetPrice(..)
    )
}

fn write_window_block(
    f: &mut fmt::Formatter<'_>,
    window: &str,
    serial: usize,
    entry: &Entry,
) -> fmt::Result {
    let disc_close = if verbatim(entry) {
        "'</td><td align=\"center\">'"
    } else {
        "' %</td><td align=\"center\">'"
    };
    write!(
        f,
        "if(namevar{serial}==0 ){{\n}}\nelse {{\n\nvar serial = (serial+1);\n {w}.document.write('<tr class=\"item\"><td align=\"center\">');\n {w}.document.write(ITMCODE{serial});\n {w}.document.write('</td><td style=\"text-align:left;\">');\n {w}.document.write(ITMNAME{serial});\n {w}.document.write('</td><td align=\"right\">');\n {w}.document.write(namevar{serial});\n {w}.document.write('</td><td align=\"right\">');\n {w}.document.write(ITMDISC{serial});\n {w}.document.write({disc_close});\n {w}.document.write(ITMBONUS{serial});\n {w}.document.write('</td></tr>');\n}}\n",
        serial = serial,
        w = window,
        disc_close = disc_close,
    )
}

/// Header fragment of the WhatsApp message, emitted under an
/// empty-accumulator guard so it lands exactly once, at the first entry
/// that is not skipped
const WHATSAPP_HEADER: &str = "*Name* :%0a*List no* :000085(1)%0a--------------------%0a|%20*Code*%20|%20*QTY*%20|%20*ITM*%20|%20*DISC*%20|%20*Bonus*%20|%0a--------------------%0a";

fn write_whatsapp_block(
    f: &mut fmt::Formatter<'_>,
    serial: usize,
    entry: &Entry,
    last: bool,
) -> fmt::Result {
    let total = if last {
        "+\"%0a*Total* *Items* : \"+serial"
    } else {
        ""
    };
    write!(
        f,
        "if(namevar{serial}==0 ){{\n}}\nelse {{\n// Add header once at the beginning if it hasn't been added yet\nif(text == \"\") {{\n text = \"{header}\";\n}}\nvar serial = (serial+1);\n\n",
        serial = serial,
        header = WHATSAPP_HEADER,
    )?;
    if verbatim(entry) {
        write!(
            f,
            " // For special values like TP, don't append %\n var discText = ITMDISC{serial};\n // Show bonus in bonus column if discount is 0, otherwise show empty\n var bonusText = ITMBONUS{serial};\n",
            serial = serial,
        )?;
    } else {
        write!(
            f,
            " // Show discount with % if non-zero, otherwise show empty in discount column\n var discText = ITMDISC{serial} != 0 ? ITMDISC{serial} + \"%\" : \"\";\n // Show bonus in bonus column if discount is 0, otherwise show empty\n var bonusText = ITMDISC{serial} == 0 ? ITMBONUS{serial} : \"\";\n",
            serial = serial,
        )?;
    }
    write!(
        f,
        " var text=text+\"|\"+ITMCODE{serial}+\"%20|%20\"+namevar{serial}+\"%20|%20\"+ITMNAME{serial}+\"%20|%20\"+discText+\"%20|%20\"+bonusText+\"%20|%0a--------------------%0a\"{total};\n}}\n",
        serial = serial,
        total = total,
    )
}

fn write_pdf_block(f: &mut fmt::Formatter<'_>, serial: usize) -> fmt::Result {
    write!(
        f,
        "if(namevar{serial}==0 ){{\n}}\nelse {{\n\nvar serial = (serial+1);\nrows.push([ITMCODE{serial}, ITMNAME{serial}, namevar{serial}, ITMDISC{serial}]);\n}}\n",
        serial = serial,
    )
}

#[cfg(test)]
mod test {
    use super::{Rows, Vars};
    use crate::lib::entry::Entry;

    macro_rules! entries {
        ( $( $name:expr => $value:expr ),* $(,)? ) => {
            vec![ $( Entry::new($name, $value) ),* ]
        };
    }

    #[test]
    fn full_vars_for_a_percentage() {
        let list = entries!["Panadol" => "10%"];
        let vars = Vars::full(&list).to_string();
        assert_eq!(
            vars,
            "\nvar ITMCODE1 = \"1\";\n\
             var ITMNAME1 =document.getElementById(\"itnameid1\").value;\n\
             var ITMBONUS1 = \"\";\n\
             var ITMDISC1 = \"10.00\";\n\
             var namevar1=document.getElementById(\"nameid1\").value;\n"
        );
    }

    #[test]
    fn one_group_per_entry_in_order() {
        let list = entries!["A" => "1%", "B" => "2%", "C" => "3%", "D" => "4%"];
        let vars = Vars::full(&list).to_string();
        assert_eq!(vars.matches("var ITMCODE").count(), 4);
        for serial in 1..=4 {
            assert!(vars.contains(&format!("var ITMCODE{} = \"{}\";", serial, serial)));
        }
        let p1 = vars.find("var ITMCODE1").unwrap();
        let p4 = vars.find("var ITMCODE4").unwrap();
        assert!(p1 < p4);
    }

    #[test]
    fn verbatim_labels_are_quoted_in_every_style() {
        let list = entries!["Aspirin" => "TP,/5+5", "Zincovit" => "140 NET"];
        for vars in [
            Vars::full(&list).to_string(),
            Vars::simple(&list).to_string(),
            Vars::create_rows(&list).to_string(),
        ] {
            assert!(vars.contains("var ITMDISC1 = \"TP,\";"));
            assert!(vars.contains("var ITMBONUS1 = \"5+5\";"));
            assert!(vars.contains("var ITMDISC2 = \"140 NET\";"));
            assert!(vars.contains("var ITMBONUS2 = \"\";"));
        }
    }

    #[test]
    fn numeric_shapes_vary_by_style() {
        let list = entries!["Panadol" => "10%"];
        assert!(Vars::full(&list).to_string().contains("var ITMDISC1 = \"10.00\";"));
        assert!(Vars::simple(&list)
            .to_string()
            .contains("var ITMDISC1 =          10.00    ;"));
        assert!(Vars::create_rows(&list)
            .to_string()
            .contains("var ITMDISC1 = \"10.00%\";"));
    }

    #[test]
    fn create_rows_spacer_and_comments() {
        let list = entries!["Aspirin" => "TP,", "Panadol" => "10%"];
        let vars = Vars::create_rows(&list).to_string();
        assert!(vars.contains("var namevarr1 = \" \";"));
        assert!(vars.contains("// Don't append % to non-numeric values like TP"));
        assert!(vars.contains("var namevarr2 = \" \";"));
        assert!(!vars.starts_with('\n'));
    }

    #[test]
    fn trailing_note_lands_in_the_bonus_variable() {
        let list = entries!["Panadol" => "10%,"];
        let vars = Vars::full(&list).to_string();
        assert!(vars.contains("var ITMBONUS1 = \",\";"));
    }

    #[test]
    fn window_blocks_suffix_percent_only_for_rates() {
        let list = entries!["Panadol" => "10%", "Aspirin" => "TP,"];
        let blocks = Rows::print(&list).to_string();
        assert!(blocks.contains("mywindow.document.write(ITMDISC1);\n mywindow.document.write(' %</td>"));
        assert!(blocks.contains("mywindow.document.write(ITMDISC2);\n mywindow.document.write('</td>"));
        let preview = Rows::preview(&list).to_string();
        assert!(preview.contains("myWindow.document.write"));
        assert!(!preview.contains("mywindow."));
    }

    #[test]
    fn whatsapp_blocks_guard_the_header_and_close_with_the_total() {
        let list = entries!["A" => "1%", "B" => "2%", "C" => "3%"];
        let blocks = Rows::whatsapp(&list).to_string();
        // the guard travels with every block, the header fires at most once
        assert_eq!(blocks.matches("if(text == \"\")").count(), 3);
        assert_eq!(blocks.matches("*Total* *Items*").count(), 1);
        let total = blocks.find("*Total* *Items*").unwrap();
        let last = blocks.find("namevar3").unwrap();
        assert!(total > last);
    }

    #[test]
    fn whatsapp_zero_rate_swaps_discount_and_bonus() {
        let list = entries!["Panadol" => "10%"];
        let blocks = Rows::whatsapp(&list).to_string();
        assert!(blocks.contains("var discText = ITMDISC1 != 0 ? ITMDISC1 + \"%\" : \"\";"));
        assert!(blocks.contains("var bonusText = ITMDISC1 == 0 ? ITMBONUS1 : \"\";"));
    }

    #[test]
    fn pdf_blocks_collect_rows() {
        let list = entries!["A" => "1%", "B" => "TP,"];
        let blocks = Rows::pdf(&list).to_string();
        assert_eq!(blocks.matches("rows.push").count(), 2);
        assert!(blocks.contains("rows.push([ITMCODE2, ITMNAME2, namevar2, ITMDISC2]);"));
    }
}
