//! Classification of raw discount tokens, with a focus on irregular notation
//!
//! Supplier lists write the value column in at least five shapes: `10%`,
//! `140 NET`, `TP,`, a bare number, or free text. Classification is total:
//! every input maps to exactly one [`DiscountKind`], the worst case being
//! the `Bare` fallback. Nothing here ever returns an error.

use std::fmt;

/// The closed set of shapes a discount token can take
///
/// The bonus part (text after the first `/`) is not stored here, it travels
/// next to the kind in the entry.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountKind {
    /// a numeric percentage, plus whatever trailed the `%` sign
    Percentage(f64, String),
    /// a "net" price label kept verbatim, plus the first digit run as a hint
    NetPrice(String, f64),
    /// a "TP" (trade price) label kept verbatim, never treated as numeric
    TradePrice(String),
    /// anything unrecognized, kept verbatim
    Bare(String),
    /// a plain number with no marker at all
    PlainNumber(f64),
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DiscountKind::*;
        match self {
            Percentage(v, note) => write!(f, "{:.2}%{}", v, note),
            NetPrice(label, _) | TradePrice(label) | Bare(label) => write!(f, "{}", label),
            PlainNumber(v) => write!(f, "{:.2}", v),
        }
    }
}

impl DiscountKind {
    /// Numeric view of the token: the percentage or plain value, the digit
    /// hint of a net price, 0 for everything else
    pub fn amount(&self) -> f64 {
        use DiscountKind::*;
        match self {
            Percentage(v, _) | PlainNumber(v) | NetPrice(_, v) => *v,
            TradePrice(_) | Bare(_) => 0.0,
        }
    }

}

/// Split a raw value token into its kind and its bonus part
///
/// The bonus part is the trimmed text after the first `/`, for every kind
/// (empty when there is no `/`). Priority order of the markers is
/// load-bearing: `net` and `TP` labels may themselves contain digits or sit
/// next to `%`-like text, so they are recognized before any numeric parse.
pub fn classify(raw: &str) -> (DiscountKind, String) {
    let (main, bonus) = match raw.find('/') {
        Some(cut) => (raw[..cut].trim(), raw[cut + 1..].trim()),
        None => (raw.trim(), ""),
    };
    let bonus = bonus.to_string();

    let folded = main.to_ascii_lowercase();
    if folded.contains("net") {
        return (net_price(main, &folded), bonus);
    }
    if let Some(cut) = main.find('%') {
        let value = main[..cut].trim().parse::<f64>().unwrap_or(0.0);
        let note = main[cut + 1..].trim().to_string();
        return (DiscountKind::Percentage(value, note), bonus);
    }
    if main.to_ascii_uppercase().contains("TP") {
        return (DiscountKind::TradePrice(main.to_string()), bonus);
    }
    match main.parse::<f64>() {
        Ok(value) => (DiscountKind::PlainNumber(value), bonus),
        // the fallback keeps the whole token, `/` split included
        Err(_) => (DiscountKind::Bare(raw.trim().to_string()), bonus),
    }
}

/// Net prices usually look like `140 NET`: the first whitespace-separated
/// token holding a digit provides the numeric hint. Without one, the label
/// degrades to whatever follows the `net` marker.
fn net_price(main: &str, folded: &str) -> DiscountKind {
    for tok in main.split_whitespace() {
        if tok.chars().any(|c| c.is_ascii_digit()) {
            let digits = tok
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect::<String>();
            let hint = digits.parse::<f64>().unwrap_or(0.0);
            return DiscountKind::NetPrice(main.to_string(), hint);
        }
    }
    let label = match folded.find("net") {
        Some(cut) => format!("net{}", main[cut + 3..].trim()),
        None => main.to_string(),
    };
    DiscountKind::NetPrice(label, 0.0)
}

#[cfg(test)]
mod test {
    use super::{classify, DiscountKind::*};

    macro_rules! cl {
        ( $raw:expr => $kind:expr ) => {
            cl!($raw => $kind, "")
        };
        ( $raw:expr => $kind:expr, $bonus:expr ) => {{
            let (kind, bonus) = classify($raw);
            assert_eq!(kind, $kind, "kind of {:?}", $raw);
            assert_eq!(bonus, $bonus, "bonus of {:?}", $raw);
        }};
    }

    #[test]
    fn percentages() {
        cl!("10%" => Percentage(10.0, String::new()));
        cl!("7.5%" => Percentage(7.5, String::new()));
        cl!("0%" => Percentage(0.0, String::new()));
        cl!(" 12 %" => Percentage(12.0, String::new()));
        cl!("10%," => Percentage(10.0, ",".to_string()));
        cl!("10% extra" => Percentage(10.0, "extra".to_string()));
        cl!("abc%" => Percentage(0.0, String::new()));
    }

    #[test]
    fn percentage_with_bonus() {
        cl!("10%/5+5" => Percentage(10.0, String::new()), "5+5");
        // a trailing note and a bonus can coexist, the bonus wins at render time
        cl!("12%,/2+1" => Percentage(12.0, ",".to_string()), "2+1");
    }

    #[test]
    fn net_prices() {
        cl!("140 NET" => NetPrice("140 NET".to_string(), 140.0));
        cl!("330 net" => NetPrice("330 net".to_string(), 330.0));
        cl!("NET 99.5" => NetPrice("NET 99.5".to_string(), 99.5));
        cl!("140 NET/5+5" => NetPrice("140 NET".to_string(), 140.0), "5+5");
        // no digit run: the label degrades to the text after the marker
        cl!("NET" => NetPrice("net".to_string(), 0.0));
        cl!("net of tax" => NetPrice("netof tax".to_string(), 0.0));
    }

    #[test]
    fn trade_prices() {
        cl!("TP," => TradePrice("TP,".to_string()));
        cl!("Tp" => TradePrice("Tp".to_string()));
        cl!("TP,/5+5" => TradePrice("TP,".to_string()), "5+5");
    }

    #[test]
    fn plain_and_bare() {
        cl!("15" => PlainNumber(15.0));
        cl!("7.25" => PlainNumber(7.25));
        cl!("abc" => Bare("abc".to_string()));
        // the fallback keeps the `/` inside the label yet still reports the bonus
        cl!("abc/xyz" => Bare("abc/xyz".to_string()), "xyz");
        cl!("" => Bare(String::new()));
    }

    #[test]
    fn marker_priority() {
        // net wins over TP and over the digit run
        cl!("TP 140 net" => NetPrice("TP 140 net".to_string(), 140.0));
        // `%` wins over TP
        cl!("TP 5%" => Percentage(0.0, String::new()));
        // `%` binds to the main part only
        cl!("5%/TP" => Percentage(5.0, String::new()), "TP");
    }

    #[test]
    fn amounts() {
        assert_eq!(classify("10%").0.amount(), 10.0);
        assert_eq!(classify("140 NET").0.amount(), 140.0);
        assert_eq!(classify("TP,").0.amount(), 0.0);
        assert_eq!(classify("abc").0.amount(), 0.0);
        assert_eq!(classify("15").0.amount(), 15.0);
    }
}
