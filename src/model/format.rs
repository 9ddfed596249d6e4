//! Numbering formats (`w:numFmt`) and numeral rendering.

use serde::{Deserialize, Serialize};

/// A numbering level's number format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// 1, 2, 3
    #[default]
    Decimal,
    /// 01, 02, 03
    DecimalZero,
    /// I, II, III
    UpperRoman,
    /// i, ii, iii
    LowerRoman,
    /// A, B, C
    UpperLetter,
    /// a, b, c
    LowerLetter,
    /// 1st, 2nd, 3rd
    Ordinal,
    /// Literal glyph taken from the level text
    Bullet,
    /// No number at all
    None,
    /// Any other tag, rendered as decimal
    Other(String),
}

impl NumberFormat {
    /// Parse a `w:numFmt/@w:val` tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "decimal" => NumberFormat::Decimal,
            "decimalZero" => NumberFormat::DecimalZero,
            "upperRoman" => NumberFormat::UpperRoman,
            "lowerRoman" => NumberFormat::LowerRoman,
            "upperLetter" => NumberFormat::UpperLetter,
            "lowerLetter" => NumberFormat::LowerLetter,
            "ordinal" => NumberFormat::Ordinal,
            "bullet" => NumberFormat::Bullet,
            "none" => NumberFormat::None,
            other => NumberFormat::Other(other.to_string()),
        }
    }

    /// The `w:numFmt` tag for this format.
    pub fn tag(&self) -> &str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::DecimalZero => "decimalZero",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::Ordinal => "ordinal",
            NumberFormat::Bullet => "bullet",
            NumberFormat::None => "none",
            NumberFormat::Other(tag) => tag,
        }
    }

    /// Whether this is the literal-glyph bullet format.
    pub fn is_bullet(&self) -> bool {
        matches!(self, NumberFormat::Bullet)
    }

    /// Whether this format renders nothing.
    pub fn is_none(&self) -> bool {
        matches!(self, NumberFormat::None)
    }

    /// Render a counter value in this format.
    ///
    /// Bullet and none formats have no numeral and render as empty.
    pub fn format(&self, value: u32) -> String {
        match self {
            NumberFormat::Decimal => value.to_string(),
            NumberFormat::DecimalZero => format!("{value:02}"),
            NumberFormat::UpperRoman => to_roman(value).to_uppercase(),
            NumberFormat::LowerRoman => to_roman(value),
            NumberFormat::UpperLetter => to_letters(value).to_uppercase(),
            NumberFormat::LowerLetter => to_letters(value),
            NumberFormat::Ordinal => to_ordinal(value),
            NumberFormat::Bullet | NumberFormat::None => String::new(),
            NumberFormat::Other(tag) => {
                log::debug!("Unsupported number format '{}', rendering as decimal", tag);
                value.to_string()
            }
        }
    }
}

/// Largest value with a standard roman form.
const MAX_ROMAN: u32 = 3999;

/// Largest value Word renders as letters (30 repeats of "z").
const MAX_LETTERS: u32 = 780;

/// Lowercase roman numeral. Zero and values above [`MAX_ROMAN`] render as
/// decimal.
fn to_roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if n == 0 || n > MAX_ROMAN {
        return n.to_string();
    }
    let mut result = String::new();
    for &(value, numeral) in TABLE {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    result
}

/// Lowercase letter sequence as Word renders it: a..z, aa, bb, .. zz, aaa.
/// Zero and values above [`MAX_LETTERS`] render as decimal.
fn to_letters(n: u32) -> String {
    if n == 0 || n > MAX_LETTERS {
        return n.to_string();
    }
    let letter = (b'a' + ((n - 1) % 26) as u8) as char;
    let repeat = ((n - 1) / 26 + 1) as usize;
    std::iter::repeat(letter).take(repeat).collect()
}

fn to_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_roundtrip() {
        for tag in [
            "decimal",
            "decimalZero",
            "upperRoman",
            "lowerRoman",
            "upperLetter",
            "lowerLetter",
            "ordinal",
            "bullet",
            "none",
            "japaneseCounting",
        ] {
            assert_eq!(NumberFormat::from_tag(tag).tag(), tag);
        }
        assert_eq!(
            NumberFormat::from_tag("chicago"),
            NumberFormat::Other("chicago".to_string())
        );
    }

    #[test]
    fn test_roman() {
        assert_eq!(NumberFormat::UpperRoman.format(3), "III");
        assert_eq!(NumberFormat::UpperRoman.format(4), "IV");
        assert_eq!(NumberFormat::LowerRoman.format(9), "ix");
        assert_eq!(NumberFormat::LowerRoman.format(14), "xiv");
        assert_eq!(NumberFormat::UpperRoman.format(1994), "MCMXCIV");
        assert_eq!(NumberFormat::UpperRoman.format(0), "0");
    }

    #[test]
    fn test_letters() {
        assert_eq!(NumberFormat::UpperLetter.format(1), "A");
        assert_eq!(NumberFormat::UpperLetter.format(26), "Z");
        assert_eq!(NumberFormat::UpperLetter.format(27), "AA");
        assert_eq!(NumberFormat::LowerLetter.format(28), "bb");
        assert_eq!(NumberFormat::LowerLetter.format(53), "aaa");
    }

    #[test]
    fn test_large_values_fall_back_to_decimal() {
        assert_eq!(NumberFormat::UpperRoman.format(3999), "MMMCMXCIX");
        assert_eq!(NumberFormat::UpperRoman.format(4000), "4000");
        assert_eq!(NumberFormat::LowerRoman.format(u32::MAX), u32::MAX.to_string());

        assert_eq!(NumberFormat::LowerLetter.format(780), "z".repeat(30));
        assert_eq!(NumberFormat::LowerLetter.format(781), "781");
        assert_eq!(NumberFormat::UpperLetter.format(2_600_000), "2600000");
        assert_eq!(NumberFormat::UpperLetter.format(u32::MAX), u32::MAX.to_string());
    }

    #[test]
    fn test_ordinal_and_padding() {
        assert_eq!(NumberFormat::Ordinal.format(1), "1st");
        assert_eq!(NumberFormat::Ordinal.format(2), "2nd");
        assert_eq!(NumberFormat::Ordinal.format(3), "3rd");
        assert_eq!(NumberFormat::Ordinal.format(11), "11th");
        assert_eq!(NumberFormat::Ordinal.format(22), "22nd");
        assert_eq!(NumberFormat::Ordinal.format(113), "113th");
        assert_eq!(NumberFormat::DecimalZero.format(7), "07");
        assert_eq!(NumberFormat::DecimalZero.format(12), "12");
    }

    #[test]
    fn test_glyph_formats_render_empty() {
        assert_eq!(NumberFormat::Bullet.format(5), "");
        assert_eq!(NumberFormat::None.format(5), "");
        assert_eq!(NumberFormat::Other("foo".into()).format(5), "5");
    }
}
