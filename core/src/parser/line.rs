pub const FREQUENCY_KEYWORD: &str = "#FREQUENCY";
pub const COMMENT_PREFIX: char = '#';

/// Classification of one trimmed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Text following the `#FREQUENCY` keyword.
    FrequencyHeader(&'a str),
    Comment,
    Data(&'a str),
    Ignored,
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        let keyword_len = FREQUENCY_KEYWORD.len();
        let is_frequency = trimmed
            .get(..keyword_len)
            .map_or(false, |head| head.eq_ignore_ascii_case(FREQUENCY_KEYWORD));

        if is_frequency {
            LineKind::FrequencyHeader(&trimmed[keyword_len..])
        } else if trimmed.starts_with(COMMENT_PREFIX) {
            LineKind::Comment
        } else if trimmed
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            LineKind::Data(trimmed)
        } else {
            LineKind::Ignored
        }
    }
}

/// Leading whitespace-separated tokens that parse as floats, at most `limit`.
pub fn leading_values(payload: &str, limit: usize) -> Vec<f64> {
    payload
        .split_whitespace()
        .map_while(|token| token.parse::<f64>().ok())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_line_kind() {
        assert_eq!(
            LineKind::classify("  #FREQUENCY = 1.0E+09  "),
            LineKind::FrequencyHeader(" = 1.0E+09")
        );
        assert_eq!(
            LineKind::classify("#Frequency:   2e9"),
            LineKind::FrequencyHeader(":   2e9")
        );
        assert_eq!(LineKind::classify("##File Type: Far field"), LineKind::Comment);
        assert_eq!(LineKind::classify("#\"Theta\" \"Phi\""), LineKind::Comment);
        assert_eq!(LineKind::classify("-1.0 2 3 4"), LineKind::Data("-1.0 2 3 4"));
        assert_eq!(LineKind::classify("+1.0 2 3 4"), LineKind::Data("+1.0 2 3 4"));
        assert_eq!(LineKind::classify("   "), LineKind::Ignored);
        assert_eq!(LineKind::classify("Configuration Name: x"), LineKind::Ignored);
    }

    #[test]
    fn leading_values_stops_at_first_non_number() {
        assert_eq!(leading_values("1 2 x 4", 4), vec![1.0, 2.0]);
        assert_eq!(leading_values("1 2 3 4 5 6", 4), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(leading_values("1.5E+01 -2e-1", 4), vec![15.0, -0.2]);
    }
}
