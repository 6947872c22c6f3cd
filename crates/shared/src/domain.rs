use serde::{Deserialize, Serialize};

/// Normalized classification of a prediction label.
///
/// The service reports whatever its label encoder was fitted with, so both
/// the textual (`"fake"`/`"real"`) and numeric (`"0"`/`"1"`) conventions are
/// accepted. Anything else is carried through verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Fake,
    Real,
    Other(String),
}

impl Verdict {
    pub fn from_wire(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "fake" | "0" => Verdict::Fake,
            "real" | "1" => Verdict::Real,
            _ => Verdict::Other(raw.trim().to_string()),
        }
    }

    /// Headline label shown in result panels and CLI output.
    pub fn display_label(&self) -> String {
        match self {
            Verdict::Fake => "FAKE NEWS".to_string(),
            Verdict::Real => "REAL NEWS".to_string(),
            Verdict::Other(raw) => format!("PREDICTION: {raw}"),
        }
    }

    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::Fake)
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Verdict::Real)
    }
}

/// Formats a 0..1 scalar as a percentage with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_textual_and_numeric_labels() {
        assert_eq!(Verdict::from_wire("fake"), Verdict::Fake);
        assert_eq!(Verdict::from_wire("FAKE"), Verdict::Fake);
        assert_eq!(Verdict::from_wire("0"), Verdict::Fake);
        assert_eq!(Verdict::from_wire("real"), Verdict::Real);
        assert_eq!(Verdict::from_wire("Real"), Verdict::Real);
        assert_eq!(Verdict::from_wire("1"), Verdict::Real);
    }

    #[test]
    fn unknown_labels_are_carried_through_verbatim() {
        let verdict = Verdict::from_wire("unexpected");
        assert_eq!(verdict, Verdict::Other("unexpected".to_string()));
        assert_eq!(verdict.display_label(), "PREDICTION: unexpected");
    }

    #[test]
    fn display_labels_match_known_verdicts() {
        assert_eq!(Verdict::Fake.display_label(), "FAKE NEWS");
        assert_eq!(Verdict::Real.display_label(), "REAL NEWS");
    }

    #[test]
    fn percentages_keep_one_decimal_place() {
        assert_eq!(format_percent(0.87), "87.0%");
        assert_eq!(format_percent(0.13), "13.0%");
        assert_eq!(format_percent(0.954), "95.4%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
