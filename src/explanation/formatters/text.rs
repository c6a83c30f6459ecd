use crate::explanation::types::PredictionResult;
use crate::ranking::RankedCrop;
use crate::icons;

/// Plain-text result panel for the terminal front end
pub struct TextFormatter;

impl TextFormatter {
    /// Headline: icon followed by the label in upper case
    pub fn headline(result: &PredictionResult) -> String {
        format!("{} {}", result.icon, result.label.to_uppercase())
    }

    /// Confidence line, e.g. "Confidence: 63.3% (Good)"
    pub fn confidence_line(result: &PredictionResult) -> String {
        format!(
            "Confidence: {:.1}% ({})",
            result.confidence,
            result.confidence_level.label()
        )
    }

    /// One numbered alternative line, `position` starting at 1
    pub fn alternative_line(position: usize, crop: &RankedCrop) -> String {
        format!(
            "{}. {} {}: {:.1}%",
            position,
            icons::icon_for(&crop.label),
            title_case(&crop.label),
            crop.percent
        )
    }

    pub fn format(result: &PredictionResult) -> String {
        let mut out = String::with_capacity(512);

        out.push_str(&Self::headline(result));
        out.push('\n');
        out.push_str(&Self::confidence_line(result));
        out.push_str("\n\n");

        out.push_str("Why this crop?\n");
        out.push_str(&result.explanation.sentence);
        out.push_str("\n\n");

        out.push_str("Top alternatives\n");
        for (i, crop) in result.alternatives.iter().enumerate() {
            out.push_str(&Self::alternative_line(i + 1, crop));
            out.push('\n');
        }

        out
    }
}

/// Capitalise the first letter of each word, lower-case the rest
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
