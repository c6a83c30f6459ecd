use crate::explanation::rules::{season_phrase, FEATURE_RULES};
use crate::explanation::types::{Explanation, Reason};
use crate::snapshot::InputSnapshot;

/// How many reasons the long sentence form quotes
const QUOTED_REASONS: usize = 3;

/// Rule-based "why this crop" generator
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Generate the explanation for `label` under `snapshot`
    ///
    /// Pure: the same inputs always give the same sentence.
    pub fn generate(label: &str, snapshot: &InputSnapshot) -> Explanation {
        let reasons = Self::collect_reasons(snapshot);
        let sentence = Self::compose(label, &reasons);
        Explanation { sentence, reasons }
    }

    /// Walk the rule table, then append the season
    pub fn collect_reasons(snapshot: &InputSnapshot) -> Vec<Reason> {
        let mut reasons: Vec<Reason> = FEATURE_RULES
            .iter()
            .filter_map(|rule| {
                rule.phrase_for(snapshot.get(rule.reading)).map(|phrase| Reason {
                    reading: Some(rule.reading),
                    phrase,
                })
            })
            .collect();

        if let Some(phrase) = season_phrase(snapshot) {
            reasons.push(Reason { reading: None, phrase });
        }

        reasons
    }

    /// Build the sentence from collected reasons
    pub fn compose(label: &str, reasons: &[Reason]) -> String {
        let phrases: Vec<&str> = reasons.iter().map(|r| r.phrase.as_str()).collect();
        match phrases.len() {
            0 => format!("{} matches your current environmental conditions.", label),
            n if n >= QUOTED_REASONS => format!(
                "{} is suitable due to {}.",
                label,
                phrases[..QUOTED_REASONS].join(", ")
            ),
            _ => format!("{} is recommended because of {}.", label, phrases.join(" and ")),
        }
    }
}

/// Explanation sentence for `label` under `snapshot`
pub fn explain(label: &str, snapshot: &InputSnapshot) -> String {
    ExplanationGenerator::generate(label, snapshot).sentence
}
