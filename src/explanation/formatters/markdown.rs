use crate::explanation::formatters::text::title_case;
use crate::explanation::types::PredictionResult;
use crate::icons;

/// Markdown formatter for prediction results
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format result as markdown
    pub fn format(result: &PredictionResult) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str(&format!("# {} {}\n\n", result.icon, result.label.to_uppercase()));
        md.push_str(&format!(
            "**Confidence:** {:.1}% ({})\n\n",
            result.confidence,
            result.confidence_level.label()
        ));

        md.push_str("## Why this crop?\n\n");
        md.push_str(&format!("{}\n\n", result.explanation.sentence));

        // Reasons beyond the first three never reach the sentence
        if result.explanation.reasons.len() > 3 {
            md.push_str("### All matched conditions\n\n");
            for reason in &result.explanation.reasons {
                md.push_str(&format!("- {}\n", reason.phrase));
            }
            md.push('\n');
        }

        if !result.alternatives.is_empty() {
            md.push_str("## Top Alternatives\n\n");
            md.push_str("| # | Crop | Probability |\n");
            md.push_str("|---|------|-------------|\n");
            for (i, crop) in result.alternatives.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} {} | {:.1}% |\n",
                    i + 1,
                    icons::icon_for(&crop.label),
                    title_case(&crop.label),
                    crop.percent
                ));
            }
        }

        md
    }
}
