use crate::aggregation::summary::RiskReport;
use crate::core::risk::RiskLevel;
use std::fmt::Write;

/// System message for the text-generation collaborator.
pub const ANALYST_SYSTEM_MESSAGE: &str =
    "You are a knowledgeable and analytical financial crime analyst.";

/// A fully rendered prompt pair for the narrative-generation service.
///
/// The crate only prepares the structured input; issuing the request and
/// handling the generated text is the caller's concern.
///
/// # Examples
///
/// ```
/// use flowmap_engine::aggregation::summary::RiskReport;
/// use flowmap_engine::core::transaction::TransactionSet;
/// use flowmap_engine::report::narrative::NarrativePrompt;
///
/// let report = RiskReport::from_transactions(&TransactionSet::new());
/// let prompt = NarrativePrompt::from_report(&report);
/// assert!(prompt.user_prompt().contains("Total Transactions: 0"));
/// ```
#[derive(Debug, Clone)]
pub struct NarrativePrompt {
    user_prompt: String,
}

impl NarrativePrompt {
    /// Render the analyst prompt from an aggregate report.
    pub fn from_report(report: &RiskReport) -> Self {
        let mut prompt = String::new();

        let _ = writeln!(
            prompt,
            "You are a seasoned financial crime analyst. Analyze the following \
             statistics from a financial transactions dataset and generate a \
             detailed narrative report. The report should explain key findings, \
             potential financial crime risks, and operational insights.\n"
        );

        let _ = writeln!(prompt, "Key Statistics:");
        let _ = writeln!(prompt, "- Total Transactions: {}", report.transaction_count());
        let _ = writeln!(prompt, "- Total Transaction Amount: {:.2}", report.total_amount());
        let _ = writeln!(prompt, "- Receipts Total: {:.2}", report.receipts_total());
        let _ = writeln!(prompt, "- Payments Total: {:.2}", report.payments_total());

        let _ = writeln!(prompt, "\nRisk Summary (by assigned financial crime risk):");
        for level in RiskLevel::all() {
            let slice = report.risk_slice(level);
            let _ = writeln!(
                prompt,
                "- {}: {:.2} across {} transactions",
                level, slice.total_amount, slice.transaction_count
            );
        }

        if !report.business_breakdown().is_empty() {
            let _ = writeln!(prompt, "\n3rd Party Business Nature Summary:");
            for (nature, slice) in report.business_breakdown() {
                let _ = writeln!(
                    prompt,
                    "- {}: {:.2} across {} transactions",
                    nature, slice.total_amount, slice.transaction_count
                );
            }
        }

        let high = report.high_risk();
        let _ = writeln!(
            prompt,
            "\nSanctioned Transactions Summary (High Financial Crime Risk):"
        );
        let _ = writeln!(prompt, "- Count: {}", high.transaction_count);
        let _ = writeln!(prompt, "- Total Amount: {:.2}", high.total_amount);

        let _ = writeln!(
            prompt,
            "\nPlease provide a narrative report that:\n\
             1. Introduces the dataset and its context.\n\
             2. Discusses the volume and financial activity.\n\
             3. Explains the risks associated with high-risk transactions, \
             especially those involving sanctioned countries.\n\
             4. Offers recommendations or observations on potential financial \
             crime concerns.\n\
             Ensure the tone is analytical, data-driven, and insightful."
        );

        Self { user_prompt: prompt }
    }

    /// The rendered user prompt text.
    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    /// The system message to pair with the user prompt.
    pub fn system_message(&self) -> &'static str {
        ANALYST_SYSTEM_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::Country;
    use crate::core::transaction::{Direction, Transaction, TransactionSet};
    use rust_decimal_macros::dec;

    fn report_with_sanctioned_receipt() -> RiskReport {
        let mut set = TransactionSet::new();
        set.add(
            Transaction::new(
                Country::new("Iran"),
                Country::new("United Kingdom"),
                Direction::Receipt,
                dec!(750),
                RiskLevel::Low,
            )
            .with_business_nature("Oil Trading"),
        );
        RiskReport::from_transactions(&set)
    }

    #[test]
    fn test_prompt_contains_key_statistics() {
        let prompt = NarrativePrompt::from_report(&report_with_sanctioned_receipt());
        let text = prompt.user_prompt();
        assert!(text.contains("Total Transactions: 1"));
        assert!(text.contains("Total Transaction Amount: 750.00"));
        assert!(text.contains("Receipts Total: 750.00"));
        assert!(text.contains("Payments Total: 0.00"));
    }

    #[test]
    fn test_prompt_reflects_sanctions_override() {
        let prompt = NarrativePrompt::from_report(&report_with_sanctioned_receipt());
        let text = prompt.user_prompt();
        assert!(text.contains("High: 750.00 across 1 transactions"));
        assert!(text.contains("- Count: 1"));
    }

    #[test]
    fn test_prompt_lists_business_nature() {
        let prompt = NarrativePrompt::from_report(&report_with_sanctioned_receipt());
        assert!(prompt.user_prompt().contains("Oil Trading"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = NarrativePrompt::from_report(&report_with_sanctioned_receipt());
        let text = prompt.user_prompt();
        assert!(text.contains("1. Introduces the dataset"));
        assert!(text.contains("analytical, data-driven, and insightful"));
    }

    #[test]
    fn test_system_message() {
        let prompt = NarrativePrompt::from_report(&report_with_sanctioned_receipt());
        assert_eq!(prompt.system_message(), ANALYST_SYSTEM_MESSAGE);
    }
}
