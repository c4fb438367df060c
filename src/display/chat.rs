//! Chat answer formatting

use crate::models::ChatOutcome;

/// Format the answer to `query` for the terminal
pub fn format_chat(query: &str, outcome: &ChatOutcome, currency: &str) -> String {
    let mut output = format!("You: {}\n", query);

    match outcome {
        ChatOutcome::Answered(answer) => {
            output.push_str(&format!("fintrack: {}\n", answer.message));
            if answer.breakdown.len() > 1 {
                let width = answer
                    .breakdown
                    .iter()
                    .map(|(c, _)| c.name().chars().count())
                    .max()
                    .unwrap_or(0);
                for (category, amount) in &answer.breakdown {
                    output.push_str(&format!(
                        "  {:<width$}  {:>12}\n",
                        category.name(),
                        amount.format_with_symbol(currency),
                        width = width
                    ));
                }
            }
            for recommendation in &answer.recommendations {
                output.push_str(&format!("  * {}\n", recommendation));
            }
        }
        ChatOutcome::Unavailable { reason } => {
            output.push_str("fintrack: (no answer available)\n");
            output.push_str(&format!("Reason:   {}\n", reason));
        }
    }

    output
}
