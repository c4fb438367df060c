//! Category display formatting

use crate::models::Category;

/// Format the categories known to the store, flagging user-defined ones
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::from("Categories:\n");
    for category in categories {
        let marker = if category.is_custom() {
            " (custom)"
        } else if category.is_income_category() {
            " (income)"
        } else {
            ""
        };
        output.push_str(&format!("  {}{}\n", category, marker));
    }
    output
}
