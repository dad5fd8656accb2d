//! Category registry display

use crate::models::Category;

/// One line per registry entry: icon, key, label
pub fn format_category_registry() -> String {
    let mut output = String::new();
    output.push_str(&format!("{:4} {:16} {}\n", "", "Key", "Label"));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    for category in Category::all() {
        output.push_str(&format!(
            "{:4} {:16} {}\n",
            category.icon(),
            category.key(),
            category.label()
        ));
    }
    output
}
