//! Models command implementation
//!
//! Lists every model tag with its aliases and parameters.

use pricer_pricing::ModelTag;

/// Run the models command
pub fn run() {
    print!("{}", render());
}

/// Renders the model listing.
pub fn render() -> String {
    let mut out = String::new();
    for tag in ModelTag::ALL {
        out.push_str(tag.name());
        if !tag.aliases().is_empty() {
            out.push_str(&format!(" (aliases: {})", tag.aliases().join(", ")));
        }
        if tag.is_monte_carlo() {
            out.push_str(" [Monte Carlo]");
        }
        out.push('\n');
        out.push_str(&format!("  required: {}\n", tag.required_parameters().join(", ")));
        if !tag.optional_parameters().is_empty() {
            out.push_str(&format!("  optional: {}\n", tag.optional_parameters().join(", ")));
        }
    }
    out
}
