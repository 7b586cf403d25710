use console::style;
use std::fmt::Display;

use crate::model::Accent;

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow — warnings, the generic failure banner
pub fn warn<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan bold — step numbers, bullet points
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Magenta bold — the brand color, achievement badges
pub fn brand<D: Display>(text: D) -> String {
    style(text).magenta().bold().to_string()
}

/// Dominant-domain accent. Pink/amber/purple in the original palette,
/// mapped onto the nearest ANSI colors.
pub fn domain_accent<D: Display>(text: D, accent: Accent) -> String {
    match accent {
        Accent::Magenta => style(text).magenta().bold().to_string(),
        Accent::Amber => style(text).yellow().bold().to_string(),
        Accent::Purple => style(text).cyan().bold().to_string(),
    }
}
