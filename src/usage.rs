use crate::name::Name;
use crate::resolve::CommandTable;

/// Usage text for `prefix`, listing every discovered subcommand.
///
/// No trailing newline.
pub fn render(prefix: &str, commands: &CommandTable, separator: &str) -> String {
    let prefix = Name::new(prefix).decode(separator);
    let mut lines = vec![format!("Usage: {} COMMAND", prefix)];

    if !commands.is_empty() {
        lines.push(String::new());
        lines.push("Commands:".to_string());
        for candidate in commands.iter() {
            lines.push(format!(
                "  {} {}\t{}",
                prefix,
                Name::new(&candidate.key).decode(separator),
                candidate.blurb
            ));
        }
    }

    lines.join("\n")
}
