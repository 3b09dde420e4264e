//! Display text colouring for names and lore.

/// Colour control prefix
pub const COLOR_CHAR: char = '§';
/// Grey, applied to text that carries no colour of its own
pub const DEFAULT_COLOR: &str = "§7";

/// Prefix the default colour unless the text is blank or already coloured.
pub fn prefix_colored(text: &str) -> String {
    prefix_with(text, DEFAULT_COLOR)
}

fn prefix_with(text: &str, color: &str) -> String {
    if text.starts_with(COLOR_CHAR) || text.trim().is_empty() {
        text.to_string()
    } else {
        format!("{}{}", color, text)
    }
}

/// Leading `§x` code of a line, if any
fn leading_color(line: &str) -> Option<&str> {
    let mut chars = line.char_indices();
    match (chars.next(), chars.next()) {
        (Some((_, COLOR_CHAR)), Some((i, c))) => Some(&line[..i + c.len_utf8()]),
        _ => None,
    }
}

/// Expand embedded newlines into separate lines and colour each one.
///
/// In enhanced mode, lines split out of one entry inherit that entry's
/// leading colour instead of the default grey.
pub fn lore_colored(lines: Vec<String>, enhanced: Option<bool>) -> Vec<String> {
    let enhanced = enhanced.unwrap_or(false);
    let mut out = Vec::with_capacity(lines.len());

    for entry in lines {
        if !entry.contains('\n') {
            out.push(prefix_colored(&entry));
            continue;
        }
        let inherited = if enhanced {
            leading_color(&entry).unwrap_or(DEFAULT_COLOR).to_string()
        } else {
            DEFAULT_COLOR.to_string()
        };
        for part in entry.split('\n') {
            out.push(prefix_with(part, &inherited));
        }
    }
    out
}
