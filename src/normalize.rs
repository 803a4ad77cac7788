// Line normalization applied to every extraction result.

/// Normalize line endings and blank edges.
///
/// Drops `\r`, strips trailing whitespace from each line, trims leading and
/// trailing blank lines, and ends the text with exactly one `\n`. Interior
/// blank lines and leading indentation are kept.
pub fn collapse_newlines(text: &str) -> String {
    let text = text.replace('\r', "");
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let mut output = match start {
        Some(start) => {
            // A non-empty line exists, so `rposition` finds one too.
            let end = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(start);
            lines[start..=end].join("\n")
        }
        None => String::new(),
    };
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_single_newline() {
        assert_eq!(collapse_newlines(""), "\n");
        assert_eq!(collapse_newlines("\n\n \r\n"), "\n");
    }

    #[test]
    fn strips_carriage_returns_and_trailing_space() {
        assert_eq!(collapse_newlines("a  \r\nb\t\r\n"), "a\nb\n");
    }

    #[test]
    fn trims_blank_edges_but_keeps_interior() {
        assert_eq!(collapse_newlines("\n\n# T\n\n\nbody\n\n"), "# T\n\n\nbody\n");
    }

    #[test]
    fn keeps_leading_indentation() {
        assert_eq!(collapse_newlines("\n    code\n"), "    code\n");
    }

    #[test]
    fn lone_carriage_return_is_removed_not_split() {
        assert_eq!(collapse_newlines("a\rb"), "ab\n");
    }
}
