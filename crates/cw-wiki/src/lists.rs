//! Flattening of list items into marked lines.

const MARKERS: [char; 2] = ['*', '#'];

/// Whether `line` is already a list line (`* x`, `#* x`, ...).
fn is_list_line(line: &str) -> bool {
    line.starts_with(MARKERS) && line.trim_start_matches(MARKERS).starts_with(' ')
}

/// Prefix every non-blank line of every item with `marker`.
///
/// Items may span several lines when they hold more than one block. Lines
/// of a nested list get the marker without a space, which deepens them by
/// one level.
pub(crate) fn mark_items(marker: char, items: &[String]) -> String {
    let mut lines = Vec::new();
    for item in items {
        for line in item.lines().map(str::trim_start).filter(|l| !l.is_empty()) {
            if is_list_line(line) {
                lines.push(format!("{marker}{line}"));
            } else {
                lines.push(format!("{marker} {line}"));
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_line_gets_marker() {
        assert_eq!(
            mark_items('*', &[" line1\nline2".to_owned()]),
            "* line1\n* line2"
        );
    }

    #[test]
    fn test_blank_lines_dropped() {
        assert_eq!(
            mark_items('#', &["a\n\nb".to_owned(), "c".to_owned()]),
            "# a\n# b\n# c"
        );
    }

    #[test]
    fn test_nested_list_deepened() {
        let items = ["outer\n\n* inner\n*# deeper".to_owned()];
        assert_eq!(mark_items('#', &items), "# outer\n#* inner\n#*# deeper");
    }

    #[test]
    fn test_strong_text_is_not_a_list_line() {
        assert_eq!(mark_items('*', &["*bold* text".to_owned()]), "* *bold* text");
    }
}
