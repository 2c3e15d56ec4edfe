//! Dialogue word counting.

/// Count the dialogue words in `text`, excluding speaker labels.
///
/// A line containing `:` contributes the whitespace-delimited words after its
/// first colon; any other line contributes all of its words. Further colons
/// on a line are part of the dialogue.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.lines().map(count_line).sum()
}

fn count_line(line: &str) -> usize {
    let dialogue = line.split_once(':').map_or(line, |(_, rest)| rest);
    dialogue.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_line_excludes_label() {
        assert_eq!(count_words("Mike: Hello there"), 2);
    }

    #[test]
    fn plain_line_counts_everything() {
        assert_eq!(count_words("Hello there"), 2);
    }

    #[test]
    fn bare_label_counts_zero() {
        assert_eq!(count_words("Mike:"), 0);
        assert_eq!(count_words("Mike:   "), 0);
    }

    #[test]
    fn empty_input_counts_zero() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("\n\n  \n"), 0);
    }

    #[test]
    fn only_first_colon_is_a_label() {
        // counted: "Time:", "10:30", "sharp"
        assert_eq!(count_words("Sara: Time: 10:30 sharp"), 3);
    }

    #[test]
    fn sums_mixed_lines() {
        let text = "Mike: One two three\n\nnarration without label\nSara: four";
        assert_eq!(count_words(text), 3 + 3 + 1);
    }

    #[test]
    fn multi_word_labels_are_excluded() {
        assert_eq!(count_words("Dr Sara Lee: Welcome back"), 2);
    }

    #[test]
    fn handles_crlf_and_tabs() {
        assert_eq!(count_words("Mike:\tHi\tthere\r\nSara: yo\r\n"), 3);
    }
}
