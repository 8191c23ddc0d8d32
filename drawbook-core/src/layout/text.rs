//! Text shaping helpers: sentence lines and enlarged first letters

use super::Run;

/// Split page text into one line per sentence.
///
/// Sentences are delimited by `". "`; the period consumed by the split is
/// put back on every sentence but the last. Blank text yields no lines.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let pieces: Vec<&str> = text.split(". ").collect();
    let last = pieces.len() - 1;
    pieces
        .iter()
        .enumerate()
        .filter_map(|(i, piece)| {
            let piece = piece.trim();
            if piece.is_empty() {
                None
            } else if i < last {
                Some(format!("{}.", piece))
            } else {
                Some(piece.to_string())
            }
        })
        .collect()
}

/// Runs for a line whose first character is enlarged
pub fn drop_cap_runs(text: &str, font: &str, size: u32, enlarged_size: u32) -> Vec<Run> {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };

    let mut runs = vec![Run::new(first.to_string(), font, enlarged_size)];
    let rest = chars.as_str();
    if !rest.is_empty() {
        runs.push(Run::new(rest, font, size));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence() {
        assert_eq!(split_sentences("Sam packed his bag."), vec!["Sam packed his bag."]);
    }

    #[test]
    fn test_multiple_sentences_keep_periods() {
        assert_eq!(
            split_sentences("The sun rose. Birds sang. It was morning."),
            vec!["The sun rose.", "Birds sang.", "It was morning."]
        );
    }

    #[test]
    fn test_other_punctuation_does_not_split() {
        assert_eq!(
            split_sentences("Where is Sam? He is here!"),
            vec!["Where is Sam? He is here!"]
        );
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_drop_cap() {
        let runs = drop_cap_runs("Sam packed", "Geneva", 28, 40);
        assert_eq!(
            runs,
            vec![
                Run::new("S", "Geneva", 40),
                Run::new("am packed", "Geneva", 28)
            ]
        );
    }

    #[test]
    fn test_drop_cap_multibyte_and_short() {
        let runs = drop_cap_runs("Émile", "Geneva", 28, 40);
        assert_eq!(runs[0].text, "É");
        assert_eq!(runs[1].text, "mile");

        assert_eq!(drop_cap_runs("A", "Geneva", 28, 40).len(), 1);
        assert!(drop_cap_runs("", "Geneva", 28, 40).is_empty());
    }
}
