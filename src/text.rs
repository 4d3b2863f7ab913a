use crate::map::TranslationMap;

/// Output of one pass of the phrase table over a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedDocument {
    pub text: String,
    /// Phrase occurrences rewritten. Identity entries are not counted.
    pub substitutions: usize,
    /// Distinct map entries that matched at least once.
    pub phrases_found: usize,
}

enum Segment<'a> {
    Open(&'a str),
    Replaced(&'a str),
}

/// Substitute every phrase of `map` in `text`, longest phrase first.
///
/// Replaced spans are never matched again, so a shorter source phrase
/// cannot rewrite inside a target that an earlier, longer phrase produced.
pub fn apply(map: &TranslationMap, text: &str) -> TranslatedDocument {
    let mut segments = vec![Segment::Open(text)];
    let mut substitutions = 0;
    let mut phrases_found = 0;

    for (from, to) in map.iter() {
        let mut hits = 0;
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Open(s) if s.contains(from) => {
                    let mut last = 0;
                    for (pos, _) in s.match_indices(from) {
                        if pos > last {
                            next.push(Segment::Open(&s[last..pos]));
                        }
                        next.push(Segment::Replaced(to));
                        last = pos + from.len();
                        hits += 1;
                    }
                    if last < s.len() {
                        next.push(Segment::Open(&s[last..]));
                    }
                }
                other => next.push(other),
            }
        }
        segments = next;

        if hits > 0 {
            phrases_found += 1;
            if from != to {
                substitutions += hits;
            }
        }
    }

    let mut result = String::with_capacity(text.len());
    for segment in &segments {
        match segment {
            Segment::Open(s) | Segment::Replaced(s) => result.push_str(s),
        }
    }

    TranslatedDocument {
        text: result,
        substitutions,
        phrases_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Table;

    fn map(pairs: &[(&str, &str)]) -> TranslationMap {
        TranslationMap::new(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn empty_text() {
        let out = apply(&TranslationMap::builtin(Table::Headings), "");
        assert_eq!(out.text, "");
        assert_eq!(out.substitutions, 0);
        assert_eq!(out.phrases_found, 0);
    }

    #[test]
    fn identity_entries_are_not_counted() {
        let m = map(&[("JVM", "JVM"), ("Java", "Java"), ("bytecode", "バイトコード")]);
        let out = apply(&m, "The JVM runs Java bytecode");
        assert_eq!(out.text, "The JVM runs Java バイトコード");
        assert_eq!(out.substitutions, 1);
        assert_eq!(out.phrases_found, 3);
    }

    #[test]
    fn longer_phrase_wins() {
        let m = map(&[("Started", "開始"), ("Getting Started", "はじめに")]);
        let out = apply(&m, "Getting Started Guide");
        assert_eq!(out.text, "はじめに Guide");
        assert_eq!(out.substitutions, 1);
    }

    #[test]
    fn shorter_phrase_still_matches_outside_spans() {
        let m = map(&[("Started", "開始"), ("Getting Started", "はじめに")]);
        let out = apply(&m, "Getting Started. Started?");
        assert_eq!(out.text, "はじめに. 開始?");
        assert_eq!(out.substitutions, 2);
    }

    #[test]
    fn replaced_span_is_not_rematched() {
        // "Inject" must not fire inside the identity span "Injector"
        let m = map(&[("Injector", "Injector"), ("Inject", "インジェクション")]);
        let out = apply(&m, "Inject the Injector");
        assert_eq!(out.text, "インジェクション the Injector");
        assert_eq!(out.substitutions, 1);
    }

    #[test]
    fn count_is_occurrences_not_entries() {
        let m = map(&[("bytecode", "バイトコード"), ("Redirect", "リダイレクト"), ("FAQ", "よくある質問")]);
        let out = apply(&m, "bytecode, bytecode and more bytecode. Redirect.");
        assert_eq!(out.substitutions, 4);
        assert_eq!(out.phrases_found, 2);
    }

    #[test]
    fn unmatched_text_passes_through() {
        let text = "Nothing to see here.\n\n```java\nint x = 1;\n```\n";
        let out = apply(&TranslationMap::builtin(Table::Glossary), text);
        assert_eq!(out.text, text);
        assert_eq!(out.substitutions, 0);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let text = "# Getting Started with bytekin\n\n## Prerequisites\n\n\
                    A bytecode transformation for the JVM.\n\n# Examples - Basic Usage\n";
        for table in [Table::Headings, Table::Glossary] {
            let m = TranslationMap::builtin(table);
            let first = apply(&m, text);
            let second = apply(&m, &first.text);
            assert_eq!(second.text, first.text);
            assert_eq!(second.substitutions, 0);
        }
    }

    #[test]
    fn second_pass_is_a_no_op_at_target_edges() {
        let m = map(&[("x", "エックス"), ("AB", "z"), ("B", "ビー")]);
        let first = apply(&m, "xB xAB");
        assert_eq!(first.text, "エックスビー エックスz");
        let second = apply(&m, &first.text);
        assert_eq!(second.text, first.text);
        assert_eq!(second.substitutions, 0);
    }

    #[test]
    fn headings_table_on_a_page() {
        let m = TranslationMap::builtin(Table::Headings);
        let out = apply(&m, "# Examples - Basic Usage\n\n## Overview\n\nEach transformation edits bytecode.\n");
        assert_eq!(
            out.text,
            "# 例 - 基本的な使用法\n\n## 概要\n\nEach 変換 edits バイトコード.\n"
        );
        assert_eq!(out.substitutions, 4);
    }

    #[test]
    fn substring_matches_inside_words() {
        let m = map(&[("Java", "ジャバ")]);
        let out = apply(&m, "JavaScript");
        assert_eq!(out.text, "ジャバScript");
    }
}
