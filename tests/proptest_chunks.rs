use proptest::prelude::*;

use doclens::lexical::{is_stopword, most_common, split_words};
use doclens::provider::{self, TextMetrics};
use doclens::sentiment::{analyze, chunk};

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        Just("the".to_string()),
        Just("good".to_string()),
        Just("not".to_string()),
        Just("very".to_string()),
        Just("terrible".to_string()),
        Just("wonderful".to_string()),
    ]
}

fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(word(), 0..300),
        prop::collection::vec(prop_oneof![Just(" "), Just("  "), Just("\n"), Just("\t")], 300),
    )
        .prop_map(|(words, gaps)| {
            let mut out = String::new();
            for (w, g) in words.iter().zip(gaps.iter().cycle()) {
                out.push_str(w);
                out.push_str(g);
            }
            out
        })
}

proptest! {
    #[test]
    fn chunks_rejoin_to_the_word_sequence(doc in document(), size in 1usize..80) {
        let chunks = chunk(&doc, size);
        let original: Vec<&str> = doc.split_whitespace().collect();
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
        prop_assert_eq!(&rejoined, &original);
        prop_assert_eq!(chunks.len(), original.len().div_ceil(size));
        if let Some((last, rest)) = chunks.split_last() {
            for c in rest {
                prop_assert_eq!(c.split_whitespace().count(), size);
            }
            prop_assert!(last.split_whitespace().count() <= size);
        }
    }

    #[test]
    fn sentiment_stays_in_range(doc in document(), size in 1usize..60) {
        let (polarity, subjectivity) = analyze(provider::shared(), &doc, size);
        prop_assert_eq!(polarity.len(), subjectivity.len());
        prop_assert_eq!(polarity.len(), chunk(&doc, size).len());
        for p in &polarity {
            prop_assert!((-1.0..=1.0).contains(p));
        }
        for s in &subjectivity {
            prop_assert!((0.0..=1.0).contains(s));
        }
    }

    #[test]
    fn frequency_table_is_filtered_and_sorted(doc in document(), top in 0usize..40) {
        let table = most_common(&split_words(&doc), top);
        prop_assert!(table.len() <= top);
        for entry in &table {
            prop_assert!(!is_stopword(&entry.word));
            prop_assert!(entry.count >= 1);
        }
        for pair in table.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn every_word_gets_one_tag(doc in document()) {
        let metrics = provider::shared();
        let words = metrics.tokenize(&doc);
        prop_assert_eq!(metrics.tag(&words).len(), words.len());
    }
}
