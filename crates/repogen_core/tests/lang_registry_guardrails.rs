use std::collections::HashMap;

use repogen_core::lang::comparators;
use repogen_core::lang::keywords;
use repogen_core::lang::update_operators;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keywords_are_single_tokens() {
    // A keyword must survive tokenization as one token: one leading capital, no further capitals.
    for info in keywords::KEYWORDS {
        let mut chars = info.canonical.chars();
        let first = chars.next().expect("empty keyword spelling");
        assert!(first.is_ascii_uppercase(), "keyword {:?} must be capitalised", info.canonical);
        assert!(
            chars.all(|c| c.is_ascii_lowercase()),
            "keyword {:?} would split into several tokens",
            info.canonical
        );
    }
}

#[test]
fn comparators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, comparators::ComparatorId> = HashMap::new();

    for info in comparators::COMPARATORS {
        assert_eq!(comparators::from_str(info.canonical), Some(info.id));
        assert_eq!(comparators::as_str(info.id), info.canonical);
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate comparator spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn comparator_suffix_tokens_spell_the_canonical_name() {
    for info in comparators::COMPARATORS {
        if info.suffix.is_empty() {
            continue;
        }
        assert_eq!(info.suffix.concat(), info.canonical, "suffix of {:?}", info.id);
    }
}

#[test]
fn comparator_suffixes_do_not_collide_with_keywords() {
    for info in comparators::COMPARATORS {
        for token in info.suffix {
            assert_eq!(
                keywords::from_str(token),
                None,
                "comparator token {:?} shadows a keyword",
                token
            );
        }
    }
}

#[test]
fn update_operator_suffixes_unique() {
    let mut seen: HashMap<&'static str, update_operators::UpdateOperatorId> = HashMap::new();

    for info in update_operators::UPDATE_OPERATORS {
        assert_eq!(update_operators::as_str(info.id), info.canonical);
        let Some(suffix) = info.suffix else {
            continue;
        };
        assert_eq!(update_operators::from_suffix(suffix), Some(info.id));
        assert_eq!(keywords::from_str(suffix), None, "update suffix {suffix:?} shadows a keyword");
        if let Some(prev) = seen.insert(suffix, info.id) {
            panic!("duplicate update operator suffix {:?}: {:?} and {:?}", suffix, prev, info.id);
        }
    }
}
