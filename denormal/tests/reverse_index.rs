use denormal::{Denormalizer, Form, IndexCache};
use normforms::ucd;
use unicode_normalization::UnicodeNormalization;

fn denormalizer() -> Denormalizer {
    Denormalizer::with_cache(IndexCache::global().clone())
}

#[test]
fn test_lookup_is_reflexive_for_every_form() {
    let denormalizer = denormalizer();
    for form in Form::ALL {
        let index = denormalizer.index(form);
        // Sample the code space, assigned or not
        for value in (0..=0x10FFFFu32).step_by(613) {
            if let Some(c) = char::from_u32(value) {
                assert!(index.lookup(c).contains(&c), "{form} U+{value:04X}");
            }
        }
    }
}

#[test]
fn test_sources_normalize_to_their_key() {
    let denormalizer = denormalizer();
    let index = denormalizer.index(Form::Nfkd);
    for (normalized, sources) in index.to_map().into_iter().step_by(97) {
        for &source in sources {
            let expected: String = source.to_string().nfkd().collect();
            assert_eq!(expected, normalized, "U+{:04X}", source as u32);
        }
    }
}

#[test]
fn test_index_covers_only_assigned_sources() {
    let denormalizer = denormalizer();
    let index = denormalizer.index(Form::Nfkc);
    assert_eq!(index.form(), Form::Nfkc);
    assert_eq!(index.scanned(), ucd::assigned_chars().count());
    for sources in index.to_map().values() {
        assert!(sources.iter().all(|c| ucd::is_assigned(*c)));
    }
    assert!(index.len() > 1000);
    assert!(index.source_count() > index.len());
}

#[test]
fn test_multi_character_keys_under_nfd() {
    let denormalizer = denormalizer();
    let index = denormalizer.index(Form::Nfd);
    assert!(index.sources("e\u{0301}").contains(&'\u{00E9}'));
    // Decomposed characters are not sources of their first code point
    assert!(!index.lookup('e').contains(&'\u{00E9}'));
}

#[test]
fn test_details() {
    let denormalizer = denormalizer();
    let details = denormalizer.details('A');
    assert_eq!(details.character, 'A');
    assert_eq!(details.code_point, "U+0041 (A)");
    assert_eq!(details.category, "UppercaseLetter");
    assert_eq!(details.forms.len(), 5);

    let casefold = &details.forms[0];
    assert_eq!(casefold.form, Form::Casefold);
    assert_eq!(casefold.normalized, "a");

    let nfkc = details.forms.iter().find(|d| d.form == Form::Nfkc).unwrap();
    assert_eq!(nfkc.normalized, "A");
    assert!(nfkc.sources.contains(&'\u{FF21}'));
    assert!(!nfkc.sources.contains(&'A'));

    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["forms"][3]["form"], "nfkc");
}

#[test]
fn test_json_export_matches_lookup() {
    let denormalizer = denormalizer();
    let index = denormalizer.index(Form::Nfkc);
    let mut out = Vec::new();
    index.write_json(&mut out).unwrap();

    let parsed: std::collections::BTreeMap<String, Vec<String>> =
        serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed.len(), index.len());
    assert_eq!(parsed["<"], vec!["\u{FE64}".to_string(), "\u{FF1C}".to_string()]);
}
