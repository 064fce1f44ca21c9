use denormal::{
    DenormalizationQuery, Denormalizer, DepthPolicy, Form, IndexCache,
};
use num_bigint::BigUint;

/// All tests in this binary share one cache so each form is scanned once.
fn denormalizer() -> Denormalizer {
    Denormalizer::with_cache(IndexCache::global().clone())
}

fn collect(denormalizer: &Denormalizer, query: &DenormalizationQuery) -> Vec<String> {
    denormalizer.denormalize(query).collect()
}

#[test]
fn test_fullwidth_and_math_letters_denormalize_a() {
    let denormalizer = denormalizer();
    let choices = denormalizer.choices(Form::Nfkc, 'A', None);

    assert_eq!(choices.as_slice()[0], 'A');
    for expected in ['A', '\u{FF21}', '\u{1D400}', '\u{24B6}'] {
        assert!(choices.contains(expected), "missing {expected:?}");
    }
    assert_eq!(
        denormalizer.count_denormalizations(Form::Nfkc, "A", None),
        BigUint::from(choices.len())
    );

    let first = collect(&denormalizer, &DenormalizationQuery::new(Form::Nfkc, "A").count(1));
    assert_eq!(first.len(), 1);
    assert_eq!(Form::Nfkc.normalize(&first[0]), "A");
}

#[test]
fn test_angle_brackets_and_hyphen() {
    let denormalizer = denormalizer();
    let query = DenormalizationQuery::new(Form::Nfkc, "<>");
    assert_eq!(
        collect(&denormalizer, &query),
        vec![
            "<>",
            "<\u{FE65}",
            "<\u{FF1E}",
            "\u{FE64}>",
            "\u{FE64}\u{FE65}",
            "\u{FE64}\u{FF1E}",
            "\u{FF1C}>",
            "\u{FF1C}\u{FE65}",
            "\u{FF1C}\u{FF1E}",
        ]
    );

    // Each position has itself plus a small and a fullwidth variant
    assert_eq!(
        denormalizer.count_denormalizations(Form::Nfkc, "<->", None),
        BigUint::from(27u32)
    );
    assert_eq!(
        denormalizer.count_denormalizations(Form::Nfkc, "<->", Some(1)),
        BigUint::from(1u32)
    );
    let shallow = DenormalizationQuery::new(Form::Nfkc, "<->").maxdepth(1);
    assert_eq!(collect(&denormalizer, &shallow), vec!["<->"]);
}

#[test]
fn test_maxdepth_two_on_hi() {
    let denormalizer = denormalizer();
    let query = DenormalizationQuery::new(Form::Nfkc, "hi").maxdepth(2);
    assert_eq!(
        collect(&denormalizer, &query),
        vec!["hi", "h\u{1D62}", "\u{2B0}i", "\u{2B0}\u{1D62}"]
    );
}

#[test]
fn test_empty_base() {
    let denormalizer = denormalizer();
    let query = DenormalizationQuery::new(Form::Nfkc, "");
    assert_eq!(collect(&denormalizer, &query), vec![String::new()]);
    assert_eq!(
        denormalizer.count_denormalizations(Form::Nfkc, "", None),
        BigUint::from(1u32)
    );
}

#[test]
fn test_two_characters_multiply() {
    let denormalizer = denormalizer();
    let upper = denormalizer.choices(Form::Nfkc, 'A', None).len();
    let lower = denormalizer.choices(Form::Nfkc, 'a', None).len();
    assert_eq!(
        denormalizer.count_denormalizations(Form::Nfkc, "Aa", None),
        BigUint::from(upper * lower)
    );

    let mut results = denormalizer.denormalize(&DenormalizationQuery::new(Form::Nfkc, "Aa"));
    // Both bases are the smallest code point in their choice sets
    assert_eq!(results.next().as_deref(), Some("Aa"));
    assert_eq!(results.count(), upper * lower - 1);
}

#[test]
fn test_canonical_singletons() {
    let denormalizer = denormalizer();
    let nfc = collect(&denormalizer, &DenormalizationQuery::new(Form::Nfc, "\u{00C5}\u{03A9}"));
    assert_eq!(
        nfc,
        vec![
            "\u{00C5}\u{03A9}",
            "\u{00C5}\u{2126}",
            "\u{212B}\u{03A9}",
            "\u{212B}\u{2126}",
        ]
    );

    let nfd = collect(&denormalizer, &DenormalizationQuery::new(Form::Nfd, "K"));
    assert_eq!(nfd, vec!["K", "\u{212A}"]);
}

#[test]
fn test_casefold_choices() {
    let denormalizer = denormalizer();
    let k = denormalizer.choices(Form::Casefold, 'k', None);
    assert_eq!(k.as_slice(), &['K', 'k', '\u{212A}']);

    let s = denormalizer.choices(Form::Casefold, 's', None);
    assert!(s.contains('S'));
    assert!(s.contains('\u{017F}'));
}

#[test]
fn test_depth_policy_on_casefold() {
    // 'K' sorts before 'k', so a depth of one cuts the base under Truncate
    let denormalizer = denormalizer();
    let query = DenormalizationQuery::new(Form::Casefold, "ok").maxdepth(1);

    let truncated = collect(&denormalizer, &query);
    assert_eq!(truncated, vec!["OK"]);
    assert!(!truncated.contains(&"ok".to_string()));

    let preserved = collect(&denormalizer, &query.policy(DepthPolicy::PreserveBase));
    assert_eq!(preserved, vec!["ok"]);
}

#[test]
fn test_every_result_normalizes_back() {
    let denormalizer = denormalizer();
    let cases = [
        (Form::Nfkc, "Hello"),
        (Form::Nfkd, "x=1"),
        (Form::Nfc, "\u{00C5}ngstr\u{00F6}m"),
        (Form::Casefold, "strasse"),
    ];
    for (form, base) in cases {
        let bounded = DenormalizationQuery::new(form, base).count(300);
        for result in denormalizer.denormalize(&bounded) {
            assert_eq!(form.normalize(&result), base, "{form} {result:?}");
        }
        let random = DenormalizationQuery::new(form, base).random(true).count(50).seed(11);
        for result in denormalizer.denormalize(&random) {
            assert_eq!(form.normalize(&result), base, "{form} {result:?}");
        }
    }
}

#[test]
fn test_bounded_prefix_of_exhaustive() {
    let denormalizer = denormalizer();
    let full = collect(&denormalizer, &DenormalizationQuery::new(Form::Nfkc, "<->"));
    assert_eq!(full.len(), 27);
    for k in [1, 5, 27, 100] {
        let bounded = collect(
            &denormalizer,
            &DenormalizationQuery::new(Form::Nfkc, "<->").count(k),
        );
        assert_eq!(bounded.len(), k.min(27));
        assert_eq!(bounded[..], full[..bounded.len()]);
    }
}

#[test]
fn test_random_is_reproducible_with_seed() {
    let denormalizer = denormalizer();
    let query = DenormalizationQuery::new(Form::Nfkc, "AAAAAAAA").random(true).count(10);

    let one = collect(&denormalizer, &query.clone().seed(1234));
    let two = collect(&denormalizer, &query.clone().seed(1234));
    let other = collect(&denormalizer, &query.clone().seed(4321));
    assert_eq!(one.len(), 10);
    assert_eq!(one, two);
    assert_ne!(one, other);

    // Unset count in random mode draws one result
    let single = DenormalizationQuery::new(Form::Nfkc, "A").random(true);
    assert_eq!(collect(&denormalizer, &single).len(), 1);
}

#[test]
fn test_choice_sets_respect_maxdepth() {
    for policy in [DepthPolicy::Truncate, DepthPolicy::PreserveBase] {
        let denormalizer = denormalizer().with_policy(policy);
        for form in Form::ALL {
            for depth in 1..4 {
                for c in "Azk0<\u{00C5}".chars() {
                    let set = denormalizer.choices(form, c, Some(depth));
                    assert!(set.len() <= depth, "{policy:?} {form} {c:?} depth {depth}");
                    assert!(!set.is_empty());
                    if policy == DepthPolicy::PreserveBase {
                        assert!(set.contains(c), "{form} {c:?} depth {depth}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_long_base_is_iterative() {
    let denormalizer = denormalizer();
    let base = "A".repeat(20_000);

    let total = denormalizer.count_denormalizations(Form::Nfkc, &base, None);
    assert!(total.bits() > 64);

    let query = DenormalizationQuery::new(Form::Nfkc, base.clone());
    let mut results = denormalizer.denormalize(&query);
    assert_eq!(results.next().as_deref(), Some(base.as_str()));
    let later = results.nth(1_000_000).unwrap();
    assert_eq!(later.chars().count(), 20_000);
    assert_eq!(Form::Nfkc.normalize(&later), base);

    let sampled = denormalizer.random_denormalize(Form::Nfkc, &base, None, 2, Some(5));
    assert_eq!(sampled.len(), 2);
    for sample in sampled {
        assert_eq!(Form::Nfkc.normalize(&sample), base);
    }
}

#[test]
fn test_invalid_form_name() {
    let err = "nfkx".parse::<Form>().unwrap_err();
    assert!(err.to_string().contains("nfkx"));
}
