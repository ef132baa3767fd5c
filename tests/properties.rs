use fraction::{gcd, Fraction};
use proptest::prelude::*;

fn small() -> impl Strategy<Value = i64> {
    -100_000i64..100_000
}

fn non_zero() -> impl Strategy<Value = i64> {
    small().prop_filter("denominator must not be zero", |d| *d != 0)
}

/// Whole numbers, simple fractions and mixed numbers with any signs
fn any_fraction() -> impl Strategy<Value = Fraction> {
    prop_oneof![
        small().prop_map(Fraction::new),
        (small(), non_zero()).prop_map(|(n, d)| Fraction::fraction(n, d).unwrap()),
        (small(), small(), non_zero()).prop_filter_map("fractional part must be proper", |(w, n, d)| {
            Fraction::mixed(w, n, d).ok()
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn text_round_trip(f in any_fraction()) {
        let text = f.to_string();
        let back: Fraction = text.parse().unwrap();
        prop_assert_eq!(back, f);
    }

    #[test]
    fn simplify_is_idempotent(f in any_fraction()) {
        let once = f.simplify().unwrap();
        prop_assert_eq!(once.simplify().unwrap(), once);
        prop_assert!(once.is_same_value_as(&f));
    }

    #[test]
    fn simplified_denominator_is_positive(f in any_fraction()) {
        if let Some(d) = f.simplify().unwrap().denominator() {
            prop_assert!(d > 1);
        }
    }

    #[test]
    fn mixed_improper_inverse(w in non_zero(), d in 2i64..10_000, n in 1i64..10_000) {
        let n = n % d;
        prop_assume!(n != 0);
        let mixed = Fraction::mixed(w, n, d).unwrap();
        prop_assert_eq!(mixed.to_improper().unwrap().to_mixed().unwrap(), mixed);
        let improper = mixed.to_improper().unwrap();
        prop_assert_eq!(improper.to_mixed().unwrap().to_improper().unwrap(), improper);
    }

    #[test]
    fn multiply_then_divide(a in any_fraction(), b in any_fraction()) {
        prop_assume!(!b.is_zero());
        let back = a.multiply(b).unwrap().divide(b).unwrap();
        prop_assert!(back.is_same_value_as(&a));
    }

    #[test]
    fn add_then_subtract(a in any_fraction(), b in any_fraction()) {
        let back = a.add(b).unwrap().subtract(b).unwrap();
        prop_assert!(back.is_same_value_as(&a));
    }

    #[test]
    fn reduce_leaves_coprime(n in small(), d in non_zero()) {
        let reduced = Fraction::fraction(n, d).unwrap().reduce();
        let (n, d) = (reduced.numerator().unwrap(), reduced.denominator().unwrap());
        prop_assert_eq!(gcd(n, d), 1);
    }

    #[test]
    fn exactly_one_kind(f in any_fraction()) {
        let kinds = [f.is_whole_number(), f.is_proper(), f.is_improper(), f.is_mixed()];
        prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
    }

    #[test]
    fn float_agrees(n in small(), d in 1i64..1000) {
        let f = Fraction::fraction(n, d).unwrap();
        let g = Fraction::try_from(f.to_f64()).unwrap();
        prop_assert!((g.to_f64() - f.to_f64()).abs() <= 1e-8);
    }
}
