//! property tests for evaluation over generated statement trees

use super::{evaluate, CompareOp, Operand, Predicate, RollOptions, Statement};
use proptest::prelude::*;

// small alphabet so statements and fact sets overlap often
fn arb_option() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        Just("x:1".to_string()),
    ]
}

fn arb_operand() -> impl Strategy<Value = Operand> {
    prop_oneof![
        (-3i32..4).prop_map(Operand::number),
        Just(Operand::field("x")),
        Just(Operand::field("y")),
    ]
}

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop::sample::select(CompareOp::ALL.to_vec())
}

fn arb_statement() -> impl Strategy<Value = Statement> {
    let leaf = prop_oneof![
        arb_option().prop_map(Statement::Atomic),
        (arb_compare_op(), arb_operand(), arb_operand())
            .prop_map(|(op, lhs, rhs)| Statement::compare(op, lhs, rhs)),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Statement::negate),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Statement::And),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Statement::Or),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Statement::Nor),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Statement::Xor),
            (inner.clone(), inner).prop_map(|(a, b)| Statement::conditional(a, b)),
        ]
    })
}

/// plain options mixed with numeric `x`/`y` options, sometimes several per path
fn arb_facts() -> impl Strategy<Value = RollOptions> {
    let numeric = prop_oneof![
        (-3i32..4).prop_map(|n| format!("x:{}", n)),
        (-3i32..4).prop_map(|n| format!("y:{}", n)),
    ];
    prop::collection::vec(prop_oneof![arb_option(), numeric], 0..6)
        .prop_map(|options| options.into_iter().collect())
}

proptest! {
    /// empty connectives are constant
    #[test]
    fn empty_connectives_are_constant(facts in arb_facts()) {
        prop_assert!(evaluate(&Statement::And(vec![]), &facts));
        prop_assert!(!evaluate(&Statement::Or(vec![]), &facts));
        prop_assert!(evaluate(&Statement::Nor(vec![]), &facts));
        prop_assert!(Predicate::default().test(&facts));
    }

    /// xor(s, not s) always holds
    #[test]
    fn xor_with_negation_is_tautology(s in arb_statement(), facts in arb_facts()) {
        let tautology = Statement::xor(vec![s.clone(), Statement::negate(s)]);
        prop_assert!(evaluate(&tautology, &facts));
    }

    #[test]
    fn self_contradictions_are_false(s in arb_statement(), facts in arb_facts()) {
        let xor = Statement::xor(vec![s.clone(), s.clone()]);
        let and = Statement::and(vec![s.clone(), Statement::negate(s)]);
        prop_assert!(!evaluate(&xor, &facts));
        prop_assert!(!evaluate(&and, &facts));
    }

    #[test]
    fn reflexive_conditional_holds(s in arb_statement(), facts in arb_facts()) {
        prop_assert!(evaluate(&Statement::conditional(s.clone(), s), &facts));
    }

    #[test]
    fn nor_negates_or(items in prop::collection::vec(arb_statement(), 0..4), facts in arb_facts()) {
        prop_assert_eq!(
            evaluate(&Statement::Nor(items.clone()), &facts),
            !evaluate(&Statement::Or(items), &facts)
        );
    }

    #[test]
    fn xor_counts_exactly_one(items in prop::collection::vec(arb_statement(), 0..5), facts in arb_facts()) {
        let count = items.iter().filter(|s| evaluate(s, &facts)).count();
        prop_assert_eq!(evaluate(&Statement::Xor(items), &facts), count == 1);
    }

    /// a predicate is the conjunction of its statements
    #[test]
    fn predicate_is_conjunction(items in prop::collection::vec(arb_statement(), 0..4), facts in arb_facts()) {
        let predicate = Predicate::from_statements(items.clone());
        prop_assert_eq!(predicate.test(&facts), evaluate(&Statement::And(items), &facts));
    }
}

proptest! {
    /// no numeric option for the path means false under every operator
    #[test]
    fn missing_operand_is_false(op in arb_compare_op(), n in -5i32..5, facts in arb_facts()) {
        let s = Statement::compare(op, Operand::field("missing"), Operand::number(n));
        prop_assert!(!evaluate(&s, &facts));
        let s = Statement::compare(op, Operand::number(n), Operand::field("missing"));
        prop_assert!(!evaluate(&s, &facts));
    }

    #[test]
    fn ambiguous_operand_is_false(op in arb_compare_op(), a in -5i64..5, b in -5i64..5) {
        prop_assume!(a != b);
        let facts: RollOptions = [format!("z:{}", a), format!("z:{}", b)].into_iter().collect();
        let s = Statement::compare(op, Operand::field("z"), Operand::number(0));
        prop_assert!(!evaluate(&s, &facts));
    }

    #[test]
    fn unique_operand_compares_by_value(op in arb_compare_op(), value in -50i64..50, literal in -50i32..50) {
        let facts: RollOptions = [format!("self:level:{}", value)].into_iter().collect();
        let s = Statement::compare(op, Operand::field("self:level"), Operand::number(literal));
        prop_assert_eq!(evaluate(&s, &facts), op.apply(value as f64, f64::from(literal)));
    }

    /// raw form re-validates into the same statement
    #[test]
    fn raw_form_revalidates(s in arb_statement()) {
        let predicate = Predicate::new(vec![s.to_json()]).unwrap();
        prop_assert_eq!(predicate.statements(), &[s][..]);
    }
}
