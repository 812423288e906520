mod common;

use phylostack::{
    ast::{Operator, StackOp},
    eval::OperandStack,
    evaluate, export, Statement, StackValue,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn stack_op() -> impl Strategy<Value = StackOp> {
    proptest::sample::select(StackOp::iter().collect::<Vec<_>>())
}

/// Random programs over numbers, stack primitives and constructor words.
fn statement() -> impl Strategy<Value = Statement> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(|n| Statement::number(n as f64)),
        3 => stack_op().prop_map(|op| Statement::Operator(Operator::Stack(op))),
        1 => proptest::sample::select(vec![
            "normal", "exponential", "add", "*", "exp", "lessthan", "[", "]", "var", "~", "=",
        ])
        .prop_map(Statement::word),
        1 => "[a-d]".prop_map(Statement::text),
    ]
}

proptest! {
    #[test]
    fn evaluation_never_panics(program in prop::collection::vec(statement(), 0..40)) {
        let _ = evaluate(&program);
    }

    #[test]
    fn stack_primitives_match_a_vec_model(
        start in prop::collection::vec(0u8..100, 0..8),
        op in stack_op().prop_filter("pick takes its index from the stack", |op| *op != StackOp::Pick),
    ) {
        let values: Vec<StackValue> = start.iter().map(|n| StackValue::Number(*n as f64)).collect();
        let mut stack = OperandStack::from_values(values.clone());
        let mut model = values;
        let n = model.len();

        let expected_ok = match op {
            StackOp::Dup if n >= 1 => { model.push(model[n - 1].clone()); true }
            StackOp::Swap if n >= 2 => { model.swap(n - 1, n - 2); true }
            StackOp::Drop if n >= 1 => { model.pop(); true }
            StackOp::Over if n >= 2 => { model.push(model[n - 2].clone()); true }
            StackOp::Rot if n >= 3 => { let v = model.remove(n - 3); model.push(v); true }
            StackOp::Nip if n >= 2 => { model.remove(n - 2); true }
            StackOp::Tuck if n >= 2 => { let v = model[n - 1].clone(); model.insert(n - 2, v); true }
            _ => false,
        };

        let result = stack.apply(op);
        prop_assert_eq!(result.is_ok(), expected_ok);
        prop_assert_eq!(stack.values(), &model[..]);
    }

    #[test]
    fn vectors_keep_push_order(items in prop::collection::vec(-1.0e6f64..1.0e6, 0..16)) {
        let mut program = vec![Statement::word("[")];
        program.extend(items.iter().map(|n| Statement::number(*n)));
        program.push(Statement::word("]"));
        program.push(Statement::text("v"));
        program.push(Statement::word("="));

        let environment = evaluate(&program).unwrap();
        let expected = StackValue::Vector(items.iter().map(|n| StackValue::Number(*n)).collect());
        let bound = environment.deterministic().next().map(|(_, value)| value.clone());
        prop_assert_eq!(bound, Some(expected));
    }

    #[test]
    fn dependencies_precede_dependents(order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()) {
        // x0 is a constant, xi = x(i-1) + 1, declared in shuffled order.
        let mut program = Vec::new();
        for &i in &order {
            if i == 0 {
                program.push(Statement::number(1.0));
            } else {
                program.push(Statement::text(format!("x{}", i - 1)));
                program.push(Statement::word("var"));
                program.push(Statement::number(1.0));
                program.push(Statement::word("+"));
            }
            program.push(Statement::text(format!("x{i}")));
            program.push(Statement::word("="));
        }

        let document = export(&evaluate(&program).unwrap()).unwrap();
        let names: Vec<&str> = document.deterministic_functions.names().collect();
        prop_assert_eq!(names.len(), 12);
        for i in 1..12 {
            let dependent = format!("x{i}");
            let dependency = format!("x{}", i - 1);
            let at = |name: &str| names.iter().position(|n| *n == name);
            prop_assert!(at(&dependency) < at(&dependent));
        }

        let again = export(&evaluate(&program).unwrap()).unwrap();
        prop_assert_eq!(document.to_json(false).unwrap(), again.to_json(false).unwrap());
    }
}
