//! Interpreter tests on parsed but unanalyzed programs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{buffer_handler, EvalError, Interpreter, Value};
use plc_ir::ast::Source;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Source {
    let tokens = plc_lexer::lex(source).unwrap();
    plc_parse::parse(&tokens).unwrap()
}

/// Run a program, returning `main`'s result and everything it printed.
fn run(source: &str) -> (Result<Value, EvalError>, String) {
    let ast = parse(source);
    let handler = buffer_handler();
    let result = Interpreter::builder()
        .print_handler(handler.clone())
        .build()
        .run(&ast);
    (result, handler.get_output())
}

fn run_main(body: &str) -> (Result<Value, EvalError>, String) {
    run(&format!("FUN main(): Integer DO {body} END"))
}

#[test]
fn main_result_is_returned() {
    let (result, output) = run_main("RETURN 1 + 2;");
    assert_eq!(result, Ok(Value::integer(3)));
    assert_eq!(output, "");
}

#[test]
fn main_without_return_yields_nil() {
    assert_eq!(run_main("print(1);").0, Ok(Value::Nil));
}

#[test]
fn missing_main() {
    assert_eq!(
        run("FUN helper() DO END").0,
        Err(EvalError::UndefinedFunction {
            name: "main".into(),
            arity: 0
        })
    );
}

#[test]
fn print_writes_display_forms() {
    let (_, output) = run_main(
        "print(NIL); print(TRUE); print('c'); print(\"s\"); print(1.50); print(1.0 / 3.0); RETURN 0;",
    );
    assert_eq!(output, "NIL\ntrue\nc\ns\n1.50\n0.3\n");
}

#[test]
fn globals_are_visible_in_functions() {
    let (result, _) = run(
        "VAR count: Integer = 0;
        VAL step = 2;
        VAR unset;
        FUN bump() DO count = count + step; END
        FUN main(): Integer DO bump(); bump(); print(unset); RETURN count; END",
    );
    assert_eq!(result, Ok(Value::integer(4)));
}

#[test]
fn immutable_global_cannot_be_assigned() {
    assert_eq!(
        run("VAL x = 1; FUN main(): Integer DO x = 2; RETURN x; END").0,
        Err(EvalError::ImmutableAssignment { name: "x".into() })
    );
}

#[test]
fn parameters_are_immutable() {
    let (result, _) = run(
        "FUN f(p: Integer): Integer DO p = p + 1; RETURN p; END
        FUN main(): Integer DO RETURN f(1); END",
    );
    assert_eq!(result, Err(EvalError::ImmutableAssignment { name: "p".into() }));
}

#[test]
fn locals_shadowing_a_parameter_are_mutable() {
    let (result, _) = run(
        "FUN f(p: Integer): Integer DO IF TRUE DO LET p = 5; p = p + 1; RETURN p; END RETURN 0; END
        FUN main(): Integer DO RETURN f(1); END",
    );
    assert_eq!(result, Ok(Value::integer(6)));
}

#[test]
fn indexed_assignment_rebinds_without_aliasing() {
    let (result, output) = run(
        "LIST xs: Integer = [1, 2, 3];
        FUN main(): Integer DO
            LET ys = xs;
            xs[0] = 5;
            print(xs);
            print(ys);
            RETURN xs[0];
        END",
    );
    assert_eq!(result, Ok(Value::integer(5)));
    assert_eq!(output, "[5, 2, 3]\n[1, 2, 3]\n");
}

#[test]
fn index_out_of_bounds() {
    assert_eq!(
        run("LIST xs: Integer = [1]; FUN main(): Integer DO RETURN xs[1]; END").0,
        Err(EvalError::IndexOutOfBounds {
            index: 1.into(),
            length: 1
        })
    );
    assert_eq!(
        run("LIST xs: Integer = [1]; FUN main(): Integer DO xs[0 - 1] = 2; RETURN 0; END").0,
        Err(EvalError::IndexOutOfBounds {
            index: (-1).into(),
            length: 1
        })
    );
}

#[test]
fn indexing_a_scalar_fails() {
    assert_eq!(
        run_main("LET x = 1; x[0] = 2; RETURN 0;").0,
        Err(EvalError::NotAList { name: "x".into() })
    );
}

#[test]
fn receiver_must_be_an_access() {
    assert_eq!(
        run_main("print(1) = 2; RETURN 0;").0,
        Err(EvalError::InvalidReceiver)
    );
}

#[test]
fn logical_operators_short_circuit() {
    let (result, _) = run_main("IF FALSE && missing() DO RETURN 1; END IF TRUE || missing() DO RETURN 2; END RETURN 3;");
    assert_eq!(result, Ok(Value::integer(2)));
}

#[test]
fn logical_operands_other_than_true_are_false() {
    assert_eq!(run_main("RETURN 1 && TRUE;").0, Ok(Value::Boolean(false)));
    assert_eq!(run_main("RETURN TRUE && 1;").0, Ok(Value::Boolean(false)));
    assert_eq!(run_main("RETURN NIL || TRUE;").0, Ok(Value::Boolean(true)));
    assert_eq!(run_main("RETURN FALSE || \"yes\";").0, Ok(Value::Boolean(false)));
}

#[test]
fn conditions_must_be_boolean() {
    assert_eq!(
        run_main("WHILE 1 DO END RETURN 0;").0,
        Err(EvalError::TypeMismatch {
            expected: "Boolean",
            got: "Integer"
        })
    );
}

#[test]
fn switch_evaluates_condition_once() {
    let (result, output) = run(
        "FUN next(): Integer DO print(\"tick\"); RETURN 2; END
        FUN main(): Integer DO
            SWITCH next()
                CASE 1: RETURN 10;
                CASE 2: RETURN 20;
                CASE 2: RETURN 25;
                DEFAULT RETURN 30;
            END
            RETURN 0;
        END",
    );
    assert_eq!(result, Ok(Value::integer(20)));
    assert_eq!(output, "tick\n");
}

#[test]
fn switch_falls_back_to_default() {
    let (result, output) = run_main(
        "SWITCH 'z' CASE 'a': print(1); DEFAULT print(2); END RETURN 0;",
    );
    assert_eq!(result, Ok(Value::integer(0)));
    assert_eq!(output, "2\n");
}

#[test]
fn return_escapes_nested_blocks() {
    let (result, _) = run_main(
        "LET i = 0;
        WHILE TRUE DO
            IF i == 5 DO
                SWITCH i DEFAULT RETURN i * 10; END
            END
            i = i + 1;
        END
        RETURN 0 - 1;",
    );
    assert_eq!(result, Ok(Value::integer(50)));
}

#[test]
fn recursion() {
    let (result, _) = run(
        "FUN fact(n: Integer): Integer DO
            IF n < 2 DO RETURN 1; END
            RETURN n * fact(n - 1);
        END
        FUN main(): Integer DO RETURN fact(20); END",
    );
    assert_eq!(result, Ok(Value::integer(2_432_902_008_176_640_000_i64)));
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let ast = parse("FUN loop(): Integer DO RETURN loop(); END FUN main(): Integer DO RETURN loop(); END");
    let result = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_call_depth(50)
        .build()
        .run(&ast);
    assert_eq!(result, Err(EvalError::StackOverflow { limit: 50 }));
}

#[test]
fn block_scopes_end_with_the_block() {
    assert_eq!(
        run_main("IF TRUE DO LET inner = 1; END RETURN inner;").0,
        Err(EvalError::UndefinedVariable {
            name: "inner".into()
        })
    );
    let (result, output) = run_main("LET x = 1; IF TRUE DO LET x = 2; print(x); END RETURN x;");
    assert_eq!(result, Ok(Value::integer(1)));
    assert_eq!(output, "2\n");
}

#[test]
fn functions_do_not_see_caller_locals() {
    assert_eq!(
        run("FUN peek(): Integer DO RETURN secret; END FUN main(): Integer DO LET secret = 1; RETURN peek(); END").0,
        Err(EvalError::UndefinedVariable {
            name: "secret".into()
        })
    );
}

#[test]
fn scope_stack_is_balanced_after_errors() {
    let ast = parse("FUN main(): Integer DO WHILE TRUE DO IF TRUE DO RETURN 1 / 0; END END END");
    let mut interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
    assert_eq!(interpreter.run(&ast), Err(EvalError::DivisionByZero));
    assert_eq!(interpreter.env().depth(), 1);
}

#[test]
fn runs_without_static_types() {
    let (result, _) = run("FUN main() DO RETURN \"a\" + 1; END");
    assert_eq!(result, Ok(Value::String("a1".into())));
}
