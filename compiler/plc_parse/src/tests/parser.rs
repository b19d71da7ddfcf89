//! Grammar tests, driven through the real lexer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{parse, ParseError, Parser};
use bigdecimal::BigDecimal;
use plc_ir::ast::{Case, Declaration, Expr, ExprKind, Global, Literal, Source, Stmt};
use plc_ir::BinaryOp;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn parse_source(source: &str) -> Result<Source, ParseError> {
    let tokens = plc_lexer::lex(source).unwrap();
    parse(&tokens)
}

fn parse_expr(source: &str) -> Expr {
    let tokens = plc_lexer::lex(source).unwrap();
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expression().unwrap();
    assert!(parser.cursor.is_at_end(), "trailing tokens in {source:?}");
    expr
}

fn parse_stmt(source: &str) -> Stmt {
    let tokens = plc_lexer::lex(source).unwrap();
    Parser::new(&tokens).parse_statement().unwrap()
}

fn int(n: i64) -> Expr {
    Expr::literal(Literal::Integer(n.into()))
}

fn var(name: &str) -> Expr {
    Expr::access(name, None)
}

fn call(name: &str, arguments: Vec<Expr>) -> Expr {
    Expr::call(name, arguments)
}

#[test]
fn empty_source() {
    assert_eq!(parse_source("").unwrap(), Source::default());
}

#[test]
fn globals_of_each_kind() {
    let source = parse_source("LIST xs: Integer = [1, 2]; VAR y: Decimal; VAR z = 3; VAL w: String = \"s\";")
        .unwrap();
    assert_eq!(
        source.globals,
        vec![
            Global {
                name: "xs".into(),
                type_name: Some("Integer".into()),
                mutable: true,
                value: Some(Expr::new(ExprKind::List(vec![int(1), int(2)]))),
                variable: None,
            },
            Global {
                name: "y".into(),
                type_name: Some("Decimal".into()),
                mutable: true,
                value: None,
                variable: None,
            },
            Global {
                name: "z".into(),
                type_name: None,
                mutable: true,
                value: Some(int(3)),
                variable: None,
            },
            Global {
                name: "w".into(),
                type_name: Some("String".into()),
                mutable: false,
                value: Some(Expr::literal(Literal::String("s".into()))),
                variable: None,
            },
        ]
    );
}

#[test]
fn function_signature() {
    let source = parse_source("FUN add(a: Integer, b: Integer): Integer DO RETURN a + b; END").unwrap();
    let function = &source.functions[0];
    assert_eq!(function.name, "add");
    assert_eq!(function.parameters, vec!["a", "b"]);
    assert_eq!(function.parameter_type_names, vec!["Integer", "Integer"]);
    assert_eq!(function.return_type_name.as_deref(), Some("Integer"));
    assert_eq!(
        function.statements,
        vec![Stmt::Return {
            value: Expr::binary(BinaryOp::Add, var("a"), var("b")),
        }]
    );
}

#[test]
fn function_without_return_type_or_parameters() {
    let source = parse_source("FUN main() DO END").unwrap();
    assert!(source.functions[0].parameters.is_empty());
    assert_eq!(source.functions[0].return_type_name, None);
    assert!(source.functions[0].statements.is_empty());
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        Expr::binary(BinaryOp::Add, int(1), Expr::binary(BinaryOp::Mul, int(2), int(3)))
    );
}

#[test]
fn same_level_operators_fold_left() {
    assert_eq!(
        parse_expr("1 - 2 - 3"),
        Expr::binary(BinaryOp::Sub, Expr::binary(BinaryOp::Sub, int(1), int(2)), int(3))
    );
    assert_eq!(
        parse_expr("2 ^ 3 * 4"),
        Expr::binary(BinaryOp::Mul, Expr::binary(BinaryOp::Pow, int(2), int(3)), int(4))
    );
}

#[test]
fn logical_is_loosest() {
    assert_eq!(
        parse_expr("a < b && c == d"),
        Expr::binary(
            BinaryOp::And,
            Expr::binary(BinaryOp::Lt, var("a"), var("b")),
            Expr::binary(BinaryOp::Eq, var("c"), var("d")),
        )
    );
}

#[test]
fn group_call_and_index() {
    assert_eq!(
        parse_expr("(x)"),
        Expr::new(ExprKind::Group(Box::new(var("x"))))
    );
    assert_eq!(parse_expr("f()"), call("f", vec![]));
    assert_eq!(parse_expr("f(1, g(x))"), call("f", vec![int(1), call("g", vec![var("x")])]));
    assert_eq!(parse_expr("xs[i + 1]"), Expr::access("xs", Some(Expr::binary(BinaryOp::Add, var("i"), int(1)))));
}

#[test_case("NIL", Literal::Nil; "nil")]
#[test_case("TRUE", Literal::Boolean(true); "true")]
#[test_case("FALSE", Literal::Boolean(false); "false")]
#[test_case("'a'", Literal::Character('a'); "character")]
#[test_case(r"'\''", Literal::Character('\''); "escaped quote")]
#[test_case(r#""a\tb\\c\n""#, Literal::String("a\tb\\c\n".into()); "string escapes")]
#[test_case(r#""\b""#, Literal::String("\u{8}".into()); "backspace")]
fn literals(source: &str, expected: Literal) {
    assert_eq!(parse_expr(source), Expr::literal(expected));
}

#[test]
fn numeric_literals_keep_precision() {
    assert_eq!(
        parse_expr("123456789012345678901234567890"),
        Expr::literal(Literal::Integer("123456789012345678901234567890".parse().unwrap()))
    );
    let ExprKind::Literal(Literal::Decimal(value)) = parse_expr("1.50").kind else {
        panic!("expected decimal literal");
    };
    assert_eq!(value, "1.50".parse::<BigDecimal>().unwrap());
    assert_eq!(value.as_bigint_and_exponent().1, 2);
}

#[test]
fn declaration_forms() {
    assert_eq!(
        parse_stmt("LET x: Integer = 1;"),
        Stmt::Declaration(Declaration {
            name: "x".into(),
            type_name: Some("Integer".into()),
            value: Some(int(1)),
            variable: None,
        })
    );
    assert_eq!(
        parse_stmt("LET y;"),
        Stmt::Declaration(Declaration {
            name: "y".into(),
            type_name: None,
            value: None,
            variable: None,
        })
    );
}

#[test]
fn assignment_and_expression_statements() {
    assert_eq!(
        parse_stmt("xs[0] = 5;"),
        Stmt::Assignment {
            receiver: Expr::access("xs", Some(int(0))),
            value: int(5),
        }
    );
    assert_eq!(parse_stmt("print(1);"), Stmt::Expression(call("print", vec![int(1)])));
}

#[test]
fn if_with_and_without_else() {
    assert_eq!(
        parse_stmt("IF c DO f(); ELSE g(); END"),
        Stmt::If {
            condition: var("c"),
            then_statements: vec![Stmt::Expression(call("f", vec![]))],
            else_statements: vec![Stmt::Expression(call("g", vec![]))],
        }
    );
    assert_eq!(
        parse_stmt("IF c DO END"),
        Stmt::If {
            condition: var("c"),
            then_statements: vec![],
            else_statements: vec![],
        }
    );
}

#[test]
fn while_loop() {
    assert_eq!(
        parse_stmt("WHILE i < 3 DO i = i + 1; END"),
        Stmt::While {
            condition: Expr::binary(BinaryOp::Lt, var("i"), int(3)),
            statements: vec![Stmt::Assignment {
                receiver: var("i"),
                value: Expr::binary(BinaryOp::Add, var("i"), int(1)),
            }],
        }
    );
}

#[test]
fn switch_default_is_last() {
    assert_eq!(
        parse_stmt("SWITCH x CASE 1: f(); CASE 2: DEFAULT g(); END"),
        Stmt::Switch {
            condition: var("x"),
            cases: vec![
                Case {
                    value: Some(int(1)),
                    statements: vec![Stmt::Expression(call("f", vec![]))],
                },
                Case {
                    value: Some(int(2)),
                    statements: vec![],
                },
                Case {
                    value: None,
                    statements: vec![Stmt::Expression(call("g", vec![]))],
                },
            ],
        }
    );
}

// Errors

#[test]
fn missing_semicolon_points_at_next_token() {
    let err = parse_source("VAL x: Integer = 1 VAL").unwrap_err();
    assert_eq!(err.offset, 19);
}

#[test]
fn missing_end_points_past_last_token() {
    let err = parse_source("FUN main() DO RETURN 1;").unwrap_err();
    assert_eq!(err.offset, 23);
    assert_eq!(err.message, "expected 'END', found end of input");
}

#[test]
fn error_offsets_count_characters() {
    let err = parse_source("VAL s = \"é\" VAL").unwrap_err();
    assert_eq!(err.offset, 12);

    let err = parse_source("FUN main() DO print(\"é\");").unwrap_err();
    assert_eq!(err.offset, 25);
}

#[test]
fn switch_requires_default() {
    let err = parse_source("FUN main() DO SWITCH 1 CASE 1: END END").unwrap_err();
    assert_eq!(err.message, "expected 'DEFAULT', found 'END'");
    assert_eq!(err.offset, 31);
}

#[test]
fn trailing_comma_in_call_is_rejected() {
    let tokens = plc_lexer::lex("f(1,)").unwrap();
    let err = Parser::new(&tokens).parse_expression().unwrap_err();
    assert_eq!(err.offset, 4);
}

#[test]
fn trailing_comma_in_parameters_is_rejected() {
    let err = parse_source("FUN f(a: Integer,) DO END").unwrap_err();
    assert_eq!(err.offset, 17);
}

#[test]
fn global_after_function_is_rejected() {
    let err = parse_source("FUN main() DO END VAR x = 1;").unwrap_err();
    assert_eq!(err.message, "expected global or function, found 'VAR'");
    assert_eq!(err.offset, 18);
}

#[test]
fn invalid_escape_points_at_literal() {
    let err = parse_source(r#"VAL s = "a\qb";"#).unwrap_err();
    assert_eq!(err.offset, 8);
    assert!(err.message.contains("invalid escape"), "{}", err.message);
}

#[test]
fn missing_operand() {
    let tokens = plc_lexer::lex("1 +").unwrap();
    let err = Parser::new(&tokens).parse_expression().unwrap_err();
    assert_eq!(err.message, "expected expression, found end of input");
    assert_eq!(err.offset, 3);
}

#[test]
fn list_requires_an_element() {
    let err = parse_source("LIST xs: Integer = [];").unwrap_err();
    assert_eq!(err.offset, 20);
}
