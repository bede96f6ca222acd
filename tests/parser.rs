use loxide as lox;

use lox::ast_printer::AstPrinter;
use lox::error::Diagnostics;
use lox::expr::Expr;
use lox::parser::Parser;
use lox::scanner::Scanner;
use lox::stmt::Stmt;

fn parse(source: &str) -> (Vec<Stmt>, Vec<String>) {
    let mut diagnostics = Diagnostics::new();

    let tokens: Vec<_> = Scanner::new(source).filter_map(Result::ok).collect();
    let statements = Parser::new(tokens, &mut diagnostics).parse();

    let errors = diagnostics
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect();

    (statements, errors)
}

/// Parses a single expression statement and renders it in prefix form.
fn parse_expr(source: &str) -> String {
    let (statements, errors) = parse(source);

    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    match &statements[0] {
        Stmt::Expression(expr) => AstPrinter::print(expr),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse_expr("1 + 2 * 3;"), "(+ 1.0 (* 2.0 3.0))");
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(parse_expr("(1 + 2) * 3;"), "(* (group (+ 1.0 2.0)) 3.0)");
}

#[test]
fn unary_operators_nest() {
    assert_eq!(parse_expr("!!true;"), "(! (! true))");
    assert_eq!(parse_expr("-1 - -2;"), "(- (- 1.0) (- 2.0))");
}

#[test]
fn comparison_binds_tighter_than_equality() {
    assert_eq!(parse_expr("1 < 2 == true;"), "(== (< 1.0 2.0) true)");
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(parse_expr("a or b and c;"), "(or a (and b c))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(parse_expr("a = b = 1;"), "(= a (= b 1.0))");
}

#[test]
fn property_chains_associate_left() {
    assert_eq!(parse_expr("a.b.c;"), "(. (. a b) c)");
}

#[test]
fn assignment_to_a_property_becomes_a_set() {
    assert_eq!(parse_expr("a.b = 1;"), "(= (. a b) 1.0)");
}

#[test]
fn calls_chain() {
    assert_eq!(parse_expr("f(1)(2);"), "(call (call f 1.0) 2.0)");
}

#[test]
fn this_and_super_parse_as_primaries() {
    assert_eq!(parse_expr("this.x;"), "(. this x)");
    assert_eq!(parse_expr("super.m();"), "(call (super m))");
}

#[test]
fn invalid_assignment_target_is_reported_without_panic() {
    let (statements, errors) = parse("a + b = c;");

    assert_eq!(statements.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Invalid assignment target."));
}

#[test]
fn parser_synchronizes_after_an_error() {
    let (statements, errors) = parse("var = 1; print 2;");

    // The bad declaration is reported; the print statement still parses.
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Expect variable name."));
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], Stmt::Print(_)));
}

#[test]
fn error_at_end_of_input_says_so() {
    let (_, errors) = parse("print 1");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(" at end"));
}

#[test]
fn for_loop_desugars_to_block_and_while() {
    let (statements, errors) = parse("for (var i = 0; i < 3; i = i + 1) print i;");

    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    let Stmt::Block(outer) = &statements[0] else {
        panic!("expected a block, got {:?}", statements[0]);
    };
    assert_eq!(outer.len(), 2);
    assert!(matches!(outer[0], Stmt::Var { .. }));

    let Stmt::While { body, .. } = &outer[1] else {
        panic!("expected a while loop, got {:?}", outer[1]);
    };

    let Stmt::Block(inner) = body.as_ref() else {
        panic!("expected a block body, got {:?}", body);
    };
    assert_eq!(inner.len(), 2);
    assert!(matches!(inner[0], Stmt::Print(_)));
    assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
}

#[test]
fn empty_for_clauses_leave_a_bare_while() {
    let (statements, errors) = parse("for (;;) print 1;");

    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    let Stmt::While { body, .. } = &statements[0] else {
        panic!("expected a while loop, got {:?}", statements[0]);
    };
    assert!(matches!(body.as_ref(), Stmt::Print(_)));
}

#[test]
fn class_declaration_with_superclass_parses() {
    let (statements, errors) = parse("class B < A { m() { return 1; } }");

    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    let Stmt::Class {
        superclass,
        methods,
        ..
    } = &statements[0]
    else {
        panic!("expected a class, got {:?}", statements[0]);
    };
    assert!(matches!(superclass, Some(Expr::Variable { .. })));
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name.lexeme, "m");
}

#[test]
fn unterminated_block_is_a_syntax_error() {
    // `break` is not part of the language; it scans as an identifier, and
    // the unclosed block is what the parser trips over.
    let (_, errors) = parse("for(;;) { if (true) break;");

    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| e.contains("Expect '}' after block.")));
}
