use loxide as lox;

use lox::error::Diagnostics;
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::resolver::Resolver;
use lox::scanner::Scanner;

/// Runs a program end to end, returning captured stdout and the runtime
/// error (if any).  Panics on compile-stage errors.
fn execute(source: &str) -> (String, Option<String>) {
    let mut diagnostics = Diagnostics::new();

    let mut tokens = Vec::new();
    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => diagnostics.report(e),
        }
    }

    let statements = Parser::new(tokens, &mut diagnostics).parse();
    assert!(
        !diagnostics.had_error(),
        "unexpected compile errors: {:?}",
        diagnostics.errors()
    );

    let locals = Resolver::new(&mut diagnostics).resolve(&statements);
    assert!(
        !diagnostics.had_error(),
        "unexpected resolve errors: {:?}",
        diagnostics.errors()
    );

    let mut output: Vec<u8> = Vec::new();

    let error = {
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.update_locals(locals);
        interpreter.interpret(&statements).err().map(|e| e.to_string())
    };

    (String::from_utf8(output).expect("output is UTF-8"), error)
}

fn assert_prints(source: &str, expected: &str) {
    let (output, error) = execute(source);

    assert_eq!(error, None, "unexpected runtime error for {:?}", source);
    assert_eq!(output, expected);
}

fn assert_runtime_error(source: &str, message_fragment: &str) -> String {
    let (output, error) = execute(source);

    let error = error.unwrap_or_else(|| panic!("expected a runtime error for {:?}", source));
    assert!(
        error.contains(message_fragment),
        "error {:?} does not mention {:?}",
        error,
        message_fragment
    );

    output
}

// ─────────────────────────────────────────────────────────────────────────────
// Expressions and statements
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn arithmetic_respects_precedence() {
    assert_prints("print 1 + 2 * 3;", "7\n");
}

#[test]
fn string_concatenation() {
    assert_prints("var a = \"hi\"; print a + \" world\";", "hi world\n");
}

#[test]
fn number_formatting() {
    assert_prints(
        "print 2.5; print 5 / 2; print 4 / 2; print -0.75;",
        "2.5\n2.5\n2\n-0.75\n",
    );
}

#[test]
fn equality_rules() {
    assert_prints(
        "print 1 == 1; print \"a\" == \"a\"; print nil == nil; print 1 == \"1\"; print true != false;",
        "true\ntrue\ntrue\nfalse\ntrue\n",
    );
}

#[test]
fn truthiness_only_excludes_nil_and_false() {
    assert_prints(
        "if (0) print \"zero\"; if (\"\") print \"empty\"; if (nil) print \"no\"; else print \"nil falsy\";",
        "zero\nempty\nnil falsy\n",
    );
}

#[test]
fn logical_operators_return_an_operand() {
    assert_prints(
        "print \"hi\" or 2; print nil or \"yes\"; print nil and 1; print 1 and 2;",
        "hi\nyes\nnil\n2\n",
    );
}

#[test]
fn logical_or_short_circuits() {
    assert_prints(
        "var a = \"before\"; var b = true or (a = \"after\"); print a;",
        "before\n",
    );
}

#[test]
fn assignment_is_an_expression() {
    assert_prints("var a = 1; print a = 2; print a;", "2\n2\n");
}

#[test]
fn block_scoping_shadows_and_restores() {
    assert_prints("var a = 1; { var a = 2; print a; } print a;", "2\n1\n");
}

#[test]
fn global_redefinition_is_permitted() {
    assert_prints("var a = 1; var a = 2; print a;", "2\n");
}

#[test]
fn uninitialized_variables_are_nil() {
    assert_prints("var a; print a;", "nil\n");
}

#[test]
fn while_loops_run_to_completion() {
    assert_prints(
        "var i = 0; while (i < 3) { print i; i = i + 1; }",
        "0\n1\n2\n",
    );
}

#[test]
fn for_loops_desugar_correctly() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Functions and closures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn recursive_functions() {
    assert_prints(
        "fun fib(n){ if (n<2) return n; return fib(n-1)+fib(n-2);} print fib(10);",
        "55\n",
    );
}

#[test]
fn functions_without_a_return_yield_nil() {
    assert_prints("fun f() {} print f();", "nil\n");
}

#[test]
fn return_unwinds_past_remaining_statements() {
    assert_prints("fun f() { return \"done\"; print \"nope\"; } print f();", "done\n");
}

#[test]
fn return_unwinds_out_of_loops() {
    assert_prints(
        "fun f() { for (;;) { return \"out\"; } } print f();",
        "out\n",
    );
}

#[test]
fn closures_share_their_captured_environment() {
    assert_prints(
        "fun make() { var i = 0; fun g() { i = i + 1; return i; } return g; } \
         var counter = make(); print counter(); print counter(); print counter();",
        "1\n2\n3\n",
    );
}

#[test]
fn closures_capture_the_defining_scope_not_the_calling_scope() {
    assert_prints(
        "var x = \"global\"; { fun show() { print x; } var x = \"local\"; show(); }",
        "global\n",
    );
}

#[test]
fn clock_is_a_native_function() {
    assert_prints("print clock() >= 0;", "true\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Classes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn methods_dispatch_on_instances() {
    assert_prints(
        "class Greet { hi(name){ print \"hi \" + name; } } Greet().hi(\"lox\");",
        "hi lox\n",
    );
}

#[test]
fn fields_are_read_and_written_through_this() {
    assert_prints(
        "class A{ init(x){ this.x = x; } } class B < A { show(){ print this.x; } } var b = B(3); b.show();",
        "3\n",
    );
}

#[test]
fn fields_can_be_set_from_outside() {
    assert_prints(
        "class Bag {} var bag = Bag(); bag.n = 1; bag.n = bag.n + 1; print bag.n;",
        "2\n",
    );
}

#[test]
fn methods_see_state_through_this() {
    assert_prints(
        "class Counter { init() { this.n = 0; } inc() { this.n = this.n + 1; return this.n; } } \
         var c = Counter(); c.inc(); print c.inc();",
        "2\n",
    );
}

#[test]
fn bound_methods_remember_their_instance() {
    assert_prints(
        "class Person { init(name) { this.name = name; } greet() { print \"hi \" + this.name; } } \
         var m = Person(\"lox\").greet; m();",
        "hi lox\n",
    );
}

#[test]
fn initializer_calls_return_the_instance() {
    assert_prints(
        "class A { init() { this.x = 1; } } var a = A(); print a.init();",
        "A instance\n",
    );
}

#[test]
fn super_calls_the_superclass_method() {
    assert_prints(
        "class A { f() { print \"A\"; } } class B < A { f() { super.f(); print \"B\"; } } B().f();",
        "A\nB\n",
    );
}

#[test]
fn method_lookup_walks_the_superclass_chain() {
    assert_prints(
        "class A { m() { print \"A.m\"; } } class B < A {} class C < B { test() { super.m(); } } C().test();",
        "A.m\n",
    );
}

#[test]
fn callables_stringify_by_kind() {
    assert_prints(
        "fun f() {} class A {} print f; print clock; print A; print A();",
        "<fn f>\n<native fn>\nA\nA instance\n",
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn type_error_stops_execution() {
    let output = assert_runtime_error(
        "print 1; print 1 + \"a\"; print 2;",
        "Operands must be two numbers or two strings.",
    );

    // The first statement ran; nothing after the failure did.
    assert_eq!(output, "1\n");
}

#[test]
fn runtime_errors_carry_their_line() {
    let (_, error) = execute("print 1;\nprint -\"a\";");

    let error = error.expect("expected a runtime error");
    assert_eq!(error, "Operand must be a number.\n[line 2]");
}

#[test]
fn reading_an_undefined_variable_fails() {
    assert_runtime_error("print missing;", "Undefined variable 'missing'.");
}

#[test]
fn assigning_an_undefined_variable_fails() {
    assert_runtime_error("missing = 1;", "Undefined variable 'missing'.");
}

#[test]
fn only_functions_and_classes_are_callable() {
    assert_runtime_error("\"not a fn\"();", "Can only call functions and classes.");
}

#[test]
fn arity_is_checked() {
    assert_runtime_error("fun f(a) {} f(1, 2);", "Expected 1 arguments but got 2.");
}

#[test]
fn property_access_requires_an_instance() {
    assert_runtime_error("var x = 1; print x.y;", "Only instances have properties.");
}

#[test]
fn field_writes_require_an_instance() {
    assert_runtime_error("var x = 1; x.y = 2;", "Only instances have fields.");
}

#[test]
fn undefined_properties_fail() {
    assert_runtime_error("class A {} print A().missing;", "Undefined property 'missing'.");
}

#[test]
fn undefined_superclass_methods_fail() {
    assert_runtime_error(
        "class A {} class B < A { m() { super.missing(); } } B().m();",
        "Undefined property 'missing'.",
    );
}

#[test]
fn superclass_must_be_a_class() {
    assert_runtime_error(
        "var NotAClass = 1; class Sub < NotAClass {}",
        "Superclass must be a class.",
    );
}
