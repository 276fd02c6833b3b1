mod common;

use common::{run_ok, run_runtime_error, syntax_errors};

// ============================================================================
// Declarations and calls
// ============================================================================

#[test]
fn test_user_defined_function() {
    assert_eq!(run_ok("fun add(a, b) { return a + b; } print(add(2, 3));"), "5");
}

#[test]
fn test_function_without_return_yields_nil() {
    assert_eq!(run_ok("fun noop() {} print(noop());"), "nil");
    assert_eq!(run_ok("fun early() { return; } print(early());"), "nil");
}

#[test]
fn test_return_exits_from_inside_loop() {
    let source = "
        fun firstOver(limit) {
            var i = 0;
            while (true) {
                if (i * i > limit) return i;
                i = i + 1;
            }
        }
        print(firstOver(50));
    ";
    assert_eq!(run_ok(source), "8");
}

#[test]
fn test_arguments_are_evaluated_left_to_right() {
    let source = "
        fun show(x) { print(x); return x; }
        fun pair(a, b) {}
        pair(show(1), show(2));
    ";
    assert_eq!(run_ok(source), "12");
}

#[test]
fn test_function_recursion() {
    let source = "
        fun fact(n) {
            if (n <= 1) return 1;
            return n * fact(n - 1);
        }
        print(fact(10));
    ";
    assert_eq!(run_ok(source), "3628800");
}

#[test]
fn test_mutual_recursion_through_globals() {
    let source = "
        fun isEven(n) { if (n == 0) return true; return isOdd(n - 1); }
        fun isOdd(n) { if (n == 0) return false; return isEven(n - 1); }
        print(isEven(10)); print(isOdd(7));
    ";
    assert_eq!(run_ok(source), "truetrue");
}

#[test]
fn test_deep_recursion_completes() {
    let source = "
        fun depth(n) { if (n == 0) return 0; return 1 + depth(n - 1); }
        print(depth(3000));
    ";
    assert_eq!(run_ok(source), "3000");
}

#[test]
fn test_runaway_recursion_is_a_runtime_error() {
    let source = "fun depth(n) { if (n == 0) return 0; return 1 + depth(n - 1); }\nprint(\"start\");\nprint(depth(100000));";
    let outcome = common::run_program(source);
    assert_eq!(outcome.output, "start");
    assert_eq!(outcome.stderr(), "Stack overflow.\n[line 1]\n");
}

#[test]
fn test_infinite_recursion_is_a_runtime_error() {
    assert_eq!(
        run_runtime_error("fun forever() { return forever(); }\nforever();"),
        "Stack overflow.\n[line 1]\n"
    );
}

#[test]
fn test_functions_are_values() {
    let source = "
        fun twice(f, x) { return f(f(x)); }
        fun inc(n) { return n + 1; }
        print(twice(inc, 5));
    ";
    assert_eq!(run_ok(source), "7");
}

#[test]
fn test_function_display() {
    assert_eq!(run_ok("fun hello() {} print(hello);"), "<fn hello>");
    assert_eq!(run_ok("print(print);"), "<native fn>");
}

#[test]
fn test_duplicate_parameter_names_shadow() {
    assert_eq!(run_ok("fun f(a, a) { return a; } print(f(1, 2));"), "2");
}

// ============================================================================
// Closures
// ============================================================================

#[test]
fn test_counter_closure() {
    let source = "
        fun makeCounter() {
            var i = 0;
            fun count() {
                i = i + 1;
                print(i);
            }
            return count;
        }
        var counter = makeCounter();
        counter();
        counter();
        counter();
    ";
    assert_eq!(run_ok(source), "123");
}

#[test]
fn test_independent_closures() {
    let source = "
        fun makeCounter() {
            var i = 0;
            return fun () { i = i + 1; return i; };
        }
        var a = makeCounter();
        var b = makeCounter();
        a(); a();
        print(a()); print(b());
    ";
    assert_eq!(run_ok(source), "31");
}

#[test]
fn test_closures_share_captured_scope() {
    let source = "
        fun makePair() {
            var value = 0;
            fun set(v) { value = v; }
            fun get() { return value; }
            set(42);
            return get;
        }
        print(makePair()());
    ";
    assert_eq!(run_ok(source), "42");
}

#[test]
fn test_closure_sees_later_assignment_in_enclosing_scope() {
    let source = "
        var greeting = \"hi\";
        fun greet() { print(greeting); }
        greeting = \"bye\";
        greet();
    ";
    assert_eq!(run_ok(source), "bye");
}

#[test]
fn test_lexical_not_dynamic_scope() {
    let source = "
        var x = \"global\";
        fun show() { print(x); }
        fun caller() {
            var x = \"local\";
            show();
        }
        caller();
    ";
    assert_eq!(run_ok(source), "global");
}

// ============================================================================
// Lambdas
// ============================================================================

#[test]
fn test_lambda_assigned_and_called() {
    assert_eq!(run_ok("var square = fun (x) { return x * x; }; print(square(9));"), "81");
}

#[test]
fn test_lambda_called_immediately() {
    assert_eq!(run_ok("print(fun (a, b) { return a - b; }(10, 4));"), "6");
}

#[test]
fn test_lambda_passed_as_argument() {
    let source = "
        fun apply(f) { return f(3); }
        print(apply(fun (n) { return n * 10; }));
    ";
    assert_eq!(run_ok(source), "30");
}

#[test]
fn test_lambda_display() {
    assert_eq!(run_ok("var f = fun () {}; print(f);"), "<fn anonymous>");
}

#[test]
fn test_curried_lambdas() {
    let source = "
        var add = fun (a) { return fun (b) { return a + b; }; };
        print(add(2)(40));
    ";
    assert_eq!(run_ok(source), "42");
}

// ============================================================================
// Natives
// ============================================================================

#[test]
fn test_clock_is_monotonic_enough() {
    let source = "
        var start = clock();
        var end = clock();
        print(end >= start);
        print(start > 0);
    ";
    assert_eq!(run_ok(source), "truetrue");
}

#[test]
fn test_print_returns_nil() {
    assert_eq!(run_ok("var r = print(\"x\"); print(r);"), "xnil");
}

#[test]
fn test_natives_can_be_shadowed_locally() {
    assert_eq!(run_ok("{ var clock = 1; print(clock); } print(clock);"), "1<native fn>");
}

// ============================================================================
// Call errors
// ============================================================================

#[test]
fn test_calling_non_callable() {
    assert_eq!(
        run_runtime_error("\"not a function\"();"),
        "Can only call functions and classes.\n[line 1]\n"
    );
    assert_eq!(
        run_runtime_error("var n = nil;\nn();"),
        "Can only call functions and classes.\n[line 2]\n"
    );
}

#[test]
fn test_wrong_argument_count() {
    assert_eq!(
        run_runtime_error("fun f(a, b) {}\nf(1, 2, 3);"),
        "Expected 2 arguments but got 3.\n[line 2]\n"
    );
    assert_eq!(run_runtime_error("clock(1);"), "Expected 0 arguments but got 1.\n[line 1]\n");
    assert_eq!(run_runtime_error("print();"), "Expected 1 arguments but got 0.\n[line 1]\n");
}

#[test]
fn test_error_line_is_closing_paren() {
    let source = "fun f(a) {}\nf(\n1,\n2\n);";
    assert_eq!(run_runtime_error(source), "Expected 1 arguments but got 2.\n[line 5]\n");
}

#[test]
fn test_return_at_top_level() {
    assert_eq!(
        syntax_errors("return 1;"),
        vec!["[line 1] Error at 'return': Cannot return from top-level code."]
    );
}

#[test]
fn test_too_many_parameters() {
    let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));
    assert_eq!(
        syntax_errors(&source),
        vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
    );
}

#[test]
fn test_too_many_arguments() {
    let args = vec!["nil"; 256].join(", ");
    let source = format!("fun f() {{}} f({});", args);
    assert_eq!(
        syntax_errors(&source),
        vec!["[line 1] Error at 'nil': Can't have more than 255 arguments."]
    );
}
