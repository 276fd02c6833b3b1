mod common;

use common::run_ok;

#[test]
fn test_stress_counting_loop() {
    let source = "
        var sum = 0;
        for (var i = 1; i <= 10000; i = i + 1) sum = sum + i;
        print(sum);
    ";
    assert_eq!(run_ok(source), "50005000");
}

#[test]
fn test_stress_nested_loops() {
    let source = "
        var count = 0;
        for (var i = 0; i < 100; i = i + 1) {
            for (var j = 0; j < 100; j = j + 1) {
                count = count + 1;
            }
        }
        print(count);
    ";
    assert_eq!(run_ok(source), "10000");
}

#[test]
fn test_stress_recursive_fibonacci() {
    let source = "
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print(fib(20));
    ";
    assert_eq!(run_ok(source), "6765");
}

#[test]
fn test_stress_moderate_recursion_depth() {
    let source = "
        fun depth(n) {
            if (n == 0) return 0;
            return 1 + depth(n - 1);
        }
        print(depth(50));
    ";
    assert_eq!(run_ok(source), "50");
}

#[test]
fn test_stress_many_closures() {
    let source = "
        fun adder(n) { return fun (x) { return x + n; }; }
        var total = 0;
        for (var i = 0; i < 500; i = i + 1) total = adder(i)(total);
        print(total);
    ";
    assert_eq!(run_ok(source), "124750");
}
