use quickbeam::*;

// Helper to parse and evaluate an expression
fn eval(src: &str) -> std::result::Result<Value, EvalError> {
    let mut env = Environment::new();
    eval_with_env(src, &mut env)
}

// Helper with pre-defined environment
fn eval_with_env(src: &str, env: &mut Environment) -> std::result::Result<Value, EvalError> {
    let tokens = tokenize(&format!("v = {};", src)).expect("tokenize failed");
    let program = parse(&tokens).expect("parse failed");
    let ctx = EvalContext::default();
    program.statements[0].expression.eval(env, &ctx)
}

fn int(n: i64) -> Value {
    Value::from(n)
}

fn big(digits: &str) -> Value {
    digits.parse().expect("invalid digits")
}

// ═══════════════════════════════════════════════════════════════════════
// Literal Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_lit_integer() {
    assert_eq!(eval("42").unwrap(), int(42));
    assert_eq!(eval("0").unwrap(), int(0));
    assert_eq!(eval("-1").unwrap(), int(-1));
}

#[test]
fn test_eval_lit_wide_integer() {
    let digits = "9".repeat(80);
    assert_eq!(eval(&digits).unwrap(), big(&digits));
}

// ═══════════════════════════════════════════════════════════════════════
// Variable Lookup
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_variable_defined() {
    let mut env = Environment::new();
    env.assign("x", 42);

    assert_eq!(eval_with_env("x", &mut env).unwrap(), int(42));
}

#[test]
fn test_eval_variable_undefined() {
    let result = eval("undefined_var");
    assert!(matches!(result, Err(EvalError::UndefinedVariable { .. })));
}

#[test]
fn test_eval_variable_undefined_kind() {
    let err = eval("a + 1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}

// ═══════════════════════════════════════════════════════════════════════
// Unary Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_unary_neg() {
    assert_eq!(eval("-42").unwrap(), int(-42));
    assert_eq!(eval("--42").unwrap(), int(42));
    assert_eq!(eval("---42").unwrap(), int(-42));
}

#[test]
fn test_eval_unary_neg_of_group() {
    assert_eq!(eval("-(2 + 3)").unwrap(), int(-5));
    assert_eq!(eval("---(1 + 2)").unwrap(), int(-3));
}

#[test]
fn test_eval_unary_neg_past_i128() {
    let max = "170141183460469231731687303715884105727";
    assert_eq!(
        eval(&format!("-(-{} - 1)", max)).unwrap(),
        big("170141183460469231731687303715884105728")
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Binary Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_binary_add() {
    assert_eq!(eval("1 + 2").unwrap(), int(3));
}

#[test]
fn test_eval_binary_sub() {
    assert_eq!(eval("5 - 3").unwrap(), int(2));
    assert_eq!(eval("3 - 5").unwrap(), int(-2));
}

#[test]
fn test_eval_binary_mul() {
    assert_eq!(eval("3 * 4").unwrap(), int(12));
    assert_eq!(eval("-3 * 4").unwrap(), int(-12));
}

#[test]
fn test_eval_binary_no_overflow() {
    let max = "170141183460469231731687303715884105727";
    assert_eq!(
        eval(&format!("{} + 1", max)).unwrap(),
        big("170141183460469231731687303715884105728")
    );
    assert_eq!(
        eval(&format!("{} * {}", max, max)).unwrap(),
        big("28948022309329048855892746252171976962977213799489202546401021394546514198529")
    );
}

#[test]
fn test_eval_repeated_products() {
    let mut env = Environment::new();
    env.assign("a", 1_000_000_000_000_i64);
    assert_eq!(
        eval_with_env("a*a*a*a", &mut env).unwrap(),
        big(&format!("1{}", "0".repeat(48)))
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Precedence and Associativity
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_left_associative_sub() {
    assert_eq!(eval("5-2-1").unwrap(), int(2));
}

#[test]
fn test_eval_mul_before_add() {
    assert_eq!(eval("2+3*4").unwrap(), int(14));
}

#[test]
fn test_eval_parens() {
    assert_eq!(eval("(2+3)*4").unwrap(), int(20));
    assert_eq!(eval("((((7))))").unwrap(), int(7));
}

#[test]
fn test_eval_mixed() {
    let mut env = Environment::new();
    env.assign("x", 1);
    env.assign("y", 2);
    assert_eq!(eval_with_env("---(x+y)*(x+-y)", &mut env).unwrap(), int(3));
}

// ═══════════════════════════════════════════════════════════════════════
// Depth Limits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_long_sum() {
    let src = format!("0{}", " + 1".repeat(3000));
    assert_eq!(eval(&src).unwrap(), int(3000));
}

#[test]
fn test_eval_respects_context_depth() {
    let tokens = tokenize("v = -(-(-(1)));").unwrap();
    let program = parse(&tokens).unwrap();
    let env = Environment::new();
    let expr = &program.statements[0].expression;

    assert_eq!(expr.eval(&env, &EvalContext::default()).unwrap(), int(-1));
    assert_eq!(
        expr.eval(&env, &EvalContext::with_max_depth(1)).unwrap_err(),
        EvalError::DepthExceeded { max: 1 }
    );
}
