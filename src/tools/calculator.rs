use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args};
use crate::types::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

/// Largest n whose factorial is still finite in an f64.
const MAX_FACTORIAL: u64 = 170;
const MAX_PRIME_CANDIDATE: f64 = 1e12;

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    Factorial,
    IsPrime,
    SquareRoot,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CalculatorArgs {
    operation: Operation,
    /// First operand (the only one for factorial, is_prime and square_root)
    a: f64,
    /// Second operand for binary operations
    #[serde(default)]
    b: Option<f64>,
}

pub struct Calculator;

impl Calculator {
    fn compute(args: &CalculatorArgs) -> std::result::Result<Value, String> {
        let a = args.a;
        let b = || {
            args.b
                .ok_or_else(|| format!("operation {:?} needs a second operand 'b'", args.operation))
        };

        let result = match args.operation {
            Operation::Add => json!(a + b()?),
            Operation::Subtract => json!(a - b()?),
            Operation::Multiply => json!(a * b()?),
            Operation::Divide => {
                let b = b()?;
                if b == 0.0 {
                    return Err("Division by zero is undefined".to_string());
                }
                json!(a / b)
            }
            Operation::Exponentiate => json!(a.powf(b()?)),
            Operation::Factorial => {
                if a < 0.0 || a.fract() != 0.0 {
                    return Err("Factorial is only defined for non-negative integers".to_string());
                }
                if a > MAX_FACTORIAL as f64 {
                    return Err(format!("Factorial input must be at most {}", MAX_FACTORIAL));
                }
                json!((1..=a as u64).map(|n| n as f64).product::<f64>())
            }
            Operation::IsPrime => {
                if a.fract() != 0.0 {
                    return Err("Primality is only defined for integers".to_string());
                }
                if a > MAX_PRIME_CANDIDATE {
                    return Err(format!("Primality input must be at most {}", MAX_PRIME_CANDIDATE));
                }
                json!(is_prime(a as i64))
            }
            Operation::SquareRoot => {
                if a < 0.0 {
                    return Err("Square root of a negative number is undefined".to_string());
                }
                json!(a.sqrt())
            }
        };

        Ok(result)
    }
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform arithmetic: add, subtract, multiply, divide, exponentiate, factorial, is_prime, square_root"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<CalculatorArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: CalculatorArgs = parse_args(self.name(), args)?;

        // Math errors go back to the model as data
        Ok(match Self::compute(&args) {
            Ok(result) => json!({ "operation": args.operation_name(), "result": result }),
            Err(error) => json!({ "operation": args.operation_name(), "error": error }),
        })
    }
}

impl CalculatorArgs {
    fn operation_name(&self) -> &'static str {
        match self.operation {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Exponentiate => "exponentiate",
            Operation::Factorial => "factorial",
            Operation::IsPrime => "is_prime",
            Operation::SquareRoot => "square_root",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    async fn run(args: Value) -> Value {
        Calculator.execute(args).await.unwrap()
    }

    #[rstest]
    #[case(json!({"operation": "add", "a": 5, "b": 3}), json!(8.0))]
    #[case(json!({"operation": "subtract", "a": 5, "b": 3}), json!(2.0))]
    #[case(json!({"operation": "multiply", "a": 4, "b": 2.5}), json!(10.0))]
    #[case(json!({"operation": "divide", "a": 9, "b": 3}), json!(3.0))]
    #[case(json!({"operation": "exponentiate", "a": 2, "b": 10}), json!(1024.0))]
    #[case(json!({"operation": "factorial", "a": 5}), json!(120.0))]
    #[case(json!({"operation": "factorial", "a": 0}), json!(1.0))]
    #[case(json!({"operation": "is_prime", "a": 97}), json!(true))]
    #[case(json!({"operation": "is_prime", "a": 1}), json!(false))]
    #[case(json!({"operation": "square_root", "a": 16}), json!(4.0))]
    #[tokio::test]
    async fn test_operations(#[case] args: Value, #[case] expected: Value) {
        assert_eq!(run(args).await["result"], expected);
    }

    #[rstest]
    #[case(json!({"operation": "divide", "a": 1, "b": 0}), "Division by zero")]
    #[case(json!({"operation": "factorial", "a": -1}), "non-negative integers")]
    #[case(json!({"operation": "factorial", "a": 2.5}), "non-negative integers")]
    #[case(json!({"operation": "square_root", "a": -4}), "negative")]
    #[case(json!({"operation": "add", "a": 1}), "second operand")]
    #[tokio::test]
    async fn test_math_errors_are_results(#[case] args: Value, #[case] fragment: &str) {
        let value = run(args).await;
        assert!(value.get("result").is_none());
        assert!(value["error"].as_str().unwrap().contains(fragment));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_invalid_input() {
        let err = Calculator
            .execute(json!({"operation": "modulo", "a": 1, "b": 2}))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::types::AppError::InvalidInput(_)));
    }
}
