//! Single binary arithmetic expressions for the `calculate` capability.
//!
//! ```rust
//! use ftooling::builtin::calculator::{CalculatorError, evaluate_expression};
//!
//! assert_eq!(evaluate_expression("5+3").as_deref(), Ok("5+3 = 8"));
//! assert_eq!(evaluate_expression("7 / 2").as_deref(), Ok("7 / 2 = 3.50"));
//! assert_eq!(evaluate_expression("10/0"), Err(CalculatorError::DivisionByZero));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use fprovider::ToolDefinition;
use serde::Deserialize;
use serde_json::json;

use crate::{Tool, ToolError, ToolExecutionContext, ToolFuture, parse_args};

pub const CALCULATE_TOOL_NAME: &str = "calculate";

/// Scan order for operators. The first operator present decides the split.
const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    InvalidExpression(String),
    DivisionByZero,
}

impl Display for CalculatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExpression(reason) => write!(f, "invalid expression: {reason}"),
            Self::DivisionByZero => f.write_str("division by zero"),
        }
    }
}

impl Error for CalculatorError {}

impl From<CalculatorError> for ToolError {
    fn from(value: CalculatorError) -> Self {
        ToolError::execution(format!("calculation failed: {value}"))
    }
}

/// Evaluates `expression` and renders it as `"<expression> = <result>"`.
///
/// Whitespace is ignored. Operators are checked in `+ - * /` order and the first one found
/// must occur exactly once. Operands keep only ASCII digits and `.`, so `"$10 * 2"` reads
/// as `10 * 2`. Whole results render without decimals, others with two.
pub fn evaluate_expression(expression: &str) -> Result<String, CalculatorError> {
    let compact = expression
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();

    let operator = OPERATORS
        .into_iter()
        .find(|operator| compact.contains(*operator))
        .ok_or_else(|| {
            CalculatorError::InvalidExpression(format!(
                "unsupported expression format: {expression}"
            ))
        })?;

    if compact.matches(operator).count() != 1 {
        return Err(CalculatorError::InvalidExpression(format!(
            "expected exactly one '{operator}' in: {expression}"
        )));
    }

    let (left, right) = compact.split_once(operator).ok_or_else(|| {
        CalculatorError::InvalidExpression(format!("unsupported expression format: {expression}"))
    })?;

    let left = parse_operand(left, "left")?;
    let right = parse_operand(right, "right")?;

    let result = match operator {
        '+' => left + right,
        '-' => left - right,
        '*' => left * right,
        _ => {
            if right == 0.0 {
                return Err(CalculatorError::DivisionByZero);
            }
            left / right
        }
    };

    if !result.is_finite() {
        return Err(CalculatorError::InvalidExpression(format!(
            "result of {expression} is not a finite number"
        )));
    }

    if result.fract() == 0.0 {
        Ok(format!("{expression} = {result:.0}"))
    } else {
        Ok(format!("{expression} = {result:.2}"))
    }
}

fn parse_operand(raw: &str, side: &str) -> Result<f64, CalculatorError> {
    let numeric = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect::<String>();

    if numeric.is_empty() {
        return Err(CalculatorError::InvalidExpression(format!(
            "invalid {side} operand: {raw}"
        )));
    }

    numeric.parse::<f64>().map_err(|_| {
        CalculatorError::InvalidExpression(format!("invalid {side} operand: {raw}"))
    })
}

#[derive(Debug, Deserialize)]
pub struct CalculateArgs {
    pub expression: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CalculateTool;

impl Tool for CalculateTool {
    fn definition(&self) -> ToolDefinition {
        let schema = json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The mathematical expression to calculate (e.g., '5+3', '10*2', '15/3')"
                }
            },
            "required": ["expression"]
        });

        ToolDefinition {
            name: CALCULATE_TOOL_NAME.to_string(),
            description:
                "Perform basic arithmetic calculations (addition, subtraction, multiplication, division)"
                    .to_string(),
            input_schema: schema.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let args: CalculateArgs = parse_args(args_json)?;
            Ok(evaluate_expression(&args.expression)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolErrorKind;

    #[test]
    fn evaluates_each_operator() {
        assert_eq!(evaluate_expression("5+3").as_deref(), Ok("5+3 = 8"));
        assert_eq!(evaluate_expression("9-4").as_deref(), Ok("9-4 = 5"));
        assert_eq!(evaluate_expression("10*2").as_deref(), Ok("10*2 = 20"));
        assert_eq!(evaluate_expression("15/3").as_deref(), Ok("15/3 = 5"));
        assert_eq!(evaluate_expression("1/3").as_deref(), Ok("1/3 = 0.33"));
        assert_eq!(evaluate_expression("2.5*2").as_deref(), Ok("2.5*2 = 5"));
    }

    #[test]
    fn keeps_original_spacing_in_rendered_output() {
        assert_eq!(evaluate_expression(" 5 + 3 ").as_deref(), Ok(" 5 + 3  = 8"));
        assert_eq!(evaluate_expression("5 + 3").as_deref(), Ok("5 + 3 = 8"));
    }

    #[test]
    fn strips_non_numeric_characters_from_operands() {
        assert_eq!(evaluate_expression("$10 * 2").as_deref(), Ok("$10 * 2 = 20"));
        assert_eq!(evaluate_expression("3kg + 4kg").as_deref(), Ok("3kg + 4kg = 7"));
    }

    #[test]
    fn operator_scan_order_decides_the_split() {
        // '-' is scanned before '*', so the left operand keeps only "3".
        assert_eq!(evaluate_expression("3*-2").as_deref(), Ok("3*-2 = 1"));
        // '+' wins over '-'; the right operand "2-3" reads as 23.
        assert_eq!(evaluate_expression("1+2-3").as_deref(), Ok("1+2-3 = 24"));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(evaluate_expression("10/0"), Err(CalculatorError::DivisionByZero));
        assert_eq!(evaluate_expression("10/0.0"), Err(CalculatorError::DivisionByZero));
    }

    #[test]
    fn malformed_expressions_are_invalid() {
        for input in ["abc+3", "5+", "+5", "1+2+3", "42", "", "1.2.3+1", "./2"] {
            assert!(
                matches!(
                    evaluate_expression(input),
                    Err(CalculatorError::InvalidExpression(_))
                ),
                "{input:?} should be invalid"
            );
        }
    }

    #[test]
    fn evaluation_is_repeatable() {
        let first = evaluate_expression("7/2");
        let second = evaluate_expression("7/2");
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Ok("7/2 = 3.50"));
    }

    #[tokio::test]
    async fn calculate_tool_decodes_arguments_and_maps_errors() {
        let tool = CalculateTool;
        let context = ToolExecutionContext::new("req-1");

        let output = tool
            .invoke("{\"expression\":\"5 + 3\"}", &context)
            .await
            .expect("calculation should succeed");
        assert_eq!(output, "5 + 3 = 8");

        let error = tool
            .invoke("{\"expression\":\"10/0\"}", &context)
            .await
            .expect_err("division by zero should fail");
        assert_eq!(error.kind, ToolErrorKind::Execution);
        assert_eq!(error.message, "calculation failed: division by zero");

        let error = tool
            .invoke("{\"expr\":\"1+1\"}", &context)
            .await
            .expect_err("missing field should fail");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    }

    #[test]
    fn definition_declares_required_expression() {
        let definition = CalculateTool.definition();
        assert_eq!(definition.name, "calculate");
        let schema: serde_json::Value =
            serde_json::from_str(&definition.input_schema).expect("schema is json");
        assert_eq!(schema["required"][0], "expression");
        assert_eq!(schema["properties"]["expression"]["type"], "string");
    }
}
