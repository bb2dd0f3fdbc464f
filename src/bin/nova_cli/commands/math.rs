use anyhow::Result;
use novadb::MathOperator;

use crate::context::Context;

pub fn execute(
    context: &mut Context,
    key: &str,
    operator: &str,
    operand: f64,
    allow_negative: bool,
) -> Result<()> {
    let op: MathOperator = operator.parse()?;
    let result = context.db_mut().math(key, op, operand, allow_negative)?;
    println!("{}", context.formatter().format_value(&result)?);
    Ok(())
}
