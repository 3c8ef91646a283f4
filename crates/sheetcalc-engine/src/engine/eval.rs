//! Arithmetic evaluation of tokenized formulas.
//!
//! Evaluation is a single left-to-right pass with one pending operator.
//! `+`/`-` push a signed term onto a stack, `*`/`/` fold into the top of the
//! stack straight away, so they bind tighter. Each parenthesis level gets its
//! own stack; the enclosing ones wait on a heap-allocated list, so nesting
//! depth never reaches the call stack. The result of a level is the sum of
//! its stack.
//!
//! Division by zero follows IEEE float semantics (`inf` / `NaN`).

use super::cell_ref::CellRef;
use super::lexer::{Operator, Token};

/// Replace every reference token with its current value.
///
/// References that are not valid or that `lookup` does not know resolve to 0.
pub fn resolve(tokens: &[Token], lookup: impl Fn(&CellRef) -> Option<f64>) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Reference(name) => {
                let value = CellRef::parse(name)
                    .and_then(|cell_ref| lookup(&cell_ref))
                    .unwrap_or(0.0);
                Token::Number(value)
            }
            other => other.clone(),
        })
        .collect()
}

/// Evaluate resolved tokens. Any reference left in the stream counts as 0.
pub fn evaluate(tokens: &[Token]) -> f64 {
    // Enclosing levels with the operator waiting for each parenthesized value.
    let mut outer: Vec<(Vec<f64>, Operator)> = Vec::new();
    let mut stack: Vec<f64> = Vec::new();
    let mut pending = Operator::Add;

    for token in tokens {
        match token {
            Token::Number(n) => apply(pending, *n, &mut stack),
            Token::Reference(_) => apply(pending, 0.0, &mut stack),
            Token::Operator(op) => pending = *op,
            Token::OpenParen => {
                outer.push((std::mem::take(&mut stack), pending));
                pending = Operator::Add;
            }
            Token::CloseParen => {
                // A stray `)` never passes validation; stop here.
                let Some((parent, op)) = outer.pop() else {
                    break;
                };
                let inner: f64 = stack.iter().sum();
                stack = parent;
                apply(op, inner, &mut stack);
            }
        }
    }

    while let Some((parent, op)) = outer.pop() {
        let inner: f64 = stack.iter().sum();
        stack = parent;
        apply(op, inner, &mut stack);
    }
    stack.iter().sum()
}

fn apply(op: Operator, value: f64, stack: &mut Vec<f64>) {
    match op {
        Operator::Add => stack.push(value),
        Operator::Sub => stack.push(-value),
        Operator::Mul => match stack.last_mut() {
            Some(top) => *top *= value,
            None => stack.push(0.0),
        },
        Operator::Div => match stack.last_mut() {
            Some(top) => *top /= value,
            None => stack.push(0.0),
        },
    }
}
