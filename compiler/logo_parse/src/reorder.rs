//! Operator priority for infix chains.
//!
//! The grammar leaves `a op1 b op2 c ...` as the right-leaning chain
//! `a op1 (b op2 (c ...))`. This pass regroups each chain so that higher
//! priority operators bind tighter and equal priorities associate to the
//! left. A chain is flattened by following right children (any other node,
//! `Paren` included, ends it) and rebuilt with an operator stack, so long
//! chains cost no host recursion.

use std::rc::Rc;

use logo_ir::{Expr, Infix, InfixOp};
use logo_stack::ensure_sufficient_stack;

/// Regroup every infix chain in `expr`, including those nested in lists,
/// procedure bodies, call arguments and parens.
pub fn reorder_infix(expr: Expr) -> Expr {
    ensure_sufficient_stack(|| match expr {
        Expr::Infix(_) => reorder_chain(expr),
        Expr::List(mut list) => {
            list.items = list.items.into_iter().map(reorder_shared).collect();
            Expr::List(list)
        }
        Expr::ProcedureDef(mut def) => {
            def.body.items = def.body.items.into_iter().map(reorder_shared).collect();
            Expr::ProcedureDef(def)
        }
        Expr::Apply(mut apply) => {
            apply.args = apply.args.into_iter().map(reorder_shared).collect();
            Expr::Apply(apply)
        }
        Expr::Paren(mut paren) => {
            paren.inner = reorder_shared(paren.inner);
            Expr::Paren(paren)
        }
        other => other,
    })
}

fn reorder_shared(expr: Rc<Expr>) -> Rc<Expr> {
    Rc::new(reorder_infix(Rc::unwrap_or_clone(expr)))
}

fn reorder_chain(expr: Expr) -> Expr {
    let mut operands = Vec::new();
    let mut ops: Vec<(InfixOp, u32)> = Vec::new();
    let mut rest = expr;
    loop {
        match rest {
            Expr::Infix(Infix {
                op,
                left,
                right,
                line,
            }) => {
                operands.push(reorder_infix(Rc::unwrap_or_clone(left)));
                ops.push((op, line));
                rest = Rc::unwrap_or_clone(right);
            }
            last => {
                operands.push(reorder_infix(last));
                break;
            }
        }
    }

    let mut operands = operands.into_iter();
    let mut output: Vec<Expr> = operands.next().into_iter().collect();
    let mut pending: Vec<(InfixOp, u32)> = Vec::new();
    for (op, operand) in ops.into_iter().zip(operands) {
        while pending
            .last()
            .is_some_and(|(top, _)| top.priority() >= op.0.priority())
        {
            reduce(&mut output, &mut pending);
        }
        pending.push(op);
        output.push(operand);
    }
    while !pending.is_empty() {
        reduce(&mut output, &mut pending);
    }
    output.pop().unwrap_or(Expr::Nil)
}

/// Combine the top operator with the top two operands.
fn reduce(output: &mut Vec<Expr>, pending: &mut Vec<(InfixOp, u32)>) {
    let Some((op, line)) = pending.pop() else {
        return;
    };
    let (Some(right), Some(left)) = (output.pop(), output.pop()) else {
        return;
    };
    output.push(Expr::infix(op, left, right, line));
}
