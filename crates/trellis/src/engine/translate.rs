use trellis_core::{
    stmt::{self, BinaryOp, Clause, Conjunction, Expr, ExprBinaryOp, ExprField, Filter, Value},
    Error, Result,
};

/// Converts a predicate over `model`'s fields into an ordered clause list.
///
/// Clauses appear in the order they are encountered, left to right and
/// depth first. The supported node set is closed: AND, OR, a comparison of a
/// field with a non-null value, and the negation of a boolean field. Every
/// other shape fails with an unsupported predicate error naming it.
pub(crate) fn translate(model: &'static str, expr: Expr) -> Result<Filter> {
    let mut filter = Filter::new();
    translate_into(model, expr, &mut filter)?;
    Ok(filter)
}

fn translate_into(model: &'static str, expr: Expr, filter: &mut Filter) -> Result<()> {
    match expr {
        Expr::And(expr) => {
            filter.require(Conjunction::And)?;
            for operand in expr.operands {
                translate_into(model, operand, filter)?;
                filter.require(Conjunction::And)?;
            }
            Ok(())
        }
        Expr::Or(expr) => {
            filter.require(Conjunction::Or)?;
            for operand in expr.operands {
                translate_into(model, operand, filter)?;
                filter.require(Conjunction::Or)?;
            }
            Ok(())
        }
        Expr::BinaryOp(expr) => {
            filter.push(comparison(model, expr)?);
            Ok(())
        }
        // `!flag` is shorthand for `flag != true`
        Expr::Not(expr) => match *expr.expr {
            Expr::Field(field) => {
                let expr = ExprBinaryOp {
                    lhs: Box::new(Expr::Field(field)),
                    op: BinaryOp::Ne,
                    rhs: Box::new(Expr::Value(Value::Bool(true))),
                };
                filter.push(comparison(model, expr)?);
                Ok(())
            }
            operand => Err(Error::unsupported_predicate(format!(
                "not over {}",
                operand.kind_name()
            ))),
        },
        expr => Err(Error::unsupported_predicate(expr.kind_name())),
    }
}

fn comparison(model: &'static str, expr: ExprBinaryOp) -> Result<Clause> {
    let field = match *expr.lhs {
        Expr::Field(field) => field,
        Expr::Value(_) => {
            return Err(Error::unsupported_predicate(
                "value on the left-hand side of a comparison",
            ))
        }
        lhs => return Err(Error::unsupported_predicate(lhs.kind_name())),
    };

    check_model(model, &field)?;

    let value = match *expr.rhs {
        Expr::Value(Value::Null) => return Err(Error::unsupported_predicate("null comparison")),
        Expr::Value(value) => value,
        Expr::Field(_) => {
            return Err(Error::unsupported_predicate(
                "field on the right-hand side of a comparison",
            ))
        }
        rhs => return Err(Error::unsupported_predicate(rhs.kind_name())),
    };

    Ok(Clause::new(
        field.external_name(),
        stmt::Operator::from(expr.op),
        value.to_text(),
    ))
}

fn check_model(model: &'static str, field: &ExprField) -> Result<()> {
    if field.model != model {
        return Err(Error::mapping(format!(
            "`{}.{}` does not belong to business object `{}`",
            field.model, field.property, model
        )));
    }
    Ok(())
}
