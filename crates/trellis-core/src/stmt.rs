mod clause;
pub use clause::Clause;

mod conjunction;
pub use conjunction::Conjunction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_field;
pub use expr_field::ExprField;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod filter;
pub use filter::Filter;

mod op_binary;
pub use op_binary::BinaryOp;

mod operator;
pub use operator::Operator;

mod value;
pub use value::Value;

/// A record as returned by the remote store, keyed by field name.
pub type Row = indexmap::IndexMap<String, Value>;
