mod expr;
pub use expr::Expr;

mod into_expr;
pub use into_expr::IntoExpr;

mod path;
pub use path::Path;

mod primitive;
pub use primitive::{load_field, Primitive};

mod primitive_chrono;

mod query;
pub use query::{Clauses, Query, SubQuery};

mod relation;
pub use relation::Relation;
