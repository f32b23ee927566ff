mod arbitrary;
pub use arbitrary::ArbitraryRecord;

pub mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod engine;
pub use engine::WriteSummary;

pub mod handler;
pub use handler::{DefaultHandler, Dispatch, Handler, HandlerClient};

mod model;
pub use model::{BusinessObject, Related, Validator};

mod registry;
pub use registry::Registry;

pub mod stmt;
pub use stmt::{Clauses, Expr, IntoExpr, Path, Primitive, Query, Relation};

pub use trellis_core::{
    driver::{self, Driver},
    schema,
    stmt::{Clause, Conjunction, Filter, Operator, Row, Value},
    Error, Result,
};

pub use async_trait::async_trait;
pub use trellis_macros::BusinessObject;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        handler::DefaultHandler,
        model::{BusinessObject, Related, Validator},
        stmt::{load_field, Path, Primitive, Query, Relation},
    };
    pub use trellis_core::{
        schema::{FieldMapping, ModelSchema, RelationMapping, RECORD_ID_FIELD},
        stmt::{ExprField, Row, Value},
        Error, Result,
    };
}
