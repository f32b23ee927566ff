use super::{Expr, IntoExpr};

use std::{fmt, marker::PhantomData, ops::Not};
use trellis_core::stmt::{self, ExprField};

/// A typed reference to property `T` of model `M`.
///
/// Paths are produced by the generated `fields()` accessor of each model.
pub struct Path<M, T: ?Sized> {
    pub(crate) field: ExprField,
    _p: PhantomData<fn() -> (M, Box<T>)>,
}

impl<M, T: ?Sized> Path<M, T> {
    pub const fn new(field: ExprField) -> Self {
        Self {
            field,
            _p: PhantomData,
        }
    }

    pub fn property(&self) -> &'static str {
        self.field.property
    }

    /// The field name sent to the remote store.
    pub fn external_name(&self) -> &'static str {
        self.field.external_name()
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::eq(self.field, rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ne(self.field, rhs.into_expr().untyped))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::gt(self.field, rhs.into_expr().untyped))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ge(self.field, rhs.into_expr().untyped))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::lt(self.field, rhs.into_expr().untyped))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::le(self.field, rhs.into_expr().untyped))
    }

    /// Null check. The remote store has no null comparison, so this does
    /// not translate; use an `Empty` clause instead.
    pub fn is_null(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::is_null(self.field))
    }

    /// Set membership. Does not translate; combine equality checks with `or`.
    pub fn in_set<I>(self, values: impl IntoIterator<Item = I>) -> Expr<bool>
    where
        I: IntoExpr<T>,
    {
        let list = values.into_iter().filter_map(|value| {
            match value.into_expr().untyped {
                stmt::Expr::Value(value) => Some(value),
                _ => None,
            }
        });
        Expr::from_untyped(stmt::Expr::in_list(self.field, list))
    }
}

impl<M> Not for Path<M, bool> {
    type Output = Expr<bool>;

    fn not(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::not(self.field))
    }
}

impl<M> Not for Path<M, Option<bool>> {
    type Output = Expr<bool>;

    fn not(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::not(self.field))
    }
}

impl<M, T: ?Sized> Clone for Path<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T: ?Sized> Copy for Path<M, T> {}

impl<M, T: ?Sized> fmt::Debug for Path<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("model", &self.field.model)
            .field("property", &self.field.property)
            .field("name", &self.field.external_name())
            .finish()
    }
}
