use super::Expr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use trellis_core::stmt::Value;

/// Converts a Rust value into a typed expression operand.
///
/// Operands are evaluated when the predicate is built, so any captured
/// variable, including a field of a captured struct, is already a value by
/// the time the predicate is translated.
pub trait IntoExpr<T: ?Sized> {
    fn into_expr(self) -> Expr<T>;
}

impl<T: ?Sized> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }
}

macro_rules! impl_into_expr {
    ( $( $target:ty => [ $( $source:ty ),* ] ;)* ) => {
        $(
            $(
                impl IntoExpr<$target> for $source {
                    fn into_expr(self) -> Expr<$target> {
                        Expr::from_value(Value::from(self))
                    }
                }
            )*
        )*
    };
}

impl_into_expr! {
    String => [String, &str, &String];
    Option<String> => [String, &str, &String, Option<String>, Option<&str>];
    bool => [bool];
    Option<bool> => [bool, Option<bool>];
    i32 => [i32];
    Option<i32> => [i32, Option<i32>];
    i64 => [i64];
    Option<i64> => [i64, Option<i64>];
    u32 => [u32];
    Option<u32> => [u32, Option<u32>];
    u64 => [u64];
    Option<u64> => [u64, Option<u64>];
    Decimal => [Decimal];
    Option<Decimal> => [Decimal, Option<Decimal>];
    NaiveDateTime => [NaiveDateTime];
    Option<NaiveDateTime> => [NaiveDateTime, Option<NaiveDateTime>];
    NaiveDate => [NaiveDate];
    Option<NaiveDate> => [NaiveDate, Option<NaiveDate>];
}
