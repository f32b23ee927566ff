use super::{Expr, IntoExpr, Path, Relation};
use crate::{engine::translate, BusinessObject};

use std::{any::TypeId, fmt, marker::PhantomData};
use trellis_core::{
    driver::operation::RelationScope,
    schema::{ModelSchema, RECORD_ID_FIELD},
    stmt::{self, Clause, Conjunction, Filter, Operator},
    Error, Result,
};

/// A query for records of `M`.
///
/// Built fluently and consumed by [`Client::execute`](crate::Client::execute).
/// Each call mutates the builder in place; a query is meant for a single
/// execution.
pub struct Query<M> {
    pub(crate) type_name: Option<String>,
    pub(crate) filter: Filter,
    pub(crate) top_count: Option<usize>,
    pub(crate) scope: Option<RelationScope>,
    pub(crate) includes: Vec<SubQuery>,
    _p: PhantomData<fn() -> M>,
}

/// Clause accumulation handle returned by [`Query::filter`].
///
/// Every `and`/`or` must agree with the conjunction already in use.
pub struct Clauses<M> {
    query: Query<M>,
}

/// A relationship to resolve for every record the parent query returns.
#[derive(Clone)]
pub struct SubQuery {
    /// Destination property on the parent model
    pub property: &'static str,

    /// Destination property index on the parent model
    pub index: usize,

    /// Remote relationship name
    pub relationship: &'static str,

    /// Remote type name of the related records
    pub target: &'static str,

    pub collection: bool,

    pub(crate) target_id: TypeId,
    pub(crate) target_schema: fn() -> ModelSchema,
}

impl<M: BusinessObject> Query<M> {
    /// A query matching every record of `M`.
    pub fn all() -> Self {
        Self {
            type_name: None,
            filter: Filter::new(),
            top_count: None,
            scope: None,
            includes: vec![],
            _p: PhantomData,
        }
    }

    /// Match the single record any key field of which equals `key`.
    ///
    /// Replaces any clauses added so far with one OR clause per key field,
    /// the record id included.
    pub fn for_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut filter = Filter::with_conjunction(Conjunction::Or);

        for field in M::schema().key_fields() {
            filter.push(Clause::eq(&field.name, &key));
        }

        self.filter = filter;
        self.top_count = Some(1);
        self
    }

    /// Match the single record with the given record id.
    ///
    /// Replaces any clauses added so far.
    pub fn for_record_id(mut self, record_id: impl Into<String>) -> Self {
        let mut filter = Filter::with_conjunction(Conjunction::And);
        filter.push(Clause::eq(RECORD_ID_FIELD, record_id));

        self.filter = filter;
        self.top_count = Some(1);
        self
    }

    /// Run against another business object type that shares `M`'s field
    /// mappings, such as a derived type of the one `M` is declared for.
    pub fn for_business_object(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// The remote type this query runs against.
    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or(M::TYPE_NAME)
    }

    /// Return at most one record.
    pub fn for_single_record(mut self) -> Self {
        self.top_count = Some(1);
        self
    }

    /// Add the clauses of a predicate.
    ///
    /// A predicate rooted at `or` fixes the query's conjunction to OR.
    pub fn filter(mut self, expr: Expr<bool>) -> Result<Clauses<M>> {
        let filter = translate(M::TYPE_NAME, expr.untyped)?;
        self.filter.extend(filter)?;
        Ok(Clauses { query: self })
    }

    /// Add one clause using any remote operator, including the ones the
    /// predicate DSL has no syntax for (`contains`, `like`, ...).
    pub fn filter_by<T>(
        mut self,
        path: Path<M, T>,
        operator: Operator,
        value: impl IntoExpr<T>,
    ) -> Result<Clauses<M>> {
        let clause = clause(path, operator, value)?;
        self.filter.extend(Filter::single(clause))?;
        Ok(Clauses { query: self })
    }

    /// Add a clause on a field of the records related through `relation`.
    ///
    /// A record matches when any of its related records does. Related
    /// clauses always combine with AND.
    pub fn filter_related<R, T>(
        mut self,
        relation: Relation<M, R>,
        path: Path<R, T>,
        operator: Operator,
        value: impl IntoExpr<T>,
    ) -> Result<Clauses<M>> {
        let clause = related_clause(relation, path, operator, value)?;
        self.filter.merge(Conjunction::And, Filter::single(clause))?;
        Ok(Clauses { query: self })
    }

    /// Resolve `relation` for every returned record.
    pub fn include<R: BusinessObject>(mut self, relation: Relation<M, R>) -> Self {
        self.includes.push(SubQuery {
            property: relation.property,
            index: relation.index,
            relationship: relation.name,
            target: R::TYPE_NAME,
            collection: relation.collection,
            target_id: TypeId::of::<R>(),
            target_schema: R::schema,
        });
        self
    }

    /// Turn this into a query for the `R` records related to `parent_id`
    /// through `relation`.
    pub fn for_children<R: BusinessObject>(
        self,
        relation: Relation<M, R>,
        parent_id: impl Into<String>,
    ) -> Query<R> {
        let mut query = Query::<R>::all();
        query.scope = Some(RelationScope {
            parent_type: M::TYPE_NAME.to_string(),
            parent_id: parent_id.into(),
            relationship: relation.name.to_string(),
        });
        query
    }

    pub fn clauses(&self) -> &[Clause] {
        self.filter.clauses()
    }

    pub fn conjunction(&self) -> Conjunction {
        self.filter.conjunction()
    }

    pub fn top_count(&self) -> Option<usize> {
        self.top_count
    }

    pub fn scope(&self) -> Option<&RelationScope> {
        self.scope.as_ref()
    }

    pub fn includes(&self) -> &[SubQuery] {
        &self.includes
    }
}

impl<M: BusinessObject> Clauses<M> {
    pub fn and(mut self, expr: Expr<bool>) -> Result<Self> {
        let filter = translate(M::TYPE_NAME, expr.untyped)?;
        self.query.filter.merge(Conjunction::And, filter)?;
        Ok(self)
    }

    pub fn or(mut self, expr: Expr<bool>) -> Result<Self> {
        let filter = translate(M::TYPE_NAME, expr.untyped)?;
        self.query.filter.merge(Conjunction::Or, filter)?;
        Ok(self)
    }

    pub fn and_by<T>(
        mut self,
        path: Path<M, T>,
        operator: Operator,
        value: impl IntoExpr<T>,
    ) -> Result<Self> {
        let clause = clause(path, operator, value)?;
        self.query
            .filter
            .merge(Conjunction::And, Filter::single(clause))?;
        Ok(self)
    }

    pub fn or_by<T>(
        mut self,
        path: Path<M, T>,
        operator: Operator,
        value: impl IntoExpr<T>,
    ) -> Result<Self> {
        let clause = clause(path, operator, value)?;
        self.query
            .filter
            .merge(Conjunction::Or, Filter::single(clause))?;
        Ok(self)
    }

    pub fn and_related<R, T>(
        mut self,
        relation: Relation<M, R>,
        path: Path<R, T>,
        operator: Operator,
        value: impl IntoExpr<T>,
    ) -> Result<Self> {
        let clause = related_clause(relation, path, operator, value)?;
        self.query
            .filter
            .merge(Conjunction::And, Filter::single(clause))?;
        Ok(self)
    }

    pub fn clauses(&self) -> &[Clause] {
        self.query.clauses()
    }

    /// Return to the query builder.
    pub fn end_clause(self) -> Query<M> {
        self.query
    }
}

impl<M: BusinessObject> From<Clauses<M>> for Query<M> {
    fn from(clauses: Clauses<M>) -> Self {
        clauses.end_clause()
    }
}

fn clause<M, T>(path: Path<M, T>, operator: Operator, value: impl IntoExpr<T>) -> Result<Clause> {
    let value = if operator.takes_value() {
        match value.into_expr().untyped {
            stmt::Expr::Value(stmt::Value::Null) => {
                return Err(Error::unsupported_predicate("null comparison"))
            }
            stmt::Expr::Value(value) => value.to_text(),
            other => return Err(Error::unsupported_predicate(other.kind_name())),
        }
    } else {
        String::new()
    };

    Ok(Clause::new(path.external_name(), operator, value))
}

fn related_clause<M, R, T>(
    relation: Relation<M, R>,
    path: Path<R, T>,
    operator: Operator,
    value: impl IntoExpr<T>,
) -> Result<Clause> {
    let mut clause = clause(path, operator, value)?;
    clause.relationship = Some(relation.name.to_string());
    Ok(clause)
}

impl<M> fmt::Debug for Query<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("type_name", &self.type_name)
            .field("filter", &self.filter)
            .field("top_count", &self.top_count)
            .field("scope", &self.scope)
            .field("includes", &self.includes)
            .finish()
    }
}

impl<M> fmt::Debug for Clauses<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Clauses").field(&self.query).finish()
    }
}

impl fmt::Debug for SubQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubQuery")
            .field("property", &self.property)
            .field("relationship", &self.relationship)
            .field("target", &self.target)
            .field("collection", &self.collection)
            .finish()
    }
}
