use super::Engine;
use crate::{stmt::SubQuery, BusinessObject, Query};

use trellis_core::{
    driver::operation::{Page, QueryRecords, RelationScope},
    schema::{BusinessObjectDef, ModelSchema},
    stmt::{Filter, Row, Value},
    Error, Result,
};

/// Resolved form of one remote query.
struct Plan {
    op: QueryRecords,

    /// (mapping name, internal name) pairs used to rekey returned rows
    columns: Vec<(String, String)>,
}

impl Engine {
    pub(crate) async fn query<M: BusinessObject>(&self, query: Query<M>) -> Result<Vec<M>> {
        let schema = self.registry.get::<M>()?;
        let type_name = query.type_name().to_string();
        let Query {
            filter,
            top_count,
            scope,
            includes,
            ..
        } = query;

        let rows = self
            .query_rows(&schema, &type_name, filter, top_count, scope)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut record = M::load(row)?;

            // Sequential per parent record
            for include in &includes {
                let Some(record_id) = record.record_id().map(str::to_string) else {
                    continue;
                };
                let rows = self.include_rows(&type_name, &record_id, include).await?;
                record.load_relation(include.index, rows)?;
            }

            records.push(record);
        }

        tracing::debug!(
            type_name = %type_name,
            records = records.len(),
            includes = includes.len(),
            "query complete"
        );

        Ok(records)
    }

    /// Runs a filter against `type_name`, returning rows keyed by internal
    /// field name with every field present.
    pub(crate) async fn query_untyped(
        &self,
        type_name: &str,
        filter: Filter,
        top_count: Option<usize>,
    ) -> Result<Vec<Row>> {
        let def = self.definition(type_name).await?;

        let mut op = QueryRecords::new(&def.name);
        op.filter = self.resolve_filter(&def, filter).await?;
        op.top_count = top_count;

        self.fetch(op).await
    }

    async fn include_rows(
        &self,
        parent_type: &str,
        parent_id: &str,
        include: &SubQuery,
    ) -> Result<Vec<Row>> {
        let schema = self
            .registry
            .get_dyn(include.target_id, include.target_schema)?;

        let scope = RelationScope {
            parent_type: parent_type.to_string(),
            parent_id: parent_id.to_string(),
            relationship: include.relationship.to_string(),
        };
        let top_count = if include.collection { None } else { Some(1) };

        self.query_rows(&schema, &schema.type_name, Filter::new(), top_count, Some(scope))
            .await
            .map_err(|err| {
                if err.is_mapping() {
                    return err;
                }
                err.context(trellis_core::err!(
                    "resolving `{}.{}`",
                    parent_type,
                    include.property
                ))
            })
    }

    async fn query_rows(
        &self,
        schema: &ModelSchema,
        type_name: &str,
        filter: Filter,
        top_count: Option<usize>,
        scope: Option<RelationScope>,
    ) -> Result<Vec<Row>> {
        let plan = self.plan(schema, type_name, filter, top_count, scope).await?;
        let rows = self.fetch(plan.op).await?;

        Ok(rows
            .into_iter()
            .map(|mut row| {
                plan.columns
                    .iter()
                    .map(|(name, internal)| {
                        let value = row.shift_remove(internal).unwrap_or(Value::Null);
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect())
    }

    /// Resolves every name in the request against the remote definitions.
    async fn plan(
        &self,
        schema: &ModelSchema,
        type_name: &str,
        filter: Filter,
        top_count: Option<usize>,
        scope: Option<RelationScope>,
    ) -> Result<Plan> {
        let def = self.definition(type_name).await?;

        let columns = schema
            .fields
            .iter()
            .map(|mapping| {
                let field = def.field_by_name(&mapping.name)?;
                Ok((mapping.name.clone(), field.name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let scope = match scope {
            Some(scope) => Some(self.resolve_scope(&def, scope).await?),
            None => None,
        };

        let mut op = QueryRecords::new(&def.name);
        op.filter = self.resolve_filter(&def, filter).await?;
        op.fields = columns.iter().map(|(_, internal)| internal.clone()).collect();
        op.top_count = top_count;
        op.scope = scope;

        Ok(Plan { op, columns })
    }

    async fn resolve_scope(
        &self,
        def: &BusinessObjectDef,
        mut scope: RelationScope,
    ) -> Result<RelationScope> {
        let parent = self.definition(&scope.parent_type).await?;
        let relationship = parent.relationship_by_name(&scope.relationship)?;

        if !relationship.target.eq_ignore_ascii_case(&def.name) {
            return Err(Error::mapping(format!(
                "relationship `{}` on `{}` leads to `{}`, not `{}`",
                relationship.name, parent.name, relationship.target, def.name
            )));
        }

        scope.parent_type = parent.name.clone();
        scope.relationship = relationship.name.clone();
        Ok(scope)
    }

    /// Rewrites clause field and relationship names to the remote store's
    /// internal names. A related clause's field is resolved on the related
    /// type.
    async fn resolve_filter(&self, def: &BusinessObjectDef, filter: Filter) -> Result<Filter> {
        let conjunction = filter.conjunction();
        let neutral = filter.is_neutral();

        let mut resolved = Filter::new();
        for mut clause in filter.into_clauses() {
            match clause.relationship.take() {
                Some(name) => {
                    let relationship = def.relationship_by_name(&name)?;
                    let related = self.definition(&relationship.target).await?;

                    clause.property = related.field_by_name(&clause.property)?.name.clone();
                    clause.relationship = Some(relationship.name.clone());
                }
                None => {
                    clause.property = def.field_by_name(&clause.property)?.name.clone();
                }
            }
            resolved.push(clause);
        }

        if !neutral {
            resolved.require(conjunction)?;
        }

        Ok(resolved)
    }

    /// Issues the query, paging through results unless a top count bounds it.
    async fn fetch(&self, op: QueryRecords) -> Result<Vec<Row>> {
        let type_name = op.type_name.clone();

        if op.top_count.is_some() {
            return self.fetch_page(op, &type_name).await;
        }

        let size = self.config.page_size.max(1);
        let mut rows = vec![];

        for number in 1.. {
            let mut op = op.clone();
            op.page = Some(Page { number, size });

            let page = self.fetch_page(op, &type_name).await?;
            let done = page.len() < size;
            rows.extend(page);

            if done {
                break;
            }
        }

        Ok(rows)
    }

    async fn fetch_page(&self, op: QueryRecords, type_name: &str) -> Result<Vec<Row>> {
        let response = match self.exec(op).await {
            Ok(response) => response,
            Err(err) if err.is_mapping() => return Err(err),
            Err(err) => {
                return Err(err.context(Error::read(format!("querying `{type_name}` failed"))))
            }
        };

        response.into_rows()
    }
}

