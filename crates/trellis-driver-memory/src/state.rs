use crate::{filter, value};

use indexmap::IndexMap;
use std::{
    collections::{HashMap, HashSet},
    io,
};
use trellis_core::{
    driver::{
        operation::{
            DeleteRecord, GetDefinition, GetField, Link, NewRecord, OpenRecord, QueryRecords,
            RelationScope, Save, SetField, Unlink,
        },
        FieldSet, Outcome, Record, RecordHandle, Response,
    },
    err,
    schema::{BusinessObjectDef, FieldDef, FieldType, RECORD_ID_FIELD},
    stmt::{Clause, Conjunction, Row, Value},
    Error, Result,
};

#[derive(Debug, Default)]
pub(crate) struct State {
    /// Keyed by lowercased type name
    pub(crate) definitions: IndexMap<String, BusinessObjectDef>,

    /// Saved records per type name, keyed by record id
    pub(crate) records: HashMap<String, IndexMap<String, Row>>,

    /// Records opened for editing and not yet saved
    open: HashMap<u64, OpenEntry>,

    /// Relations without a foreign key field
    links: Vec<LinkEntry>,

    next_handle: u64,

    pub(crate) faults: Faults,
}

#[derive(Debug)]
struct OpenEntry {
    type_name: String,
    record_id: String,
    values: Row,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkEntry {
    relationship: String,
    parent_type: String,
    parent_id: String,
    child_id: String,
}

/// Failures the store injects into later operations.
#[derive(Debug, Default)]
pub(crate) struct Faults {
    /// Field name (lowercased) to the number of sets to silently ignore
    pub(crate) dropped_writes: HashMap<String, usize>,

    /// (lowercased field name, value) pairs the store refuses
    pub(crate) rejected_values: HashSet<(String, String)>,

    pub(crate) failed_saves: usize,
    pub(crate) failed_deletes: usize,
    pub(crate) failed_queries: usize,
}

impl Faults {
    fn take_dropped_write(&mut self, field: &str) -> bool {
        match self.dropped_writes.get_mut(&field.to_ascii_lowercase()) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn rejects(&self, field: &str, value: &str) -> bool {
        self.rejected_values
            .contains(&(field.to_ascii_lowercase(), value.to_string()))
    }
}

fn take(counter: &mut usize) -> bool {
    if *counter > 0 {
        *counter -= 1;
        true
    } else {
        false
    }
}

/// One resolved filter clause.
enum Condition<'a> {
    Field(&'a FieldDef, &'a Clause),

    /// Ids of the records whose related records match
    Related(HashSet<String>),
}

fn lookup<'a>(
    definitions: &'a IndexMap<String, BusinessObjectDef>,
    type_name: &str,
) -> Result<&'a BusinessObjectDef> {
    definitions
        .get(&type_name.to_ascii_lowercase())
        .ok_or_else(|| Error::type_not_found(type_name))
}

fn not_open(handle: &RecordHandle) -> Error {
    err!(
        "record handle {} ({} {}) is not open",
        handle.id,
        handle.type_name,
        handle.record_id
    )
}

fn not_found(type_name: &str, record_id: &str) -> Error {
    Error::record_not_found(format!("type={type_name} id={record_id}"))
}

fn rejected(error: String, value: Value) -> Response {
    Response::FieldSet(FieldSet {
        success: false,
        error: Some(error),
        value,
    })
}

fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

impl State {
    /// Registers a definition, adding the record id field when it is missing.
    pub(crate) fn define(&mut self, mut def: BusinessObjectDef) {
        if def.field_by_name(RECORD_ID_FIELD).is_err() {
            def.fields
                .insert(0, FieldDef::new(RECORD_ID_FIELD, FieldType::Text).read_only());
        }

        self.records.entry(def.name.clone()).or_default();
        self.definitions.insert(def.name.to_ascii_lowercase(), def);
    }

    /// Stores a record directly, bypassing field sets and save checks.
    pub(crate) fn insert(
        &mut self,
        type_name: &str,
        fields: Vec<(String, Value)>,
    ) -> Result<String> {
        let def = lookup(&self.definitions, type_name)?;

        let mut row: Row = def
            .fields
            .iter()
            .map(|field| (field.name.clone(), Value::Null))
            .collect();

        for (name, value) in fields {
            let field = def.field_by_name(&name)?;
            row.insert(field.name.clone(), value);
        }

        let record_id = match row.get(RECORD_ID_FIELD) {
            Some(Value::Text(record_id)) => record_id.clone(),
            _ => new_record_id(),
        };
        row.insert(RECORD_ID_FIELD.to_string(), Value::Text(record_id.clone()));

        self.records
            .entry(def.name.clone())
            .or_default()
            .insert(record_id.clone(), row);
        Ok(record_id)
    }

    pub(crate) fn get_definition(&self, op: GetDefinition) -> Result<Response> {
        let def = lookup(&self.definitions, &op.type_name)?;
        Ok(Response::Definition(def.clone()))
    }

    pub(crate) fn new_record(&mut self, op: NewRecord) -> Result<Response> {
        let def = lookup(&self.definitions, &op.type_name)?;
        let record_id = new_record_id();

        let mut values: Row = def
            .fields
            .iter()
            .map(|field| (field.name.clone(), Value::Null))
            .collect();
        values.insert(RECORD_ID_FIELD.to_string(), Value::Text(record_id.clone()));

        let type_name = def.name.clone();
        Ok(self.open_entry(type_name, record_id, values))
    }

    pub(crate) fn open_record(&mut self, op: OpenRecord) -> Result<Response> {
        let def = lookup(&self.definitions, &op.type_name)?;

        let values = self
            .records
            .get(&def.name)
            .and_then(|records| records.get(&op.record_id))
            .cloned()
            .ok_or_else(|| not_found(&def.name, &op.record_id))?;

        let type_name = def.name.clone();

        // Reopening a record abandons any earlier unsaved edit of it
        self.open
            .retain(|_, entry| entry.type_name != type_name || entry.record_id != op.record_id);

        Ok(self.open_entry(type_name, op.record_id, values))
    }

    fn open_entry(&mut self, type_name: String, record_id: String, values: Row) -> Response {
        self.next_handle += 1;

        let handle = RecordHandle {
            id: self.next_handle,
            type_name: type_name.clone(),
            record_id: record_id.clone(),
        };

        self.open.insert(
            handle.id,
            OpenEntry {
                type_name,
                record_id,
                values: values.clone(),
            },
        );

        Response::Record(Record { handle, values })
    }

    pub(crate) fn get_field(&self, op: GetField) -> Result<Response> {
        let entry = self
            .open
            .get(&op.record.id)
            .ok_or_else(|| not_open(&op.record))?;
        let def = lookup(&self.definitions, &entry.type_name)?;
        let field = def.field_by_name(&op.field)?;

        Ok(Response::Value(
            entry.values.get(&field.name).cloned().unwrap_or_default(),
        ))
    }

    pub(crate) fn set_field(&mut self, op: SetField) -> Result<Response> {
        let entry = self
            .open
            .get_mut(&op.record.id)
            .ok_or_else(|| not_open(&op.record))?;
        let def = lookup(&self.definitions, &entry.type_name)?;
        let field = def.field_by_name(&op.field)?;
        let current = entry.values.get(&field.name).cloned().unwrap_or_default();

        if field.read_only {
            return Ok(rejected(
                format!("field `{}` is read-only", field.name),
                current,
            ));
        }

        if self.faults.rejects(&field.name, &op.value) {
            return Ok(rejected(
                format!("`{}` is not an allowed value for `{}`", op.value, field.name),
                current,
            ));
        }

        if self.faults.take_dropped_write(&field.name) {
            tracing::debug!(field = %field.name, value = %op.value, "dropping field set");
            return Ok(Response::FieldSet(FieldSet {
                success: true,
                error: None,
                value: current,
            }));
        }

        let value = match value::coerce(field.ty, &op.value) {
            Ok(value) => value,
            Err(error) => return Ok(rejected(error, current)),
        };

        entry.values.insert(field.name.clone(), value.clone());

        Ok(Response::FieldSet(FieldSet {
            success: true,
            error: None,
            value,
        }))
    }

    pub(crate) fn save(&mut self, op: Save) -> Result<Response> {
        let entry = self
            .open
            .get(&op.record.id)
            .ok_or_else(|| not_open(&op.record))?;
        let def = lookup(&self.definitions, &entry.type_name)?;

        if take(&mut self.faults.failed_saves) {
            return Ok(Response::Outcome(Outcome::failed(
                "the store is not accepting changes",
            )));
        }

        let missing = def.fields.iter().find(|field| {
            field.required
                && entry
                    .values
                    .get(&field.name)
                    .map_or(true, |value| value.to_text().trim().is_empty())
        });

        if let Some(field) = missing {
            let name = field.display_name.as_deref().unwrap_or(&field.name);
            return Ok(Response::Outcome(Outcome::failed(format!(
                "`{name}` is required"
            ))));
        }

        let type_name = def.name.clone();
        if let Some(entry) = self.open.remove(&op.record.id) {
            self.records
                .entry(type_name)
                .or_default()
                .insert(entry.record_id, entry.values);
        }

        Ok(Response::Outcome(Outcome::ok()))
    }

    pub(crate) fn delete_record(&mut self, op: DeleteRecord) -> Result<Response> {
        let def = lookup(&self.definitions, &op.type_name)?;

        if take(&mut self.faults.failed_deletes) {
            return Ok(Response::Outcome(Outcome::failed(
                "the record is locked by another session",
            )));
        }

        // Unsaved edits of the record go away with it
        self.open.retain(|_, entry| {
            !(entry.type_name == def.name && entry.record_id == op.record_id)
        });

        let removed = self
            .records
            .get_mut(&def.name)
            .and_then(|records| records.shift_remove(&op.record_id));

        if removed.is_none() {
            return Err(not_found(&def.name, &op.record_id));
        }

        self.links
            .retain(|link| link.parent_id != op.record_id && link.child_id != op.record_id);

        Ok(Response::Outcome(Outcome::ok()))
    }

    pub(crate) fn query(&mut self, op: QueryRecords) -> Result<Response> {
        if take(&mut self.faults.failed_queries) {
            return Err(Error::driver_operation_failed(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "the search service is unavailable",
            )));
        }

        let def = lookup(&self.definitions, &op.type_name)?;

        let scope = match &op.scope {
            Some(scope) => Some(self.children(def, scope)?),
            None => None,
        };

        let clauses = op
            .filter
            .clauses()
            .iter()
            .map(|clause| match &clause.relationship {
                Some(relationship) => Ok(Condition::Related(
                    self.related_matches(def, relationship, clause)?,
                )),
                None => Ok(Condition::Field(def.field_by_name(&clause.property)?, clause)),
            })
            .collect::<Result<Vec<_>>>()?;

        let selected: Vec<&FieldDef> = if op.fields.is_empty() {
            def.fields.iter().collect()
        } else {
            let mut selected = vec![def.field_by_name(RECORD_ID_FIELD)?];
            for name in &op.fields {
                let field = def.field_by_name(name)?;
                if !selected.iter().any(|existing| existing.name == field.name) {
                    selected.push(field);
                }
            }
            selected
        };

        let conjunction = op.filter.conjunction();
        let (offset, size) = match op.page {
            Some(page) => (page.offset(), page.size),
            None => (0, usize::MAX),
        };

        let rows = self
            .records
            .get(&def.name)
            .into_iter()
            .flat_map(|records| records.iter())
            .filter(|(record_id, _)| scope.as_ref().map_or(true, |ids| ids.contains(*record_id)))
            .filter(|(record_id, row)| {
                let mut results = clauses.iter().map(|condition| match condition {
                    Condition::Field(field, clause) => {
                        let value = row.get(&field.name).unwrap_or(&Value::Null);
                        filter::matches(field, value, clause)
                    }
                    Condition::Related(parents) => parents.contains(*record_id),
                });

                match conjunction {
                    Conjunction::And => results.all(|matched| matched),
                    Conjunction::Or => clauses.is_empty() || results.any(|matched| matched),
                }
            })
            .skip(offset)
            .take(size)
            .take(op.top_count.unwrap_or(usize::MAX))
            .map(|(_, row)| {
                selected
                    .iter()
                    .map(|field| {
                        let value = row.get(&field.name).cloned().unwrap_or_default();
                        (field.name.clone(), value)
                    })
                    .collect()
            })
            .collect();

        Ok(Response::Rows(rows))
    }

    /// Record ids of `def` records related to the scope's parent.
    /// Ids of the `def` records with at least one record related through
    /// `relationship` matching `clause`.
    fn related_matches(
        &self,
        def: &BusinessObjectDef,
        relationship: &str,
        clause: &Clause,
    ) -> Result<HashSet<String>> {
        let relationship = def.relationship_by_name(relationship)?;
        let related = lookup(&self.definitions, &relationship.target)?;
        let field = related.field_by_name(&clause.property)?;
        let related_rows = self.records.get(&related.name);

        let parents = self.records.get(&def.name).into_iter().flat_map(|records| records.keys());

        let mut matched = HashSet::new();
        for parent_id in parents {
            let scope = RelationScope {
                parent_type: def.name.clone(),
                parent_id: parent_id.clone(),
                relationship: relationship.name.clone(),
            };

            let any = self
                .children(related, &scope)?
                .iter()
                .filter_map(|id| related_rows.and_then(|rows| rows.get(id)))
                .any(|row| {
                    let value = row.get(&field.name).unwrap_or(&Value::Null);
                    filter::matches(field, value, clause)
                });

            if any {
                matched.insert(parent_id.clone());
            }
        }

        Ok(matched)
    }

    fn children(&self, def: &BusinessObjectDef, scope: &RelationScope) -> Result<HashSet<String>> {
        let parent = lookup(&self.definitions, &scope.parent_type)?;
        let relationship = parent.relationship_by_name(&scope.relationship)?;

        let Some(foreign_key) = &relationship.foreign_key else {
            return Ok(self
                .links
                .iter()
                .filter(|link| {
                    link.relationship == relationship.name
                        && link.parent_type == parent.name
                        && link.parent_id == scope.parent_id
                })
                .map(|link| link.child_id.clone())
                .collect());
        };

        let foreign_key = def.field_by_name(foreign_key)?;

        Ok(self
            .records
            .get(&def.name)
            .into_iter()
            .flat_map(|records| records.iter())
            .filter(|(_, row)| {
                row.get(&foreign_key.name)
                    .is_some_and(|value| value.to_text() == scope.parent_id)
            })
            .map(|(record_id, _)| record_id.clone())
            .collect())
    }

    pub(crate) fn link(&mut self, op: Link) -> Result<Response> {
        let parent = lookup(&self.definitions, &op.parent_type)?;
        let relationship = parent.relationship_by_name(&op.relationship)?;
        let child = lookup(&self.definitions, &relationship.target)?;

        let parent_exists = self
            .records
            .get(&parent.name)
            .is_some_and(|records| records.contains_key(&op.parent_id));
        if !parent_exists {
            return Err(not_found(&parent.name, &op.parent_id));
        }

        let children = self.records.entry(child.name.clone()).or_default();
        if !children.contains_key(&op.child_id) {
            return Err(not_found(&child.name, &op.child_id));
        }

        match &relationship.foreign_key {
            Some(foreign_key) => {
                let foreign_key = &child.field_by_name(foreign_key)?.name;

                if op.replace {
                    for row in children.values_mut() {
                        if row
                            .get(foreign_key)
                            .is_some_and(|value| value.to_text() == op.parent_id)
                        {
                            row.insert(foreign_key.clone(), Value::Null);
                        }
                    }
                }

                if let Some(row) = children.get_mut(&op.child_id) {
                    row.insert(foreign_key.clone(), Value::Text(op.parent_id.clone()));
                }
            }
            None => {
                let entry = LinkEntry {
                    relationship: relationship.name.clone(),
                    parent_type: parent.name.clone(),
                    parent_id: op.parent_id.clone(),
                    child_id: op.child_id.clone(),
                };

                if op.replace {
                    self.links.retain(|link| {
                        !(link.relationship == entry.relationship
                            && link.parent_type == entry.parent_type
                            && link.parent_id == entry.parent_id)
                    });
                }

                if !self.links.contains(&entry) {
                    self.links.push(entry);
                }
            }
        }

        Ok(Response::Outcome(Outcome::ok()))
    }

    pub(crate) fn unlink(&mut self, op: Unlink) -> Result<Response> {
        let parent = lookup(&self.definitions, &op.parent_type)?;
        let relationship = parent.relationship_by_name(&op.relationship)?;
        let child = lookup(&self.definitions, &relationship.target)?;

        match &relationship.foreign_key {
            Some(foreign_key) => {
                let foreign_key = &child.field_by_name(foreign_key)?.name;
                let row = self
                    .records
                    .get_mut(&child.name)
                    .and_then(|records| records.get_mut(&op.child_id));

                if let Some(row) = row {
                    if row
                        .get(foreign_key)
                        .is_some_and(|value| value.to_text() == op.parent_id)
                    {
                        row.insert(foreign_key.clone(), Value::Null);
                    }
                }
            }
            None => self.links.retain(|link| {
                !(link.relationship == relationship.name
                    && link.parent_type == parent.name
                    && link.parent_id == op.parent_id
                    && link.child_id == op.child_id)
            }),
        }

        Ok(Response::Outcome(Outcome::ok()))
    }
}
