//! Operations every entity store shares: `<kind>.list`, `.get`, `.byKey`, CRUD and
//! filter/sort state. Kind-specific handlers run first and may shadow these.

use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::helpers::{required_str, scalar_string, to_json};
use crate::ipc::types::{AppState, Request};
use crate::store::{Entity, EntityStore};
use serde_json::{json, Value};

pub fn list_view<T: Entity>(store: &EntityStore<T>, items: Vec<&T>) -> Value {
    json!({
        "kind": store.kind().as_str(),
        "items": to_json(&items),
        "total": items.len(),
        "filter": store.filter(),
        "sort": store.sort(),
    })
}

fn by_key<T: Entity>(store: &EntityStore<T>, req: &Request) -> Result<Value, LmsError> {
    let index = required_str(req, "index")?;
    let key = required_str(req, "key")?;
    let items = store
        .by_key(index, key)
        .ok_or_else(|| LmsError::UnknownIndex(index.to_string()))?;
    Ok(json!({ "index": index, "key": key, "items": to_json(&items) }))
}

fn store_op<T: Entity>(
    store: &mut EntityStore<T>,
    req: &Request,
    op: &str,
) -> Option<Result<Value, LmsError>> {
    let out = match op {
        "list" => Ok(list_view(store, store.filtered())),
        "get" => required_str(req, "id").map(|id| to_json(&store.fetch_by_id(id))),
        "current" => Ok(to_json(&store.current())),
        "byKey" => by_key(store, req),
        "indexes" => Ok(json!({
            "indexes": store
                .index_names()
                .into_iter()
                .map(|name| json!({ "name": name, "keys": store.index_keys(name) }))
                .collect::<Vec<_>>()
        })),
        "create" => Ok(to_json(&store.create(&req.params))),
        "update" => required_str(req, "id").map(|id| {
            let patch = req.params.get("patch").cloned().unwrap_or(Value::Null);
            json!({ "success": store.update(id, &patch) })
        }),
        "delete" => required_str(req, "id").map(|id| json!({ "success": store.delete(id) })),
        "setFilter" => required_str(req, "dimension").and_then(|dim| {
            let value = scalar_string(req, "value")?;
            store.set_filter(dim, &value);
            Ok(list_view(store, store.filtered()))
        }),
        "setSearchQuery" => scalar_string(req, "query").map(|q| {
            store.set_search_query(&q);
            list_view(store, store.filtered())
        }),
        "setSort" => required_str(req, "field").map(|field| {
            store.set_sort(field);
            list_view(store, store.filtered())
        }),
        "resetFilters" => {
            store.reset_filters();
            Ok(list_view(store, store.filtered()))
        }
        _ => return None,
    };
    Some(out)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let (kind, op) = req.method.split_once('.')?;
    let out = match kind {
        "classes" => store_op(&mut state.classes, req, op)?,
        "students" => store_op(&mut state.students, req, op)?,
        "teachers" => store_op(&mut state.teachers, req, op)?,
        "experiences" => store_op(&mut state.experiences, req, op)?,
        _ => return None,
    };
    Some(respond(&req.id, out))
}
