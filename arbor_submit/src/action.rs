// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default form actions.

use arbor_engine::create_path;
use url::form_urlencoded;

/// The action a form inside a route submits to.
///
/// Without an explicit `action` the form posts back to the route's own
/// pathname with the current `search`. Index routes carry the `index` query
/// flag so the engine can tell them apart from their parent layout; an
/// `index` flag already present in the search is dropped first so it is never
/// doubled. An explicit `"."` is the route's pathname alone. Absolute actions
/// are used as given; other relative actions are appended to the route's
/// pathname.
#[must_use]
pub fn form_action(
    route_pathname: &str,
    is_index: bool,
    search: &str,
    action: Option<&str>,
) -> String {
    let (pathname, mut query) = match action {
        None if is_index => (route_pathname.to_owned(), without_index_flag(search)),
        None => (route_pathname.to_owned(), search.to_owned()),
        Some(".") => (route_pathname.to_owned(), String::new()),
        Some(action) => {
            let (path, query) = action.split_once('?').unwrap_or((action, ""));
            let path = if path.starts_with('/') {
                path.to_owned()
            } else {
                join(route_pathname, path)
            };
            let query = if query.is_empty() {
                String::new()
            } else {
                format!("?{query}")
            };
            (path, query)
        }
    };
    if is_index && matches!(action, None | Some(".")) {
        query = match query.strip_prefix('?') {
            Some(rest) if !rest.is_empty() => format!("?index&{rest}"),
            _ => String::from("?index"),
        };
    }
    create_path(&pathname, &query, "")
}

fn without_index_flag(search: &str) -> String {
    let raw = search.strip_prefix('?').unwrap_or(search);
    let kept: Vec<(String, String)> = form_urlencoded::parse(raw.as_bytes())
        .filter(|(name, _)| name != "index")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(kept)
        .finish();
    format!("?{encoded}")
}

fn join(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_owned();
    }
    let mut out = base.trim_end_matches('/').to_owned();
    out.push('/');
    out.push_str(relative);
    out
}
