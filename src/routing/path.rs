//! Path rules for the API prefix, namespace mounts and endpoints.
//!
//! # Responsibilities
//! - Validate the API prefix and namespace mount paths
//! - Validate endpoint paths declared inside a namespace
//! - Join prefix, mount and endpoint paths into full routes
//! - Detect mounts that overlap segment-wise
//!
//! # Design Decisions
//! - Paths are case-sensitive, like request path matching
//! - Overlap is decided per segment, so `/user` and `/users` are disjoint
//! - The empty prefix mounts namespaces at the root
//! - Mount paths are static; parameters only appear in endpoint paths

/// Check an API prefix such as `/api/v1`. The empty prefix is accepted.
pub fn check_prefix(prefix: &str) -> Result<(), &'static str> {
    if prefix.is_empty() {
        return Ok(());
    }
    let rest = prefix.strip_prefix('/').ok_or("must start with '/'")?;
    if rest.is_empty() {
        return Err("must be empty instead of '/'");
    }
    check_static_segments(rest)
}

/// Check a namespace mount path such as `/users`.
pub fn check_mount(path: &str) -> Result<(), &'static str> {
    let rest = path.strip_prefix('/').ok_or("must start with '/'")?;
    if rest.is_empty() {
        return Err("must name at least one segment");
    }
    check_static_segments(rest)
}

/// Check an endpoint path relative to its namespace. `/` is the namespace root.
pub fn check_endpoint(path: &str) -> Result<(), &'static str> {
    let rest = path.strip_prefix('/').ok_or("must start with '/'")?;
    if rest.is_empty() {
        return Ok(());
    }
    if rest.ends_with('/') {
        return Err("must not end with '/'");
    }
    let segments: Vec<&str> = rest.split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.into_iter().enumerate() {
        if segment.is_empty() {
            return Err("must not contain empty segments");
        }
        if segment.starts_with([':', '*']) {
            return Err("must use '{name}' for parameters");
        }
        if !segment.contains(['{', '}']) {
            continue;
        }
        let name = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or("parameters must span a whole segment")?;
        let name = match name.strip_prefix('*') {
            Some(_) if i != last => return Err("catch-all parameter must be the last segment"),
            Some(rest) => rest,
            None => name,
        };
        if name.is_empty() || name.contains(['{', '}', '*', ':']) {
            return Err("parameter name is malformed");
        }
    }
    Ok(())
}

fn check_static_segments(rest: &str) -> Result<(), &'static str> {
    if rest.ends_with('/') {
        return Err("must not end with '/'");
    }
    for segment in rest.split('/') {
        if segment.is_empty() {
            return Err("must not contain empty segments");
        }
        if segment.contains(['{', '}', '*']) || segment.starts_with(':') {
            return Err("must not contain parameters or wildcards");
        }
    }
    Ok(())
}

/// Append `path` to `base`. A `/` path addresses `base` itself.
pub fn join(base: &str, path: &str) -> String {
    match (base, path) {
        ("", "/") => "/".to_string(),
        (base, "/") => base.to_string(),
        (base, path) => format!("{base}{path}"),
    }
}

/// Returns true if one path is a segment-wise prefix of the other.
pub fn overlaps(a: &str, b: &str) -> bool {
    let a: Vec<&str> = segments(a).collect();
    let b: Vec<&str> = segments(b).collect();
    let shared = a.len().min(b.len());
    a[..shared] == b[..shared]
}

/// Names of the `{param}` segments of a path, in order.
pub fn params(path: &str) -> Vec<&str> {
    segments(path)
        .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .map(|name| name.trim_start_matches('*'))
        .collect()
}

pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
