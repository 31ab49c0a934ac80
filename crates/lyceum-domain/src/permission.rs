//! Permission name parsing.
//!
//! Permission names have the form `<resource>:<action>`, e.g. `schools:create`.
//! The permission gate treats them as opaque strings; the resource part is
//! only interpreted when building the authorization menu.

/// Split a permission name into `(resource, action)`.
///
/// Returns `None` when the name is not of the `<resource>:<action>` form
/// (missing separator, empty resource, or empty action).
pub fn split_permission(name: &str) -> Option<(&str, &str)> {
    let (resource, action) = name.split_once(':')?;
    if resource.is_empty() || action.is_empty() {
        return None;
    }
    Some((resource, action))
}

/// The resource part of a permission name, if well-formed.
pub fn permission_resource(name: &str) -> Option<&str> {
    split_permission(name).map(|(resource, _)| resource)
}
