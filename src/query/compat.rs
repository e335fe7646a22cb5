//! Projection narrowing for older servers
//!
//! Servers before `LEGACY_SERVER_THRESHOLD` do not know the resource
//! hierarchy columns and reject any request that names them. Those columns
//! are dropped from the projection before the request is built; predicates
//! are left alone.

use crate::schema::catalog::{
    DATA_RESC_HIER, RESC_CHILDREN, RESC_CONTEXT, RESC_PARENT, RESC_PARENT_CONTEXT,
};
use crate::schema::Column;
use crate::wire::{Modifier, ServerVersion};

/// Columns unknown to servers older than `LEGACY_SERVER_THRESHOLD`
pub const LEGACY_UNSUPPORTED: &[Column] = &[
    RESC_CHILDREN,
    RESC_CONTEXT,
    RESC_PARENT,
    RESC_PARENT_CONTEXT,
    DATA_RESC_HIER,
];

/// True if `column` may be projected against a server of `version`
pub fn is_supported(column: &Column, version: ServerVersion) -> bool {
    !(version.is_legacy() && LEGACY_UNSUPPORTED.contains(column))
}

/// Filter a projection for `version`, preserving the order of what remains
pub fn narrow_projection(
    projection: &[(Column, Modifier)],
    version: ServerVersion,
) -> Vec<(Column, Modifier)> {
    projection
        .iter()
        .filter(|(column, _)| is_supported(column, version))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::{DATA_NAME, RESC_NAME};

    fn projection() -> Vec<(Column, Modifier)> {
        vec![
            (RESC_NAME, Modifier::Select),
            (RESC_PARENT, Modifier::Select),
            (DATA_NAME, Modifier::OrderAscending),
            (DATA_RESC_HIER, Modifier::Select),
        ]
    }

    #[test]
    fn test_legacy_server_drops_hierarchy_columns() {
        let narrowed = narrow_projection(&projection(), ServerVersion::new(3, 3, 1));
        assert_eq!(
            narrowed,
            vec![(RESC_NAME, Modifier::Select), (DATA_NAME, Modifier::OrderAscending)]
        );
    }

    #[test]
    fn test_current_server_keeps_everything() {
        let narrowed = narrow_projection(&projection(), ServerVersion::new(4, 0, 0));
        assert_eq!(narrowed, projection());
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported(&RESC_NAME, ServerVersion::new(3, 0, 0)));
        assert!(!is_supported(&RESC_CHILDREN, ServerVersion::new(3, 3, 1)));
        assert!(is_supported(&RESC_CHILDREN, ServerVersion::new(4, 2, 0)));
    }
}
