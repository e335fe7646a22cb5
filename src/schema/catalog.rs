//! Built-in catalog columns
//!
//! Ids match the server's general-query column table. Only the columns a
//! client commonly asks for are listed; callers may define further
//! `Column` consts of their own.

use super::types::ColumnType::{DateTime, Integer, Text};
use super::types::{Column, ColumnGroup};

// Zones
pub const ZONE_ID: Column = Column::new(101, "ZONE_ID", Integer);
pub const ZONE_NAME: Column = Column::new(102, "ZONE_NAME", Text);

// Users
pub const USER_ID: Column = Column::new(201, "USER_ID", Integer);
pub const USER_NAME: Column = Column::new(202, "USER_NAME", Text);
pub const USER_TYPE: Column = Column::new(203, "USER_TYPE", Text);
pub const USER_ZONE: Column = Column::new(204, "USER_ZONE", Text);
pub const USER_CREATE_TIME: Column = Column::new(208, "USER_CREATE_TIME", DateTime);
pub const USER_MODIFY_TIME: Column = Column::new(209, "USER_MODIFY_TIME", DateTime);

// Resources
pub const RESC_ID: Column = Column::new(301, "RESC_ID", Integer);
pub const RESC_NAME: Column = Column::new(302, "RESC_NAME", Text);
pub const RESC_ZONE_NAME: Column = Column::new(303, "RESC_ZONE_NAME", Text);
pub const RESC_TYPE_NAME: Column = Column::new(304, "RESC_TYPE_NAME", Text);
pub const RESC_CLASS_NAME: Column = Column::new(305, "RESC_CLASS_NAME", Text);
pub const RESC_LOC: Column = Column::new(306, "RESC_LOC", Text);
pub const RESC_VAULT_PATH: Column = Column::new(307, "RESC_VAULT_PATH", Text);
pub const RESC_FREE_SPACE: Column = Column::new(308, "RESC_FREE_SPACE", Text);
pub const RESC_COMMENT: Column = Column::new(310, "RESC_COMMENT", Text);
pub const RESC_CREATE_TIME: Column = Column::new(311, "RESC_CREATE_TIME", DateTime);
pub const RESC_MODIFY_TIME: Column = Column::new(312, "RESC_MODIFY_TIME", DateTime);
pub const RESC_STATUS: Column = Column::new(313, "RESC_STATUS", Text);
pub const RESC_CHILDREN: Column = Column::new(315, "RESC_CHILDREN", Text);
pub const RESC_CONTEXT: Column = Column::new(316, "RESC_CONTEXT", Text);
pub const RESC_PARENT: Column = Column::new(317, "RESC_PARENT", Text);
pub const RESC_PARENT_CONTEXT: Column = Column::new(318, "RESC_PARENT_CONTEXT", Text);

// Data objects
pub const DATA_ID: Column = Column::new(401, "DATA_ID", Integer);
pub const DATA_COLL_ID: Column = Column::new(402, "DATA_COLL_ID", Integer);
pub const DATA_NAME: Column = Column::new(403, "DATA_NAME", Text);
pub const DATA_REPL_NUM: Column = Column::new(404, "DATA_REPL_NUM", Integer);
pub const DATA_VERSION: Column = Column::new(405, "DATA_VERSION", Text);
pub const DATA_TYPE_NAME: Column = Column::new(406, "DATA_TYPE_NAME", Text);
pub const DATA_SIZE: Column = Column::new(407, "DATA_SIZE", Integer);
pub const DATA_RESC_NAME: Column = Column::new(409, "DATA_RESC_NAME", Text);
pub const DATA_PATH: Column = Column::new(410, "DATA_PATH", Text);
pub const DATA_OWNER_NAME: Column = Column::new(411, "DATA_OWNER_NAME", Text);
pub const DATA_OWNER_ZONE: Column = Column::new(412, "DATA_OWNER_ZONE", Text);
pub const DATA_REPL_STATUS: Column = Column::new(413, "DATA_REPL_STATUS", Integer);
pub const DATA_STATUS: Column = Column::new(414, "DATA_STATUS", Text);
pub const DATA_CHECKSUM: Column = Column::new(415, "DATA_CHECKSUM", Text);
pub const DATA_EXPIRY: Column = Column::new(416, "DATA_EXPIRY", Text);
pub const DATA_COMMENTS: Column = Column::new(418, "DATA_COMMENTS", Text);
pub const DATA_CREATE_TIME: Column = Column::new(419, "DATA_CREATE_TIME", DateTime);
pub const DATA_MODIFY_TIME: Column = Column::new(420, "DATA_MODIFY_TIME", DateTime);
pub const DATA_RESC_HIER: Column = Column::new(422, "DATA_RESC_HIER", Text);
pub const DATA_RESC_ID: Column = Column::new(423, "DATA_RESC_ID", Integer);

// Collections
pub const COLL_ID: Column = Column::new(500, "COLL_ID", Integer);
pub const COLL_NAME: Column = Column::new(501, "COLL_NAME", Text);
pub const COLL_PARENT_NAME: Column = Column::new(502, "COLL_PARENT_NAME", Text);
pub const COLL_OWNER_NAME: Column = Column::new(503, "COLL_OWNER_NAME", Text);
pub const COLL_OWNER_ZONE: Column = Column::new(504, "COLL_OWNER_ZONE", Text);
pub const COLL_INHERITANCE: Column = Column::new(506, "COLL_INHERITANCE", Text);
pub const COLL_COMMENTS: Column = Column::new(507, "COLL_COMMENTS", Text);
pub const COLL_CREATE_TIME: Column = Column::new(508, "COLL_CREATE_TIME", DateTime);
pub const COLL_MODIFY_TIME: Column = Column::new(509, "COLL_MODIFY_TIME", DateTime);

// Metadata attached to data objects and collections
pub const META_DATA_ATTR_NAME: Column = Column::new(600, "META_DATA_ATTR_NAME", Text);
pub const META_DATA_ATTR_VALUE: Column = Column::new(601, "META_DATA_ATTR_VALUE", Text);
pub const META_DATA_ATTR_UNITS: Column = Column::new(602, "META_DATA_ATTR_UNITS", Text);
pub const META_DATA_ATTR_ID: Column = Column::new(603, "META_DATA_ATTR_ID", Integer);
pub const META_COLL_ATTR_NAME: Column = Column::new(610, "META_COLL_ATTR_NAME", Text);
pub const META_COLL_ATTR_VALUE: Column = Column::new(611, "META_COLL_ATTR_VALUE", Text);
pub const META_COLL_ATTR_UNITS: Column = Column::new(612, "META_COLL_ATTR_UNITS", Text);
pub const META_COLL_ATTR_ID: Column = Column::new(613, "META_COLL_ATTR_ID", Integer);

pub const ZONE: ColumnGroup = ColumnGroup::new("ZONE", &[ZONE_ID, ZONE_NAME]);

pub const USER: ColumnGroup = ColumnGroup::new(
    "USER",
    &[
        USER_ID,
        USER_NAME,
        USER_TYPE,
        USER_ZONE,
        USER_CREATE_TIME,
        USER_MODIFY_TIME,
    ],
);

pub const RESOURCE: ColumnGroup = ColumnGroup::new(
    "RESOURCE",
    &[
        RESC_ID,
        RESC_NAME,
        RESC_ZONE_NAME,
        RESC_TYPE_NAME,
        RESC_CLASS_NAME,
        RESC_LOC,
        RESC_VAULT_PATH,
        RESC_FREE_SPACE,
        RESC_COMMENT,
        RESC_CREATE_TIME,
        RESC_MODIFY_TIME,
        RESC_STATUS,
        RESC_CHILDREN,
        RESC_CONTEXT,
        RESC_PARENT,
        RESC_PARENT_CONTEXT,
    ],
);

pub const DATA_OBJECT: ColumnGroup = ColumnGroup::new(
    "DATA_OBJECT",
    &[
        DATA_ID,
        DATA_COLL_ID,
        DATA_NAME,
        DATA_REPL_NUM,
        DATA_VERSION,
        DATA_TYPE_NAME,
        DATA_SIZE,
        DATA_RESC_NAME,
        DATA_PATH,
        DATA_OWNER_NAME,
        DATA_OWNER_ZONE,
        DATA_REPL_STATUS,
        DATA_STATUS,
        DATA_CHECKSUM,
        DATA_EXPIRY,
        DATA_COMMENTS,
        DATA_CREATE_TIME,
        DATA_MODIFY_TIME,
        DATA_RESC_HIER,
        DATA_RESC_ID,
    ],
);

pub const COLLECTION: ColumnGroup = ColumnGroup::new(
    "COLLECTION",
    &[
        COLL_ID,
        COLL_NAME,
        COLL_PARENT_NAME,
        COLL_OWNER_NAME,
        COLL_OWNER_ZONE,
        COLL_INHERITANCE,
        COLL_COMMENTS,
        COLL_CREATE_TIME,
        COLL_MODIFY_TIME,
    ],
);

pub const DATA_OBJECT_META: ColumnGroup = ColumnGroup::new(
    "DATA_OBJECT_META",
    &[
        META_DATA_ATTR_ID,
        META_DATA_ATTR_NAME,
        META_DATA_ATTR_VALUE,
        META_DATA_ATTR_UNITS,
    ],
);

pub const COLLECTION_META: ColumnGroup = ColumnGroup::new(
    "COLLECTION_META",
    &[
        META_COLL_ATTR_ID,
        META_COLL_ATTR_NAME,
        META_COLL_ATTR_VALUE,
        META_COLL_ATTR_UNITS,
    ],
);

/// Every group known to the client
pub const GROUPS: &[ColumnGroup] = &[
    ZONE,
    USER,
    RESOURCE,
    DATA_OBJECT,
    COLLECTION,
    DATA_OBJECT_META,
    COLLECTION_META,
];

/// Look up a built-in column by name, ignoring ASCII case
pub fn column_by_name(name: &str) -> Option<Column> {
    GROUPS
        .iter()
        .flat_map(|g| g.columns().iter())
        .find(|c| c.name().eq_ignore_ascii_case(name))
        .copied()
}

/// Look up a built-in group by name, ignoring ASCII case
pub fn group_by_name(name: &str) -> Option<ColumnGroup> {
    GROUPS
        .iter()
        .find(|g| g.name().eq_ignore_ascii_case(name))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_ids_unique() {
        let mut seen = HashSet::new();
        for group in GROUPS {
            for column in group.columns() {
                assert!(seen.insert(column.id()), "duplicate id {}", column);
            }
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(column_by_name("data_name"), Some(DATA_NAME));
        assert_eq!(column_by_name("COLL_NAME"), Some(COLL_NAME));
        assert!(column_by_name("NOPE").is_none());
    }

    #[test]
    fn test_group_lookup() {
        let group = group_by_name("collection").unwrap();
        assert_eq!(group.columns()[1], COLL_NAME);
    }
}
