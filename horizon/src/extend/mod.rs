//! Future-row generation for plain and grouped tables.

pub(crate) mod assemble;
pub(crate) mod grouped;
pub(crate) mod plain;
