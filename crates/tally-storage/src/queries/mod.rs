//! SQL for pattern rows, split by concern.

pub mod pattern_crud;
pub mod pattern_query;
