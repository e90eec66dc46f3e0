//! Read-side operations over a slice of records.
//!
//! Both functions are pure: they borrow the input and never mutate it.

use zookeepr_types::Record;

/// Return the records satisfying every constraint in `query`, in order.
///
/// An empty constraint set returns every record.
pub fn filter_by_query<'a, R: Record>(query: &R::Query, records: &'a [R]) -> Vec<&'a R> {
    records.iter().filter(|record| record.matches(query)).collect()
}

/// Return the first record whose id equals `id` exactly.
///
/// Absence is a normal outcome, not an error.
pub fn find_by_id<'a, R: Record>(id: &str, records: &'a [R]) -> Option<&'a R> {
    records.iter().find(|record| record.id() == id)
}
