//! Predicate operators.
//!
//! Each struct is one node of a composed filter. Rendering walks the tree,
//! emitting a parameterized fragment and pushing bound values in order.

use rusqlite::types::Value;

use crate::traits::Predicate;

/// A binary comparison such as `=`, `>`, `<=`.
pub struct Cmp<L> {
    left: L,
    op: &'static str,
    right: Value,
}

impl<L> Cmp<L> {
    pub fn new(left: L, op: &'static str, right: Value) -> Self {
        Self { left, op, right }
    }
}

impl<L: Predicate> Predicate for Cmp<L> {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let left = self.left.render(params);
        params.push(self.right.clone());
        format!("{} {} ?", left, self.op)
    }
}

/// A `LIKE` match, optionally case-insensitive.
pub struct Pattern<L> {
    left: L,
    pattern: String,
    case_insensitive: bool,
}

impl<L> Pattern<L> {
    pub const fn new(left: L, pattern: String, case_insensitive: bool) -> Self {
        Self {
            left,
            pattern,
            case_insensitive,
        }
    }
}

impl<L: Predicate> Predicate for Pattern<L> {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let left = self.left.render(params);
        params.push(format!("%{}%", self.pattern).into());
        if self.case_insensitive {
            format!("LOWER({left}) LIKE LOWER(?)")
        } else {
            format!("{left} LIKE ?")
        }
    }
}

/// An `IN` / `NOT IN` set membership check.
pub struct InSet<L> {
    left: L,
    values: Vec<Value>,
    negated: bool,
}

impl<L> InSet<L> {
    pub fn new(left: L, values: Vec<Value>, negated: bool) -> Self {
        Self {
            left,
            values,
            negated,
        }
    }
}

impl<L: Predicate> Predicate for InSet<L> {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let left = self.left.render(params);
        let placeholders = vec!["?"; self.values.len()].join(", ");
        params.extend(self.values.iter().cloned());
        let op = if self.negated { "NOT IN" } else { "IN" };
        format!("{left} {op} ({placeholders})")
    }
}

/// An `IS NULL` / `IS NOT NULL` check.
pub struct Null<L> {
    left: L,
    is_null: bool,
}

impl<L> Null<L> {
    pub fn new(left: L, is_null: bool) -> Self {
        Self { left, is_null }
    }
}

impl<L: Predicate> Predicate for Null<L> {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let left = self.left.render(params);
        let op = if self.is_null {
            "IS NULL"
        } else {
            "IS NOT NULL"
        };
        format!("{left} {op}")
    }
}

/// Two predicates joined with `AND` or `OR`.
pub struct Junction<L, R> {
    left: L,
    right: R,
    op: &'static str,
}

impl<L, R> Junction<L, R> {
    pub fn new(left: L, right: R, op: &'static str) -> Self {
        Self { left, right, op }
    }
}

impl<L: Predicate, R: Predicate> Predicate for Junction<L, R> {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let left = self.left.render(params);
        let right = self.right.render(params);
        format!("({} {} {})", left, self.op, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Col;

    const ID: Col<i64> = Col::new("id");
    const NAME: Col<String> = Col::new("name");

    #[test]
    fn comparison_binds_one_value() {
        let mut params = vec![];
        let sql = ID.eq(3i64).render(&mut params);
        assert_eq!(sql, "id = ?");
        assert_eq!(params, vec![Value::Integer(3)]);
    }

    #[test]
    fn junction_parenthesizes_and_orders_params() {
        let mut params = vec![];
        let sql = ID.gt(1i64).and(NAME.ne("b".to_string())).render(&mut params);
        assert_eq!(sql, "(id > ? AND name != ?)");
        assert_eq!(
            params,
            vec![Value::Integer(1), Value::Text("b".to_string())]
        );
    }

    #[test]
    fn set_membership_expands_placeholders() {
        let mut params = vec![];
        let sql = ID.one_of([1i64, 2, 3]).render(&mut params);
        assert_eq!(sql, "id IN (?, ?, ?)");
        assert_eq!(params.len(), 3);

        let mut params = vec![];
        let sql = ID.not_in([4i64]).render(&mut params);
        assert_eq!(sql, "id NOT IN (?)");
    }

    #[test]
    fn null_checks_bind_nothing() {
        let mut params = vec![];
        assert_eq!(NAME.is_null().render(&mut params), "name IS NULL");
        assert_eq!(NAME.is_not_null().render(&mut params), "name IS NOT NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn like_wraps_pattern_in_wildcards() {
        let mut params = vec![];
        let sql = NAME.like("ab").render(&mut params);
        assert_eq!(sql, "name LIKE ?");
        assert_eq!(params, vec![Value::Text("%ab%".to_string())]);

        let mut params = vec![];
        let sql = NAME.ilike("ab").render(&mut params);
        assert_eq!(sql, "LOWER(name) LIKE LOWER(?)");
    }
}
