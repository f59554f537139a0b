//! Listing predicates.
//!
//! A [`UserFilter`] is an ordered list of [`Clause`]s. Each clause owns a SQL
//! template with `?` placeholders and produces its bound values in the same
//! order, so rendering only ever interleaves template fragments with
//! `push_bind`. User input never reaches the SQL text.

use sqlx::{QueryBuilder, Sqlite};

#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Real(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Substring match on first name, last name or email.
    Search(String),
    /// Exact match on the skill level label.
    SkillLevel(String),
    /// Derived age (fractional years) lower bound, inclusive.
    AgeAtLeast(i64),
    /// Derived age (fractional years) upper bound, inclusive.
    AgeAtMost(i64),
}

impl Clause {
    // Birth dates julianday() can't read count as age 0.
    pub fn template(&self) -> &'static str {
        match self {
            Clause::Search(_) => "(first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)",
            Clause::SkillLevel(_) => "niveau_natation = ?",
            Clause::AgeAtLeast(_) => {
                "COALESCE((julianday('now') - julianday(date_naissance)) / 365.25, 0) >= ?"
            }
            Clause::AgeAtMost(_) => {
                "COALESCE((julianday('now') - julianday(date_naissance)) / 365.25, 0) <= ?"
            }
        }
    }

    pub fn binds(&self) -> Vec<BindValue> {
        match self {
            Clause::Search(term) => {
                let pattern = format!("%{}%", term);
                vec![
                    BindValue::Text(pattern.clone()),
                    BindValue::Text(pattern.clone()),
                    BindValue::Text(pattern),
                ]
            }
            Clause::SkillLevel(level) => vec![BindValue::Text(level.clone())],
            Clause::AgeAtLeast(years) | Clause::AgeAtMost(years) => {
                vec![BindValue::Real(*years as f64)]
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    clauses: Vec<Clause>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the listing filter from raw query values. Empty strings and
    /// non-integer age bounds are ignored, each bound on its own.
    pub fn from_params(
        search: Option<&str>,
        skill_level: Option<&str>,
        age_min: Option<&str>,
        age_max: Option<&str>,
    ) -> Self {
        let mut filter = Self::new();
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            filter.push(Clause::Search(term.to_string()));
        }
        if let Some(level) = skill_level.filter(|s| !s.is_empty()) {
            filter.push(Clause::SkillLevel(level.to_string()));
        }
        if let Some(min) = age_min.and_then(|v| v.parse::<i64>().ok()) {
            filter.push(Clause::AgeAtLeast(min));
        }
        if let Some(max) = age_max.and_then(|v| v.parse::<i64>().ok()) {
            filter.push(Clause::AgeAtMost(max));
        }
        filter
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// All bound values, in placeholder order.
    pub fn binds(&self) -> Vec<BindValue> {
        self.clauses.iter().flat_map(Clause::binds).collect()
    }

    /// The `WHERE` fragment as rendered by [`UserFilter::push_where`], with a
    /// leading space, or an empty string when there is nothing to filter.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        let joined = self
            .clauses
            .iter()
            .map(Clause::template)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {}", joined)
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, clause) in self.clauses.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });

            let mut fragments = clause.template().split('?');
            let binds = clause.binds();
            debug_assert_eq!(clause.template().matches('?').count(), binds.len());

            if let Some(head) = fragments.next() {
                qb.push(head);
            }
            for (value, fragment) in binds.into_iter().zip(fragments) {
                match value {
                    BindValue::Text(s) => {
                        qb.push_bind(s);
                    }
                    BindValue::Real(f) => {
                        qb.push_bind(f);
                    }
                }
                qb.push(fragment);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT COUNT(*) FROM users";

    fn rendered(filter: &UserFilter) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new(BASE);
        filter.push_where(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn empty_filter_renders_nothing() {
        let filter = UserFilter::from_params(None, Some(""), None, None);
        assert!(filter.is_empty());
        assert_eq!(filter.where_sql(), "");
        assert_eq!(rendered(&filter), BASE);
        assert!(filter.binds().is_empty());
    }

    #[test]
    fn search_binds_pattern_three_times() {
        let filter = UserFilter::from_params(Some("dup"), None, None, None);
        assert_eq!(
            rendered(&filter),
            "SELECT COUNT(*) FROM users WHERE (first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)"
        );
        assert_eq!(filter.binds(), vec![BindValue::Text("%dup%".into()); 3]);
    }

    #[test]
    fn clauses_keep_order_and_binds_line_up() {
        let filter = UserFilter::from_params(Some("jean"), Some("NAGEUR 3"), Some("5"), Some("11"));
        assert_eq!(
            filter.clauses(),
            &[
                Clause::Search("jean".into()),
                Clause::SkillLevel("NAGEUR 3".into()),
                Clause::AgeAtLeast(5),
                Clause::AgeAtMost(11),
            ]
        );
        assert_eq!(
            filter.binds(),
            vec![
                BindValue::Text("%jean%".into()),
                BindValue::Text("%jean%".into()),
                BindValue::Text("%jean%".into()),
                BindValue::Text("NAGEUR 3".into()),
                BindValue::Real(5.0),
                BindValue::Real(11.0),
            ]
        );

        let sql = rendered(&filter);
        assert_eq!(sql, format!("{}{}", BASE, filter.where_sql()));
        assert_eq!(sql.matches('?').count(), filter.binds().len());
        assert_eq!(sql.matches(" AND ").count(), 3);
    }

    #[test]
    fn malformed_age_bound_is_dropped_alone() {
        let filter = UserFilter::from_params(None, None, Some("abc"), Some("12"));
        assert_eq!(filter.clauses(), &[Clause::AgeAtMost(12)]);

        let filter = UserFilter::from_params(None, None, Some("7"), Some("1.5"));
        assert_eq!(filter.clauses(), &[Clause::AgeAtLeast(7)]);
    }

    #[test]
    fn user_text_never_reaches_sql() {
        let filter = UserFilter::from_params(Some("'; DROP TABLE users; --"), Some("x' OR '1'='1"), None, None);
        let sql = rendered(&filter);
        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("'1'='1"));
    }
}
