//! Multi-criteria product filtering, compiled into SQL predicates.

use std::collections::BTreeSet;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use models::{product, product_tag, review};

/// Optional filters for product search. Absent filters match everything;
/// present ones are ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSearch {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<i32>,
    /// Matches products carrying at least one of these tags.
    pub tag_ids: Option<BTreeSet<i32>>,
    /// Minimum average review rating; products without reviews average 0.
    pub min_rating: Option<f64>,
}

impl ProductSearch {
    pub fn is_empty(&self) -> bool {
        self.to_condition().is_empty()
    }

    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(name) = self.name.as_deref() {
            cond = cond.add(name_contains(name));
        }
        if let Some(min) = self.min_price {
            cond = cond.add(product::Column::Price.gte(min));
        }
        if let Some(max) = self.max_price {
            cond = cond.add(product::Column::Price.lte(max));
        }
        if let Some(category_id) = self.category_id {
            cond = cond.add(product::Column::CategoryId.eq(category_id));
        }
        if let Some(tag_ids) = self.tag_ids.as_ref().filter(|ids| !ids.is_empty()) {
            cond = cond.add(has_any_tag(tag_ids));
        }
        // Every average is >= 0, so a non-positive floor filters nothing
        if let Some(min_rating) = self.min_rating.filter(|r| *r > 0.0) {
            cond = cond.add(average_rating_at_least(min_rating));
        }
        cond
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LOWER(col) LIKE '%needle%'` with LIKE wildcards in `needle` matched literally.
pub fn lower_contains(col: impl IntoColumnRef, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

pub fn name_contains(needle: &str) -> SimpleExpr {
    lower_contains((product::Entity, product::Column::Name), needle)
}

/// `id IN (SELECT product_id FROM product_tag WHERE tag_id IN (..))`
pub fn has_any_tag(tag_ids: &BTreeSet<i32>) -> SimpleExpr {
    product::Column::Id.in_subquery(
        Query::select()
            .column(product_tag::Column::ProductId)
            .from(product_tag::Entity)
            .and_where(product_tag::Column::TagId.is_in(tag_ids.iter().copied()))
            .to_owned(),
    )
}

/// `id IN (SELECT product_id FROM review GROUP BY product_id HAVING AVG(rating) >= ?)`
pub fn average_rating_at_least(min_rating: f64) -> SimpleExpr {
    product::Column::Id.in_subquery(
        Query::select()
            .column(review::Column::ProductId)
            .from(review::Entity)
            .group_by_col(review::Column::ProductId)
            .and_having(Expr::expr(Func::avg(Expr::col(review::Column::Rating))).gte(min_rating))
            .to_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(search: &ProductSearch) -> String {
        product::Entity::find()
            .filter(search.to_condition())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn empty_search_adds_no_predicates() {
        let search = ProductSearch::default();
        assert!(search.is_empty());
        let sql = sql(&search);
        // The select list names every column; only look past FROM
        let tail = sql.split(" FROM ").nth(1).unwrap_or_default();
        for fragment in ["LIKE", "\"price\"", "\"category_id\"", " IN ", "HAVING"] {
            assert!(!tail.contains(fragment), "{fragment} in {sql}");
        }
    }

    #[test]
    fn non_positive_rating_and_empty_tags_are_no_ops() {
        let search = ProductSearch { min_rating: Some(0.0), tag_ids: Some(BTreeSet::new()), ..Default::default() };
        assert!(search.is_empty());
    }

    #[test]
    fn filters_are_anded() {
        let search = ProductSearch {
            name: Some("Lamp".into()),
            min_price: Some(10.0),
            max_price: Some(20.0),
            category_id: Some(3),
            ..Default::default()
        };
        let q = sql(&search);
        assert!(q.contains(r#"LOWER("product"."name") LIKE '%lamp%'"#), "{q}");
        assert!(q.contains(r#""product"."price" >= 10"#), "{q}");
        assert!(q.contains(r#""product"."price" <= 20"#), "{q}");
        assert!(q.contains(r#""product"."category_id" = 3"#), "{q}");
        assert_eq!(q.matches(" AND ").count(), 3, "{q}");
    }

    #[test]
    fn tag_and_rating_filters_use_subqueries() {
        let search = ProductSearch {
            tag_ids: Some([1, 2].into_iter().collect()),
            min_rating: Some(4.0),
            ..Default::default()
        };
        let q = sql(&search);
        assert!(q.contains(r#"FROM "product_tag""#), "{q}");
        assert!(q.contains("HAVING AVG"), "{q}");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
    }
}
