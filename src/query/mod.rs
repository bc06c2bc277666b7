//! Query builder.
//!
//! A [`Query`] is a single-use accumulator bound to one entity type and one
//! translator. Every call compiles its closure's expression immediately,
//! binding constants into the query's own [`Parameters`], and appends the
//! fragment to a clause buffer. [`Query::build`] assembles the statement once;
//! afterwards the query is frozen.
//!
//! ```ignore
//! let translator = Dialect::Postgres.translator();
//! let mut query = Query::<Order>::new(&cache, translator.as_ref())?;
//! query
//!     .filter(|o| o.col("Amount").gt(100))?
//!     .order_by_desc(|o| o.col("PlacedAt"))?
//!     .paginate(20, 3)?;
//! let sql = query.build();
//! ```

mod parts;


pub use parts::{QueryParts, SelectFormat};

use std::marker::PhantomData;

use tracing::debug;

use crate::ast::{EntityRef, Expr, JoinKind, SortOrder};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::{Entity, SchemaCache};
use crate::transpiler::{Compiler, Parameters, SqlTranslator};

pub struct Query<'a, T: Entity> {
    cache: &'a SchemaCache,
    translator: &'a dyn SqlTranslator,
    entity: EntityRef,
    parts: QueryParts,
    params: Parameters,
    paged: bool,
    sql: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> Query<'a, T> {
    pub fn new(cache: &'a SchemaCache, translator: &'a dyn SqlTranslator) -> WeaveResult<Self> {
        let table = cache.table::<T>()?;
        let parts = QueryParts::new(table.name(), translator.selectable_table(table.name()));
        Ok(Self {
            cache,
            translator,
            entity: EntityRef::new(table),
            parts,
            params: translator.new_parameters(),
            paged: false,
            sql: None,
            _entity: PhantomData,
        })
    }

    /// Handle to the queried entity's columns.
    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn parts(&self) -> &QueryParts {
        &self.parts
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn is_built(&self) -> bool {
        self.sql.is_some()
    }

    fn ensure_open(&self) -> WeaveResult<()> {
        match self.sql {
            Some(_) => Err(WeaveError::AlreadyBuilt),
            None => Ok(()),
        }
    }

    fn compiler(&mut self) -> Compiler<'_> {
        Compiler::new(self.translator, &mut self.params)
    }

    /// Add to the select list. Tuples add one column per item.
    pub fn select(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().projection(expr)?;
        self.parts.push_column(&sql);
        Ok(self)
    }

    /// AND a condition into WHERE.
    pub fn filter(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().predicate(expr)?;
        self.parts.and_where(&sql);
        Ok(self)
    }

    /// OR a condition into WHERE.
    pub fn or(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().predicate(expr)?;
        self.parts.or_where(&sql);
        Ok(self)
    }

    pub fn group_by(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().projection(expr)?;
        self.parts.push_group_by(&sql);
        Ok(self)
    }

    pub fn having(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().predicate(expr)?;
        self.parts.and_having(&sql);
        Ok(self)
    }

    pub fn order_by(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.order(f, SortOrder::Asc)
    }

    pub fn order_by_desc(&mut self, f: impl FnOnce(&EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.order(f, SortOrder::Desc)
    }

    fn order(&mut self, f: impl FnOnce(&EntityRef) -> Expr, order: SortOrder) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let expr = f(&self.entity);
        let sql = self.compiler().ordering(expr, order)?;
        self.parts.push_order_by(&sql);
        Ok(self)
    }

    /// INNER JOIN `U` on a condition over the queried entity and `U`.
    pub fn join<U: Entity>(&mut self, f: impl FnOnce(&EntityRef, &EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.join_entity::<U>(JoinKind::Inner, f)
    }

    pub fn left_join<U: Entity>(&mut self, f: impl FnOnce(&EntityRef, &EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.join_entity::<U>(JoinKind::Left, f)
    }

    pub fn right_join<U: Entity>(&mut self, f: impl FnOnce(&EntityRef, &EntityRef) -> Expr) -> WeaveResult<&mut Self> {
        self.join_entity::<U>(JoinKind::Right, f)
    }

    /// INNER JOIN `V` on a condition over an already joined `U` and `V`.
    pub fn join_pair<U: Entity, V: Entity>(
        &mut self,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        self.join_pair_kind::<U, V>(JoinKind::Inner, f)
    }

    pub fn left_join_pair<U: Entity, V: Entity>(
        &mut self,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        self.join_pair_kind::<U, V>(JoinKind::Left, f)
    }

    pub fn right_join_pair<U: Entity, V: Entity>(
        &mut self,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        self.join_pair_kind::<U, V>(JoinKind::Right, f)
    }

    fn join_entity<U: Entity>(
        &mut self,
        kind: JoinKind,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        let right = EntityRef::new(self.cache.table::<U>()?);
        self.join_with(kind, self.entity.clone(), right, f)
    }

    fn join_pair_kind<U: Entity, V: Entity>(
        &mut self,
        kind: JoinKind,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        let left = EntityRef::new(self.cache.table::<U>()?);
        let right = EntityRef::new(self.cache.table::<V>()?);
        self.join_with(kind, left, right, f)
    }

    fn join_with(
        &mut self,
        kind: JoinKind,
        left: EntityRef,
        right: EntityRef,
        f: impl FnOnce(&EntityRef, &EntityRef) -> Expr,
    ) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        let on = self.compiler().predicate(f(&left, &right))?;
        let target = self.translator.selectable_table(right.table().name());
        self.parts
            .from_clause
            .push_str(&format!(" {} {} ON {}", kind.keyword(), target, on));
        Ok(self)
    }

    /// Limit the result to `n` rows.
    pub fn top(&mut self, n: u64) -> WeaveResult<&mut Self> {
        self.ensure_paging()?;
        self.translator.top(&mut self.parts, &mut self.params, n);
        Ok(self)
    }

    /// Return page `page` (1-based) of `size` rows.
    pub fn paginate(&mut self, size: u64, page: u64) -> WeaveResult<&mut Self> {
        self.ensure_paging()?;
        self.translator
            .paginate(&mut self.parts, &mut self.params, size, page);
        Ok(self)
    }

    fn ensure_paging(&mut self) -> WeaveResult<()> {
        self.ensure_open()?;
        if self.paged {
            return Err(WeaveError::PaginationConflict);
        }
        self.paged = true;
        Ok(())
    }

    /// Select `COUNT(*)` instead of the column list.
    pub fn count(&mut self) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        self.parts.select_format.count = true;
        Ok(self)
    }

    pub fn distinct(&mut self) -> WeaveResult<&mut Self> {
        self.ensure_open()?;
        self.parts.select_format.distinct = true;
        Ok(self)
    }

    /// Assemble the statement. Later calls return the same text.
    pub fn build(&mut self) -> String {
        if let Some(sql) = &self.sql {
            return sql.clone();
        }

        if self.parts.columns.trim().is_empty() {
            let table = self.entity.table();
            for field in table.fields() {
                let column = self.translator.column_ref(table.name(), &field.name);
                self.parts.push_column(&column);
            }
        }

        let sql = self.parts.assemble(self.translator.default_order_by());
        debug!(
            dialect = self.translator.name(),
            sql = %sql,
            params = self.params.len(),
            "built query"
        );
        self.sql = Some(sql.clone());
        sql
    }

    /// The built statement wrapped in the dialect's existence probe.
    pub fn exists(&mut self) -> String {
        let sql = self.build();
        self.translator.exists(&sql)
    }

    /// Build and hand over the statement with its parameters.
    pub fn into_parts(mut self) -> (String, Parameters) {
        let sql = self.build();
        (sql, self.params)
    }
}
