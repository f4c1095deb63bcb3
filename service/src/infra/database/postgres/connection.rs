//! [`Connection`] definitions.

use std::{fmt, future::Future};

use deadpool_postgres::GenericClient;
use futures::{FutureExt as _, TryFutureExt as _};
use ouroboros::self_referencing;
use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

pub use deadpool_postgres::{
    Client as Pooled, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Parameters of a SQL statement.
pub type Params<'a> = &'a [&'a (dyn ToSql + Sync)];

/// Generic database connection.
pub trait Connection {
    /// Queries the provided SQL statement with the given parameters and
    /// returns the first resulting row, if any.
    ///
    /// # Errors
    ///
    /// If failed to query the statement, or it returned more than one row.
    fn query_opt(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>;

    /// Executes the provided SQL statement with the given parameters and
    /// returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// If failed to execute the statement.
    fn exec(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>;
}

/// Transaction holding its [`Pooled`] connection.
#[self_referencing]
pub struct Tx {
    /// [`Pooled`] connection the transaction was started in.
    conn: Pooled,

    /// Transaction started in the [`Pooled`] connection, until committed.
    #[borrows(mut conn)]
    #[not_covariant]
    tx: Option<deadpool_postgres::Transaction<'this>>,
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tx")
            .field("committed", &self.with_tx(|tx| tx.is_none()))
            .finish_non_exhaustive()
    }
}

impl Tx {
    /// Begins a new [`Tx`] in the provided [`Pooled`] connection.
    ///
    /// # Errors
    ///
    /// If failed to begin a transaction.
    pub async fn begin(conn: Pooled) -> Result<Self, Traced<database::Error>> {
        Self::try_new_async_send(conn, |c| c.transaction().map_ok(Some).boxed())
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    /// Commits this [`Tx`].
    ///
    /// Committing an already committed [`Tx`] does nothing.
    ///
    /// # Errors
    ///
    /// If failed to commit this [`Tx`].
    pub async fn commit(mut self) -> Result<(), Traced<database::Error>> {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "different variance, see \
                      https://doc.rust-lang.org/nomicon/subtyping.html#variance"
        )]
        let Some(tx) = self.with_tx_mut(|tx| tx.take()) else {
            return Ok(());
        };
        tx.commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    /// Returns the underlying [`Transaction`] of this [`Tx`].
    ///
    /// [`Transaction`]: deadpool_postgres::Transaction
    fn tx(&self) -> &deadpool_postgres::Transaction<'_> {
        self.with_tx(|tx| tx.as_ref().expect("committed `Tx` is consumed"))
    }
}

/// Queries the first row of the provided SQL statement in the provided
/// [`GenericClient`].
async fn query_opt_in(
    client: &impl GenericClient,
    sql: &str,
    params: Params<'_>,
) -> Result<Option<Row>, Traced<database::Error>> {
    client
        .query_opt(sql, params)
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
}

/// Executes the provided SQL statement in the provided [`GenericClient`].
async fn exec_in(
    client: &impl GenericClient,
    sql: &str,
    params: Params<'_>,
) -> Result<u64, Traced<database::Error>> {
    client
        .execute(sql, params)
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
}

impl Connection for Pooled {
    async fn query_opt(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        query_opt_in(self, sql, params).await
    }

    async fn exec(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        exec_in(self, sql, params).await
    }
}

impl Connection for Tx {
    async fn query_opt(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        query_opt_in(self.tx(), sql, params).await
    }

    async fn exec(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        exec_in(self.tx(), sql, params).await
    }
}
