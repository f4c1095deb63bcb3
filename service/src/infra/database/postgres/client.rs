//! Postgres database client definitions.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{
        self,
        connection::{self, Params},
        Connection,
    },
};

/// Non-transactional Postgres database client.
///
/// Every operation is run in a separate [`connection::Pooled`] connection.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to retrieve connections from.
    pub(crate) pool: connection::Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn new(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Retrieves a [`connection::Pooled`] connection from the pool.
    pub(crate) async fn connection(
        &self,
    ) -> Result<connection::Pooled, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl Connection for NonTx {
    async fn query_opt(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .exec(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Transactional Postgres database client.
///
/// Clones share the same transaction. Dropping all of them without
/// [`Tx::commit()`] rolls the transaction back.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Started [`connection::Tx`], until committed.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Begins a new [`Tx`] in a connection of the provided [`NonTx`] client.
    ///
    /// # Errors
    ///
    /// If failed to retrieve a connection or to begin a transaction in it.
    pub async fn begin(client: &NonTx) -> Result<Self, Traced<database::Error>> {
        let conn = client.connection().await.map_err(tracerr::wrap!())?;
        let tx = connection::Tx::begin(conn)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            tx: Arc::new(RwLock::new(Some(tx))),
        })
    }

    /// Commits this [`Tx`] client.
    ///
    /// Operations issued after the commit fail.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl Connection for Tx {
    async fn query_opt(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        let tx = self.tx.read().await;
        let tx = tx
            .as_ref()
            .ok_or(postgres::Error::Committed)
            .map_err(tracerr::from_and_wrap!())?;
        tx.query_opt(sql, params).await.map_err(tracerr::wrap!())
    }

    async fn exec(
        &self,
        sql: &str,
        params: Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        let tx = self.tx.read().await;
        let tx = tx
            .as_ref()
            .ok_or(postgres::Error::Committed)
            .map_err(tracerr::from_and_wrap!())?;
        tx.exec(sql, params).await.map_err(tracerr::wrap!())
    }
}
