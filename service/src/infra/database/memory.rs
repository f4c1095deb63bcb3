//! In-memory [`Database`] used in tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{lead, Lead},
    infra::{database, Database},
};

/// In-memory [`Database`] storing [`Lead`]s.
///
/// Transactions are not isolated: every write is visible immediately.
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory {
    /// Stored [`Lead`]s.
    leads: Arc<Mutex<HashMap<lead::Id, Lead>>>,
}

impl Memory {
    /// Returns the stored [`Lead`] with the provided ID, if any.
    pub(crate) fn lead(&self, id: lead::Id) -> Option<Lead> {
        self.leads.lock().unwrap().get(&id).cloned()
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Lead>, lead::Id>>> for Memory {
    type Ok = Option<Lead>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lead>, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.lead(by.into_inner()))
    }
}

impl Database<Insert<Lead>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(lead)).await
    }
}

impl Database<Update<Lead>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lead): Update<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.leads.lock().unwrap().insert(lead.id, lead));
        Ok(())
    }
}

impl Database<Lock<By<Lead, lead::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Lead, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}
