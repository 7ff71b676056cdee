use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use tracing::debug;

/// A unit of work bound to a single request.
///
/// Every repository call opens one with [`ScopedSession::begin`], runs its
/// statements against [`ScopedSession::conn`] and finishes with
/// [`ScopedSession::commit`]. A session that is dropped without being
/// committed (early return through `?`, a panic, a cancelled request) rolls
/// back, so nothing half-done ever becomes visible and the pooled connection
/// always goes back to the pool.
pub struct ScopedSession {
    txn: DatabaseTransaction,
}

impl ScopedSession {
    pub async fn begin<C>(db: &C) -> Result<Self, DbErr>
    where
        C: TransactionTrait<Transaction = DatabaseTransaction>,
    {
        let txn = db.begin().await?;
        debug!("Session opened");
        Ok(Self { txn })
    }

    /// Connection to run statements on; all of them share the session's transaction.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await?;
        debug!("Session committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseBackend, MockDatabase, MockExecResult, Statement, Transaction};

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    fn stmt(sql: &str) -> Statement {
        Statement::from_string(DatabaseBackend::Postgres, sql.to_owned())
    }

    #[tokio::test]
    async fn test_commit_wraps_statements_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok()])
            .into_connection();

        let session = ScopedSession::begin(&db).await.unwrap();
        session
            .conn()
            .execute_raw(stmt("DELETE FROM items WHERE id = 1"))
            .await
            .unwrap();
        session.commit().await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::many([
                stmt("BEGIN"),
                stmt("DELETE FROM items WHERE id = 1"),
                stmt("COMMIT"),
            ])]
        );
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok()])
            .into_connection();

        let session = ScopedSession::begin(&db).await.unwrap();
        session
            .conn()
            .execute_raw(stmt("DELETE FROM items WHERE id = 1"))
            .await
            .unwrap();
        drop(session);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::many([
                stmt("BEGIN"),
                stmt("DELETE FROM items WHERE id = 1"),
                stmt("ROLLBACK"),
            ])]
        );
    }
}
