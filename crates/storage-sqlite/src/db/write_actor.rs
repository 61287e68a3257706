use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use std::sync::Arc;
use synckaro_core::errors::{Error, Result};
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type BoxedAny = Box<dyn Any + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // The boxed `Any` erases the job's return type; `exec` downcasts it back.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(Job<BoxedAny>, oneshot::Sender<Result<BoxedAny>>)>,
}

fn writer_gone(detail: &str) -> Error {
    StorageError::WriterUnavailable(detail.to_string()).into()
}

impl WriteHandle {
    /// Executes `job` inside an immediate transaction on the writer's
    /// dedicated connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as BoxedAny)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("the writer stopped accepting jobs"))?;

        ret_rx
            .await
            .map_err(|_| writer_gone("the writer dropped the reply"))?
            .and_then(|boxed| {
                boxed
                    .downcast::<T>()
                    .map(|v| *v)
                    .map_err(|_| writer_gone("unexpected job result type"))
            })
    }
}

/// Spawns the single writer task. It holds one pooled connection for its
/// whole life and runs jobs one at a time.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job<BoxedAny>, oneshot::Sender<Result<BoxedAny>>)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not get a database connection: {}", e);
                // Dropping `rx` fails every pending and future `exec`.
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<BoxedAny> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
