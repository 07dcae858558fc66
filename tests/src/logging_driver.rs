use parking_lot::Mutex;
use sofa_core::{
    driver::{Driver, Operation, Response},
    Result,
};
use std::sync::Arc;

/// A driver wrapper that logs all operations for testing purposes
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Response,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

impl Driver for LoggingDriver {
    fn exec(&self, operation: Operation) -> Result<Response> {
        let response = self.inner.exec(operation.clone())?;

        self.ops_log.lock().push(DriverOp {
            operation,
            response: response.clone(),
        });

        Ok(response)
    }

    fn reset(&self) -> Result<()> {
        self.ops_log.lock().clear();
        self.inner.reset()
    }
}
