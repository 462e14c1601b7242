//! Shutdown task registration.

use std::fmt;

use crate::TRACING_TARGET_LIFECYCLE;

/// A task run once at process teardown.
pub type ShutdownTask = Box<dyn FnOnce() + Send + 'static>;

/// Registry of tasks to run when the process shuts down.
pub trait ShutdownHooks {
    /// Adds a task to run at shutdown.
    fn add_shutdown_task(&mut self, task: ShutdownTask);
}

/// In-process shutdown registry.
///
/// Tasks run in reverse registration order, so resources registered last
/// are released first. Each task runs at most once.
#[derive(Default)]
pub struct ShutdownTasks {
    tasks: Vec<ShutdownTask>,
}

impl ShutdownTasks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pending tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether there are no pending tasks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every pending task, most recently registered first.
    pub fn run(&mut self) {
        let count = self.tasks.len();
        tracing::debug!(target: TRACING_TARGET_LIFECYCLE, count, "Running shutdown tasks");

        while let Some(task) = self.tasks.pop() {
            task();
        }

        tracing::info!(target: TRACING_TARGET_LIFECYCLE, count, "Shutdown tasks completed");
    }
}

impl ShutdownHooks for ShutdownTasks {
    fn add_shutdown_task(&mut self, task: ShutdownTask) {
        self.tasks.push(task);
    }
}

impl fmt::Debug for ShutdownTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownTasks")
            .field("pending", &self.tasks.len())
            .finish()
    }
}
