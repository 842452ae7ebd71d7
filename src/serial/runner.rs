//! The serial task runner.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A type-erased task for heterogeneous task lists.
///
/// Any zero-argument async closure can be boxed into this shape:
///
/// ```rust
/// use steadfast::serial::BoxedTask;
///
/// let task: BoxedTask<u32, std::io::Error> = Box::new(|| Box::pin(async { Ok(1) }));
/// ```
pub type BoxedTask<T, E> =
    Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> + Send>;

/// An ordered list of async tasks plus the policy and hooks for running them
/// one at a time.
///
/// Hooks observe task outcomes; they never alter them. Each hook receives the
/// task's index in the list. After a task settles, the outcome-specific hook
/// (`on_task_resolve` or `on_task_reject`) runs first, then `on_task_finish`,
/// and only then does the next task start.
///
/// # Examples
///
/// ```rust
/// use steadfast::serial::{BoxedTask, SerialExecution};
///
/// # async fn example() {
/// let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
///     Box::new(|| Box::pin(async { Ok(1) })),
///     Box::new(|| Box::pin(async { Ok(2) })),
/// ];
///
/// let values = SerialExecution::new(tasks)
///     .always_resolve(true)
///     .on_task_reject(|error, index| eprintln!("task {index} failed: {error}"))
///     .run()
///     .await
///     .unwrap();
/// assert_eq!(values, vec![1, 2]);
/// # }
/// ```
pub struct SerialExecution<F, T, E> {
    task_list: Vec<F>,
    always_resolve: bool,
    on_task_resolve: Option<Box<dyn FnMut(&T, usize) + Send>>,
    on_task_reject: Option<Box<dyn FnMut(&E, usize) + Send>>,
    on_task_finish: Option<Box<dyn FnMut(bool, usize) + Send>>,
}

impl<F, T, E> SerialExecution<F, T, E> {
    /// Create an execution over the given ordered task list.
    ///
    /// Defaults: failures abort the run, no hooks installed.
    ///
    /// The task bound is stated here, not just on [`run_serially`], so that
    /// `T` and `E` are pinned down as soon as the list is supplied and hook
    /// closures can leave their argument types unannotated.
    pub fn new<Fut>(task_list: Vec<F>) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        Self {
            task_list,
            always_resolve: false,
            on_task_resolve: None,
            on_task_reject: None,
            on_task_finish: None,
        }
    }

    /// Keep running (and resolve) even when individual tasks fail.
    ///
    /// A failed task contributes no entry to the result, so the result can be
    /// shorter than the task list. Default: `false`.
    pub fn always_resolve(mut self, always_resolve: bool) -> Self {
        self.always_resolve = always_resolve;
        self
    }

    /// Install a hook called with a task's value and index after it succeeds.
    pub fn on_task_resolve(mut self, hook: impl FnMut(&T, usize) + Send + 'static) -> Self {
        self.on_task_resolve = Some(Box::new(hook));
        self
    }

    /// Install a hook called with a task's error and index after it fails.
    pub fn on_task_reject(mut self, hook: impl FnMut(&E, usize) + Send + 'static) -> Self {
        self.on_task_reject = Some(Box::new(hook));
        self
    }

    /// Install a hook called after every task settles, either way.
    ///
    /// Receives `true` for success, `false` for failure, plus the index. Runs
    /// after the outcome-specific hook.
    pub fn on_task_finish(mut self, hook: impl FnMut(bool, usize) + Send + 'static) -> Self {
        self.on_task_finish = Some(Box::new(hook));
        self
    }

    /// Execute the list one task at a time.
    ///
    /// Method-style counterpart of [`run_serially`].
    pub async fn run<Fut>(self) -> Result<Vec<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        run_serially(self).await
    }
}

impl<F, T, E> fmt::Debug for SerialExecution<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialExecution")
            .field("tasks", &self.task_list.len())
            .field("always_resolve", &self.always_resolve)
            .finish_non_exhaustive()
    }
}

/// Execute an ordered task list strictly one task at a time.
///
/// Task `i + 1` starts only after task `i` has settled and its hooks have
/// run. An empty list resolves immediately with an empty vector and invokes
/// no hooks.
///
/// On success the task's value is appended to the result, preserving task
/// order. On failure:
///
/// - with `always_resolve` unset, the whole run fails with that task's error;
///   values accumulated so far are discarded and later tasks never start;
/// - with `always_resolve` set, the failure is swallowed, that index
///   contributes no entry, and the run continues.
///
/// Hooks that panic are caller defects; the panic propagates out of the run.
///
/// # Examples
///
/// ```rust
/// use steadfast::serial::{BoxedTask, SerialExecution, run_serially};
///
/// # async fn example() {
/// let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
///     Box::new(|| Box::pin(async { Ok(1) })),
///     Box::new(|| Box::pin(async { Err(std::io::Error::other("boom")) })),
///     Box::new(|| Box::pin(async { Ok(3) })),
/// ];
/// let execution = SerialExecution::new(tasks).always_resolve(true);
///
/// // The failed slot is compacted away, not left as a gap.
/// assert_eq!(run_serially(execution).await.unwrap(), vec![1, 3]);
/// # }
/// ```
pub async fn run_serially<F, Fut, T, E>(execution: SerialExecution<F, T, E>) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let SerialExecution {
        task_list,
        always_resolve,
        mut on_task_resolve,
        mut on_task_reject,
        mut on_task_finish,
    } = execution;

    let mut results = Vec::with_capacity(task_list.len());
    for (index, task) in task_list.into_iter().enumerate() {
        match task().await {
            Ok(value) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(index, "task resolved");
                if let Some(hook) = on_task_resolve.as_mut() {
                    hook(&value, index);
                }
                if let Some(hook) = on_task_finish.as_mut() {
                    hook(true, index);
                }
                results.push(value);
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(index, tolerated = always_resolve, "task rejected");
                if let Some(hook) = on_task_reject.as_mut() {
                    hook(&error, index);
                }
                if let Some(hook) = on_task_finish.as_mut() {
                    hook(false, index);
                }
                if !always_resolve {
                    return Err(error);
                }
            }
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    type Events = Arc<Mutex<Vec<String>>>;

    fn record(events: &Events, entry: impl Into<String>) {
        events.lock().unwrap().push(entry.into());
    }

    #[tokio::test]
    async fn runs_tasks_in_order_and_collects_values() {
        let events: Events = Arc::default();
        let (e1, e2, e3) = (events.clone(), events.clone(), events.clone());

        let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
            Box::new(move || {
                Box::pin(async move {
                    record(&e1, "a");
                    Ok(1)
                })
            }),
            Box::new(move || {
                Box::pin(async move {
                    record(&e2, "b");
                    Ok(2)
                })
            }),
            Box::new(move || {
                Box::pin(async move {
                    record(&e3, "c");
                    Ok(3)
                })
            }),
        ];

        let values = run_serially(SerialExecution::new(tasks)).await.unwrap();

        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(*events.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn failure_aborts_and_discards_partial_results() {
        let started_c = Arc::new(AtomicU32::new(0));
        let c_counter = Arc::clone(&started_c);
        let events: Events = Arc::default();
        let (reject_log, finish_log) = (events.clone(), events.clone());

        let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
            Box::new(|| Box::pin(async { Ok(1) })),
            Box::new(|| Box::pin(async { Err(std::io::Error::other("b failed")) })),
            Box::new(move || {
                c_counter.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Ok(3) })
            }),
        ];

        let result = run_serially(
            SerialExecution::new(tasks)
                .on_task_reject(move |error, index| {
                    record(&reject_log, format!("reject {index}: {error}"));
                })
                .on_task_finish(move |resolved, index| {
                    record(&finish_log, format!("finish {index}: {resolved}"));
                }),
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "b failed");
        assert_eq!(started_c.load(Ordering::SeqCst), 0, "c must never start");
        assert_eq!(
            *events.lock().unwrap(),
            vec!["finish 0: true", "reject 1: b failed", "finish 1: false"]
        );
    }

    #[tokio::test]
    async fn reject_hook_argument_types_infer_from_the_task_list() {
        // Method calls on the hook arguments need `T`/`E` resolved as soon as
        // the hook is installed; the `new` bound pins them from the list.
        let messages: Events = Arc::default();
        let log = messages.clone();

        let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![Box::new(|| {
            Box::pin(async { Err(std::io::Error::other("no route")) })
        })];

        let result = run_serially(
            SerialExecution::new(tasks)
                .always_resolve(true)
                .on_task_reject(move |error, _| record(&log, error.to_string())),
        )
        .await;

        assert!(result.unwrap().is_empty());
        assert_eq!(*messages.lock().unwrap(), vec!["no route"]);
    }

    #[tokio::test]
    async fn always_resolve_compacts_failed_slots() {
        let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
            Box::new(|| Box::pin(async { Ok(1) })),
            Box::new(|| Box::pin(async { Err(std::io::Error::other("b failed")) })),
            Box::new(|| Box::pin(async { Ok(3) })),
        ];

        let values = run_serially(SerialExecution::new(tasks).always_resolve(true))
            .await
            .unwrap();

        // Length 2, not 3: the failed index contributes no entry.
        assert_eq!(values, vec![1, 3]);
    }

    #[tokio::test]
    async fn empty_list_resolves_immediately_without_hooks() {
        let hook_calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&hook_calls);

        let tasks: Vec<BoxedTask<u32, std::io::Error>> = Vec::new();
        let values = run_serially(SerialExecution::new(tasks).on_task_finish(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .await
        .unwrap();

        assert!(values.is_empty());
        assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn resolve_hook_runs_before_finish_hook() {
        let events: Events = Arc::default();
        let (resolve_log, finish_log) = (events.clone(), events.clone());

        let values = run_serially(
            SerialExecution::new(vec![|| async { Ok::<_, std::io::Error>(10) }])
                .on_task_resolve(move |value, index| {
                    record(&resolve_log, format!("resolve {index}: {value}"));
                })
                .on_task_finish(move |resolved, index| {
                    record(&finish_log, format!("finish {index}: {resolved}"));
                }),
        )
        .await
        .unwrap();

        assert_eq!(values, vec![10]);
        assert_eq!(
            *events.lock().unwrap(),
            vec!["resolve 0: 10", "finish 0: true"]
        );
    }

    #[tokio::test]
    async fn next_task_starts_only_after_previous_hooks_ran() {
        let events: Events = Arc::default();
        let (finish_log, t1, t2) = (events.clone(), events.clone(), events.clone());

        let tasks: Vec<BoxedTask<&'static str, std::io::Error>> = vec![
            Box::new(move || {
                record(&t1, "start a");
                Box::pin(async { Ok("a") })
            }),
            Box::new(move || {
                record(&t2, "start b");
                Box::pin(async { Ok("b") })
            }),
        ];

        run_serially(SerialExecution::new(tasks).on_task_finish(move |_, index| {
            record(&finish_log, format!("finish {index}"));
        }))
        .await
        .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["start a", "finish 0", "start b", "finish 1"]
        );
    }
}
