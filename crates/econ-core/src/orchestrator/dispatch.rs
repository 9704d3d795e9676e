//! Bounded concurrent dispatch of one round's cohort.

use econ_events::WorldState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::invoke::{AgentInvoker, InvocationResult};

/// Invoke every agent in `cohort` (roster indices) with at most
/// `concurrency` calls in flight.
///
/// Returns one result per cohort slot, in cohort order. Timeouts and
/// panicking invocations come back as failed results; nothing here mutates
/// the world.
pub async fn dispatch_cohort(
    invoker: Arc<dyn AgentInvoker>,
    world: &WorldState,
    cohort: &[usize],
    concurrency: usize,
    timeout: Duration,
) -> Vec<InvocationResult> {
    let snapshot = Arc::new(world.clone());
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let handles: Vec<_> = cohort
        .iter()
        .map(|&idx| {
            let agent = world.agents[idx].clone();
            let snapshot = Arc::clone(&snapshot);
            let semaphore = Arc::clone(&semaphore);
            let invoker = Arc::clone(&invoker);
            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return InvocationResult::failed("dispatch pool closed");
                };
                tracing::debug!(agent = %agent.name, "Invoking");
                match tokio::time::timeout(timeout, invoker.invoke(&agent, &snapshot, timeout)).await {
                    Ok(result) => result,
                    Err(_) => InvocationResult::failed(format!("timed out after {:?}", timeout)),
                }
            })
        })
        .collect();

    let mut slots = Vec::with_capacity(handles.len());
    for handle in handles {
        slots.push(match handle.await {
            Ok(result) => result,
            Err(e) => InvocationResult::failed(format!("invocation task failed: {}", e)),
        });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use econ_events::{Agent, Invoker};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sleeps a per-agent amount and tracks peak parallelism
    #[derive(Debug, Default)]
    struct Sleepy {
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl AgentInvoker for Sleepy {
        fn name(&self) -> &str {
            "sleepy"
        }

        async fn invoke(&self, agent: &Agent, _world: &WorldState, _timeout: Duration) -> InvocationResult {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            match agent.name.as_str() {
                "Panics" => panic!("invoker blew up"),
                "Hangs" => tokio::time::sleep(Duration::from_secs(30)).await,
                // later slots finish first
                _ => tokio::time::sleep(Duration::from_millis(100 - agent.energy * 10)).await,
            }
            self.running.fetch_sub(1, Ordering::SeqCst);
            InvocationResult::from_output(format!("I am {}", agent.name))
        }
    }

    fn world(names: &[&str]) -> WorldState {
        WorldState::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Agent::new(format!("agent-{}", i), *n, i as u64, Invoker::Claude))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_results_follow_cohort_order() {
        let world = world(&["A", "B", "C", "D", "E"]);
        let cohort = vec![3, 0, 4, 1, 2];
        let results = dispatch_cohort(Arc::new(Sleepy::default()), &world, &cohort, 5, Duration::from_secs(5)).await;

        let outputs: Vec<_> = results.iter().map(|r| r.raw_output.as_str()).collect();
        assert_eq!(outputs, vec!["I am D", "I am A", "I am E", "I am B", "I am C"]);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let world = world(&["A", "B", "C", "D", "E", "F"]);
        let invoker = Arc::new(Sleepy::default());
        dispatch_cohort(invoker.clone(), &world, &[0, 1, 2, 3, 4, 5], 2, Duration::from_secs(5)).await;
        assert!(invoker.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_panic_and_timeout_become_failures() {
        let world = world(&["A", "Panics", "Hangs"]);
        let results =
            dispatch_cohort(Arc::new(Sleepy::default()), &world, &[0, 1, 2], 3, Duration::from_millis(300)).await;

        assert!(!results[0].is_failure());
        assert!(results[1].raw_output.starts_with("ERROR: invocation task failed"));
        assert!(results[2].raw_output.starts_with("ERROR: timed out"));
        assert_eq!(results[1].transfer, None);
        assert_eq!(results[2].transfer, None);
    }
}
