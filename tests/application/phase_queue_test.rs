use std::sync::Arc;
use std::time::Duration;

use introeval::application::services::PhaseQueue;
use introeval::domain::JobId;

fn id(raw: &str) -> JobId {
    JobId::from_raw(raw)
}

#[test]
fn given_pushed_ids_when_popping_then_order_is_fifo() {
    let queue = PhaseQueue::new();
    queue.push(id("a"));
    queue.push(id("b"));
    queue.push(id("c"));

    assert_eq!(queue.try_pop(), Some(id("a")));
    assert_eq!(queue.try_pop(), Some(id("b")));
    assert_eq!(queue.try_pop(), Some(id("c")));
    assert_eq!(queue.try_pop(), None);
}

#[test]
fn given_waiting_ids_when_asking_position_then_it_is_one_based() {
    let queue = PhaseQueue::new();
    queue.push(id("a"));
    queue.push(id("b"));

    assert_eq!(queue.position(&id("a")), Some(1));
    assert_eq!(queue.position(&id("b")), Some(2));
    assert_eq!(queue.position(&id("z")), None);
    assert_eq!(queue.snapshot(), vec![id("a"), id("b")]);
}

#[test]
fn given_dequeued_job_when_acknowledged_then_unfinished_count_drops() {
    let queue = PhaseQueue::new();
    queue.push(id("a"));
    queue.try_pop();
    assert_eq!(queue.unfinished(), 1);
    assert!(queue.is_empty());

    queue.task_done();
    queue.task_done();
    assert_eq!(queue.unfinished(), 0);
}

#[tokio::test]
async fn given_empty_queue_when_popping_with_timeout_then_none_after_waiting() {
    let queue = PhaseQueue::new();
    let started = tokio::time::Instant::now();

    assert_eq!(queue.pop_timeout(Duration::from_millis(50)).await, None);
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn given_waiting_consumer_when_id_is_pushed_then_it_is_woken() {
    let queue = Arc::new(PhaseQueue::new());
    let producer = Arc::clone(&queue);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        producer.push(JobId::from_raw("late"));
    });

    let popped = queue.pop_timeout(Duration::from_secs(2)).await;
    assert_eq!(popped, Some(id("late")));
}
