//! Ordering and backpressure between the converter and the worker

mod common;

use common::{test_config, CapturingLoader};
use sedump_common::types::Entity;
use sedump_convert::queue::{job_queue, CompletionEvent};
use sedump_convert::worker::PostProcessWorker;
use sedump_convert::writer::ChunkRotator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn vote_row(id: u64) -> Vec<String> {
    vec![
        id.to_string(),
        "1".to_string(),
        "2".to_string(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_worker_keeps_fifo_order_when_a_load_is_slow() {
    let dir = TempDir::new().unwrap();
    // Paused clock: the hour-long hold on chunk 1 resolves instantly
    let loader = CapturingLoader::new().delaying(1, Duration::from_secs(3600));
    let (jobs, queue) = job_queue(8);
    let handle = PostProcessWorker::new(loader.clone()).spawn(queue);

    for chunk in 1..=5 {
        let path = dir.path().join(format!("{chunk}_votes.csv"));
        std::fs::write(&path, "id\n").unwrap();
        jobs.send(CompletionEvent::new(chunk, path)).await.unwrap();
    }
    drop(jobs);

    let report = handle.wait().await.unwrap();

    assert_eq!(loader.seen_chunks(), vec![1, 2, 3, 4, 5]);
    assert_eq!(report.loaded.len(), 5);
}

#[test]
fn test_full_queue_stalls_chunk_rotation() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), 1);
    let (jobs, mut queue) = job_queue(2);
    let pushed = Arc::new(AtomicU64::new(0));

    let producer = {
        let pushed = Arc::clone(&pushed);
        let mut rotator = ChunkRotator::new(Entity::Votes, "votes", &config, jobs);
        std::thread::spawn(move || {
            rotator.start().unwrap();
            for id in 1..=6 {
                rotator.push(vote_row(id)).unwrap();
                pushed.fetch_add(1, Ordering::SeqCst);
            }
            rotator.finish().unwrap()
        })
    };

    // Chunks 1 and 2 fill the queue; sealing chunk 3 parks the producer
    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(pushed.load(Ordering::SeqCst), 2);
    assert!(!dir.path().join("4_votes.csv").exists());

    // Draining one event lets exactly one more chunk through
    assert_eq!(queue.blocking_recv().unwrap().chunk, 1);
    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(pushed.load(Ordering::SeqCst), 3);

    let mut rest = Vec::new();
    while let Some(event) = queue.blocking_recv() {
        rest.push(event.chunk);
    }
    assert_eq!(rest, vec![2, 3, 4, 5, 6]);
    assert_eq!(producer.join().unwrap(), 6);
}
