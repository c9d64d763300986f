// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use workout_finder_model::{Category, DatasetLayout, Workout, WorkoutId};
use workout_finder_store::{MemoryShardStore, ShardReader};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn unreadable_shard_warning_is_structured_json() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    let layout = DatasetLayout::new(1, 2).expect("layout");
    let store = MemoryShardStore::from_records(
        layout,
        vec![Workout::new(
            WorkoutId::parse("w-0").expect("id"),
            "Workout 1",
            "",
            "2025-05-01T00:00:00.000Z",
            Category::parse("c1").expect("category"),
        )],
    )
    .with_unreadable(2);
    let reader = ShardReader::new(Arc::new(store));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let records = tracing::subscriber::with_default(subscriber, || {
        let span = tracing::info_span!(
            "http.request",
            request_id = "req-123",
            method = "GET",
            route = "/api/workouts",
        );
        let _entered = span.enter();
        runtime.block_on(reader.read_shard(2))
    });
    assert!(records.is_empty());
    assert_eq!(reader.diagnostics().failures(), 1);

    let bytes = sink.0.lock().expect("lock output").clone();
    let text = String::from_utf8(bytes).expect("utf8 log output");
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .expect("log line");
    let parsed: serde_json::Value = serde_json::from_str(line).expect("json log line");

    assert_eq!(parsed.get("level").and_then(|v| v.as_str()), Some("WARN"));
    let fields = parsed.get("fields").expect("fields object");
    assert_eq!(fields.get("shard").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(fields.get("backend").and_then(|v| v.as_str()), Some("memory"));
    assert_eq!(fields.get("code").and_then(|v| v.as_str()), Some("decode_error"));
    assert!(fields
        .get("error")
        .and_then(|v| v.as_str())
        .is_some_and(|e| e.contains("marked unreadable")));
    assert_eq!(
        fields.get("message").and_then(|v| v.as_str()),
        Some("shard unreadable; treating as empty")
    );
    let span = parsed.get("span").expect("current span");
    assert_eq!(
        span.get("request_id").and_then(|v| v.as_str()),
        Some("req-123")
    );
}
