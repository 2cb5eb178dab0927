fn main() {
    println!("Run `cargo test -p pipeline-tests` to execute the pipeline scenarios.");
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use ceti_clipboard::{ClipboardError, ClipboardProvider, ClipboardTailer};
    use ceti_journal::JournalTailer;
    use ceti_lookup::{
        DEFAULT_TIMEOUT, EdastroClient, EdsmClient, LookupClient, SpanshLink, http_client,
    };
    use ceti_model::{CombinedResolution, SystemEvent, Verdict};
    use ceti_resolver::{DisplaySink, Orchestrator};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    /// Starts a mock HTTP server answering every request with the same
    /// response after `delay`. Returns the base URL and a hit counter.
    async fn mock_server(
        status: u16,
        body: &'static str,
        delay: Duration,
    ) -> (String, Arc<Mutex<usize>>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(0usize));
        let hits2 = Arc::clone(&hits);

        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                *hits2.lock().unwrap() += 1;
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let _ = stream.read(&mut buf).await;
                    tokio::time::sleep(delay).await;
                    let resp = format!(
                        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(resp.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (url, hits, handle)
    }

    #[derive(Default)]
    struct RecordingSink {
        loading: Mutex<Vec<bool>>,
        delivered: Mutex<Vec<CombinedResolution>>,
    }

    impl DisplaySink for RecordingSink {
        fn set_loading(&self, loading: bool) {
            self.loading.lock().unwrap().push(loading);
        }

        fn deliver(&self, resolution: CombinedResolution) {
            self.delivered.lock().unwrap().push(resolution);
        }
    }

    fn append(path: &Path, line: &str) {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .unwrap();
        writeln!(file, "{line}").unwrap();
    }

    fn real_clients(edsm_base: &str, edastro_base: &str) -> Vec<Box<dyn LookupClient>> {
        let http = http_client(DEFAULT_TIMEOUT).unwrap();
        vec![
            Box::new(EdsmClient::new(http.clone()).with_base_url(edsm_base)),
            Box::new(EdastroClient::new(http).with_base_url(edastro_base)),
            Box::new(SpanshLink),
        ]
    }

    #[tokio::test]
    async fn journal_target_resolves_against_sources() {
        let (edsm_url, edsm_hits, edsm) =
            mock_server(200, r#"[{"id":27,"name":"Sol"}]"#, Duration::from_millis(40)).await;
        let (edastro_url, edastro_hits, edastro) =
            mock_server(404, r#"{"error":"not found"}"#, Duration::ZERO).await;

        let tmp = tempfile::tempdir().unwrap();
        let journal = tmp.path().join("Journal.2026-10-19T120000.01.log");
        append(&journal, r#"{"event":"Fileheader","part":1}"#);

        let tailer = JournalTailer::new(tmp.path().to_path_buf())
            .with_poll_interval(Duration::from_millis(20));
        let (tx, mut rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(tailer.run(tx, cancel.clone()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        append(
            &journal,
            r#"{"timestamp":"2026-10-19T12:01:00Z","event":"FSDTarget","Name":"Sol","SystemAddress":10477373803,"RemainingJumpsInRoute":1}"#,
        );

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let (name, address) = match event {
            SystemEvent::Targeted { name, address } => (name, address),
            other => panic!("expected a target event, got {other:?}"),
        };
        assert_eq!(name, "Sol");
        assert_eq!(address, Some(10477373803));

        let sink = Arc::new(RecordingSink::default());
        let mut orchestrator = Orchestrator::new(
            real_clients(&edsm_url, &edastro_url),
            Arc::clone(&sink) as Arc<dyn DisplaySink>,
        );
        let resolution = orchestrator.resolve(&name, address).await.unwrap();

        assert!(resolution.overall_visited);
        let edsm_result = resolution.result("edsm").unwrap();
        assert_eq!(edsm_result.verdict, Verdict::Visited);
        assert_eq!(edsm_result.reference_id, Some(27));
        assert_eq!(edsm_result.status, Some(200));

        let edastro_result = resolution.result("edastro").unwrap();
        assert_eq!(edastro_result.verdict, Verdict::NotVisited);
        assert_eq!(edastro_result.status, Some(404));
        assert!(edastro_result.url.is_some());

        let spansh_result = resolution.result("spansh").unwrap();
        assert_eq!(
            spansh_result.url.as_deref(),
            Some("https://spansh.co.uk/system/10477373803")
        );

        let timing = resolution.timing.as_ref().unwrap();
        assert_eq!(timing.primary_source, "edsm");
        assert!(timing.primary_visited);
        assert_eq!(timing.primary_elapsed_ms, edsm_result.elapsed_ms);
        assert!(timing.primary_elapsed_ms >= 40);

        assert_eq!(*sink.loading.lock().unwrap(), [true, false]);
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);

        // Same system again: no network traffic.
        assert!(orchestrator.resolve("Sol ", address).await.is_none());
        assert_eq!(*edsm_hits.lock().unwrap(), 1);
        assert_eq!(*edastro_hits.lock().unwrap(), 1);
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);

        cancel.cancel();
        task.await.unwrap();
        edsm.abort();
        edastro.abort();
    }

    #[tokio::test]
    async fn unreachable_sources_still_deliver() {
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let sink = Arc::new(RecordingSink::default());
        let mut orchestrator = Orchestrator::new(
            real_clients(&closed, &closed),
            Arc::clone(&sink) as Arc<dyn DisplaySink>,
        );
        let resolution = orchestrator.resolve("Sol", None).await.unwrap();

        assert!(!resolution.overall_visited);
        assert_eq!(resolution.result("edsm").unwrap().verdict, Verdict::Unknown);
        assert_eq!(resolution.result("edastro").unwrap().status, Some(0));
        assert!(resolution.result("spansh").unwrap().url.is_none());
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);
    }

    struct FixedClipboard(&'static str);

    impl ClipboardProvider for FixedClipboard {
        fn read(&mut self) -> Result<String, ClipboardError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn invalid_clipboard_text_never_reaches_resolver() {
        let tailer = ClipboardTailer::new(FixedClipboard("Not@Valid!!"))
            .unwrap()
            .with_poll_interval(Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(tailer.run(tx, cancel.clone()));

        let received = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(received.is_err(), "unexpected event: {received:?}");

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn events_arrive_in_file_order_across_rotation() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("Journal.1.log");
        append(&first, r#"{"event":"Fileheader"}"#);
        let old = std::fs::File::options().write(true).open(&first).unwrap();
        old.set_modified(std::time::SystemTime::now() - Duration::from_secs(120))
            .unwrap();
        drop(old);

        let tailer = JournalTailer::new(tmp.path().to_path_buf())
            .with_poll_interval(Duration::from_millis(20));
        let (tx, mut rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(tailer.run(tx, cancel.clone()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        append(&first, r#"{"event":"FSDTarget","Name":"Alpha"}"#);
        append(&first, r#"{"event":"Music","MusicTrack":"GalaxyMap"}"#);
        append(&first, r#"{"event":"FSDTarget","Name":"Beta"}"#);

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(event);
        }
        assert_eq!(
            seen,
            [
                SystemEvent::targeted("Alpha", None),
                SystemEvent::MapOpened,
                SystemEvent::targeted("Beta", None),
            ]
        );

        // New session file: pre-existing content is not replayed.
        let staged = tmp.path().join("staged.tmp");
        append(&staged, r#"{"event":"FSDTarget","Name":"Replayed"}"#);
        let second = tmp.path().join("Journal.2.log");
        std::fs::rename(&staged, &second).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        append(&second, r#"{"event":"FSDTarget","Name":"Gamma"}"#);

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, SystemEvent::targeted("Gamma", None));

        cancel.cancel();
        task.await.unwrap();
    }
}
