use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tokio::sync::oneshot;

use super::http::query_timestamp;
use super::{
    DEFAULT_TRAIL_LIMIT, DEFAULT_TRAIL_LOOKBACK, FetchOutcome, FetchPurpose, FetchSlot,
    HistoryWindow, HttpTrackSource, TrackSourcePort,
};
use crate::error::FetchError;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, future)
}

fn at(hour: u32, minute: u32) -> Result<DateTime<Utc>, String> {
    Utc.with_ymd_and_hms(2026, 2, 10, hour, minute, 0)
        .single()
        .ok_or_else(|| "invalid test timestamp".to_owned())
}

#[test]
fn newer_fetch_cancels_pending_one() -> Result<(), String> {
    run_async_test(async {
        let slot = Rc::new(FetchSlot::new(FetchPurpose::Coverage));
        let (release_first, first_response) = oneshot::channel::<u32>();

        let first_slot = Rc::clone(&slot);
        let first = tokio::task::spawn_local(async move {
            first_slot
                .run(async move { first_response.await.unwrap_or(0) })
                .await
        });
        tokio::task::yield_now().await;
        if !slot.is_pending() {
            return Err("Expected first fetch to be pending".to_owned());
        }

        let second = slot.run(async { 2_u32 }).await;
        if !matches!(second, FetchOutcome::Completed(2)) {
            return Err(format!("Unexpected second outcome {:?}", second));
        }
        drop(release_first.send(1));

        let first = first.await.map_err(|err| err.to_string())?;
        if !first.is_cancelled() {
            return Err(format!("Expected first fetch to be cancelled, got {:?}", first));
        }
        if slot.is_pending() {
            return Err("Slot should be idle after both fetches resolved".to_owned());
        }
        Ok(())
    })
}

#[test]
fn cancel_resolves_pending_fetch_silently() -> Result<(), String> {
    run_async_test(async {
        let slot = Rc::new(FetchSlot::new(FetchPurpose::Trail));
        let pending_slot = Rc::clone(&slot);
        let pending = tokio::task::spawn_local(async move {
            pending_slot
                .run(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    7_u32
                })
                .await
        });
        tokio::task::yield_now().await;

        slot.cancel();
        let outcome = tokio::time::timeout(Duration::from_secs(1), pending)
            .await
            .map_err(|err| format!("Cancelled fetch did not resolve: {}", err))?
            .map_err(|err| err.to_string())?;
        if !outcome.is_cancelled() {
            return Err(format!("Expected cancellation, got {:?}", outcome));
        }
        if slot.is_pending() {
            return Err("Slot should be idle after cancel".to_owned());
        }
        Ok(())
    })
}

#[test]
fn failures_pass_through_unchanged() -> Result<(), String> {
    run_async_test(async {
        let slot = FetchSlot::new(FetchPurpose::Coverage);
        let outcome = slot
            .run(async {
                Err::<u32, FetchError>(FetchError::Status {
                    url: "http://source/coverage".to_owned(),
                    status: 503,
                })
            })
            .await;
        match outcome {
            FetchOutcome::Completed(Err(FetchError::Status { status: 503, .. })) => Ok(()),
            other => Err(format!("Unexpected outcome {:?}", other)),
        }
    })
}

#[test]
fn trail_window_ends_at_reference_or_now() -> Result<(), String> {
    let now = at(12, 0)?;
    let live = HistoryWindow::ending_at(None, now, DEFAULT_TRAIL_LOOKBACK, DEFAULT_TRAIL_LIMIT)
        .map_err(|err| err.to_string())?;
    if live.range.until() != now || live.range.since() != at(11, 50)? {
        return Err(format!("Unexpected live window {:?}", live));
    }
    if live.limit != 2000 {
        return Err(format!("Unexpected limit {}", live.limit));
    }

    let reference = at(9, 30)?;
    let historical = HistoryWindow::ending_at(
        Some(reference),
        now,
        DEFAULT_TRAIL_LOOKBACK,
        DEFAULT_TRAIL_LIMIT,
    )
    .map_err(|err| err.to_string())?;
    if historical.range.until() != reference
        || historical.range.span() != TimeDelta::minutes(10)
    {
        return Err(format!("Unexpected historical window {:?}", historical));
    }
    Ok(())
}

#[test]
fn query_timestamps_use_millisecond_utc() -> Result<(), String> {
    let formatted = query_timestamp(at(8, 5)?);
    if formatted != "2026-02-10T08:05:00.000Z" {
        return Err(format!("Unexpected timestamp {}", formatted));
    }
    Ok(())
}

#[test]
fn http_source_normalizes_base_url() -> Result<(), String> {
    let source = HttpTrackSource::new("http://localhost:8000/api", Duration::from_secs(5))
        .map_err(|err| err.to_string())?;
    if source.base_url().as_str() != "http://localhost:8000/api/" {
        return Err(format!("Unexpected base url {}", source.base_url()));
    }
    if HttpTrackSource::new("not a url", Duration::from_secs(5)).is_ok() {
        return Err("Expected invalid base url to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn non_success_status_names_the_requested_url() -> Result<(), String> {
    use std::io::{Read, Write};

    let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
        return Ok(());
    };
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let server = std::thread::spawn(move || -> std::io::Result<()> {
        let (mut stream, _) = listener.accept()?;
        let mut buf = [0_u8; 1024];
        let _read = stream.read(&mut buf)?;
        stream.write_all(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )?;
        stream.flush()
    });

    let source = HttpTrackSource::new(&format!("http://{}", addr), Duration::from_secs(5))
        .map_err(|err| err.to_string())?;
    let result = run_async_test(async {
        match source.stats().await {
            Err(FetchError::Status { url, status: 503 }) if url.ends_with("/stats") => Ok(()),
            other => Err(format!("Unexpected stats result {:?}", other)),
        }
    });
    server
        .join()
        .map_err(|_err| "server thread panicked".to_owned())?
        .map_err(|err| err.to_string())?;
    result
}
