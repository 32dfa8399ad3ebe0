//! Server-Sent Events transport for pushes

use crate::broadcast::{PushEvent, Subscription};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;

/// Convert a subscription into an SSE response. The subscriber is removed
/// when the client goes away and the stream is dropped.
#[must_use]
pub fn sse_stream(
    subscription: Subscription,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = subscription
        .into_stream()
        .map(|event| Ok(push_event_to_axum(&event)));

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn push_event_to_axum(event: &PushEvent) -> Event {
    Event::default()
        .event(event.topic().as_str())
        .data(event.payload().to_string())
}
