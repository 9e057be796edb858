use crate::error::TransportError;
use crate::source::{EndpointKind, Event, ExportSource, FetchPageRequest};

/// Fetch the complete event stream of one object.
///
/// Termination is driven only by the cursor: a missing or empty cursor ends the
/// stream, whatever the size of the page that carried it.
pub async fn fetch_events(
    source: &dyn ExportSource,
    endpoint: EndpointKind,
    object_id: &str,
    page_size: usize,
) -> Result<Vec<Event>, TransportError> {
    let page_size = page_size.max(1);
    let mut events = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = source
            .fetch_page(FetchPageRequest {
                endpoint,
                object_id,
                limit: page_size,
                cursor: cursor.as_deref(),
            })
            .await?;

        tracing::debug!(
            target: "evdump.fetch",
            endpoint = %endpoint,
            object_id = %object_id,
            received = page.events.len(),
            has_more = page.next_cursor().is_some()
        );

        let next = page.next_cursor().map(str::to_string);
        events.extend(page.events);
        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::source::{EventPage, ListPageRequest, ObjectPage};

    /// Replays a fixed sequence of pages and records the cursors it was asked for.
    struct Scripted {
        pages: Mutex<VecDeque<EventPage>>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    impl Scripted {
        fn new(pages: Vec<EventPage>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                cursors: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ExportSource for Scripted {
        async fn list_page(&self, _req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError> {
            unreachable!("fetch only")
        }

        async fn fetch_page(&self, req: FetchPageRequest<'_>) -> Result<EventPage, TransportError> {
            self.cursors
                .lock()
                .unwrap()
                .push(req.cursor.map(str::to_string));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::status_error(500, "http://test", "no more pages"))
        }
    }

    fn page(ids: &[&str], cursor: Option<&str>) -> EventPage {
        EventPage {
            events: ids
                .iter()
                .map(|id| json!({ "id": id }).as_object().cloned().unwrap())
                .collect(),
            cursor: cursor.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn follows_cursor_until_absent() {
        let source = Scripted::new(vec![
            page(&["a", "b"], Some("c1")),
            page(&["c"], Some("c2")),
            page(&[], None),
        ]);
        let events = fetch_events(&source, EndpointKind::Experiment, "e1", 2)
            .await
            .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            *source.cursors.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn full_page_with_empty_cursor_is_last() {
        let source = Scripted::new(vec![page(&["a", "b"], Some(""))]);
        let events = fetch_events(&source, EndpointKind::Dataset, "d1", 2)
            .await
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(source.cursors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_events_is_empty_not_error() {
        let source = Scripted::new(vec![page(&[], None)]);
        let events = fetch_events(&source, EndpointKind::Dataset, "d1", 100)
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn failure_mid_stream_fails_the_fetch() {
        let source = Scripted::new(vec![page(&["a"], Some("c1"))]);
        let err = fetch_events(&source, EndpointKind::Experiment, "e1", 1)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
