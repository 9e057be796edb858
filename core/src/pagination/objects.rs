use crate::error::TransportError;
use crate::source::{ApiObject, EndpointKind, ExportSource, ListPageRequest, ProjectFilter};

/// List every object of `endpoint` belonging to the filtered project.
///
/// Pages are requested with `limit = page_size`; from the second page onward
/// `starting_after` is the id of the last object seen. A page shorter than
/// `page_size` (including an empty one) ends the listing. The server offers no
/// separate "has more" flag, so a short page that is not actually the last one
/// would end the listing early.
pub async fn list_objects(
    source: &dyn ExportSource,
    endpoint: EndpointKind,
    filter: Option<&ProjectFilter>,
    page_size: usize,
) -> Result<Vec<ApiObject>, TransportError> {
    let page_size = page_size.max(1);
    let mut all = Vec::new();
    let mut starting_after: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source
            .list_page(ListPageRequest {
                endpoint,
                filter,
                limit: page_size,
                starting_after: starting_after.as_deref(),
            })
            .await?;
        pages += 1;

        let received = page.objects.len();
        tracing::debug!(
            target: "evdump.list",
            endpoint = %endpoint,
            page = pages,
            received = received,
            starting_after = starting_after.as_deref().unwrap_or("")
        );

        let last_id = page.objects.last().map(|o| o.id.clone());
        all.extend(page.objects);

        if received < page_size {
            if received > 0 {
                tracing::debug!(
                    target: "evdump.list",
                    endpoint = %endpoint,
                    received = received,
                    page_size = page_size,
                    "short page treated as the last page"
                );
            }
            break;
        }
        starting_after = last_id;
    }

    tracing::info!(
        target: "evdump.list",
        endpoint = %endpoint,
        objects = all.len(),
        pages = pages,
        "listing complete"
    );
    Ok(all)
}
