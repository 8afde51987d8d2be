use std::sync::Arc;

use dork_core::ClaimedDork;
use dork_logging::{dork_debug, dork_trace};

use crate::coordinator::Coordinator;
use crate::decode::decode_body;
use crate::provider::Provider;
use crate::PageRequest;

/// Claims dorks until none are left or the run stops.
pub(crate) async fn run_worker(worker_id: usize, coordinator: Coordinator, providers: Arc<[Provider]>) {
    dork_debug!("Worker {} started", worker_id);
    while coordinator.state().is_live() {
        let Some(dork) = coordinator.next_dork() else {
            break;
        };
        dork_trace!("Worker {} claimed dork #{} '{}'", worker_id, dork.index, dork.text);
        if !search_dork(&coordinator, &providers, &dork).await {
            break;
        }
    }
    dork_debug!("Worker {} exited", worker_id);
}

/// Walks every selected provider and page for one dork. Returns false when
/// the run stopped part way through.
async fn search_dork(coordinator: &Coordinator, providers: &[Provider], dork: &ClaimedDork) -> bool {
    let control = coordinator.control();

    for provider in providers {
        for page in 0..provider.max_pages {
            if !control.wait_while_paused().await {
                return false;
            }

            let request = PageRequest {
                provider: provider.id.clone(),
                dork: dork.text.clone(),
                page,
                url: provider.build_url(&dork.text, page),
            };

            let delay = coordinator.settings().delay.sample();
            if !control.sleep_unless_stopped(delay).await {
                return false;
            }
            // A pause that arrived during the sleep holds the request back.
            if !control.wait_while_paused().await {
                return false;
            }

            match coordinator.fetcher().fetch(&request).await {
                Ok(output) => {
                    let body = decode_body(&output.bytes, output.metadata.content_type.as_deref());
                    let candidates = provider.extract(&body.text);
                    coordinator.report_page(&provider.id, &dork.text, page, &candidates);
                    // An empty page means the provider has nothing deeper for this dork.
                    if candidates.is_empty() {
                        break;
                    }
                }
                Err(err) => {
                    coordinator.report_error(&provider.id, &dork.text, page, err.to_string());
                }
            }
        }
    }
    true
}
