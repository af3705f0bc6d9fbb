//! Background fetches so the event loop never waits on the network.

use tokio::sync::mpsc;

use crate::core::fetch::TreeClient;
use crate::core::output::DisplayState;

/// A finished fetch, tagged with the generation it was issued under.
#[derive(Debug)]
pub struct FetchUpdate {
    pub generation: u64,
    pub display: DisplayState,
}

pub fn spawn_fetch(
    tx: mpsc::UnboundedSender<FetchUpdate>,
    generation: u64,
    client: TreeClient,
    repo_url: String,
) {
    tokio::spawn(async move {
        let display = DisplayState::from_fetch(client.fetch_tree(&repo_url).await);
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(FetchUpdate {
            generation,
            display,
        });
    });
}
