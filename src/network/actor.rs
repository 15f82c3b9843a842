//! Network actor - runs probes in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_probe};

/// Network actor that processes probe commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_probes: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            response_tx,
            active_probes: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    ///
    /// Each probe is spawned as its own task; a later probe never waits on
    /// an earlier one, and an in-flight probe cannot be aborted.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteProbe { id, url }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_probes.spawn(async move {
                                tracing::info!(id, url = %url, "Executing probe");
                                let result = execute_probe(&client, url, id).await;
                                tracing::info!(id, "Probe resolved");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_probes.join_next() => {}
            }
        }
    }
}
