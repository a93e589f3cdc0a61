use std::sync::Arc;

use futures::{FutureExt as _, StreamExt as _, future::BoxFuture, stream::FuturesUnordered};
use log::{debug, error, info};
use serde_json::Value;
use solana_sdk::signature::Signature;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    broadcast::Broadcaster,
    error::Error,
    jupiter::QuoteSource,
    pipeline::{AmountPipeline, PendingQuote, Side, Snapshot},
    swap::{SwapSettings, execute_swap},
    wallet::Wallet,
};

const COMMAND_BUFFER: usize = 64;

pub enum Command {
    SetAmount {
        amount: f64,
        reply: oneshot::Sender<Snapshot>,
    },
    SelectAsset {
        side: Side,
        name: String,
        reply: oneshot::Sender<Snapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
    Swap {
        reply: oneshot::Sender<Result<Signature, Error>>,
    },
}

/// Cheap, cloneable way to drive the pipeline from any task.
#[derive(Clone)]
pub struct PipelineHandle {
    commands: mpsc::Sender<Command>,
}

impl PipelineHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, Error> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| Error::ServiceUnavailable)?;
        response.await.map_err(|_| Error::ServiceUnavailable)
    }

    pub async fn set_amount(&self, amount: f64) -> Result<Snapshot, Error> {
        self.request(|reply| Command::SetAmount { amount, reply }).await
    }

    pub async fn select_asset(&self, side: Side, name: String) -> Result<Snapshot, Error> {
        self.request(|reply| Command::SelectAsset { side, name, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, Error> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub async fn swap(&self) -> Result<Signature, Error> {
        self.request(|reply| Command::Swap { reply }).await?
    }
}

#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn QuoteSource>,
    pub wallet: Arc<dyn Wallet>,
    pub broadcaster: Arc<dyn Broadcaster>,
}

type QuoteFuture = BoxFuture<'static, (u64, Result<Value, Error>)>;

/// Sole owner of the swap form state. Commands, debounce deadlines and quote
/// responses are handled one at a time on this task; quote requests and
/// swaps run concurrently and report back.
pub struct PipelineService {
    pipeline: AmountPipeline,
    collaborators: Collaborators,
    settings: SwapSettings,
}

impl PipelineService {
    pub fn new(
        pipeline: AmountPipeline,
        collaborators: Collaborators,
        settings: SwapSettings,
    ) -> Self {
        Self {
            pipeline,
            collaborators,
            settings,
        }
    }

    pub fn spawn(self) -> (PipelineHandle, JoinHandle<()>) {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(self.run(receiver));
        (PipelineHandle { commands }, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut in_flight: FuturesUnordered<QuoteFuture> = FuturesUnordered::new();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => {
                        info!("All pipeline handles dropped, shutting down");
                        break;
                    }
                },
                amount = self.pipeline.next_due() => {
                    if let Some(pending) = self.pipeline.on_debounce_fired(amount) {
                        in_flight.push(self.request_quote(pending));
                    }
                }
                Some((generation, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    if let Err(e) = self.pipeline.apply_quote(generation, result) {
                        error!("Quote #{} failed: {}", generation, e);
                    }
                }
            }
        }
    }

    fn request_quote(&self, pending: PendingQuote) -> QuoteFuture {
        let source = self.collaborators.source.clone();
        debug!(
            "Requesting quote #{}: {} {} -> {}",
            pending.generation,
            pending.request.amount,
            pending.request.input_mint,
            pending.request.output_mint
        );

        async move {
            let result = source.quote(&pending.request).await;
            (pending.generation, result)
        }
        .boxed()
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SetAmount { amount, reply } => {
                self.pipeline.set_from_amount(amount);
                let _ = reply.send(self.pipeline.snapshot());
            }
            Command::SelectAsset { side, name, reply } => {
                self.pipeline.swap_asset_selection(side, &name);
                let _ = reply.send(self.pipeline.snapshot());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.pipeline.snapshot());
            }
            Command::Swap { reply } => {
                let quote = match self.pipeline.prepare_swap() {
                    Ok(quote) => quote,
                    Err(e) => {
                        let _ = reply.send(Err(e));
                        return;
                    }
                };

                let collaborators = self.collaborators.clone();
                let settings = self.settings;
                tokio::spawn(async move {
                    let result = execute_swap(
                        &quote,
                        collaborators.source.as_ref(),
                        collaborators.wallet.as_ref(),
                        collaborators.broadcaster.as_ref(),
                        &settings,
                    )
                    .await;
                    let _ = reply.send(result);
                });
            }
        }
    }
}
