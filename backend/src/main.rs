use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;
use store::Store;

use swap_backend::{
    broadcast::{RpcBroadcaster, SendOptions},
    config::Config,
    error::Error,
    jupiter::JupiterClient,
    pipeline::AmountPipeline,
    routes,
    service::{Collaborators, PipelineService},
    swap::SwapSettings,
    wallet::{KeypairWallet, Wallet},
};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let store = match &config.assets_file {
        Some(path) => Store::from_json(&std::fs::read_to_string(path)?)?,
        None => Store::builtin(),
    };
    let store = Arc::new(store);
    info!("Loaded {} assets", store.assets().len());

    let wallet: Arc<dyn Wallet> = match &config.wallet_keypair {
        Some(path) => Arc::new(KeypairWallet::from_file(path)?),
        None => {
            warn!("WALLET_KEYPAIR not set, swaps will be refused");
            Arc::new(KeypairWallet::disconnected())
        }
    };

    let collaborators = Collaborators {
        source: Arc::new(JupiterClient::new(config.jupiter_api_url.clone())),
        wallet,
        broadcaster: Arc::new(RpcBroadcaster::new(config.rpc_url.clone())),
    };
    let settings = SwapSettings {
        wrap_and_unwrap_sol: config.wrap_and_unwrap_sol,
        send_options: SendOptions {
            skip_preflight: config.skip_preflight,
            max_retries: config.send_max_retries,
        },
    };

    let pipeline =
        AmountPipeline::new(store.clone(), config.slippage_bps, config.quote_debounce);
    let (handle, _pipeline_task) =
        PipelineService::new(pipeline, collaborators, settings).spawn();

    let store_data = web::Data::from(store);
    let handle_data = web::Data::new(handle);

    info!("Listening on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(handle_data.clone())
            .service(routes::api_scope())
    })
    .bind(config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
