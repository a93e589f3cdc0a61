use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use store::{Store, units};

use crate::{
    error::Error,
    pipeline::Side,
    service::PipelineHandle,
    swap::explorer_url,
};

#[derive(Deserialize)]
pub struct AmountRequest {
    pub amount: String,
}

#[derive(Deserialize)]
pub struct AssetRequest {
    pub side: Side,
    pub name: String,
}

#[derive(Serialize)]
pub struct SwapResponse {
    pub signature: String,
    #[serde(rename = "explorerUrl")]
    pub explorer_url: String,
}

#[actix_web::get("/assets")]
pub async fn assets(store: web::Data<Store>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(store.assets()))
}

#[actix_web::get("/quote")]
pub async fn quote(pipeline: web::Data<PipelineHandle>) -> Result<HttpResponse, Error> {
    let snapshot = pipeline.snapshot().await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[actix_web::post("/amount")]
pub async fn set_amount(
    pipeline: web::Data<PipelineHandle>,
    req: web::Json<AmountRequest>,
) -> Result<HttpResponse, Error> {
    let amount = units::sanitize_input(&req.amount)?;
    let snapshot = pipeline.set_amount(amount).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[actix_web::post("/asset")]
pub async fn select_asset(
    pipeline: web::Data<PipelineHandle>,
    req: web::Json<AssetRequest>,
) -> Result<HttpResponse, Error> {
    let req = req.into_inner();
    let snapshot = pipeline.select_asset(req.side, req.name).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[actix_web::post("/swap")]
pub async fn swap(pipeline: web::Data<PipelineHandle>) -> Result<HttpResponse, Error> {
    match pipeline.swap().await {
        Ok(signature) => Ok(HttpResponse::Ok().json(SwapResponse {
            signature: signature.to_string(),
            explorer_url: explorer_url(&signature),
        })),
        Err(e) => {
            log::error!("Error signing or sending the transaction: {}", e);
            Err(e)
        }
    }
}
