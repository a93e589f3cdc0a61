pub mod swap;

pub use swap::*;

use actix_web::{Scope, web};

pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(assets)
        .service(quote)
        .service(set_amount)
        .service(select_asset)
        .service(swap)
}
