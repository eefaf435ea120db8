//! App Router

use salvo::Router;

use crate::{discounts, offers, settings, welcome_coupons};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("offers")
                .get(offers::index::handler)
                .post(offers::create::handler)
                .push(Router::with_path("active").get(offers::active::handler))
                .push(
                    Router::with_path("{offer}")
                        .get(offers::get::handler)
                        .put(offers::update::handler)
                        .delete(offers::delete::handler)
                        .push(Router::with_path("usage").get(offers::usage::handler)),
                ),
        )
        .push(
            Router::with_path("welcome-coupons")
                .get(welcome_coupons::index::handler)
                .post(welcome_coupons::create::handler)
                .push(Router::with_path("backfill").post(welcome_coupons::backfill::handler))
                .push(
                    Router::with_path("{coupon}")
                        .get(welcome_coupons::get::handler)
                        .put(welcome_coupons::update::handler)
                        .delete(welcome_coupons::delete::handler),
                ),
        )
        .push(
            Router::with_path("discounts")
                .push(Router::with_path("validate").post(discounts::validate::handler))
                .push(Router::with_path("redeem").post(discounts::redeem::handler)),
        )
        .push(
            Router::with_path("settings/promotions")
                .get(settings::get::handler)
                .put(settings::update::handler),
        )
}
