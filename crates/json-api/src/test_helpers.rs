//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use souq_app::{
    context::AppContext,
    domain::{
        checkout::MockCheckoutService, offers::MockOffersService,
        settings::MockSettingsService, welcome_coupons::MockWelcomeCouponsService,
    },
};

use crate::state::State;

/// Service mocks behind the app context.
///
/// Mocks without expectations fail any call, so each test only sets up the
/// service it exercises.
#[derive(Default)]
pub(crate) struct MockServices {
    pub offers: MockOffersService,
    pub welcome_coupons: MockWelcomeCouponsService,
    pub checkout: MockCheckoutService,
    pub settings: MockSettingsService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            offers: Arc::new(self.offers),
            welcome_coupons: Arc::new(self.welcome_coupons),
            checkout: Arc::new(self.checkout),
            settings: Arc::new(self.settings),
        })
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn offers_service(offers: MockOffersService, route: Router) -> Service {
    MockServices {
        offers,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn welcome_coupons_service(
    welcome_coupons: MockWelcomeCouponsService,
    route: Router,
) -> Service {
    MockServices {
        welcome_coupons,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    MockServices {
        checkout,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn settings_service(settings: MockSettingsService, route: Router) -> Service {
    MockServices {
        settings,
        ..MockServices::default()
    }
    .into_service(route)
}
