//! Request pipeline.
//!
//! One entry point per operation, each following the same shape: validate
//! the input, resolve live vs. mock mode, serve the request, and wrap the
//! result in its envelope. Live failures that indicate the carrier cannot
//! be reached fall back to synthesized data instead of surfacing an error;
//! everything the caller did wrong still fails fast.

use std::sync::Arc;

use chrono::Utc;

use crate::core::carrier::Carrier;
use crate::core::config::AppConfig;
use crate::core::events::{Event, EventSink, TracingSink};
use crate::core::http;
use crate::core::mode::{self, DataMode};
use crate::core::models::{
    AddressRequest, AddressResponse, AddressValidationResult, RateQuote, RateRequest,
    RateRequestEcho, RateResponse, TrackRequest, TrackResponse, TrackingResult, TransitRequest,
    TransitResponse, TransitSchedule,
};
use crate::core::selector;
use crate::core::token::{HttpTokenExchanger, TokenCache};
use crate::core::validate;
use crate::error::{Result, ShipError};
use crate::mock;
use crate::providers::express::{self, ExpressClient};
use crate::providers::postal::{self, PostalClient};

/// The carrier-integration facade: owns the configuration, the HTTP
/// clients, and one token cache per carrier.
pub struct ShipNode {
    config: AppConfig,
    express: ExpressClient,
    postal: PostalClient,
    express_tokens: TokenCache<HttpTokenExchanger>,
    postal_tokens: TokenCache<HttpTokenExchanger>,
    events: Arc<dyn EventSink>,
    rules: mock::address::RuleSet,
}

impl ShipNode {
    /// Build from resolved configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        // One client per carrier; the postal gateway gets its longer timeout
        let express_http = http::build_client(Carrier::Express.default_timeout())?;
        let postal_http = http::build_client(Carrier::Postal.default_timeout())?;

        let base_url = |carrier: Carrier| {
            config
                .credentials(carrier)
                .as_credential()
                .map_or_else(|| carrier.default_base_url().to_string(), |c| c.base_url.clone())
        };

        Ok(Self {
            express: ExpressClient::new(express_http.clone(), base_url(Carrier::Express)),
            postal: PostalClient::new(postal_http.clone(), base_url(Carrier::Postal)),
            express_tokens: TokenCache::new(Carrier::Express, HttpTokenExchanger::new(express_http)),
            postal_tokens: TokenCache::new(Carrier::Postal, HttpTokenExchanger::new(postal_http)),
            config,
            events: Arc::new(TracingSink),
            rules: mock::address::RuleSet::default(),
        })
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Replace the address-validation rules used in mock mode.
    #[must_use]
    pub fn with_rules(mut self, rules: mock::address::RuleSet) -> Self {
        self.rules = rules;
        self
    }

    fn record(&self, action: &'static str, carrier: Carrier, mode: DataMode, value: i64) {
        self.events.record(
            Event::new("API", action, format!("{} - {}", carrier.display_name(), mode.label()))
                .with_value(value),
        );
    }

    async fn token(&self, carrier: Carrier) -> Result<String> {
        let credential = self
            .config
            .credentials(carrier)
            .as_credential()
            .ok_or_else(|| ShipError::NotConfigured {
                carrier: carrier.cli_name().to_string(),
            })?;

        match carrier {
            Carrier::Express => self.express_tokens.get_token(credential).await,
            Carrier::Postal => self.postal_tokens.get_token(credential).await,
        }
    }

    /// A rejected token is stale until proven otherwise.
    async fn note_live_error(&self, carrier: Carrier, err: &ShipError) {
        if matches!(err, ShipError::AuthFailed { .. }) {
            match carrier {
                Carrier::Express => self.express_tokens.invalidate().await,
                Carrier::Postal => self.postal_tokens.invalidate().await,
            }
        }
    }

    // =========================================================================
    // Rates
    // =========================================================================

    /// Quote rates for a lane and package, cheapest first.
    pub async fn quote_rates(&self, carrier: Carrier, request: &RateRequest) -> Result<RateResponse> {
        validate::rate_request(request)?;
        let today = Utc::now().date_naive();

        let (mut rates, mode) = match mode::resolve(&self.config, carrier) {
            DataMode::Live => match self.live_rates(carrier, request).await {
                Ok(rates) => (rates, DataMode::Live),
                Err(err) if err.triggers_fallback() => {
                    tracing::warn!(
                        carrier = carrier.cli_name(),
                        error = %err,
                        "live rate request failed, serving synthesized rates"
                    );
                    (mock::rates::synthesize(carrier, request, today), DataMode::Mock)
                }
                Err(err) => {
                    self.note_live_error(carrier, &err).await;
                    return Err(err);
                }
            },
            DataMode::Mock => (mock::rates::synthesize(carrier, request, today), DataMode::Mock),
        };

        selector::sort_rates(&mut rates);
        self.record("Rate Request", carrier, mode, rates.len() as i64);

        Ok(RateResponse {
            request: RateRequestEcho {
                origin: request.origin_zip.clone(),
                destination: request.destination_zip.clone(),
                weight: request.weight,
            },
            is_mock_data: mode.is_mock(),
            rates,
        })
    }

    async fn live_rates(&self, carrier: Carrier, request: &RateRequest) -> Result<Vec<RateQuote>> {
        let token = self.token(carrier).await?;
        match carrier {
            Carrier::Express => {
                let reply = self.express.fetch_rates(&token, request).await?;
                Ok(express::rate::normalize(&reply))
            }
            Carrier::Postal => {
                let reply = self.postal.fetch_rates(&token, request).await?;
                Ok(postal::rate::normalize(&reply))
            }
        }
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Track a package. A number the carrier does not recognize yields an
    /// unknown-status result, not an error.
    pub async fn track_package(&self, carrier: Carrier, request: &TrackRequest) -> Result<TrackResponse> {
        validate::track_request(request)?;

        let (result, mode) = match mode::resolve(&self.config, carrier) {
            DataMode::Live => match self.live_tracking(carrier, request).await {
                Ok(result) => (result, DataMode::Live),
                Err(err) if err.triggers_fallback() => {
                    tracing::warn!(
                        carrier = carrier.cli_name(),
                        error = %err,
                        "live tracking failed, serving synthesized history"
                    );
                    (
                        mock::tracking::synthesize(carrier, request, Utc::now()),
                        DataMode::Mock,
                    )
                }
                Err(err) => {
                    self.note_live_error(carrier, &err).await;
                    return Err(err);
                }
            },
            DataMode::Mock => (
                mock::tracking::synthesize(carrier, request, Utc::now()),
                DataMode::Mock,
            ),
        };

        self.record("Track Request", carrier, mode, result.events.len() as i64);

        Ok(TrackResponse {
            is_mock_data: mode.is_mock(),
            result,
        })
    }

    async fn live_tracking(&self, carrier: Carrier, request: &TrackRequest) -> Result<TrackingResult> {
        let token = self.token(carrier).await?;
        match carrier {
            Carrier::Express => {
                let reply = self.express.fetch_tracking(&token, request).await?;
                Ok(reply.map_or_else(
                    || TrackingResult::unknown(&request.tracking_number, false),
                    |reply| express::track::normalize(&reply, &request.tracking_number),
                ))
            }
            Carrier::Postal => {
                let reply = self.postal.fetch_tracking(&token, request).await?;
                Ok(reply.map_or_else(
                    || TrackingResult::unknown(&request.tracking_number, false),
                    |reply| postal::track::normalize(&reply, &request.tracking_number),
                ))
            }
        }
    }

    // =========================================================================
    // Transit Times
    // =========================================================================

    /// Compute available services and delivery commitments for a lane.
    pub async fn transit_times(
        &self,
        carrier: Carrier,
        request: &TransitRequest,
    ) -> Result<TransitResponse> {
        validate::transit_request(request)?;
        let today = Utc::now().date_naive();
        if let Some(date) = request.ship_date {
            if date < today {
                return Err(ShipError::InvalidInput {
                    field: "shipDate".to_string(),
                    message: "ship date must not be in the past".to_string(),
                });
            }
        }
        let ship_date = request.effective_ship_date(today);

        let (mut schedule, mode) = match mode::resolve(&self.config, carrier) {
            DataMode::Live => match self.live_transit(carrier, request, ship_date).await {
                Ok(schedule) => (schedule, DataMode::Live),
                Err(err) if err.triggers_fallback() => {
                    tracing::warn!(
                        carrier = carrier.cli_name(),
                        error = %err,
                        "live transit lookup failed, serving synthesized schedule"
                    );
                    (
                        mock::transit::synthesize(carrier, request, ship_date),
                        DataMode::Mock,
                    )
                }
                Err(err) => {
                    self.note_live_error(carrier, &err).await;
                    return Err(err);
                }
            },
            DataMode::Mock => (
                mock::transit::synthesize(carrier, request, ship_date),
                DataMode::Mock,
            ),
        };

        selector::sort_transit(&mut schedule.services);
        self.record("Transit Request", carrier, mode, schedule.services.len() as i64);

        Ok(TransitResponse {
            is_mock_data: mode.is_mock(),
            schedule,
        })
    }

    async fn live_transit(
        &self,
        carrier: Carrier,
        request: &TransitRequest,
        ship_date: chrono::NaiveDate,
    ) -> Result<TransitSchedule> {
        let token = self.token(carrier).await?;
        match carrier {
            Carrier::Express => {
                let reply = self.express.fetch_transit(&token, request, ship_date).await?;
                Ok(express::transit::normalize(&reply, request, ship_date))
            }
            Carrier::Postal => {
                let standards = self.postal.fetch_transit(&token, request, ship_date).await?;
                Ok(postal::transit::normalize(&standards, request, ship_date))
            }
        }
    }

    // =========================================================================
    // Address Validation
    // =========================================================================

    /// Validate and standardize an address.
    pub async fn validate_address(
        &self,
        carrier: Carrier,
        request: &AddressRequest,
    ) -> Result<AddressResponse> {
        validate::address_request(request)?;

        let (result, mode) = match mode::resolve(&self.config, carrier) {
            DataMode::Live => match self.live_address(carrier, request).await {
                Ok(result) => (result, DataMode::Live),
                Err(err) if err.triggers_fallback() => {
                    tracing::warn!(
                        carrier = carrier.cli_name(),
                        error = %err,
                        "live address validation failed, serving rule-based result"
                    );
                    (self.rules.validate(request), DataMode::Mock)
                }
                Err(err) => {
                    self.note_live_error(carrier, &err).await;
                    return Err(err);
                }
            },
            DataMode::Mock => (self.rules.validate(request), DataMode::Mock),
        };

        self.record(
            "Address Validation",
            carrier,
            mode,
            i64::from(result.is_valid),
        );

        Ok(AddressResponse {
            provider: carrier.display_name().to_string(),
            is_mock_data: mode.is_mock(),
            result,
        })
    }

    async fn live_address(
        &self,
        carrier: Carrier,
        request: &AddressRequest,
    ) -> Result<AddressValidationResult> {
        let token = self.token(carrier).await?;
        match carrier {
            Carrier::Express => {
                let reply = self.express.fetch_address(&token, request).await?;
                Ok(express::address::normalize(&reply, request))
            }
            Carrier::Postal => {
                let reply = self.postal.fetch_address(&token, request).await?;
                Ok(reply.map_or_else(postal::address::normalize_not_found, |reply| {
                    postal::address::normalize(&reply, request)
                }))
            }
        }
    }
}
