//! BookingEngine - the operations exposed to the transport layer
//!
//! # Operation Flow
//!
//! ```text
//! request_booking        validate -> lookup -> price -> conditional insert
//! check_availability     read-only overlap query
//! cancel_booking         owner/admin -> CAS(current -> cancelled)
//! override_status        admin -> CAS(current -> target)
//! create_payment_order   owner -> gateway order -> record order handle
//! verify_payment         owner -> HMAC check -> CAS(pending -> confirmed)
//! ```
//!
//! Every store and gateway call runs under the configured timeout; a slow
//! or failing collaborator surfaces as `StoreUnavailable` instead of
//! hanging the request.

pub mod availability;
pub mod lifecycle;
pub mod pricing;
pub mod validate;

pub use availability::Availability;

use crate::config::EngineConfig;
use crate::error::{BookingError, BookingResult};
use crate::payment::{GatewayError, MockGateway, OrderMetadata, PaymentGateway, signature};
use crate::store::{
    BookingStore, CasOutcome, InsertOutcome, MemoryStore, PropertyStore, StoreResult,
};
use chrono::{NaiveDate, Utc};
use shared::{
    Booking, BookingRequest, BookingStatus, CheckoutSession, Identity, StayRange,
    VerifyPaymentRequest,
};
use std::future::Future;
use std::sync::Arc;

pub struct BookingEngine {
    properties: Arc<dyn PropertyStore>,
    bookings: Arc<dyn BookingStore>,
    gateway: Arc<dyn PaymentGateway>,
    config: EngineConfig,
}

impl std::fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEngine")
            .field("currency", &self.config.currency)
            .field("store_timeout", &self.config.store_timeout)
            .finish()
    }
}

impl BookingEngine {
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        bookings: Arc<dyn BookingStore>,
        gateway: Arc<dyn PaymentGateway>,
        config: EngineConfig,
    ) -> Self {
        Self {
            properties,
            bookings,
            gateway,
            config,
        }
    }

    /// Engine over an in-process store and gateway stub, for tests and
    /// development. Returns the store and gateway for seeding/assertions.
    pub fn in_memory(config: EngineConfig) -> (Self, Arc<MemoryStore>, Arc<MockGateway>) {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(MockGateway::new());
        let engine = Self::new(store.clone(), store.clone(), gateway.clone(), config);
        (engine, store, gateway)
    }

    // ==================== Booking creation ====================

    /// Validate, price and insert a booking for the caller.
    ///
    /// On success the booking is `pending`; payment confirms it later.
    pub async fn request_booking(
        &self,
        identity: &Identity,
        request: &BookingRequest,
    ) -> BookingResult<Booking> {
        self.request_booking_at(identity, request, Utc::now().date_naive())
            .await
    }

    /// Same as [`request_booking`](Self::request_booking) with an explicit
    /// "today", the date-only clock the past-check-in rule compares against
    pub async fn request_booking_at(
        &self,
        identity: &Identity,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> BookingResult<Booking> {
        let normalized = validate::parse_request(request, today)?;

        let property = self
            .store_call(self.properties.get_property(&normalized.property_id))
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound(normalized.property_id.clone()))?;

        validate::check_guest_limit(&property, normalized.guests)?;

        let total = pricing::total_price(&normalized.stay, property.nightly_price);
        let booking = Booking::new(
            property.id.clone(),
            identity.user_id.clone(),
            normalized.stay,
            normalized.guests,
            total,
        );

        // The store serializes the overlap check with the insert per
        // property; concurrent overlapping requests cannot both land
        match self
            .store_call(self.bookings.insert_if_no_conflict(booking))
            .await?
        {
            InsertOutcome::Inserted(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    property_id = %booking.property_id,
                    user_id = %booking.user_id,
                    stay = %booking.stay,
                    total = %booking.total_price,
                    "Booking created"
                );
                Ok(booking)
            }
            InsertOutcome::Conflict(existing) => {
                Err(BookingError::BookingConflict {
                    conflicting: existing.into_iter().map(|b| b.id).collect(),
                })
            }
        }
    }

    /// Read-only availability probe for a property and interval
    pub async fn check_availability(
        &self,
        property_id: &str,
        stay: StayRange,
    ) -> BookingResult<Availability> {
        self.store_call(self.properties.get_property(property_id))
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound(property_id.to_string()))?;

        let overlapping = self
            .store_call(self.bookings.find_overlapping(
                property_id,
                &stay,
                &availability::BLOCKING_STATUSES,
            ))
            .await?;
        Ok(Availability::from_overlapping(overlapping))
    }

    // ==================== Queries ====================

    /// Fetch one booking; owner or admin only
    pub async fn get_booking(&self, identity: &Identity, booking_id: &str) -> BookingResult<Booking> {
        let booking = self.load_booking(booking_id).await?;
        if booking.user_id != identity.user_id && !identity.is_admin() {
            return Err(BookingError::AccessDenied);
        }
        Ok(booking)
    }

    /// Bookings belonging to the caller
    pub async fn list_user_bookings(&self, identity: &Identity) -> BookingResult<Vec<Booking>> {
        self.store_call(self.bookings.find_by_user(&identity.user_id))
            .await
    }

    /// Bookings on a property; its host or an admin only
    pub async fn list_property_bookings(
        &self,
        identity: &Identity,
        property_id: &str,
    ) -> BookingResult<Vec<Booking>> {
        let property = self
            .store_call(self.properties.get_property(property_id))
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound(property_id.to_string()))?;
        if property.host_id != identity.user_id && !identity.is_admin() {
            return Err(BookingError::AccessDenied);
        }
        self.store_call(self.bookings.find_by_property(property_id))
            .await
    }

    /// Every booking in the store; admin only
    pub async fn list_all_bookings(&self, identity: &Identity) -> BookingResult<Vec<Booking>> {
        if !identity.is_admin() {
            return Err(BookingError::AccessDenied);
        }
        self.store_call(self.bookings.list_all()).await
    }

    // ==================== Lifecycle ====================

    /// Cancel a booking; owner or admin, from any non-cancelled state
    pub async fn cancel_booking(
        &self,
        identity: &Identity,
        booking_id: &str,
    ) -> BookingResult<Booking> {
        let booking = self.load_booking(booking_id).await?;
        if booking.user_id != identity.user_id && !identity.is_admin() {
            return Err(BookingError::AccessDenied);
        }
        self.transition(booking, BookingStatus::Cancelled, None).await
    }

    /// Administrative status override; bypasses payment verification but
    /// not the terminal-state rules
    pub async fn override_status(
        &self,
        identity: &Identity,
        booking_id: &str,
        status: BookingStatus,
    ) -> BookingResult<Booking> {
        if !identity.is_admin() {
            return Err(BookingError::AccessDenied);
        }
        let booking = self.load_booking(booking_id).await?;
        self.transition(booking, status, None).await
    }

    /// Check the transition, then commit it through the store's CAS so a
    /// concurrent writer cannot slip in between check and write
    async fn transition(
        &self,
        booking: Booking,
        target: BookingStatus,
        payment_reference: Option<String>,
    ) -> BookingResult<Booking> {
        lifecycle::check_transition(booking.status, target)?;
        match self
            .store_call(self.bookings.compare_and_set_status(
                &booking.id,
                booking.status,
                target,
                payment_reference,
            ))
            .await?
        {
            CasOutcome::Updated(updated) => {
                tracing::info!(
                    booking_id = %updated.id,
                    from = %booking.status,
                    to = %updated.status,
                    "Booking status changed"
                );
                Ok(updated)
            }
            CasOutcome::PreconditionFailed { actual } => {
                Err(lifecycle::commit_conflict(actual, target))
            }
            CasOutcome::NotFound => Err(BookingError::BookingNotFound(booking.id)),
        }
    }

    // ==================== Payment reconciliation ====================

    /// Create a payment order for a pending booking and hand back what the
    /// client needs to open the payment flow. The booking stays `pending`;
    /// only the order handle is recorded on it.
    pub async fn create_payment_order(
        &self,
        identity: &Identity,
        booking_id: &str,
    ) -> BookingResult<CheckoutSession> {
        let booking = self.load_booking(booking_id).await?;
        if booking.user_id != identity.user_id {
            return Err(BookingError::AccessDenied);
        }
        if booking.status != BookingStatus::Pending {
            return Err(BookingError::BookingNotPending);
        }

        let amount = pricing::amount_minor_units(booking.total_price).ok_or_else(|| {
            BookingError::Internal(format!("total price out of range: {}", booking.total_price))
        })?;

        let metadata = OrderMetadata {
            booking_id: booking.id.clone(),
            property_id: booking.property_id.clone(),
            user_id: booking.user_id.clone(),
            receipt: format!("booking_{}", booking.id),
        };
        let order = self
            .gateway_call(
                self.gateway
                    .create_order(amount, &self.config.currency, metadata),
            )
            .await?;

        match self
            .store_call(self.bookings.record_payment_reference(
                &booking.id,
                BookingStatus::Pending,
                order.order_id.clone(),
            ))
            .await?
        {
            CasOutcome::Updated(_) => {
                tracing::info!(
                    booking_id = %booking.id,
                    order_id = %order.order_id,
                    amount = order.amount,
                    "Payment order created"
                );
                Ok(CheckoutSession {
                    order_id: order.order_id,
                    amount: order.amount,
                    currency: order.currency,
                    key_id: self.config.payment_key_id.clone(),
                })
            }
            CasOutcome::PreconditionFailed { .. } => Err(BookingError::BookingNotPending),
            CasOutcome::NotFound => Err(BookingError::BookingNotFound(booking.id)),
        }
    }

    /// Apply a gateway payment callback: verify the signature locally and,
    /// on match, confirm the booking recording the payment handle. On
    /// mismatch the booking is left untouched.
    pub async fn verify_payment(
        &self,
        identity: &Identity,
        request: &VerifyPaymentRequest,
    ) -> BookingResult<Booking> {
        let booking = self.load_booking(&request.booking_id).await?;
        if booking.user_id != identity.user_id {
            return Err(BookingError::AccessDenied);
        }

        if !signature::verify(
            &self.config.payment_key_secret,
            &request.order_id,
            &request.payment_id,
            &request.signature,
        ) {
            tracing::warn!(
                booking_id = %booking.id,
                order_id = %request.order_id,
                "Payment signature mismatch"
            );
            return Err(BookingError::SignatureMismatch);
        }

        match self
            .store_call(self.bookings.compare_and_set_status(
                &booking.id,
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                Some(request.payment_id.clone()),
            ))
            .await?
        {
            CasOutcome::Updated(confirmed) => {
                tracing::info!(
                    booking_id = %confirmed.id,
                    payment_id = %request.payment_id,
                    "Payment verified, booking confirmed"
                );
                Ok(confirmed)
            }
            CasOutcome::PreconditionFailed { actual } => Err(BookingError::InvalidTransition {
                from: actual,
                to: BookingStatus::Confirmed,
            }),
            CasOutcome::NotFound => Err(BookingError::BookingNotFound(booking.id)),
        }
    }

    // ==================== Helpers ====================

    async fn load_booking(&self, booking_id: &str) -> BookingResult<Booking> {
        self.store_call(self.bookings.find_by_id(booking_id))
            .await?
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))
    }

    /// Run a store call under the configured timeout; failures and
    /// timeouts both surface as the retryable `StoreUnavailable`
    async fn store_call<T>(
        &self,
        fut: impl Future<Output = StoreResult<T>>,
    ) -> BookingResult<T> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(BookingError::StoreUnavailable(err.to_string())),
            Err(_) => Err(BookingError::StoreUnavailable(format!(
                "store call exceeded {:?}",
                self.config.store_timeout
            ))),
        }
    }

    async fn gateway_call<T>(
        &self,
        fut: impl Future<Output = Result<T, GatewayError>>,
    ) -> BookingResult<T> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(BookingError::StoreUnavailable(err.to_string())),
            Err(_) => Err(BookingError::StoreUnavailable(format!(
                "gateway call exceeded {:?}",
                self.config.store_timeout
            ))),
        }
    }
}
