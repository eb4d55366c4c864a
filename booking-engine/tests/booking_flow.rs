//! End-to-end booking flows against the in-process store
//!
//! Exercises the full surface: conflict detection under concurrency,
//! price freezing, the status lifecycle and payment reconciliation.

use booking_engine::payment::signature;
use booking_engine::{
    Availability, BookingEngine, BookingError, BookingRequest, BookingStatus, EngineConfig,
    Identity, MemoryStore, MockGateway, Property, PropertyStore, VerifyPaymentRequest,
};
use rust_decimal::Decimal;
use std::sync::Arc;

fn request(property_id: &str, check_in: &str, check_out: &str, guests: i64) -> BookingRequest {
    BookingRequest {
        property_id: Some(property_id.into()),
        check_in: Some(check_in.into()),
        check_out: Some(check_out.into()),
        guests: Some(guests),
    }
}

async fn engine_with_property(
    nightly_price: Decimal,
    max_guests: u32,
) -> (BookingEngine, Property, Arc<MemoryStore>, Arc<MockGateway>) {
    booking_engine::logger::init_logger();
    let (engine, store, gateway) = BookingEngine::in_memory(EngineConfig::default());
    let property = Property::new("host-1", nightly_price, max_guests);
    store.upsert_property(property.clone()).await.unwrap();
    (engine, property, store, gateway)
}

#[tokio::test]
async fn non_overlapping_bookings_share_a_property() {
    let (engine, property, _, _) = engine_with_property(Decimal::from(100), 4).await;
    let alice = Identity::user("alice");
    let bob = Identity::user("bob");

    engine
        .request_booking(&alice, &request(&property.id, "2030-06-01", "2030-06-05", 2))
        .await
        .unwrap();
    engine
        .request_booking(&bob, &request(&property.id, "2030-06-10", "2030-06-12", 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn overlapping_booking_is_rejected_with_the_blocker() {
    let (engine, property, _, _) = engine_with_property(Decimal::from(100), 4).await;
    let alice = Identity::user("alice");

    let first = engine
        .request_booking(&alice, &request(&property.id, "2030-06-01", "2030-06-05", 2))
        .await
        .unwrap();

    match engine
        .request_booking(
            &Identity::user("bob"),
            &request(&property.id, "2030-06-04", "2030-06-08", 2),
        )
        .await
    {
        Err(BookingError::BookingConflict { conflicting }) => {
            assert_eq!(conflicting, vec![first.id]);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn touching_stays_both_succeed() {
    let (engine, property, _, _) = engine_with_property(Decimal::from(100), 4).await;

    engine
        .request_booking(
            &Identity::user("alice"),
            &request(&property.id, "2030-06-01", "2030-06-05", 2),
        )
        .await
        .unwrap();
    // Checks in the day alice checks out
    engine
        .request_booking(
            &Identity::user("bob"),
            &request(&property.id, "2030-06-05", "2030-06-10", 2),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn total_price_is_frozen_at_creation() {
    let (engine, property, store, _) = engine_with_property(Decimal::from(100), 4).await;
    let alice = Identity::user("alice");

    // 3 nights at 100
    let booking = engine
        .request_booking(&alice, &request(&property.id, "2030-06-01", "2030-06-04", 2))
        .await
        .unwrap();
    assert_eq!(booking.total_price, Decimal::from(300));

    // Host raises the price afterwards
    let mut repriced = property.clone();
    repriced.nightly_price = Decimal::from(250);
    store.upsert_property(repriced).await.unwrap();

    let reloaded = engine.get_booking(&alice, &booking.id).await.unwrap();
    assert_eq!(reloaded.total_price, Decimal::from(300));

    // New bookings see the new price
    let later = engine
        .request_booking(&alice, &request(&property.id, "2030-07-01", "2030-07-03", 2))
        .await
        .unwrap();
    assert_eq!(later.total_price, Decimal::from(500));
}

#[tokio::test]
async fn guest_limit_error_names_the_limit() {
    let (engine, property, _, _) = engine_with_property(Decimal::from(100), 4).await;

    let err = engine
        .request_booking(
            &Identity::user("alice"),
            &request(&property.id, "2030-06-01", "2030-06-04", 5),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains('4'));
}

#[tokio::test]
async fn payment_confirms_exactly_once() {
    let config = EngineConfig::default();
    let secret = config.payment_key_secret.clone();
    let (engine, store, _) = BookingEngine::in_memory(config);
    let property = Property::new("host-1", Decimal::from(100), 4);
    store.upsert_property(property.clone()).await.unwrap();
    let alice = Identity::user("alice");

    let booking = engine
        .request_booking(&alice, &request(&property.id, "2030-06-01", "2030-06-04", 2))
        .await
        .unwrap();
    let session = engine.create_payment_order(&alice, &booking.id).await.unwrap();

    let payment_id = "pay_001";
    let callback = VerifyPaymentRequest {
        booking_id: booking.id.clone(),
        order_id: session.order_id.clone(),
        payment_id: payment_id.into(),
        signature: signature::sign(&secret, &session.order_id, payment_id),
    };

    let confirmed = engine.verify_payment(&alice, &callback).await.unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.payment_reference.as_deref(), Some(payment_id));

    // Replaying the same valid callback cannot confirm twice
    assert!(matches!(
        engine.verify_payment(&alice, &callback).await,
        Err(BookingError::InvalidTransition {
            from: BookingStatus::Confirmed,
            ..
        })
    ));

    // Confirmed bookings can still be cancelled, once
    let cancelled = engine.cancel_booking(&alice, &booking.id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(matches!(
        engine.cancel_booking(&alice, &booking.id).await,
        Err(BookingError::AlreadyCancelled)
    ));
}

#[tokio::test]
async fn tampered_signature_leaves_the_booking_pending() {
    let config = EngineConfig::default();
    let secret = config.payment_key_secret.clone();
    let (engine, store, _) = BookingEngine::in_memory(config);
    let property = Property::new("host-1", Decimal::from(100), 4);
    store.upsert_property(property.clone()).await.unwrap();
    let alice = Identity::user("alice");

    let booking = engine
        .request_booking(&alice, &request(&property.id, "2030-06-01", "2030-06-04", 2))
        .await
        .unwrap();
    let session = engine.create_payment_order(&alice, &booking.id).await.unwrap();

    // Signature over a different payment handle
    let callback = VerifyPaymentRequest {
        booking_id: booking.id.clone(),
        order_id: session.order_id.clone(),
        payment_id: "pay_001".into(),
        signature: signature::sign(&secret, &session.order_id, "pay_002"),
    };
    assert!(matches!(
        engine.verify_payment(&alice, &callback).await,
        Err(BookingError::SignatureMismatch)
    ));

    let reloaded = engine.get_booking(&alice, &booking.id).await.unwrap();
    assert_eq!(reloaded.status, BookingStatus::Pending);
    // The order handle from create-order is still the recorded reference
    assert_eq!(
        reloaded.payment_reference.as_deref(),
        Some(session.order_id.as_str())
    );
}

#[tokio::test]
async fn concurrent_identical_requests_yield_one_booking() {
    const CONTENDERS: usize = 16;

    let (engine, property, _, _) = engine_with_property(Decimal::from(100), 4).await;
    let engine = Arc::new(engine);

    let tasks = (0..CONTENDERS).map(|i| {
        let engine = engine.clone();
        let property_id = property.id.clone();
        tokio::spawn(async move {
            engine
                .request_booking(
                    &Identity::user(format!("user-{i}")),
                    &request(&property_id, "2030-06-01", "2030-06-05", 2),
                )
                .await
        })
    });

    let results = futures::future::join_all(tasks).await;
    let mut successes = 0;
    let mut conflicts = 0;
    for result in results {
        match result.unwrap() {
            Ok(_) => successes += 1,
            Err(BookingError::BookingConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, CONTENDERS - 1);

    // And the winner is the only active booking on those dates
    let stay = booking_engine::StayRange::new(
        "2030-06-01".parse().unwrap(),
        "2030-06-05".parse().unwrap(),
    );
    match engine.check_availability(&property.id, stay).await.unwrap() {
        Availability::Conflict(conflicts) => assert_eq!(conflicts.len(), 1),
        Availability::Available => panic!("expected the winning booking to block the dates"),
    }
}
