use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

pub static BOOKINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "localserve_bookings_created_total",
        "Total bookings created"
    )
    .expect("register bookings_created_total")
});

pub static BOOKING_TRANSITIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "localserve_booking_transitions_total",
        "Booking status transitions by target status",
        &["status"]
    )
    .expect("register booking_transitions_total")
});

pub static PAYMENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "localserve_payments_total",
        "Total bookings marked paid"
    )
    .expect("register payments_total")
});

pub static AUTH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "localserve_auth_failures_total",
        "Rejected logins and tokens"
    )
    .expect("register auth_failures_total")
});

/// Touch every metric so it shows up in `/metrics` before first use.
pub fn register_all() {
    Lazy::force(&BOOKINGS_CREATED_TOTAL);
    Lazy::force(&BOOKING_TRANSITIONS_TOTAL);
    Lazy::force(&PAYMENTS_TOTAL);
    Lazy::force(&AUTH_FAILURES_TOTAL);
}
