// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Collaborative pricing - progressive group discounts for shared bookings
//!
//! Each participant fills a fifth of the group and takes 20 percentage points
//! off the base cost. The projected "next" discount shown to prospective
//! members grows in steps of 10 and never exceeds 40%.
//!
//! Counts above [`MAX_GROUP_SIZE`] are not clamped: the current discount can
//! pass 100% and the price can go negative.

use crate::types::SharedBooking;
use serde::Serialize;

/// Participants needed to fill a group
pub const MAX_GROUP_SIZE: u32 = 5;

/// Ceiling for the projected next discount, in percent
pub const MAX_DISCOUNT_PERCENT: f64 = 40.0;

/// Increment applied when projecting one more participant, in percent
pub const NEXT_PARTICIPANT_STEP: f64 = 10.0;

fn participant_count(booking: &SharedBooking) -> f64 {
    f64::from(u32::try_from(booking.participant_count()).unwrap_or(u32::MAX))
}

/// Current discount in percent: `count / 5 * 100`
#[must_use]
pub fn discount_percent(booking: &SharedBooking) -> f64 {
    participant_count(booking) / f64::from(MAX_GROUP_SIZE) * 100.0
}

/// How full the group is, clamped to `0.0..=1.0`
#[must_use]
pub fn fill_ratio(booking: &SharedBooking) -> f64 {
    (participant_count(booking) / f64::from(MAX_GROUP_SIZE)).min(1.0)
}

/// Seats left before the group is full
#[must_use]
pub fn open_seats(booking: &SharedBooking) -> u32 {
    let taken = u32::try_from(booking.participant_count()).unwrap_or(u32::MAX);
    MAX_GROUP_SIZE.saturating_sub(taken)
}

/// Price each participant pays right now
#[must_use]
pub fn current_price(booking: &SharedBooking) -> f64 {
    booking.base_cost * (1.0 - discount_percent(booking) / 100.0)
}

/// Discount advertised for the next participant, capped at 40%
#[must_use]
pub fn next_discount_percent(booking: &SharedBooking) -> f64 {
    (discount_percent(booking) + NEXT_PARTICIPANT_STEP).min(MAX_DISCOUNT_PERCENT)
}

/// Original price, discount and final price for one participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    /// Base cost
    pub original: f64,
    /// Discount applied, in percent
    pub discount_percent: f64,
    /// Amount taken off the base cost
    pub discount_amount: f64,
    /// What the participant pays
    pub final_price: f64,
}

/// Break down the current price
#[must_use]
pub fn price_breakdown(booking: &SharedBooking) -> PriceBreakdown {
    let percent = discount_percent(booking);
    let discount_amount = booking.base_cost * (percent / 100.0);
    PriceBreakdown {
        original: booking.base_cost,
        discount_percent: percent,
        discount_amount,
        final_price: booking.base_cost - discount_amount,
    }
}

/// Add a participant, returning the updated booking
///
/// A user already in the group is not added twice.
#[must_use]
pub fn with_participant(booking: &SharedBooking, user_id: &str) -> SharedBooking {
    let mut updated = booking.clone();
    if !updated.has_participant(user_id) {
        updated.participants.push(user_id.to_string());
    }
    updated
}

/// Result of joining a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinOutcome {
    /// Whether the join was accepted
    pub success: bool,
    /// Price per participant after the join
    pub new_price: f64,
    /// Price if yet another participant joins afterwards
    pub next_price: f64,
    /// The booking with the new participant; persisting it is up to the caller
    pub booking: SharedBooking,
}

/// Join a user to a shared booking
///
/// Pure: the input booking is not modified. There is no capacity check, so
/// the join is always accepted.
#[must_use]
pub fn join_group(booking: &SharedBooking, user_id: &str) -> JoinOutcome {
    let updated = with_participant(booking, user_id);
    let new_price = current_price(&updated);
    let next_price = updated.base_cost * (1.0 - next_discount_percent(&updated) / 100.0);
    tracing::debug!(
        booking = %updated.id,
        user = user_id,
        participants = updated.participant_count(),
        new_price,
        "Joined shared booking"
    );
    JoinOutcome {
        success: true,
        new_price,
        next_price,
        booking: updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookingStatus;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn make_booking(base_cost: f64, participants: usize) -> SharedBooking {
        SharedBooking {
            id: "comp1".into(),
            title: "Revisão em grupo".into(),
            description: "Quanto mais gente, maior o desconto".into(),
            base_cost,
            participants: (0..participants).map(|i| format!("user{i}")).collect(),
            shop_id: "1".into(),
            service_id: "serv1".into(),
            scheduled_for: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
            status: BookingStatus::Open,
        }
    }

    #[test]
    fn test_discount_is_twenty_points_per_participant() {
        assert!((discount_percent(&make_booking(450.0, 0)) - 0.0).abs() < EPS);
        assert!((discount_percent(&make_booking(450.0, 1)) - 20.0).abs() < EPS);
        assert!((discount_percent(&make_booking(450.0, 2)) - 40.0).abs() < EPS);
        assert!((discount_percent(&make_booking(450.0, 5)) - 100.0).abs() < EPS);
    }

    #[test]
    fn test_two_participants_pay_270() {
        let booking = make_booking(450.0, 2);

        assert!((current_price(&booking) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_next_discount_is_capped() {
        assert!((next_discount_percent(&make_booking(450.0, 0)) - 10.0).abs() < EPS);
        assert!((next_discount_percent(&make_booking(450.0, 1)) - 30.0).abs() < EPS);
        assert!((next_discount_percent(&make_booking(450.0, 2)) - 40.0).abs() < EPS);
        assert!((next_discount_percent(&make_booking(450.0, 7)) - 40.0).abs() < EPS);
    }

    #[test]
    fn test_over_capacity_is_not_clamped() {
        let booking = make_booking(100.0, 6);

        assert!((discount_percent(&booking) - 120.0).abs() < EPS);
        assert!(current_price(&booking) < 0.0);
        assert!((fill_ratio(&booking) - 1.0).abs() < EPS);
        assert_eq!(open_seats(&booking), 0);
    }

    #[test]
    fn test_price_breakdown_adds_up() {
        let breakdown = price_breakdown(&make_booking(450.0, 2));

        assert!((breakdown.original - 450.0).abs() < EPS);
        assert!((breakdown.discount_amount - 180.0).abs() < EPS);
        assert!((breakdown.final_price - 270.0).abs() < EPS);
        assert!((breakdown.discount_amount + breakdown.final_price - breakdown.original).abs() < EPS);
    }

    #[test]
    fn test_join_group_is_pure() {
        let booking = make_booking(450.0, 2);

        let outcome = join_group(&booking, "newcomer");

        assert!(outcome.success);
        assert_eq!(booking.participant_count(), 2);
        assert_eq!(outcome.booking.participant_count(), 3);
        assert_eq!(outcome.booking.participants.last().map(String::as_str), Some("newcomer"));
        assert!((outcome.new_price - 180.0).abs() < EPS);
        // 60% current discount projects to the 40% ceiling
        assert!((outcome.next_price - 270.0).abs() < EPS);
    }

    #[test]
    fn test_join_group_existing_member_is_not_duplicated() {
        let booking = make_booking(450.0, 2);

        let outcome = join_group(&booking, "user0");

        assert!(outcome.success);
        assert_eq!(outcome.booking.participants, booking.participants);
        assert!((outcome.new_price - current_price(&booking)).abs() < EPS);
    }

    #[test]
    fn test_open_seats() {
        assert_eq!(open_seats(&make_booking(1.0, 0)), 5);
        assert_eq!(open_seats(&make_booking(1.0, 3)), 2);
    }
}
