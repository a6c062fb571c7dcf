// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shared booking commands - group pricing and joining

use super::{emit_json, Session};
use crate::format::{format_currency, format_date_br};
use crate::pricing::{self, PriceBreakdown, MAX_GROUP_SIZE};
use crate::types::SharedBooking;
use anyhow::Result;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct GroupView<'a> {
    booking: &'a SharedBooking,
    breakdown: PriceBreakdown,
    next_discount_percent: f64,
    open_seats: u32,
}

/// List shared bookings with their current pricing
pub fn list(session: &Session) -> Result<()> {
    let bookings = session.provider.shared_bookings();

    if session.json {
        let views: Vec<GroupView<'_>> = bookings
            .iter()
            .map(|booking| GroupView {
                booking,
                breakdown: pricing::price_breakdown(booking),
                next_discount_percent: pricing::next_discount_percent(booking),
                open_seats: pricing::open_seats(booking),
            })
            .collect();
        return emit_json(&views);
    }

    if bookings.is_empty() {
        println!("Nenhum compartilhamento aberto");
        return Ok(());
    }

    println!("Compartilhamentos ({}):", bookings.len());
    for booking in bookings {
        print_booking(session, booking);
    }

    Ok(())
}

fn print_booking(session: &Session, booking: &SharedBooking) {
    let style = &session.style;
    let breakdown = pricing::price_breakdown(booking);
    let shop_name = session
        .provider
        .shop_by_id(&booking.shop_id)
        .map_or(booking.shop_id.as_str(), |s| s.name.as_str());

    println!("  {} [{}]", style.title(&booking.title), booking.id);
    println!("    📍 {shop_name} · 📅 {}", format_date_br(booking.scheduled_for));
    println!(
        "    {} / {MAX_GROUP_SIZE} participantes · até {:.0}% OFF",
        booking.participant_count(),
        pricing::next_discount_percent(booking)
    );
    println!("    Preço original: {}", format_currency(breakdown.original));
    println!(
        "    Desconto ({:.0}%): -{}",
        breakdown.discount_percent,
        format_currency(breakdown.discount_amount)
    );
    println!(
        "    Seu preço agora: {}",
        style.money(&format_currency(breakdown.final_price))
    );
}

/// Join a user to a shared booking and report the new prices
///
/// Nothing is persisted; the outcome describes the updated group.
pub fn join(session: &Session, booking_id: &str, user: Option<String>) -> Result<()> {
    let booking = session.provider.require_shared_booking(booking_id)?;
    let user = session.user(user);
    let already_in = booking.has_participant(&user);
    info!(booking = booking_id, %user, "Joining shared booking");

    let outcome = pricing::join_group(booking, &user);

    if session.json {
        return emit_json(&outcome);
    }

    if already_in {
        println!("{user} já participa de {}", booking.title);
    } else {
        println!("{user} entrou em {}", booking.title);
    }
    println!(
        "  participantes: {} / {MAX_GROUP_SIZE}",
        outcome.booking.participant_count()
    );
    println!("  novo preço: {}", session.style.money(&format_currency(outcome.new_price)));
    println!("  próximo preço: {}", format_currency(outcome.next_price));

    Ok(())
}
