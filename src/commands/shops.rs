// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shop commands - search the catalog and show one shop

use super::{emit_json, Session};
use crate::catalog::{SortKey, ViewState};
use crate::format::{format_currency, format_duration, format_phone};
use crate::types::{weekday_label, Review, Service, Shop};
use anyhow::Result;
use serde::Serialize;
use tracing::info;

/// Run the shop search
pub fn run(session: &Session, query: Option<String>, sort: Option<SortKey>) -> Result<()> {
    let mut state = ViewState::with_sort(sort.unwrap_or(session.config.default_sort));
    state.set_query(query.unwrap_or_default());
    info!(query = %state.query, sort = %state.sort, "Searching shops");

    let results = state.results(session.provider.shops());

    if session.json {
        return emit_json(&results);
    }

    if results.is_empty() {
        println!("Nenhuma oficina encontrada");
        println!("Tente buscar por outro termo");
        return Ok(());
    }

    let plural = if results.len() == 1 { "" } else { "s" };
    println!("{} oficina{plural} encontrada{plural}", results.len());
    for shop in results {
        println!(
            "  {} [{}]  ★ {:.1} ({} avaliações)",
            session.style.title(&shop.name),
            shop.id,
            shop.rating,
            shop.review_count
        );
        println!("    {}", session.style.muted(&shop.address));
        if !shop.specialties.is_empty() {
            println!("    {}", shop.specialties.join(" · "));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ShopView<'a> {
    shop: &'a Shop,
    services: Vec<&'a Service>,
    reviews: Vec<&'a Review>,
}

/// Show a shop with its services and reviews
pub fn show(session: &Session, id: &str) -> Result<()> {
    let provider = &session.provider;
    let shop = provider.require_shop(id)?;
    let view = ShopView {
        shop,
        services: provider.services_for_shop(&shop.id),
        reviews: provider.reviews_for_shop(&shop.id),
    };

    if session.json {
        return emit_json(&view);
    }

    println!("{}", session.style.title(&shop.name));
    println!("  ★ {:.1} ({} avaliações)", shop.rating, shop.review_count);
    println!("  endereço: {}", shop.address);
    println!("  telefone: {}", format_phone(&shop.phone));
    println!("  e-mail: {}", shop.email);
    println!(
        "  horário: {} - {}",
        shop.opens_at.format("%H:%M"),
        shop.closes_at.format("%H:%M")
    );
    let days: Vec<&str> = shop.operating_days.iter().map(|day| weekday_label(*day)).collect();
    println!("  dias: {}", days.join(", "));

    println!("  serviços ({}):", view.services.len());
    for service in &view.services {
        println!(
            "    {} [{}] {} ({}, {})",
            service.name,
            service.id,
            session.style.money(&format_currency(service.price)),
            format_duration(service.estimated_minutes),
            service.category.label()
        );
    }

    if !view.reviews.is_empty() {
        println!("  avaliações:");
        for review in &view.reviews {
            println!("    {} {}", "★".repeat(usize::from(review.rating)), review.comment);
        }
    }

    Ok(())
}
