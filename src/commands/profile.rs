// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Profile command - a user with their vehicles and reputation

use super::{emit_json, Session};
use crate::format::{format_date_br, format_phone, format_plate};
use crate::reputation::{reputation, Reputation};
use crate::types::{User, Vehicle};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct ProfileView<'a> {
    user: &'a User,
    vehicles: Vec<&'a Vehicle>,
    reputation: Reputation,
}

/// Show a user profile
pub fn run(session: &Session, user: Option<String>) -> Result<()> {
    let provider = &session.provider;
    let user = provider.require_user(&session.user(user))?;
    let view = ProfileView {
        user,
        vehicles: provider.vehicles_of_user(&user.id),
        reputation: reputation(provider, &user.id),
    };

    if session.json {
        return emit_json(&view);
    }

    println!("{}", session.style.title(&user.name));
    println!("  e-mail: {}", user.email);
    println!("  telefone: {}", format_phone(&user.phone));
    println!(
        "  membro desde: {}",
        format_date_br(user.created_at.date_naive())
    );

    println!("Meus veículos ({}):", view.vehicles.len());
    for vehicle in &view.vehicles {
        println!(
            "  {} {} {} · {} · cor: {}",
            vehicle.make,
            vehicle.model,
            vehicle.year,
            format_plate(&vehicle.plate),
            vehicle.color
        );
    }

    let rep = &view.reputation;
    let score = rep
        .score
        .map_or_else(|| "sem avaliações".to_string(), |s| format!("{s:.1}"));
    println!("Reputação: {}", session.style.title(&score));
    println!(
        "  {} avaliações · {} serviços · {} recomendações",
        rep.review_count, rep.completed_services, rep.recommendations
    );

    if rep.badges.is_empty() {
        println!("  {}", session.style.muted("Nenhum selo ainda"));
    } else {
        for badge in &rep.badges {
            println!(
                "  {} {} {}",
                badge.emoji(),
                badge.title(),
                session.style.muted(badge.description())
            );
        }
    }

    Ok(())
}
