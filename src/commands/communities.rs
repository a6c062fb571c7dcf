// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Community listing

use super::{emit_json, Session};
use crate::format::format_date_br;
use crate::types::Community;
use anyhow::Result;

/// List every community, or only those `user` belongs to
pub fn run(session: &Session, user: Option<String>) -> Result<()> {
    let provider = &session.provider;
    let communities: Vec<&Community> = match &user {
        Some(user) => provider.communities_of_user(user),
        None => provider.communities().iter().collect(),
    };

    if session.json {
        return emit_json(&communities);
    }

    if communities.is_empty() {
        println!("Nenhuma comunidade encontrada");
        return Ok(());
    }

    println!("Comunidades ({}):", communities.len());
    for community in communities {
        println!(
            "  {} [{}] · {} membros · #{}",
            session.style.title(&community.name),
            community.id,
            community.member_count,
            community.theme
        );
        println!("    {}", community.description);
        println!(
            "    {}",
            session
                .style
                .muted(&format!("criada em {}", format_date_br(community.created_on)))
        );
    }

    Ok(())
}
