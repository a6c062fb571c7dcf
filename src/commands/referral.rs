// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Referral command - show a user's code and invitations

use super::{emit_json, Session};
use crate::format::{format_currency, format_date_br};
use crate::referral::{pending_credit, referral_code, referrals_by, share_message, REFERRAL_BONUS};
use crate::types::Referral;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct ReferralView<'a> {
    user_id: &'a str,
    code: String,
    bonus: f64,
    pending_credit: f64,
    referrals: Vec<&'a Referral>,
}

/// Show the referral code and the user's referrals
pub fn run(session: &Session, user: Option<String>) -> Result<()> {
    let user = session.user(user);
    let referrals = referrals_by(session.provider.referrals(), &user);
    let view = ReferralView {
        user_id: &user,
        code: referral_code(&user),
        bonus: REFERRAL_BONUS,
        pending_credit: pending_credit(&referrals),
        referrals,
    };

    if session.json {
        return emit_json(&view);
    }

    println!("Seu código de referência: {}", session.style.title(&view.code));
    println!(
        "  você ganha {} · seu amigo ganha {}",
        format_currency(view.bonus),
        format_currency(view.bonus)
    );
    println!("  {}", session.style.muted(&share_message(&view.code)));

    if view.referrals.is_empty() {
        println!("Nenhuma indicação ainda");
        return Ok(());
    }

    println!("Indicações ({}):", view.referrals.len());
    for referral in &view.referrals {
        let state = if referral.used { "usada" } else { "disponível" };
        println!(
            "  {} · {} · {} · {state}",
            referral.referee_id,
            format_currency(referral.discount),
            format_date_br(referral.created_on)
        );
    }
    println!(
        "Crédito disponível: {}",
        session.style.money(&format_currency(view.pending_credit))
    );

    Ok(())
}
