// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Referral codes and referral queries

use crate::format::format_currency;
use crate::types::Referral;

/// Bonus both sides of a referral receive, in BRL
pub const REFERRAL_BONUS: f64 = 50.0;

/// Referral code for a user: `REFERENCIA_` plus the first six characters
/// of the upper-cased user ID
#[must_use]
pub fn referral_code(user_id: &str) -> String {
    let prefix: String = user_id.to_uppercase().chars().take(6).collect();
    format!("REFERENCIA_{prefix}")
}

/// Invitation text shared with friends
#[must_use]
pub fn share_message(code: &str) -> String {
    format!(
        "Juntem-se a mim no app de agendamento mecânico! Use o código {code} e receba {} de desconto. Vamos economizar juntos!",
        format_currency(REFERRAL_BONUS)
    )
}

/// Referrals made by a user
#[must_use]
pub fn referrals_by<'a>(referrals: &'a [Referral], user_id: &str) -> Vec<&'a Referral> {
    referrals.iter().filter(|r| r.referrer_id == user_id).collect()
}

/// Referrals whose discount has not been redeemed yet
#[must_use]
pub fn unused<'a>(referrals: &[&'a Referral]) -> Vec<&'a Referral> {
    referrals.iter().copied().filter(|r| !r.used).collect()
}

/// Total discount still available across referrals
#[must_use]
pub fn pending_credit(referrals: &[&Referral]) -> f64 {
    referrals.iter().filter(|r| !r.used).map(|r| r.discount).sum()
}
