// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! User reputation derived from the dataset
//!
//! Nothing here is stored. Score, counters and badges are recomputed from
//! reviews, appointments, referrals, shared bookings and memberships each
//! time a profile is built.

use crate::provider::DataProvider;
use crate::referral::referrals_by;
use crate::types::AppointmentStatus;
use serde::Serialize;

/// Well-rated reviews needed for [`Badge::Trusted`]
pub const TRUSTED_MIN_REVIEWS: usize = 10;

/// Lowest rating that counts towards [`Badge::Trusted`]
pub const TRUSTED_MIN_RATING: u8 = 4;

/// Shared bookings needed for [`Badge::Collaborative`]
pub const COLLABORATIVE_MIN_BOOKINGS: usize = 5;

/// Community memberships needed for [`Badge::CommunityActive`]
pub const COMMUNITY_MIN_MEMBERSHIPS: usize = 3;

/// An achievement shown on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Badge {
    /// 10+ reviews rated 4 stars or more
    #[serde(rename = "usuario_confiavel")]
    Trusted,
    /// Took part in 5+ shared bookings
    #[serde(rename = "colaborativo")]
    Collaborative,
    /// Member of 3+ communities
    #[serde(rename = "ativo_na_comunidade")]
    CommunityActive,
}

impl Badge {
    /// Every badge, in display order
    pub const ALL: [Self; 3] = [Self::Trusted, Self::Collaborative, Self::CommunityActive];

    /// Display title
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Trusted => "Usuário Confiável",
            Self::Collaborative => "Colaborativo",
            Self::CommunityActive => "Ativo na Comunidade",
        }
    }

    /// Rule the badge rewards
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Trusted => "10+ avaliações com 4+ estrelas",
            Self::Collaborative => "Participou de 5+ compartilhamentos",
            Self::CommunityActive => "Membro de 3+ comunidades",
        }
    }

    /// Emoji shown next to the title
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Trusted => "⭐",
            Self::Collaborative => "🤝",
            Self::CommunityActive => "💬",
        }
    }

    fn earned(self, activity: &Activity) -> bool {
        match self {
            Self::Trusted => activity.well_rated_reviews >= TRUSTED_MIN_REVIEWS,
            Self::Collaborative => activity.shared_bookings >= COLLABORATIVE_MIN_BOOKINGS,
            Self::CommunityActive => activity.communities >= COMMUNITY_MIN_MEMBERSHIPS,
        }
    }
}

/// Raw counters behind the badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// Reviews rated at least [`TRUSTED_MIN_RATING`]
    pub well_rated_reviews: usize,
    /// Shared bookings the user takes part in
    pub shared_bookings: usize,
    /// Communities the user belongs to
    pub communities: usize,
}

/// A user's reputation summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reputation {
    /// Mean review rating, one decimal; `None` without reviews
    pub score: Option<f64>,
    /// Reviews the user wrote
    pub review_count: usize,
    /// Appointments that reached `concluido`
    pub completed_services: usize,
    /// Referrals the user made
    pub recommendations: usize,
    /// Counters behind the badges
    pub activity: Activity,
    /// Badges earned, in display order
    pub badges: Vec<Badge>,
}

/// Mean of the ratings rounded to one decimal
#[must_use]
pub fn score(ratings: &[u8]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let total: f64 = ratings.iter().map(|r| f64::from(*r)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = total / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Badges earned for the given activity
#[must_use]
pub fn badges(activity: &Activity) -> Vec<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|badge| badge.earned(activity))
        .collect()
}

/// Build the reputation of `user_id`
///
/// Unknown users get an empty reputation rather than an error.
#[must_use]
pub fn reputation(provider: &DataProvider, user_id: &str) -> Reputation {
    let ratings: Vec<u8> = provider
        .reviews_by_user(user_id)
        .iter()
        .map(|r| r.rating)
        .collect();

    let activity = Activity {
        well_rated_reviews: ratings.iter().filter(|r| **r >= TRUSTED_MIN_RATING).count(),
        shared_bookings: provider.shared_bookings_of_user(user_id).len(),
        communities: provider.communities_of_user(user_id).len(),
    };

    Reputation {
        score: score(&ratings),
        review_count: ratings.len(),
        completed_services: provider
            .appointments()
            .iter()
            .filter(|a| a.user_id == user_id && a.status == AppointmentStatus::Completed)
            .count(),
        recommendations: referrals_by(provider.referrals(), user_id).len(),
        badges: badges(&activity),
        activity,
    }
}
