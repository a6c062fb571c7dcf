// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Oficina library - scheduling core for vehicle-maintenance workshops
//!
//! This crate provides the catalog search over repair shops, the
//! collaborative (group) pricing engine, and the pt-BR formatting and
//! validation helpers used by the front-end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod pricing;
pub mod provider;
pub mod referral;
pub mod reputation;
pub mod validation;

/// Core data types shared by every engine
pub mod types {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
    use serde::{Deserialize, Serialize};
    use sha2::{Digest, Sha256};
    use std::fmt;
    use std::str::FromStr;

    // =========================================================================
    // Users
    // =========================================================================

    /// An app user
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct User {
        /// Unique identifier
        pub id: String,
        /// Display name
        pub name: String,
        /// Contact e-mail
        pub email: String,
        /// Raw phone digits
        pub phone: String,
        /// Avatar URL
        #[serde(default)]
        pub photo: Option<String>,
        /// When the account was created
        pub created_at: DateTime<Utc>,
    }

    // =========================================================================
    // Shops and Services
    // =========================================================================

    /// A repair-service provider
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Shop {
        /// Unique identifier
        pub id: String,
        /// Trading name
        pub name: String,
        /// Street address
        pub address: String,
        /// Raw phone digits
        pub phone: String,
        /// Contact e-mail
        pub email: String,
        /// Average rating (0.0 to 5.0, one decimal)
        pub rating: f64,
        /// Number of reviews behind the rating
        pub review_count: u32,
        /// Storefront picture URL
        #[serde(default)]
        pub photo: Option<String>,
        /// Specialty tags used by search
        #[serde(default)]
        pub specialties: Vec<String>,
        /// Opening time
        pub opens_at: NaiveTime,
        /// Closing time
        pub closes_at: NaiveTime,
        /// Days of the week the shop operates
        #[serde(default, with = "operating_days")]
        pub operating_days: Vec<Weekday>,
    }

    /// Days of the week, Monday first
    pub const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// pt-BR abbreviation of a weekday, as stored in the dataset
    #[must_use]
    pub fn weekday_label(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Seg",
            Weekday::Tue => "Ter",
            Weekday::Wed => "Qua",
            Weekday::Thu => "Qui",
            Weekday::Fri => "Sex",
            Weekday::Sat => "Sáb",
            Weekday::Sun => "Dom",
        }
    }

    /// Parse a weekday from its pt-BR abbreviation
    ///
    /// Case is ignored, and chrono's English names (`Mon`, `Tuesday`) are
    /// accepted as well.
    #[must_use]
    pub fn parse_weekday(label: &str) -> Option<Weekday> {
        let lower = label.to_lowercase();
        WEEK.into_iter()
            .find(|day| weekday_label(*day).to_lowercase() == lower)
            .or_else(|| label.parse().ok())
    }

    /// Serde adapter storing operating days by their pt-BR labels
    mod operating_days {
        use super::{parse_weekday, weekday_label, Weekday};
        use serde::de::Error;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(days.iter().map(|day| weekday_label(*day)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|label| {
                    parse_weekday(label).ok_or_else(|| D::Error::custom(format!("unknown weekday: {label}")))
                })
                .collect()
        }
    }

    impl Shop {
        /// Whether the shop is open on `day` at `time`
        ///
        /// The window is half-open: a shop closing at 18:00 is closed at 18:00.
        #[must_use]
        pub fn is_open_at(&self, day: Weekday, time: NaiveTime) -> bool {
            self.operating_days.contains(&day) && time >= self.opens_at && time < self.closes_at
        }
    }

    /// Service category
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ServiceCategory {
        /// Scheduled maintenance
        #[serde(rename = "manutencao")]
        Maintenance,
        /// Repair work
        #[serde(rename = "reparo")]
        Repair,
        /// Inspection
        #[serde(rename = "inspecao")]
        Inspection,
        /// Washing and detailing
        #[serde(rename = "limpeza")]
        Cleaning,
    }

    impl ServiceCategory {
        /// Display label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Maintenance => "Manutenção",
                Self::Repair => "Reparo",
                Self::Inspection => "Inspeção",
                Self::Cleaning => "Limpeza",
            }
        }
    }

    /// A priced offering tied to a shop
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Service {
        /// Unique identifier
        pub id: String,
        /// Owning shop ID
        pub shop_id: String,
        /// Service name
        pub name: String,
        /// Description
        pub description: String,
        /// Price in BRL
        pub price: f64,
        /// Estimated duration in minutes
        pub estimated_minutes: u32,
        /// Category
        pub category: ServiceCategory,
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// A user's vehicle
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Vehicle {
        /// Unique identifier
        pub id: String,
        /// Owning user ID
        pub user_id: String,
        /// Manufacturer
        pub make: String,
        /// Model
        pub model: String,
        /// Model year
        pub year: u16,
        /// Licence plate, AAA9999
        pub plate: String,
        /// Colour
        pub color: String,
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Appointment lifecycle status
    ///
    /// Transitions are driven externally; nothing in this crate moves an
    /// appointment between states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum AppointmentStatus {
        /// Waiting for the shop to confirm
        #[serde(rename = "pendente")]
        Pending,
        /// Confirmed by the shop
        #[serde(rename = "confirmado")]
        Confirmed,
        /// Vehicle is being serviced
        #[serde(rename = "em_andamento")]
        InProgress,
        /// Service finished
        #[serde(rename = "concluido")]
        Completed,
        /// Cancelled by either side
        #[serde(rename = "cancelado")]
        Cancelled,
    }

    impl AppointmentStatus {
        /// Every status, in lifecycle order
        pub const ALL: [Self; 5] = [
            Self::Pending,
            Self::Confirmed,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
        ];

        /// Wire code
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Pending => "pendente",
                Self::Confirmed => "confirmado",
                Self::InProgress => "em_andamento",
                Self::Completed => "concluido",
                Self::Cancelled => "cancelado",
            }
        }

        /// Display label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Pending => "Pendente",
                Self::Confirmed => "Confirmado",
                Self::InProgress => "Em Andamento",
                Self::Completed => "Concluído",
                Self::Cancelled => "Cancelado",
            }
        }

        /// Short badge marker shown next to the label
        #[must_use]
        pub fn marker(&self) -> &'static str {
            match self {
                Self::Pending => "⏳",
                Self::Confirmed => "✓",
                Self::InProgress => "🔄",
                Self::Completed => "✓✓",
                Self::Cancelled => "✕",
            }
        }
    }

    impl fmt::Display for AppointmentStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.code())
        }
    }

    impl FromStr for AppointmentStatus {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::ALL
                .into_iter()
                .find(|status| status.code() == s)
                .ok_or_else(|| {
                    format!("unknown status: {s}. Valid: pendente, confirmado, em_andamento, concluido, cancelado")
                })
        }
    }

    /// A user's scheduled booking of a service
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Appointment {
        /// Unique identifier
        pub id: String,
        /// Booking user ID
        pub user_id: String,
        /// Vehicle ID
        pub vehicle_id: String,
        /// Shop ID
        pub shop_id: String,
        /// Service ID
        pub service_id: String,
        /// Scheduled local date and time
        pub scheduled_at: NaiveDateTime,
        /// Current status
        pub status: AppointmentStatus,
        /// Free-text note for the shop
        #[serde(default)]
        pub notes: Option<String>,
        /// When the appointment was created
        pub created_at: DateTime<Utc>,
    }

    impl Appointment {
        /// Scheduled time as `HH:mm`
        #[must_use]
        pub fn time_label(&self) -> String {
            self.scheduled_at.format("%H:%M").to_string()
        }
    }

    /// A review left after a completed appointment
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Review {
        /// Unique identifier
        pub id: String,
        /// Reviewed appointment ID
        pub appointment_id: String,
        /// Reviewer ID
        pub user_id: String,
        /// Reviewed shop ID
        pub shop_id: String,
        /// Stars, 1 to 5
        pub rating: u8,
        /// Comment
        pub comment: String,
        /// When the review was written
        pub created_at: DateTime<Utc>,
    }

    // =========================================================================
    // Shared Bookings (group discounts)
    // =========================================================================

    /// Shared booking status
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum BookingStatus {
        /// Still accepting participants
        #[serde(rename = "aberto")]
        Open,
        /// No longer accepting participants
        #[serde(rename = "fechado")]
        Closed,
    }

    /// A group-discount arrangement where several users book one service
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct SharedBooking {
        /// Unique identifier
        pub id: String,
        /// Headline
        pub title: String,
        /// Description
        pub description: String,
        /// Undiscounted cost in BRL
        pub base_cost: f64,
        /// Participant user IDs, in join order
        #[serde(default)]
        pub participants: Vec<String>,
        /// Target shop ID
        pub shop_id: String,
        /// Target service ID
        pub service_id: String,
        /// Scheduled date
        pub scheduled_for: NaiveDate,
        /// Status
        pub status: BookingStatus,
    }

    impl SharedBooking {
        /// Generate a deterministic ID from the booking's identifying content
        #[must_use]
        pub fn generate_id(title: &str, shop_id: &str, service_id: &str, scheduled_for: NaiveDate) -> String {
            let mut hasher = Sha256::new();
            hasher.update(title.as_bytes());
            hasher.update(shop_id.as_bytes());
            hasher.update(service_id.as_bytes());
            hasher.update(scheduled_for.to_string().as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("comp:{}", &hash[..8])
        }

        /// Number of participants
        #[must_use]
        pub fn participant_count(&self) -> usize {
            self.participants.len()
        }

        /// Whether `user_id` already takes part
        #[must_use]
        pub fn has_participant(&self, user_id: &str) -> bool {
            self.participants.iter().any(|p| p == user_id)
        }
    }

    /// A shared booking before it has an identity
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct SharedBookingDraft {
        /// Headline
        pub title: String,
        /// Description
        pub description: String,
        /// Undiscounted cost in BRL
        pub base_cost: f64,
        /// Initial participants
        #[serde(default)]
        pub participants: Vec<String>,
        /// Target shop ID
        pub shop_id: String,
        /// Target service ID
        pub service_id: String,
        /// Scheduled date
        pub scheduled_for: NaiveDate,
    }

    // =========================================================================
    // Communities and Referrals
    // =========================================================================

    /// A themed user group
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Community {
        /// Unique identifier
        pub id: String,
        /// Name
        pub name: String,
        /// Description
        pub description: String,
        /// Member count as advertised
        pub member_count: u32,
        /// Theme tag
        pub theme: String,
        /// Creator user ID
        pub creator_id: String,
        /// Creation date
        pub created_on: NaiveDate,
    }

    /// A user's membership in a community
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Membership {
        /// Member user ID
        pub user_id: String,
        /// Community ID
        pub community_id: String,
    }

    /// A tracked invitation between two users
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Referral {
        /// Unique identifier
        pub id: String,
        /// Inviting user ID
        pub referrer_id: String,
        /// Invited user ID
        pub referee_id: String,
        /// Discount granted in BRL
        pub discount: f64,
        /// Creation date
        pub created_on: NaiveDate,
        /// Whether the discount was redeemed
        #[serde(default)]
        pub used: bool,
    }

    // =========================================================================
    // Dataset
    // =========================================================================

    /// The complete in-memory dataset
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct Dataset {
        /// ID of the signed-in user
        #[serde(default)]
        pub current_user_id: String,
        /// All users
        #[serde(default)]
        pub users: Vec<User>,
        /// All shops
        #[serde(default)]
        pub shops: Vec<Shop>,
        /// All services
        #[serde(default)]
        pub services: Vec<Service>,
        /// All vehicles
        #[serde(default)]
        pub vehicles: Vec<Vehicle>,
        /// All appointments
        #[serde(default)]
        pub appointments: Vec<Appointment>,
        /// All reviews
        #[serde(default)]
        pub reviews: Vec<Review>,
        /// All communities
        #[serde(default)]
        pub communities: Vec<Community>,
        /// User-to-community membership relation
        #[serde(default)]
        pub memberships: Vec<Membership>,
        /// All shared bookings
        #[serde(default)]
        pub shared_bookings: Vec<SharedBooking>,
        /// All referrals
        #[serde(default)]
        pub referrals: Vec<Referral>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
