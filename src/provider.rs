// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Read-only data provider over the in-memory dataset

use crate::error::{OficinaError, Result};
use crate::types::{
    Appointment, AppointmentStatus, BookingStatus, Community, Dataset, Referral, Review, Service,
    SharedBooking, SharedBookingDraft, Shop, User, Vehicle,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Dataset compiled into the binary
const BUILTIN_DATASET: &str = include_str!("../data/sample.json");

/// An appointment with its references resolved
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetails<'a> {
    /// The appointment itself
    pub appointment: &'a Appointment,
    /// Resolved shop, if the reference is valid
    pub shop: Option<&'a Shop>,
    /// Resolved service, if the reference is valid
    pub service: Option<&'a Service>,
    /// Resolved vehicle, if the reference is valid
    pub vehicle: Option<&'a Vehicle>,
}

impl AppointmentDetails<'_> {
    /// Whether every reference resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shop.is_some() && self.service.is_some() && self.vehicle.is_some()
    }
}

/// Immutable snapshot of every collection the app reads
///
/// Entities are created once when the provider is built and never mutated.
/// Commands that look like writes return new records and leave the provider
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct DataProvider {
    dataset: Dataset,
}

impl DataProvider {
    /// Wrap an existing dataset
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Provider over the dataset bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Parse a dataset from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        debug!(
            shops = dataset.shops.len(),
            services = dataset.services.len(),
            appointments = dataset.appointments.len(),
            shared_bookings = dataset.shared_bookings.len(),
            "Dataset loaded"
        );
        Ok(Self::new(dataset))
    }

    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| OficinaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The underlying dataset
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    // =========================================================================
    // Bulk access
    // =========================================================================

    /// All users
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.dataset.users
    }

    /// All shops
    #[must_use]
    pub fn shops(&self) -> &[Shop] {
        &self.dataset.shops
    }

    /// All services
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.dataset.services
    }

    /// All vehicles
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.dataset.vehicles
    }

    /// All appointments
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.dataset.appointments
    }

    /// All reviews
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.dataset.reviews
    }

    /// All communities
    #[must_use]
    pub fn communities(&self) -> &[Community] {
        &self.dataset.communities
    }

    /// All shared bookings
    #[must_use]
    pub fn shared_bookings(&self) -> &[SharedBooking] {
        &self.dataset.shared_bookings
    }

    /// All referrals
    #[must_use]
    pub fn referrals(&self) -> &[Referral] {
        &self.dataset.referrals
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The signed-in user, if present in the dataset
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user_by_id(&self.dataset.current_user_id)
    }

    /// Get a user by ID
    #[must_use]
    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        self.dataset.users.iter().find(|u| u.id == id)
    }

    /// Get a shop by ID
    #[must_use]
    pub fn shop_by_id(&self, id: &str) -> Option<&Shop> {
        self.dataset.shops.iter().find(|s| s.id == id)
    }

    /// Get a vehicle by ID
    #[must_use]
    pub fn vehicle_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.dataset.vehicles.iter().find(|v| v.id == id)
    }

    /// Get a service by ID
    #[must_use]
    pub fn service_by_id(&self, id: &str) -> Option<&Service> {
        self.dataset.services.iter().find(|s| s.id == id)
    }

    /// Get a shared booking by ID
    #[must_use]
    pub fn shared_booking_by_id(&self, id: &str) -> Option<&SharedBooking> {
        self.dataset.shared_bookings.iter().find(|b| b.id == id)
    }

    /// Get a shop by ID, failing when absent
    pub fn require_shop(&self, id: &str) -> Result<&Shop> {
        self.shop_by_id(id).ok_or_else(|| OficinaError::NotFound {
            kind: "shop",
            id: id.to_string(),
        })
    }

    /// Get a user by ID, failing when absent
    pub fn require_user(&self, id: &str) -> Result<&User> {
        self.user_by_id(id).ok_or_else(|| OficinaError::NotFound {
            kind: "user",
            id: id.to_string(),
        })
    }

    /// Get a shared booking by ID, failing when absent
    pub fn require_shared_booking(&self, id: &str) -> Result<&SharedBooking> {
        self.shared_booking_by_id(id).ok_or_else(|| OficinaError::NotFound {
            kind: "shared booking",
            id: id.to_string(),
        })
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Services offered by a shop
    #[must_use]
    pub fn services_for_shop(&self, shop_id: &str) -> Vec<&Service> {
        self.dataset
            .services
            .iter()
            .filter(|s| s.shop_id == shop_id)
            .collect()
    }

    /// Reviews left for a shop
    #[must_use]
    pub fn reviews_for_shop(&self, shop_id: &str) -> Vec<&Review> {
        self.dataset
            .reviews
            .iter()
            .filter(|r| r.shop_id == shop_id)
            .collect()
    }

    /// Vehicles owned by a user
    #[must_use]
    pub fn vehicles_of_user(&self, user_id: &str) -> Vec<&Vehicle> {
        self.dataset
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id)
            .collect()
    }

    /// Reviews written by a user
    #[must_use]
    pub fn reviews_by_user(&self, user_id: &str) -> Vec<&Review> {
        self.dataset
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect()
    }

    /// Shared bookings the user takes part in
    #[must_use]
    pub fn shared_bookings_of_user(&self, user_id: &str) -> Vec<&SharedBooking> {
        self.dataset
            .shared_bookings
            .iter()
            .filter(|b| b.has_participant(user_id))
            .collect()
    }

    /// Appointments with the given status, in dataset order
    #[must_use]
    pub fn appointments_by_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.dataset
            .appointments
            .iter()
            .filter(|a| a.status == status)
            .collect()
    }

    /// Resolve the shop, service and vehicle an appointment points at
    #[must_use]
    pub fn appointment_details<'a>(&'a self, appointment: &'a Appointment) -> AppointmentDetails<'a> {
        AppointmentDetails {
            appointment,
            shop: self.shop_by_id(&appointment.shop_id),
            service: self.service_by_id(&appointment.service_id),
            vehicle: self.vehicle_by_id(&appointment.vehicle_id),
        }
    }

    /// Details for every appointment whose references all resolve
    ///
    /// Appointments with a dangling reference are skipped, not reported.
    #[must_use]
    pub fn resolved_appointments(&self) -> Vec<AppointmentDetails<'_>> {
        self.dataset
            .appointments
            .iter()
            .map(|a| self.appointment_details(a))
            .filter(AppointmentDetails::is_complete)
            .collect()
    }

    /// Communities the user belongs to, per the membership relation
    #[must_use]
    pub fn communities_of_user(&self, user_id: &str) -> Vec<&Community> {
        self.dataset
            .communities
            .iter()
            .filter(|c| {
                self.dataset
                    .memberships
                    .iter()
                    .any(|m| m.user_id == user_id && m.community_id == c.id)
            })
            .collect()
    }

    /// Materialise a new shared booking from a draft
    ///
    /// The record gets a content-derived ID and an open status. It is returned
    /// to the caller and not stored; the provider stays unchanged.
    #[must_use]
    pub fn create_shared_booking(&self, draft: SharedBookingDraft) -> SharedBooking {
        let id = SharedBooking::generate_id(
            &draft.title,
            &draft.shop_id,
            &draft.service_id,
            draft.scheduled_for,
        );
        debug!(%id, title = %draft.title, "Synthesized shared booking");
        SharedBooking {
            id,
            title: draft.title,
            description: draft.description,
            base_cost: draft.base_cost,
            participants: draft.participants,
            shop_id: draft.shop_id,
            service_id: draft.service_id,
            scheduled_for: draft.scheduled_for,
            status: BookingStatus::Open,
        }
    }
}
