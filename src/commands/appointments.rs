// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Appointment listing

use super::{emit_json, Session};
use crate::format::{format_date_time, format_plate, is_today, is_tomorrow, time_remaining_from_now};
use crate::provider::AppointmentDetails;
use crate::types::AppointmentStatus;
use anyhow::Result;
use tracing::info;

/// List appointments, optionally filtered by status
pub fn run(session: &Session, status: Option<AppointmentStatus>) -> Result<()> {
    let provider = &session.provider;
    let details: Vec<AppointmentDetails<'_>> = match status {
        Some(status) => {
            info!(%status, "Listing appointments");
            provider
                .appointments_by_status(status)
                .into_iter()
                .map(|a| provider.appointment_details(a))
                .filter(AppointmentDetails::is_complete)
                .collect()
        }
        None => provider.resolved_appointments(),
    };

    if session.json {
        return emit_json(&details);
    }

    if details.is_empty() {
        println!("Nenhum agendamento");
        println!("Você ainda não agendou nenhum serviço.");
        return Ok(());
    }

    let plural = if details.len() == 1 { "" } else { "s" };
    println!("{} agendamento{plural}", details.len());

    for entry in &details {
        let (Some(shop), Some(service), Some(vehicle)) = (entry.shop, entry.service, entry.vehicle) else {
            continue;
        };
        let appointment = entry.appointment;
        println!(
            "  {}  {} @ {} [{}]",
            session.style.status(appointment.status),
            session.style.title(&service.name),
            shop.name,
            appointment.id
        );

        let when = format_date_time(appointment.scheduled_at.date(), &appointment.time_label());
        let tag = if is_today(appointment.scheduled_at) {
            " · Hoje"
        } else if is_tomorrow(appointment.scheduled_at) {
            " · Amanhã"
        } else {
            ""
        };
        println!(
            "    {when}{tag} ({})",
            session.style.muted(&time_remaining_from_now(appointment.scheduled_at))
        );
        println!(
            "    {} {} {} · {}",
            vehicle.make,
            vehicle.model,
            vehicle.year,
            format_plate(&vehicle.plate)
        );
        if let Some(notes) = &appointment.notes {
            println!("    obs: {notes}");
        }
    }

    Ok(())
}
