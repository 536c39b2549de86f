use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};
use uuid::Uuid;

use doctor_cell::DoctorService;
use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, ClinicSettings,
    RescheduleAppointmentRequest, SchedulingError,
};
use crate::services::conflict::conflicting_appointment;

pub struct AppointmentService {
    store: Arc<dyn KeyValueStore>,
    doctors: DoctorService,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let doctors = DoctorService::new(store.clone());
        Self { store, doctors }
    }

    pub fn settings(&self) -> Result<ClinicSettings, SchedulingError> {
        Ok(read_or(
            self.store.as_ref(),
            keys::CLINIC_SETTINGS,
            ClinicSettings::default(),
        )?)
    }

    pub fn save_settings(&self, settings: &ClinicSettings) -> Result<(), SchedulingError> {
        Ok(write(self.store.as_ref(), keys::CLINIC_SETTINGS, settings)?)
    }

    pub fn list(&self) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(read_or(self.store.as_ref(), keys::APPOINTMENTS, vec![])?)
    }

    pub fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments: Vec<Appointment> = self
            .list()?
            .into_iter()
            .filter(|a| a.date == date)
            .collect();
        appointments.sort_by_key(|a| a.time);
        Ok(appointments)
    }

    pub fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments: Vec<Appointment> = self
            .list()?
            .into_iter()
            .filter(|a| a.doctor_id == doctor_id)
            .collect();
        appointments.sort_by_key(|a| (a.date, a.time));
        Ok(appointments)
    }

    pub fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.list()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(SchedulingError::NotFound)
    }

    /// Book a new appointment. Requires an active doctor and either a
    /// registered patient or a walk-in name; refuses any slot that overlaps
    /// an existing booking for the same doctor and date.
    pub fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, SchedulingError> {
        let doctor = self
            .doctors
            .get(request.doctor_id)
            .map_err(|_| SchedulingError::DoctorUnavailable)?;
        if !doctor.is_active {
            return Err(SchedulingError::DoctorUnavailable);
        }

        let has_walk_in_name = request
            .temp_patient_name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        if request.patient_id.is_none() && !has_walk_in_name {
            return Err(SchedulingError::ValidationError(
                "An appointment needs a patient or a walk-in name".to_string(),
            ));
        }

        let appointments = self.list()?;
        if let Some(existing) = conflicting_appointment(
            &appointments,
            request.date,
            request.time,
            request.duration_minutes,
            request.doctor_id,
            None,
        ) {
            warn!(
                "Booking refused: overlaps appointment {} for doctor {}",
                existing.id, request.doctor_id
            );
            return Err(SchedulingError::Conflict {
                conflicting_id: existing.id,
            });
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            date: request.date,
            time: request.time,
            duration_minutes: request.duration_minutes,
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            temp_patient_name: request.temp_patient_name,
            treatment_type: request.treatment_type,
            status: AppointmentStatus::Scheduled,
            notes: request.notes,
        };

        let mut appointments = appointments;
        appointments.push(appointment.clone());
        write(self.store.as_ref(), keys::APPOINTMENTS, &appointments)?;

        debug!("Appointment {} booked at {} {}", appointment.id, appointment.date, appointment.time);
        Ok(appointment)
    }

    /// Move an appointment to a new date/time, checking conflicts with the
    /// appointment itself excluded so it never collides with its own slot.
    pub fn reschedule(
        &self,
        id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.list()?;
        let index = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or(SchedulingError::NotFound)?;

        let duration = request
            .duration_minutes
            .unwrap_or(appointments[index].duration_minutes);
        let doctor_id = appointments[index].doctor_id;

        if let Some(existing) = conflicting_appointment(
            &appointments,
            request.date,
            request.time,
            duration,
            doctor_id,
            Some(id),
        ) {
            return Err(SchedulingError::Conflict {
                conflicting_id: existing.id,
            });
        }

        let apt = &mut appointments[index];
        apt.date = request.date;
        apt.time = request.time;
        apt.duration_minutes = duration;
        let updated = apt.clone();

        write(self.store.as_ref(), keys::APPOINTMENTS, &appointments)?;
        debug!("Appointment {} rescheduled to {} {}", id, updated.date, updated.time);
        Ok(updated)
    }

    pub fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.list()?;
        let apt = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(SchedulingError::NotFound)?;
        apt.status = status;
        let updated = apt.clone();
        write(self.store.as_ref(), keys::APPOINTMENTS, &appointments)?;
        Ok(updated)
    }

    pub fn cancel(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.update_status(id, AppointmentStatus::Cancelled)
    }

    /// Weekday check against the configured working days (0 = Sunday).
    pub fn is_work_day(&self, date: NaiveDate) -> Result<bool, SchedulingError> {
        let settings = self.settings()?;
        let weekday_index = date.weekday().num_days_from_sunday();
        Ok(settings.work_days.contains(&weekday_index))
    }

    pub fn is_holiday(&self, date: NaiveDate) -> Result<bool, SchedulingError> {
        Ok(self.settings()?.holidays.contains(&date))
    }
}
