use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{invoice_total, BillingError, CreateInvoiceRequest, Invoice, InvoiceStatus};

pub struct InvoiceService {
    store: Arc<dyn KeyValueStore>,
}

impl InvoiceService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Invoice>, BillingError> {
        Ok(read_or(self.store.as_ref(), keys::INVOICES, vec![])?)
    }

    pub fn get(&self, id: Uuid) -> Result<Invoice, BillingError> {
        self.list()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or(BillingError::InvoiceNotFound)
    }

    pub fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<Invoice>, BillingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|i| i.patient_id == patient_id)
            .collect())
    }

    /// Issue an invoice; the amount due is fixed here and never recomputed.
    pub fn create(&self, request: CreateInvoiceRequest) -> Result<Invoice, BillingError> {
        if request.base_price < 0.0 || request.diagnostic_fee < 0.0 || request.discount < 0.0 {
            return Err(BillingError::ValidationError(
                "Invoice amounts must not be negative".to_string(),
            ));
        }

        let mut invoices = self.list()?;
        let invoice_no = invoices.iter().map(|i| i.invoice_no).max().unwrap_or(0) + 1;
        let total = invoice_total(
            request.base_price,
            request.diagnostic_fee,
            request.discount,
            request.discount_type,
        );

        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_no,
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            treatment_id: request.treatment_id,
            treatment_name: request.treatment_name,
            base_price: request.base_price,
            diagnostic_fee: request.diagnostic_fee,
            discount: request.discount,
            discount_type: request.discount_type,
            total,
            paid: 0.0,
            status: InvoiceStatus::Unpaid,
            date: request.date,
            created_at: Utc::now(),
        };

        invoices.push(invoice.clone());
        write(self.store.as_ref(), keys::INVOICES, &invoices)?;

        debug!("Invoice {} issued, total {:.2}", invoice.invoice_no, invoice.total);
        Ok(invoice)
    }

    /// Register an amount collected against an invoice and derive its
    /// status. Called by the payment service, not by UI code.
    pub(crate) fn register_paid(&self, id: Uuid, amount: f64) -> Result<Invoice, BillingError> {
        let mut invoices = self.list()?;
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(BillingError::InvoiceNotFound)?;

        invoice.paid += amount;
        invoice.status = if invoice.paid <= 0.0 {
            InvoiceStatus::Unpaid
        } else if invoice.paid < invoice.total {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Paid
        };

        let updated = invoice.clone();
        write(self.store.as_ref(), keys::INVOICES, &invoices)?;
        Ok(updated)
    }
}
