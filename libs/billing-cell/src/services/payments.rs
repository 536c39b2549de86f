use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{BillingError, Invoice, Payment, PaymentMethod};
use crate::services::invoices::InvoiceService;

pub struct PaymentService {
    store: Arc<dyn KeyValueStore>,
    invoices: InvoiceService,
}

impl PaymentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            invoices: InvoiceService::new(store.clone()),
            store,
        }
    }

    pub fn list(&self) -> Result<Vec<Payment>, BillingError> {
        Ok(read_or(self.store.as_ref(), keys::PAYMENTS, vec![])?)
    }

    pub fn list_for_invoice(&self, invoice_id: Uuid) -> Result<Vec<Payment>, BillingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.invoice_id == invoice_id)
            .collect())
    }

    /// Post a payment against an invoice. The amount must not push the
    /// invoice past its total.
    pub fn post(
        &self,
        invoice_id: Uuid,
        amount: f64,
        method: PaymentMethod,
        date: NaiveDate,
        notes: &str,
    ) -> Result<(Payment, Invoice), BillingError> {
        if amount <= 0.0 {
            return Err(BillingError::ValidationError(
                "Payment amount must be positive".to_string(),
            ));
        }

        let invoice = self.invoices.get(invoice_id)?;
        let remaining = invoice.total - invoice.paid;
        if amount > remaining {
            return Err(BillingError::Overpayment { amount, remaining });
        }

        let mut payments = self.list()?;
        let receipt_no = payments.iter().map(|p| p.receipt_no).max().unwrap_or(0) + 1;
        let payment = Payment {
            id: Uuid::new_v4(),
            invoice_id,
            patient_id: invoice.patient_id,
            amount,
            method,
            date,
            notes: notes.to_string(),
            receipt_no,
            created_at: Utc::now(),
        };
        payments.push(payment.clone());
        write(self.store.as_ref(), keys::PAYMENTS, &payments)?;

        let updated = self.invoices.register_paid(invoice_id, amount)?;
        debug!(
            "Payment {} of {:.2} posted against invoice {}",
            payment.receipt_no, amount, updated.invoice_no
        );
        Ok((payment, updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateInvoiceRequest, DiscountType, InvoiceStatus};
    use assert_matches::assert_matches;
    use shared_storage::MemoryStore;

    struct Fixture {
        invoices: InvoiceService,
        payments: PaymentService,
    }

    impl Fixture {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            Self {
                invoices: InvoiceService::new(store.clone()),
                payments: PaymentService::new(store),
            }
        }

        fn invoice(&self, total: f64) -> Invoice {
            self.invoices
                .create(CreateInvoiceRequest {
                    patient_id: Uuid::new_v4(),
                    doctor_id: Uuid::new_v4(),
                    treatment_id: Uuid::new_v4(),
                    treatment_name: "حشوة".to_string(),
                    base_price: total,
                    diagnostic_fee: 0.0,
                    discount: 0.0,
                    discount_type: DiscountType::Fixed,
                    date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                })
                .unwrap()
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
    }

    #[test]
    fn test_partial_then_full_payment_moves_status() {
        let fx = Fixture::new();
        let invoice = fx.invoice(100.0);

        let (_, after) = fx
            .payments
            .post(invoice.id, 40.0, PaymentMethod::Cash, day(), "")
            .unwrap();
        assert_eq!(after.status, InvoiceStatus::Partial);
        assert_eq!(after.paid, 40.0);

        let (_, after) = fx
            .payments
            .post(invoice.id, 60.0, PaymentMethod::Cash, day(), "")
            .unwrap();
        assert_eq!(after.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_overpayment_refused() {
        let fx = Fixture::new();
        let invoice = fx.invoice(50.0);

        let result = fx
            .payments
            .post(invoice.id, 80.0, PaymentMethod::Cash, day(), "");
        assert_matches!(
            result,
            Err(BillingError::Overpayment { amount, remaining })
                if amount == 80.0 && remaining == 50.0
        );
        // Refused payment must leave nothing behind.
        assert!(fx.payments.list().unwrap().is_empty());
    }

    #[test]
    fn test_receipt_numbers_are_sequential() {
        let fx = Fixture::new();
        let a = fx.invoice(100.0);
        let b = fx.invoice(100.0);

        let (first, _) = fx.payments.post(a.id, 10.0, PaymentMethod::Cash, day(), "").unwrap();
        let (second, _) = fx.payments.post(b.id, 10.0, PaymentMethod::Other, day(), "").unwrap();
        assert_eq!((first.receipt_no, second.receipt_no), (1, 2));
    }

    #[test]
    fn test_unknown_invoice_refused() {
        let fx = Fixture::new();
        let result = fx
            .payments
            .post(Uuid::new_v4(), 10.0, PaymentMethod::Cash, day(), "");
        assert_matches!(result, Err(BillingError::InvoiceNotFound));
    }
}
