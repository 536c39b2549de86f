use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{
    BillingError, DoctorAccountSummary, DoctorPayment, Expense, Invoice, Payment, RevenueSummary,
};

/// Read-side aggregation over invoices, payments, expenses and doctor
/// payouts, plus the payout ledger itself.
pub struct AccountingService {
    store: Arc<dyn KeyValueStore>,
}

impl AccountingService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn doctor_payments(&self) -> Result<Vec<DoctorPayment>, BillingError> {
        Ok(read_or(self.store.as_ref(), keys::DOCTOR_PAYMENTS, vec![])?)
    }

    pub fn pay_doctor(
        &self,
        doctor_id: Uuid,
        amount: f64,
        date: NaiveDate,
        notes: &str,
    ) -> Result<DoctorPayment, BillingError> {
        if amount <= 0.0 {
            return Err(BillingError::ValidationError(
                "Payout amount must be positive".to_string(),
            ));
        }
        let payout = DoctorPayment {
            id: Uuid::new_v4(),
            doctor_id,
            amount,
            date,
            notes: notes.to_string(),
            created_at: Utc::now(),
        };
        let mut payouts = self.doctor_payments()?;
        payouts.push(payout.clone());
        write(self.store.as_ref(), keys::DOCTOR_PAYMENTS, &payouts)?;
        Ok(payout)
    }

    pub fn doctor_account(&self, doctor_id: Uuid) -> Result<DoctorAccountSummary, BillingError> {
        let invoices: Vec<Invoice> = read_or(self.store.as_ref(), keys::INVOICES, vec![])?;
        let payments: Vec<Payment> = read_or(self.store.as_ref(), keys::PAYMENTS, vec![])?;

        let doctor_invoices: Vec<&Invoice> =
            invoices.iter().filter(|i| i.doctor_id == doctor_id).collect();
        let invoiced: f64 = doctor_invoices.iter().map(|i| i.total).sum();
        let collected: f64 = payments
            .iter()
            .filter(|p| doctor_invoices.iter().any(|i| i.id == p.invoice_id))
            .map(|p| p.amount)
            .sum();
        let paid_out: f64 = self
            .doctor_payments()?
            .iter()
            .filter(|p| p.doctor_id == doctor_id)
            .map(|p| p.amount)
            .sum();

        Ok(DoctorAccountSummary {
            doctor_id,
            invoiced,
            collected,
            paid_out,
            balance: collected - paid_out,
        })
    }

    /// Collected payments minus expenses over an inclusive date range.
    pub fn revenue(&self, from: NaiveDate, to: NaiveDate) -> Result<RevenueSummary, BillingError> {
        let payments: Vec<Payment> = read_or(self.store.as_ref(), keys::PAYMENTS, vec![])?;
        let expenses: Vec<Expense> = read_or(self.store.as_ref(), keys::EXPENSES, vec![])?;

        let collected: f64 = payments
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
            .map(|p| p.amount)
            .sum();
        let spent: f64 = expenses
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .map(|e| e.amount)
            .sum();

        Ok(RevenueSummary {
            from,
            to,
            collected,
            expenses: spent,
            net: collected - spent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateInvoiceRequest, DiscountType, PaymentMethod};
    use crate::services::expenses::ExpenseService;
    use crate::services::invoices::InvoiceService;
    use crate::services::payments::PaymentService;
    use assert_matches::assert_matches;
    use shared_storage::MemoryStore;

    struct Fixture {
        invoices: InvoiceService,
        payments: PaymentService,
        expenses: ExpenseService,
        accounting: AccountingService,
    }

    impl Fixture {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            Self {
                invoices: InvoiceService::new(store.clone()),
                payments: PaymentService::new(store.clone()),
                expenses: ExpenseService::new(store.clone()),
                accounting: AccountingService::new(store),
            }
        }

        fn paid_invoice(&self, doctor_id: Uuid, total: f64, paid: f64, date: NaiveDate) {
            let invoice = self
                .invoices
                .create(CreateInvoiceRequest {
                    patient_id: Uuid::new_v4(),
                    doctor_id,
                    treatment_id: Uuid::new_v4(),
                    treatment_name: "تنظيف".to_string(),
                    base_price: total,
                    diagnostic_fee: 0.0,
                    discount: 0.0,
                    discount_type: DiscountType::Fixed,
                    date,
                })
                .unwrap();
            if paid > 0.0 {
                self.payments
                    .post(invoice.id, paid, PaymentMethod::Cash, date, "")
                    .unwrap();
            }
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn test_doctor_account_balances() {
        let fx = Fixture::new();
        let doctor = Uuid::new_v4();
        let other = Uuid::new_v4();

        fx.paid_invoice(doctor, 200.0, 150.0, day(1));
        fx.paid_invoice(doctor, 100.0, 0.0, day(2));
        fx.paid_invoice(other, 500.0, 500.0, day(3));
        fx.accounting.pay_doctor(doctor, 50.0, day(5), "").unwrap();

        let account = fx.accounting.doctor_account(doctor).unwrap();
        assert_eq!(account.invoiced, 300.0);
        assert_eq!(account.collected, 150.0);
        assert_eq!(account.paid_out, 50.0);
        assert_eq!(account.balance, 100.0);
    }

    #[test]
    fn test_revenue_range_is_inclusive() {
        let fx = Fixture::new();
        let doctor = Uuid::new_v4();
        fx.paid_invoice(doctor, 100.0, 100.0, day(1));
        fx.paid_invoice(doctor, 100.0, 100.0, day(10));
        fx.paid_invoice(doctor, 100.0, 100.0, day(20));
        fx.expenses.record("إيجار", "", 30.0, day(10), "").unwrap();

        let summary = fx.accounting.revenue(day(1), day(10)).unwrap();
        assert_eq!(summary.collected, 200.0);
        assert_eq!(summary.expenses, 30.0);
        assert_eq!(summary.net, 170.0);
    }

    #[test]
    fn test_payout_must_be_positive() {
        let fx = Fixture::new();
        assert_matches!(
            fx.accounting.pay_doctor(Uuid::new_v4(), 0.0, day(1), ""),
            Err(BillingError::ValidationError(_))
        );
    }
}
