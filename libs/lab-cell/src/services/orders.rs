use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{LabBalance, LabError, LabOrder, LabOrderStatus, LabPayment};
use crate::services::lab::LabService;

pub struct PlaceOrderRequest {
    pub lab_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub work_type_id: Uuid,
    pub quantity: u32,
    /// Overrides the work type's default cost when set.
    pub cost: Option<f64>,
    pub sent_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

pub struct LabOrderService {
    store: Arc<dyn KeyValueStore>,
    labs: LabService,
}

impl LabOrderService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            labs: LabService::new(store.clone()),
            store,
        }
    }

    pub fn list(&self) -> Result<Vec<LabOrder>, LabError> {
        Ok(read_or(self.store.as_ref(), keys::LAB_ORDERS, vec![])?)
    }

    pub fn list_for_lab(&self, lab_id: Uuid) -> Result<Vec<LabOrder>, LabError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|o| o.lab_id == lab_id)
            .collect())
    }

    pub fn get(&self, id: Uuid) -> Result<LabOrder, LabError> {
        self.list()?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or(LabError::OrderNotFound)
    }

    pub fn place(&self, request: PlaceOrderRequest) -> Result<LabOrder, LabError> {
        if request.quantity == 0 {
            return Err(LabError::ValidationError(
                "Order quantity must be at least 1".to_string(),
            ));
        }
        self.labs.get(request.lab_id)?;
        let work_type = self
            .labs
            .work_types()?
            .into_iter()
            .find(|t| t.id == request.work_type_id)
            .ok_or(LabError::NotFound)?;

        let cost = match request.cost {
            Some(cost) if cost >= 0.0 => cost,
            Some(_) => {
                return Err(LabError::ValidationError(
                    "Order cost must not be negative".to_string(),
                ))
            }
            None => work_type.default_cost * request.quantity as f64,
        };

        let mut orders = self.list()?;
        let order_no = orders.iter().map(|o| o.order_no).max().unwrap_or(0) + 1;
        let order = LabOrder {
            id: Uuid::new_v4(),
            order_no,
            lab_id: request.lab_id,
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            work_type_id: work_type.id,
            work_type_name: work_type.name,
            quantity: request.quantity,
            cost,
            sent_date: request.sent_date,
            due_date: request.due_date,
            status: LabOrderStatus::Pending,
            notes: request.notes,
            created_at: Utc::now(),
        };
        orders.push(order.clone());
        write(self.store.as_ref(), keys::LAB_ORDERS, &orders)?;
        debug!("Lab order {} placed, cost {:.2}", order.order_no, order.cost);
        Ok(order)
    }

    /// Mark a pending order received. Received and cancelled orders are final.
    pub fn mark_received(&self, id: Uuid) -> Result<LabOrder, LabError> {
        self.transition(id, LabOrderStatus::Received)
    }

    pub fn cancel(&self, id: Uuid) -> Result<LabOrder, LabError> {
        self.transition(id, LabOrderStatus::Cancelled)
    }

    fn transition(&self, id: Uuid, to: LabOrderStatus) -> Result<LabOrder, LabError> {
        let mut orders = self.list()?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(LabError::OrderNotFound)?;
        if order.status != LabOrderStatus::Pending {
            return Err(LabError::OrderClosed(order.status));
        }
        order.status = to;
        let updated = order.clone();
        write(self.store.as_ref(), keys::LAB_ORDERS, &orders)?;
        Ok(updated)
    }

    // ==========================================================================
    // LAB PAYMENTS AND BALANCES
    // ==========================================================================

    pub fn payments(&self) -> Result<Vec<LabPayment>, LabError> {
        Ok(read_or(self.store.as_ref(), keys::LAB_PAYMENTS, vec![])?)
    }

    pub fn pay_lab(
        &self,
        lab_id: Uuid,
        amount: f64,
        date: NaiveDate,
        notes: &str,
    ) -> Result<LabPayment, LabError> {
        if amount <= 0.0 {
            return Err(LabError::ValidationError(
                "Payment amount must be positive".to_string(),
            ));
        }
        self.labs.get(lab_id)?;
        let payment = LabPayment {
            id: Uuid::new_v4(),
            lab_id,
            amount,
            date,
            notes: notes.to_string(),
            created_at: Utc::now(),
        };
        let mut payments = self.payments()?;
        payments.push(payment.clone());
        write(self.store.as_ref(), keys::LAB_PAYMENTS, &payments)?;
        Ok(payment)
    }

    /// Cancelled orders do not count toward what the clinic owes.
    pub fn balance(&self, lab_id: Uuid) -> Result<LabBalance, LabError> {
        self.labs.get(lab_id)?;
        let billed: f64 = self
            .list_for_lab(lab_id)?
            .iter()
            .filter(|o| o.status != LabOrderStatus::Cancelled)
            .map(|o| o.cost)
            .sum();
        let paid: f64 = self
            .payments()?
            .iter()
            .filter(|p| p.lab_id == lab_id)
            .map(|p| p.amount)
            .sum();
        Ok(LabBalance {
            lab_id,
            billed,
            paid,
            owed: billed - paid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_storage::MemoryStore;

    struct Fixture {
        orders: LabOrderService,
        lab_id: Uuid,
        work_type_id: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            let labs = LabService::new(store.clone());
            let lab_id = labs.create("مختبر النور", "", "", "").unwrap().id;
            let work_type_id = labs.add_work_type("تاج زركون", 50.0).unwrap().id;
            Self {
                orders: LabOrderService::new(store),
                lab_id,
                work_type_id,
            }
        }

        fn place(&self, quantity: u32, cost: Option<f64>) -> LabOrder {
            self.orders
                .place(PlaceOrderRequest {
                    lab_id: self.lab_id,
                    patient_id: Uuid::new_v4(),
                    doctor_id: Uuid::new_v4(),
                    work_type_id: self.work_type_id,
                    quantity,
                    cost,
                    sent_date: day(1),
                    due_date: Some(day(10)),
                    notes: String::new(),
                })
                .unwrap()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_default_cost_scales_with_quantity() {
        let fx = Fixture::new();
        let order = fx.place(3, None);
        assert_eq!(order.cost, 150.0);
        assert_eq!(order.status, LabOrderStatus::Pending);
        assert_eq!(crate::models::format_order_no(order.order_no), "LAB-0001");
    }

    #[test]
    fn test_explicit_cost_overrides_default() {
        let fx = Fixture::new();
        let order = fx.place(2, Some(75.0));
        assert_eq!(order.cost, 75.0);
    }

    #[test]
    fn test_closed_orders_cannot_change_status() {
        let fx = Fixture::new();
        let order = fx.place(1, None);
        fx.orders.mark_received(order.id).unwrap();
        assert_matches!(
            fx.orders.cancel(order.id),
            Err(LabError::OrderClosed(LabOrderStatus::Received))
        );

        let cancelled = fx.place(1, None);
        fx.orders.cancel(cancelled.id).unwrap();
        assert_matches!(
            fx.orders.mark_received(cancelled.id),
            Err(LabError::OrderClosed(LabOrderStatus::Cancelled))
        );
    }

    #[test]
    fn test_balance_skips_cancelled_orders() {
        let fx = Fixture::new();
        let received = fx.place(1, Some(100.0));
        fx.orders.mark_received(received.id).unwrap();
        fx.place(1, Some(40.0)); // pending, still owed
        let cancelled = fx.place(1, Some(999.0));
        fx.orders.cancel(cancelled.id).unwrap();
        fx.orders.pay_lab(fx.lab_id, 60.0, day(15), "").unwrap();

        let balance = fx.orders.balance(fx.lab_id).unwrap();
        assert_eq!(balance.billed, 140.0);
        assert_eq!(balance.paid, 60.0);
        assert_eq!(balance.owed, 80.0);
    }

    #[test]
    fn test_order_requires_known_lab_and_work_type() {
        let fx = Fixture::new();
        let result = fx.orders.place(PlaceOrderRequest {
            lab_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            work_type_id: fx.work_type_id,
            quantity: 1,
            cost: None,
            sent_date: day(1),
            due_date: None,
            notes: String::new(),
        });
        assert_matches!(result, Err(LabError::LabNotFound));

        let result = fx.orders.place(PlaceOrderRequest {
            lab_id: fx.lab_id,
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            work_type_id: Uuid::new_v4(),
            quantity: 1,
            cost: None,
            sent_date: day(1),
            due_date: None,
            notes: String::new(),
        });
        assert_matches!(result, Err(LabError::NotFound));
    }
}
