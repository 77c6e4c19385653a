//! Organization summary shown on the start page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{OrderStatus, WorkOrder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeStats {
    pub count: u64,
    /// Worked plus driving hours.
    pub total_hours: f64,
    pub total_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_customers: u64,
    pub total_workorders: u64,
    pub planned_workorders: u64,
    pub total_products: u64,
    pub stats_by_type: BTreeMap<String, TypeStats>,
}

impl DashboardStats {
    /// Aggregate the work-order part of the dashboard.
    #[must_use]
    pub fn from_work_orders<'a>(
        work_orders: impl IntoIterator<Item = &'a WorkOrder>,
        total_customers: u64,
        total_products: u64,
    ) -> Self {
        let mut stats = Self {
            total_customers,
            total_products,
            ..Self::default()
        };
        for wo in work_orders {
            stats.total_workorders += 1;
            if wo.status == OrderStatus::Planlagt {
                stats.planned_workorders += 1;
            }
            let entry = stats
                .stats_by_type
                .entry(wo.order_type.as_str().to_owned())
                .or_default();
            entry.count += 1;
            entry.total_hours += wo.arbeidstid + wo.kjoretid;
            entry.total_km += wo.kjorte_km;
        }
        stats
    }
}
