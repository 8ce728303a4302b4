//! Dashboard aggregates computed from the three collections

use crate::entities::invoice::{Invoice, InvoiceStatus};
use crate::entities::room::{Room, RoomStatus};
use crate::entities::tenant::Tenant;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Date layout of `moveInDate`, `contractEnd` and `dueDate`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    /// Occupied share of all rooms, rounded percent
    pub occupancy_rate: u8,
    pub total_tenants: usize,
    /// Sum of paid invoices
    pub paid_revenue: u64,
    /// Sum of unpaid and overdue invoices
    pub outstanding: u64,
    pub overdue: Vec<OverdueInvoice>,
    /// Overdue invoices per floor of the billed room
    pub overdue_by_floor: BTreeMap<u32, usize>,
    pub expiring_contracts: Vec<ExpiringContract>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueInvoice {
    pub id: u64,
    pub room: String,
    pub tenant: String,
    pub amount: u64,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringContract {
    pub tenant_id: u64,
    pub name: String,
    pub room: String,
    pub contract_end: NaiveDate,
    pub days_left: u64,
}

impl DashboardStats {
    /// Aggregate the collections as of `today`.
    ///
    /// Contracts ending within `warning_days` of `today` (inclusive) are
    /// listed; dates that do not parse as dd/mm/yyyy are ignored.
    pub fn compute(
        rooms: &[Room],
        tenants: &[Tenant],
        invoices: &[Invoice],
        today: NaiveDate,
        warning_days: u64,
    ) -> Self {
        let total_rooms = rooms.len();
        let occupied_rooms = rooms
            .iter()
            .filter(|room| room.status == RoomStatus::Occupied)
            .count();

        let sum = |wanted: fn(&Invoice) -> bool| -> u64 {
            invoices
                .iter()
                .filter(|invoice| wanted(invoice))
                .fold(0u64, |total, invoice| total.saturating_add(invoice.amount))
        };

        let overdue: Vec<OverdueInvoice> = invoices
            .iter()
            .filter(|invoice| invoice.status == InvoiceStatus::Overdue)
            .map(|invoice| OverdueInvoice {
                id: invoice.id,
                room: invoice.room.clone(),
                tenant: invoice.tenant.clone(),
                amount: invoice.amount,
                due_date: invoice.due_date.clone(),
            })
            .collect();

        let mut overdue_by_floor = BTreeMap::new();
        for invoice in &overdue {
            if let Some(room) = rooms.iter().find(|room| room.code == invoice.room) {
                *overdue_by_floor.entry(room.floor).or_insert(0) += 1;
            }
        }

        Self {
            total_rooms,
            occupied_rooms,
            available_rooms: total_rooms - occupied_rooms,
            occupancy_rate: occupancy_rate(occupied_rooms, total_rooms),
            total_tenants: tenants.len(),
            paid_revenue: sum(|invoice| invoice.status == InvoiceStatus::Paid),
            outstanding: sum(Invoice::is_outstanding),
            overdue,
            overdue_by_floor,
            expiring_contracts: expiring_contracts(tenants, today, warning_days),
        }
    }
}

fn occupancy_rate(occupied: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // occupied <= total, so the result is at most 100
    ((occupied * 100 + total / 2) / total) as u8
}

/// Tenants whose contract ends between `today` and `today + warning_days`
pub fn expiring_contracts(tenants: &[Tenant], today: NaiveDate, warning_days: u64) -> Vec<ExpiringContract> {
    let horizon = today.checked_add_days(Days::new(warning_days)).unwrap_or(NaiveDate::MAX);

    let mut expiring: Vec<ExpiringContract> = tenants
        .iter()
        .filter_map(|tenant| {
            let end = NaiveDate::parse_from_str(tenant.contract_end.trim(), DATE_FORMAT).ok()?;
            (today..=horizon).contains(&end).then(|| ExpiringContract {
                tenant_id: tenant.id,
                name: tenant.name.clone(),
                room: tenant.room.clone(),
                contract_end: end,
                days_left: (end - today).num_days().unsigned_abs(),
            })
        })
        .collect();

    expiring.sort_by_key(|contract| contract.contract_end);
    expiring
}
