//! Rent invoices

use crate::core::form::{Form, lenient_string};
use crate::core::notify::Notice;
use crate::core::number::{NumberFormat, parse_number};
use crate::core::page::{Outcome, Page};
use crate::core::store::Collection;
use serde::{Deserialize, Serialize};

crate::impl_status!(
    /// Payment state of an invoice
    InvoiceStatus {
        #[default]
        Unpaid => ("unpaid", "Chưa thanh toán"),
        Paid => ("paid", "Đã thanh toán"),
        Overdue => ("overdue", "Quá hạn"),
    }
);

/// A rent invoice for one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: u64,
    /// Room label
    pub room: String,
    /// Tenant label
    pub tenant: String,
    pub amount: u64,
    /// Free text, usually dd/mm/yyyy
    pub due_date: String,
    pub status: InvoiceStatus,
}

crate::impl_entity!(
    Invoice,
    "invoice",
    "invoices",
    InvoiceStatus,
    search: [room, tenant, status],
    fields: [room, tenant, amount, due_date, status],
);

impl Invoice {
    /// Initial invoices
    pub fn seed() -> Vec<Invoice> {
        let invoice = |id, room: &str, tenant: &str, amount, due_date: &str, status| Invoice {
            id,
            room: room.to_string(),
            tenant: tenant.to_string(),
            amount,
            due_date: due_date.to_string(),
            status,
        };

        vec![
            invoice(1, "P101", "Nguyễn Văn A", 2_500_000, "10/11/2025", InvoiceStatus::Unpaid),
            invoice(2, "P203", "Phạm Thị D", 3_000_000, "10/11/2025", InvoiceStatus::Overdue),
            invoice(3, "P103", "Trần Thị B", 2_500_000, "10/10/2025", InvoiceStatus::Paid),
        ]
    }

    /// Amount still to be collected
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, InvoiceStatus::Unpaid | InvoiceStatus::Overdue)
    }
}

/// Record a payment: set `id` to paid.
///
/// Returns `None` when the invoice is missing or already paid (nothing to
/// do), otherwise the new collection and the paid invoice.
pub fn mark_paid(invoices: &Collection<Invoice>, id: u64) -> Option<(Collection<Invoice>, Invoice)> {
    let invoice = invoices.get(id)?;
    if invoice.status == InvoiceStatus::Paid {
        return None;
    }

    let paid = Invoice {
        status: InvoiceStatus::Paid,
        ..invoice.clone()
    };
    Some((invoices.replace(id, paid.clone()), paid))
}

/// Notice shown after [`mark_paid`]
pub fn paid_notice(invoice: &Invoice) -> String {
    format!("Đã ghi nhận thanh toán cho {}", invoice.tenant)
}

impl Page<InvoiceForm> {
    /// Record a payment for `id`; no-op when missing or already paid
    pub fn mark_paid(&mut self, id: u64) -> Outcome<Invoice> {
        let Some((records, paid)) = mark_paid(self.records(), id) else {
            return Outcome::Unchanged;
        };

        self.commit(records, Notice::success(paid_notice(&paid)));
        Outcome::Applied(paid)
    }
}

/// Edit buffer for an invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(deserialize_with = "lenient_string")]
    pub room: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tenant: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub due_date: String,
    pub status: InvoiceStatus,
}

impl Form for InvoiceForm {
    type Record = Invoice;

    const REQUIRED_MESSAGE: &'static str = "Vui lòng nhập Phòng và Khách thuê";

    fn from_record(invoice: &Invoice, numbers: &NumberFormat) -> Self {
        Self {
            room: invoice.room.clone(),
            tenant: invoice.tenant.clone(),
            amount: numbers.format(invoice.amount),
            due_date: invoice.due_date.clone(),
            status: invoice.status,
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            room: self.room.trim().to_string(),
            tenant: self.tenant.trim().to_string(),
            amount: self.amount.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            status: self.status,
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [("room", &self.room), ("tenant", &self.tenant)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    fn build(&self, previous: Option<&Invoice>) -> Invoice {
        Invoice {
            id: previous.map(|invoice| invoice.id).unwrap_or_default(),
            room: self.room.clone(),
            tenant: self.tenant.clone(),
            amount: parse_number(&self.amount),
            due_date: self.due_date.clone(),
            status: self.status,
        }
    }

    fn reformat_numbers(&mut self, numbers: &NumberFormat) {
        self.amount = numbers.format(parse_number(&self.amount));
    }

    fn created_notice(_invoice: &Invoice) -> String {
        "Đã tạo hóa đơn mới".to_string()
    }

    fn updated_notice(_invoice: &Invoice) -> String {
        "Đã lưu hóa đơn".to_string()
    }

    fn deleted_notice(_invoice: &Invoice) -> String {
        "Đã xóa hóa đơn".to_string()
    }

    fn delete_prompt(invoice: &Invoice) -> String {
        format!("Xóa hóa đơn phòng {} - {}?", invoice.room, invoice.tenant)
    }
}
