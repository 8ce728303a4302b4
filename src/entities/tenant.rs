//! Tenants and their contracts

use crate::core::form::{Form, lenient_string};
use crate::core::number::NumberFormat;
use serde::{Deserialize, Serialize};

crate::impl_status!(
    /// Contract state of a tenant
    TenantStatus {
        #[default]
        Active => ("active", "Đang thuê"),
        Expiring => ("expiring", "Sắp hết hạn"),
    }
);

/// A person renting a room
///
/// `room` is a free-text label; nothing ties it to a [`Room`](super::room::Room) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub room: String,
    pub citizen_id: String,
    /// dd/mm/yyyy, unvalidated
    pub move_in_date: String,
    /// dd/mm/yyyy, unvalidated
    pub contract_end: String,
    pub status: TenantStatus,
}

crate::impl_entity!(
    Tenant,
    "tenant",
    "tenants",
    TenantStatus,
    search: [name, phone, room],
    fields: [name, phone, email, room, citizen_id, move_in_date, contract_end, status],
);

impl Tenant {
    /// Initial tenants
    pub fn seed() -> Vec<Tenant> {
        vec![
            Tenant {
                id: 1,
                name: "Nguyễn Văn A".to_string(),
                phone: "0912345678".to_string(),
                email: "nguyenvana@email.com".to_string(),
                room: "P101".to_string(),
                citizen_id: "001234567890".to_string(),
                move_in_date: "01/01/2025".to_string(),
                contract_end: "01/01/2026".to_string(),
                status: TenantStatus::Active,
            },
            Tenant {
                id: 2,
                name: "Trần Thị B".to_string(),
                phone: "0987654321".to_string(),
                email: "tranthib@email.com".to_string(),
                room: "P103".to_string(),
                citizen_id: "009876543210".to_string(),
                move_in_date: "15/02/2025".to_string(),
                contract_end: "15/02/2026".to_string(),
                status: TenantStatus::Active,
            },
            Tenant {
                id: 3,
                name: "Lê Văn C".to_string(),
                phone: "0901234567".to_string(),
                email: "levanc@email.com".to_string(),
                room: "P202".to_string(),
                citizen_id: "001122334455".to_string(),
                move_in_date: "10/03/2025".to_string(),
                contract_end: "10/12/2025".to_string(),
                status: TenantStatus::Expiring,
            },
        ]
    }
}

/// Edit buffer for a tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantForm {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub room: String,
    #[serde(deserialize_with = "lenient_string")]
    pub citizen_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub move_in_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contract_end: String,
    pub status: TenantStatus,
}

impl Form for TenantForm {
    type Record = Tenant;

    const REQUIRED_MESSAGE: &'static str = "Vui lòng nhập tối thiểu Tên, Số điện thoại và Mã phòng";

    fn from_record(tenant: &Tenant, _numbers: &NumberFormat) -> Self {
        Self {
            name: tenant.name.clone(),
            phone: tenant.phone.clone(),
            email: tenant.email.clone(),
            room: tenant.room.clone(),
            citizen_id: tenant.citizen_id.clone(),
            move_in_date: tenant.move_in_date.clone(),
            contract_end: tenant.contract_end.clone(),
            status: tenant.status,
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            room: self.room.trim().to_string(),
            citizen_id: self.citizen_id.trim().to_string(),
            move_in_date: self.move_in_date.trim().to_string(),
            contract_end: self.contract_end.trim().to_string(),
            status: self.status,
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("room", &self.room),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    fn build(&self, previous: Option<&Tenant>) -> Tenant {
        Tenant {
            id: previous.map(|tenant| tenant.id).unwrap_or_default(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            room: self.room.clone(),
            citizen_id: self.citizen_id.clone(),
            move_in_date: self.move_in_date.clone(),
            contract_end: self.contract_end.clone(),
            status: self.status,
        }
    }

    fn created_notice(tenant: &Tenant) -> String {
        format!("Đã thêm khách thuê {}", tenant.name)
    }

    fn updated_notice(_tenant: &Tenant) -> String {
        "Đã lưu thông tin khách thuê".to_string()
    }

    fn deleted_notice(tenant: &Tenant) -> String {
        format!("Đã xóa khách thuê {}", tenant.name)
    }

    fn delete_prompt(tenant: &Tenant) -> String {
        format!("Bạn có chắc chắn muốn xóa khách thuê {}?", tenant.name)
    }
}
