//! Rooms: code, size, rent and who lives there

use crate::core::form::{Form, lenient_string};
use crate::core::number::{NumberFormat, parse_number};
use serde::{Deserialize, Serialize};

crate::impl_status!(
    /// Occupancy of a room
    RoomStatus {
        Occupied => ("occupied", "Đang thuê"),
        #[default]
        Available => ("available", "Trống"),
    }
);

/// A rentable room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub code: String,
    /// Floor area in m²
    pub area: u64,
    /// Monthly rent
    pub price: u64,
    pub floor: u32,
    pub status: RoomStatus,
    /// Free-text tenant label; always `None` when available
    pub tenant: Option<String>,
}

crate::impl_entity!(
    Room,
    "room",
    "rooms",
    RoomStatus,
    search: [code, tenant],
    fields: [code, area, price, floor, status, tenant],
);

impl Room {
    /// Initial rooms
    pub fn seed() -> Vec<Room> {
        let room = |id, code: &str, area, price, floor, tenant: Option<&str>| Room {
            id,
            code: code.to_string(),
            area,
            price,
            floor,
            status: if tenant.is_some() {
                RoomStatus::Occupied
            } else {
                RoomStatus::Available
            },
            tenant: tenant.map(str::to_string),
        };

        vec![
            room(1, "P101", 25, 2_500_000, 1, Some("Nguyễn Văn A")),
            room(2, "P102", 25, 2_500_000, 1, None),
            room(3, "P103", 30, 3_000_000, 1, Some("Trần Thị B")),
            room(4, "P201", 25, 2_500_000, 2, None),
            room(5, "P202", 25, 2_500_000, 2, Some("Lê Văn C")),
            room(6, "P203", 30, 3_000_000, 2, Some("Phạm Thị D")),
        ]
    }
}

/// Edit buffer for a room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomForm {
    #[serde(deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "lenient_string")]
    pub floor: String,
    pub status: RoomStatus,
    #[serde(deserialize_with = "lenient_string")]
    pub tenant: String,
}

impl Form for RoomForm {
    type Record = Room;

    const REQUIRED_MESSAGE: &'static str = "Vui lòng nhập mã phòng";

    fn from_record(room: &Room, numbers: &NumberFormat) -> Self {
        Self {
            code: room.code.clone(),
            area: numbers.format(room.area),
            price: numbers.format(room.price),
            floor: room.floor.to_string(),
            status: room.status,
            tenant: room.tenant.clone().unwrap_or_default(),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            code: self.code.trim().to_string(),
            area: self.area.trim().to_string(),
            price: self.price.trim().to_string(),
            floor: self.floor.trim().to_string(),
            status: self.status,
            tenant: self.tenant.trim().to_string(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        if self.code.is_empty() {
            vec!["code"]
        } else {
            Vec::new()
        }
    }

    fn build(&self, previous: Option<&Room>) -> Room {
        let tenant = match self.status {
            RoomStatus::Available => None,
            RoomStatus::Occupied if !self.tenant.is_empty() => Some(self.tenant.clone()),
            RoomStatus::Occupied => previous.and_then(|room| room.tenant.clone()),
        };

        Room {
            id: previous.map(|room| room.id).unwrap_or_default(),
            code: self.code.clone(),
            area: parse_number(&self.area),
            price: parse_number(&self.price),
            floor: u32::try_from(parse_number(&self.floor))
                .ok()
                .filter(|floor| *floor > 0)
                .unwrap_or(1),
            status: self.status,
            tenant,
        }
    }

    fn reformat_numbers(&mut self, numbers: &NumberFormat) {
        self.area = numbers.format(parse_number(&self.area));
        self.price = numbers.format(parse_number(&self.price));
    }

    fn created_notice(room: &Room) -> String {
        format!("Đã thêm phòng {}", room.code)
    }

    fn updated_notice(_room: &Room) -> String {
        "Lưu thay đổi phòng thành công".to_string()
    }

    fn deleted_notice(room: &Room) -> String {
        format!("Đã xóa phòng {}", room.code)
    }

    fn delete_prompt(room: &Room) -> String {
        format!("Bạn có chắc chắn muốn xóa phòng {}?", room.code)
    }
}
