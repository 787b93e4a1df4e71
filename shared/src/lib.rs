use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;


// =========================================================
// 枚举类型 (Enumerations)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
    Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Daily,
    Monthly,
    Reserved,
}

/// 票据状态
///
/// 后端使用 `INUSE`（无下划线），这里逐个指定以免被大小写规则改写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "INUSE")]
    InUse,
    #[serde(rename = "LOST")]
    Lost,
    #[serde(rename = "CANCELED")]
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Motorbike,
    Car,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
}

/// 既可能是数字也可能是字符串的 ID（表单输入时常为字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Number(i64),
    Text(String),
}

impl FlexibleId {
    /// 尝试转换为数字 ID
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FlexibleId::Number(n) => Some(*n),
            FlexibleId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for FlexibleId {
    fn from(id: i64) -> Self {
        FlexibleId::Number(id)
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 所有持久化资源共有的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModel {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSection {
    pub name: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(flatten)]
    pub section: CreateSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSender {
    pub id: i64,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(flatten)]
    pub base: BaseModel,
    pub from: NotificationSender,
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVehicle {
    pub plate: String,
    // 后端此处是自由文本，不强制为 VehicleType
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(flatten)]
    pub vehicle: CreateVehicle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResidence {
    pub building: String,
    pub room: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residents: Option<Vec<Resident>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(flatten)]
    pub residence: CreateResidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub vehicle_type: VehicleType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// 创建票据的请求体
///
/// `type` 在表单未选择时为 `null`，因此保留为 `Option` 且总是序列化。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    #[serde(rename = "type")]
    pub ticket_type: Option<TicketType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTicket {
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTicket {
    pub section_id: i64,
    pub slot: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(flatten)]
    pub base: BaseModel,
    pub user_id: i64,
    pub amount: f64,
    pub status: TransactionStatus,
    pub month: u32,
    pub year: i32,
}

// =========================================================
// 停车出入场 (Check-in / Check-out)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseParking {
    pub section_id: FlexibleId,
    pub ticket_id: FlexibleId,
    pub plate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(flatten)]
    pub parking: BaseParking,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOut {
    #[serde(flatten)]
    pub parking: BaseParking,
}

// =========================================================
// 分页响应 (Paged Responses)
// =========================================================

/// 列表接口统一的分页响应外壳
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub max_page: u32,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type NotificationResponse = Page<Notification>;
pub type TransactionResponse = Page<Transaction>;
pub type TicketResponse = Page<Ticket>;
pub type ResidenceResponse = Page<Residence>;
pub type VehicleResponse = Page<Vehicle>;
