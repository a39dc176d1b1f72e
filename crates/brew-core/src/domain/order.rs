use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fulfilment stage of an order. Only `Delivered` orders unlock a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Confirmed => "Confirmada",
            OrderStatus::Shipped => "Enviada",
            OrderStatus::Delivered => "Entregada",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOrderStatus(s.to_string()))
    }
}

/// Order row as listed by the admin endpoint, with joined user/case names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Six-character code the customer types into the submission form.
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub case_id: String,
    #[serde(default)]
    pub case_name: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub is_submission_used: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of an order create/update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderDraft {
    pub user_id: String,
    pub case_id: String,
    pub customer_name: String,
    pub contact_info: String,
    pub status: OrderStatus,
    pub total_amount: i64,
}

impl OrderDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.case_id.trim().is_empty() {
            return Err(DomainError::Validation("case is required".to_string()));
        }
        if self.contact_info.trim().is_empty() && self.user_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "a user or contact info is required".to_string(),
            ));
        }
        if self.total_amount < 0 {
            return Err(DomainError::Validation(
                "total amount cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_tolerates_missing_fields() {
        let order: Order =
            serde_json::from_str(r#"{"id":"o1","order_id":"AB12CD","status":"delivered"}"#)
                .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.case_name.is_empty());
    }

    #[test]
    fn test_draft_requires_case() {
        let draft = OrderDraft {
            contact_info: "8888-8888".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }
}
