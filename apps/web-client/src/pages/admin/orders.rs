//! Orders panel - who bought which case, and the order code for submitting.

use brew_core::domain::{Order, OrderDraft, OrderStatus};
use brew_core::ports::{Row, SelectOption};
use brew_shared::MessageResponse;
use brew_shared::dto::OrdersResponse;

use super::{parse_number, report};
use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub const LIST: &str = "ordersList";
pub const STATUS: &str = "ordersListStatus";
pub const FILTER: &str = "orderStatusFilter";
pub const FORM: &str = "orderForm";
pub const FORM_TITLE: &str = "orderFormTitle";
pub const USER: &str = "orderUser";
pub const CASE: &str = "orderCase";
pub const CUSTOMER_NAME: &str = "orderCustomerName";
pub const CONTACT_INFO: &str = "orderContactInfo";
pub const ORDER_STATUS: &str = "orderStatus";
pub const TOTAL_AMOUNT: &str = "orderTotalAmount";

pub(crate) const ELEMENTS: &[&str] = &[
    LIST,
    STATUS,
    FILTER,
    FORM,
    FORM_TITLE,
    USER,
    CASE,
    CUSTOMER_NAME,
    CONTACT_INFO,
    ORDER_STATUS,
    TOTAL_AMOUNT,
];

pub(crate) fn status_options(with_all: bool) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if with_all {
        options.push(SelectOption::placeholder("Todos los estados"));
    }
    options.extend(
        OrderStatus::ALL
            .into_iter()
            .map(|s| SelectOption::new(s.as_str(), s.label())),
    );
    options
}

/// List orders, filtered by the status selected in the filter.
pub async fn load_list(ctx: &AppContext) -> AppResult<()> {
    let filter = ctx.doc.text_value(FILTER);
    let endpoint = if filter.is_empty() {
        endpoints::ADMIN_ORDERS.to_string()
    } else {
        let status: OrderStatus = filter.parse()?;
        format!("{}?status={}", endpoints::ADMIN_ORDERS, status)
    };

    let result: AppResult<OrdersResponse<Order>> = ctx.api.get(&endpoint).await;
    let orders = match result {
        Ok(response) => response.orders,
        Err(e) => {
            ctx.doc.set_text(STATUS, "Error al cargar las órdenes");
            return Err(e);
        }
    };

    ctx.doc.render_rows(LIST, rows(&orders));
    ctx.doc.set_text(
        STATUS,
        if orders.is_empty() { "No hay órdenes" } else { "" },
    );
    ctx.admin().orders = orders;
    Ok(())
}

pub fn rows(orders: &[Order]) -> Vec<Row> {
    orders
        .iter()
        .map(|order| {
            let customer = [&order.user_name, &order.customer_name, &order.contact_info]
                .into_iter()
                .find(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| "Sin cliente".to_string());
            Row::new(
                order.id.clone(),
                vec![
                    order.order_id.clone(),
                    customer,
                    order.case_name.clone(),
                    order.status.label().to_string(),
                    format!("₡{}", order.total_amount),
                    if order.is_submission_used {
                        "Usado".to_string()
                    } else {
                        "Disponible".to_string()
                    },
                ],
            )
            .with_actions(&["edit", "delete"])
        })
        .collect()
}

pub fn new_order(ctx: &AppContext) {
    ctx.admin().editing_order = None;
    ctx.doc.set_text(FORM_TITLE, "Nueva orden");
    for id in [USER, CASE, CUSTOMER_NAME, CONTACT_INFO] {
        ctx.doc.set_value(id, "");
    }
    ctx.doc.set_value(ORDER_STATUS, OrderStatus::Pending.as_str());
    ctx.doc.set_value(TOTAL_AMOUNT, "0");
    ctx.doc.set_visible(FORM, true);
}

pub fn edit_order(ctx: &AppContext, id: &str) -> AppResult<()> {
    let order = {
        let mut admin = ctx.admin();
        let order = admin
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::from(brew_core::DomainError::Validation(format!(
                    "order {} is not listed",
                    id
                )))
            })?;
        admin.editing_order = Some(order.id.clone());
        order
    };

    ctx.doc
        .set_text(FORM_TITLE, &format!("Editar orden {}", order.order_id));
    ctx.doc.set_value(USER, &order.user_id);
    ctx.doc.set_value(CASE, &order.case_id);
    ctx.doc.set_value(CUSTOMER_NAME, &order.customer_name);
    ctx.doc.set_value(CONTACT_INFO, &order.contact_info);
    ctx.doc.set_value(ORDER_STATUS, order.status.as_str());
    ctx.doc
        .set_value(TOTAL_AMOUNT, &order.total_amount.to_string());
    ctx.doc.set_visible(FORM, true);
    Ok(())
}

pub fn cancel(ctx: &AppContext) {
    ctx.admin().editing_order = None;
    ctx.doc.set_visible(FORM, false);
}

fn read_form(ctx: &AppContext) -> AppResult<OrderDraft> {
    let status = ctx.doc.text_value(ORDER_STATUS);
    let draft = OrderDraft {
        user_id: ctx.doc.text_value(USER),
        case_id: ctx.doc.text_value(CASE),
        customer_name: ctx.doc.text_value(CUSTOMER_NAME),
        contact_info: ctx.doc.text_value(CONTACT_INFO),
        status: if status.is_empty() {
            OrderStatus::default()
        } else {
            status.parse()?
        },
        total_amount: parse_number(&ctx.doc.text_value(TOTAL_AMOUNT), "total amount")?,
    };
    draft.validate()?;
    Ok(draft)
}

/// Create or update from the form, then reload the list.
pub async fn save(ctx: &AppContext) -> AppResult<()> {
    let result = async {
        let draft = read_form(ctx)?;
        let editing = ctx.admin().editing_order.clone();
        match editing {
            Some(id) => {
                let endpoint = format!("{}/{}", endpoints::ADMIN_ORDERS, id);
                let _: serde_json::Value = ctx.api.put(&endpoint, &draft).await?;
            }
            None => {
                let _: serde_json::Value = ctx.api.post(endpoints::ADMIN_ORDERS, &draft).await?;
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    report(ctx, result, "Orden guardada exitosamente")?;
    cancel(ctx);
    load_list(ctx).await
}

/// Delete after confirmation. Returns `false` when the admin declined.
pub async fn delete_order(ctx: &AppContext, id: &str) -> AppResult<bool> {
    if !ctx.doc.confirm("¿Estás seguro de que deseas eliminar esta orden?") {
        return Ok(false);
    }

    let endpoint = format!("{}/{}", endpoints::ADMIN_ORDERS, id);
    let result: AppResult<MessageResponse> = ctx.api.delete(&endpoint).await;
    report(ctx, result, "Orden eliminada")?;

    load_list(ctx).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_pick_first_known_customer() {
        let orders = vec![
            Order {
                id: "o1".into(),
                order_id: "AB12CD".into(),
                customer_name: "Luis".into(),
                case_name: "Caso 1".into(),
                status: OrderStatus::Shipped,
                total_amount: 15000,
                ..Default::default()
            },
            Order {
                id: "o2".into(),
                is_submission_used: true,
                ..Default::default()
            },
        ];

        let rows = rows(&orders);
        assert_eq!(rows[0].cells[0], "AB12CD");
        assert_eq!(rows[0].cells[1], "Luis");
        assert_eq!(rows[0].cells[3], OrderStatus::Shipped.label());
        assert_eq!(rows[1].cells[1], "Sin cliente");
        assert_eq!(rows[1].cells[5], "Usado");
    }

    #[test]
    fn test_status_options() {
        assert_eq!(status_options(true).len(), 5);
        assert_eq!(status_options(false)[0].value, "pending");
    }
}
