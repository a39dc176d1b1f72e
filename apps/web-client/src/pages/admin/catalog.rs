//! Catalog panel - dropdown values per category.

use brew_core::domain::{CatalogDraft, CatalogItem, Category};
use brew_core::ports::{Row, SelectOption};
use brew_shared::MessageResponse;
use brew_shared::dto::ItemsResponse;

use super::{active_label, parse_number, report};
use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub const LIST: &str = "catalogList";
pub const STATUS: &str = "catalogListStatus";
pub const FILTER: &str = "catalogCategoryFilter";
pub const FORM: &str = "catalogForm";
pub const FORM_TITLE: &str = "catalogFormTitle";
pub const CATEGORY: &str = "catalogCategory";
pub const VALUE: &str = "catalogValue";
pub const LABEL: &str = "catalogLabel";
pub const DESCRIPTION: &str = "catalogDescription";
pub const DISPLAY_ORDER: &str = "catalogDisplayOrder";
pub const ACTIVE: &str = "catalogActive";

pub(crate) const ELEMENTS: &[&str] = &[
    LIST,
    STATUS,
    FILTER,
    FORM,
    FORM_TITLE,
    CATEGORY,
    VALUE,
    LABEL,
    DESCRIPTION,
    DISPLAY_ORDER,
    ACTIVE,
];

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Region => "Región",
        Category::Variety => "Variedad",
        Category::Process => "Proceso",
        Category::BrewingMethod => "Método de preparación",
    }
}

/// Options of the filter (with "all") and of the form's category select.
pub(crate) fn category_options(with_all: bool) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if with_all {
        options.push(SelectOption::placeholder("Todas las categorías"));
    }
    options.extend(
        Category::ALL
            .into_iter()
            .map(|c| SelectOption::new(c.as_str(), category_label(c))),
    );
    options
}

/// List catalog items, filtered by the category selected in the filter.
pub async fn load_list(ctx: &AppContext) -> AppResult<()> {
    let filter = ctx.doc.text_value(FILTER);
    let endpoint = if filter.is_empty() {
        endpoints::ADMIN_CATALOG.to_string()
    } else {
        let category: Category = filter.parse()?;
        format!("{}?category={}", endpoints::ADMIN_CATALOG, category)
    };

    let result: AppResult<ItemsResponse<CatalogItem>> = ctx.api.get(&endpoint).await;
    let items = match result {
        Ok(response) => response.items,
        Err(e) => {
            ctx.doc.set_text(STATUS, "Error al cargar el catálogo");
            return Err(e);
        }
    };

    ctx.doc.render_rows(LIST, rows(&items));
    ctx.doc.set_text(
        STATUS,
        if items.is_empty() {
            "No hay elementos en el catálogo"
        } else {
            ""
        },
    );
    ctx.admin().catalog_items = items;
    Ok(())
}

pub fn rows(items: &[CatalogItem]) -> Vec<Row> {
    items
        .iter()
        .map(|item| {
            Row::new(
                item.id.clone(),
                vec![
                    category_label(item.category).to_string(),
                    item.value.clone(),
                    item.label.clone(),
                    active_label(item.is_active).to_string(),
                    item.display_order.to_string(),
                ],
            )
            .with_actions(&["edit", "delete"])
        })
        .collect()
}

/// Open an empty form.
pub fn new_item(ctx: &AppContext) {
    ctx.admin().editing_catalog = None;
    ctx.doc.set_text(FORM_TITLE, "Nuevo elemento del catálogo");
    ctx.doc.set_value(CATEGORY, Category::Region.as_str());
    for id in [VALUE, LABEL, DESCRIPTION] {
        ctx.doc.set_value(id, "");
    }
    ctx.doc.set_value(DISPLAY_ORDER, "0");
    ctx.doc.set_value(ACTIVE, "true");
    ctx.doc.set_visible(FORM, true);
}

/// Open the form filled with a listed item.
pub fn edit_item(ctx: &AppContext, id: &str) -> AppResult<()> {
    let item = {
        let mut admin = ctx.admin();
        let item = admin
            .catalog_items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| not_listed(id))?;
        admin.editing_catalog = Some(item.id.clone());
        item
    };

    ctx.doc.set_text(FORM_TITLE, "Editar elemento del catálogo");
    ctx.doc.set_value(CATEGORY, item.category.as_str());
    ctx.doc.set_value(VALUE, &item.value);
    ctx.doc.set_value(LABEL, &item.label);
    ctx.doc.set_value(DESCRIPTION, &item.description);
    ctx.doc.set_value(DISPLAY_ORDER, &item.display_order.to_string());
    ctx.doc.set_value(ACTIVE, if item.is_active { "true" } else { "false" });
    ctx.doc.set_visible(FORM, true);
    Ok(())
}

pub fn cancel(ctx: &AppContext) {
    ctx.admin().editing_catalog = None;
    ctx.doc.set_visible(FORM, false);
}

fn not_listed(id: &str) -> AppError {
    brew_core::DomainError::Validation(format!("catalog item {} is not listed", id)).into()
}

fn read_form(ctx: &AppContext) -> AppResult<CatalogDraft> {
    let draft = CatalogDraft {
        category: ctx.doc.text_value(CATEGORY).parse()?,
        value: ctx.doc.text_value(VALUE),
        label: ctx.doc.text_value(LABEL),
        description: ctx.doc.text_value(DESCRIPTION),
        is_active: ctx.doc.checked(ACTIVE),
        display_order: parse_number(&ctx.doc.text_value(DISPLAY_ORDER), "display order")?,
    };
    draft.validate()?;
    Ok(draft)
}

/// Create or update from the form, then reload the list.
pub async fn save(ctx: &AppContext) -> AppResult<()> {
    let result = async {
        let draft = read_form(ctx)?;
        let editing = ctx.admin().editing_catalog.clone();
        match editing {
            Some(id) => {
                let endpoint = format!("{}/{}", endpoints::ADMIN_CATALOG, id);
                let _: serde_json::Value = ctx.api.put(&endpoint, &draft).await?;
            }
            None => {
                let _: serde_json::Value = ctx.api.post(endpoints::ADMIN_CATALOG, &draft).await?;
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    report(ctx, result, "Elemento del catálogo guardado")?;
    cancel(ctx);
    load_list(ctx).await
}

/// Delete after confirmation. Returns `false` when the admin declined.
pub async fn delete_item(ctx: &AppContext, id: &str) -> AppResult<bool> {
    if !ctx
        .doc
        .confirm("¿Estás seguro de que deseas eliminar este elemento del catálogo?")
    {
        return Ok(false);
    }

    let endpoint = format!("{}/{}", endpoints::ADMIN_CATALOG, id);
    let result: AppResult<MessageResponse> = ctx.api.delete(&endpoint).await;
    report(ctx, result, "Elemento del catálogo eliminado")?;

    load_list(ctx).await?;
    Ok(true)
}
