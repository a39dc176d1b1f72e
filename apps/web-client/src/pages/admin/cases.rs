//! Cases panel - four coffees with their answers, plus question flags.

use brew_core::domain::{COFFEES_PER_CASE, Case, CaseDraft, Category, Coffee, EnabledQuestions};
use brew_core::ports::{Row, SelectOption};
use brew_shared::MessageResponse;
use brew_shared::dto::CasesResponse;

use super::{active_label, orders, parse_number, report};
use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::pages;

pub const LIST: &str = "casesList";
pub const STATUS: &str = "casesListStatus";
pub const FORM: &str = "caseForm";
pub const FORM_TITLE: &str = "caseFormTitle";
pub const NAME: &str = "adminCaseName";
pub const DESCRIPTION: &str = "adminCaseDescription";
pub const PRICE: &str = "adminCasePrice";
pub const ACTIVE: &str = "adminCaseActive";

pub(crate) const ELEMENTS: &[&str] = &[
    LIST,
    STATUS,
    FORM,
    FORM_TITLE,
    NAME,
    DESCRIPTION,
    PRICE,
    ACTIVE,
];

/// Id of a coffee field, `coffee` counted from 1.
pub fn coffee_field(coffee: usize, field: &str) -> String {
    format!("adminCoffee{}{}", coffee, field)
}

/// Checkbox id of a question flag.
pub fn flag_id(key: &str) -> String {
    format!("enable_{}", key)
}

const COFFEE_FIELDS: [&str; 5] = ["Name", "Region", "Variety", "Process", "TastingNotes"];

pub(crate) fn field_ids() -> Vec<String> {
    let mut ids: Vec<String> = (1..=COFFEES_PER_CASE)
        .flat_map(|coffee| COFFEE_FIELDS.map(|field| coffee_field(coffee, field)))
        .collect();
    ids.extend(EnabledQuestions::default().flags().map(|(key, _)| flag_id(key)));
    ids
}

pub(crate) fn select_bindings() -> Vec<(Category, String)> {
    (1..=COFFEES_PER_CASE)
        .flat_map(|coffee| {
            [
                (Category::Region, coffee_field(coffee, "Region")),
                (Category::Variety, coffee_field(coffee, "Variety")),
                (Category::Process, coffee_field(coffee, "Process")),
            ]
        })
        .collect()
}

/// List every case and refresh the order form's case dropdown.
pub async fn load_list(ctx: &AppContext) -> AppResult<()> {
    let result: AppResult<CasesResponse<Case>> = ctx.api.get(endpoints::ADMIN_CASES).await;
    let cases = match result {
        Ok(response) => response.cases,
        Err(e) => {
            ctx.doc.set_text(STATUS, "Error al cargar los casos");
            return Err(e);
        }
    };

    ctx.doc.render_rows(LIST, rows(&cases));
    ctx.doc.set_text(
        STATUS,
        if cases.is_empty() { "No hay casos creados" } else { "" },
    );

    let mut options = vec![SelectOption::placeholder("Selecciona un caso")];
    options.extend(
        cases
            .iter()
            .map(|case| SelectOption::new(case.id.as_str(), case.name.as_str())),
    );
    ctx.doc.set_options(orders::CASE, &options);

    ctx.admin().cases = cases;
    Ok(())
}

pub fn rows(cases: &[Case]) -> Vec<Row> {
    cases
        .iter()
        .map(|case| {
            Row::new(
                case.id.clone(),
                vec![
                    case.name.clone(),
                    format!("{} cafés", case.coffees.len()),
                    format!("₡{}", case.price),
                    active_label(case.is_active).to_string(),
                    format!(
                        "{} pts",
                        case.enabled_questions.scoring(COFFEES_PER_CASE).max_score
                    ),
                ],
            )
            .with_actions(&["edit", "delete"])
        })
        .collect()
}

/// Open an empty form with every question enabled.
pub fn new_case(ctx: &AppContext) {
    ctx.admin().editing_case = None;
    ctx.doc.set_text(FORM_TITLE, "Nuevo caso");
    for id in [NAME, DESCRIPTION] {
        ctx.doc.set_value(id, "");
    }
    ctx.doc.set_value(PRICE, "0");
    ctx.doc.set_value(ACTIVE, "false");
    fill_coffees(ctx, &[]);
    fill_flags(ctx, &EnabledQuestions::default());
    ctx.doc.set_visible(FORM, true);
}

/// Open the form with a listed case. Stored attribute values are mapped
/// onto current catalog values so the dropdowns preselect correctly.
pub async fn edit_case(ctx: &AppContext, id: &str) -> AppResult<()> {
    let case = ctx
        .admin()
        .cases
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| {
            AppError::from(brew_core::DomainError::Validation(format!(
                "case {} is not listed",
                id
            )))
        })?;

    if ctx.catalog().is_empty() {
        if let Err(e) = pages::load_catalog_selects(ctx).await {
            tracing::warn!(error = %e, "Editing case without catalog options");
        }
    }

    ctx.admin().editing_case = Some(case.id.clone());
    ctx.doc.set_text(FORM_TITLE, "Editar caso");
    ctx.doc.set_value(NAME, &case.name);
    ctx.doc.set_value(DESCRIPTION, &case.description);
    ctx.doc.set_value(PRICE, &case.price.to_string());
    ctx.doc
        .set_value(ACTIVE, if case.is_active { "true" } else { "false" });
    fill_coffees(ctx, &case.coffees);
    fill_flags(ctx, &case.enabled_questions);
    ctx.doc.set_visible(FORM, true);
    Ok(())
}

fn fill_coffees(ctx: &AppContext, coffees: &[Coffee]) {
    let catalog = ctx.catalog();
    let reconcile = |category: Category, stored: &str| {
        catalog
            .reconcile(category, stored)
            .unwrap_or_else(|| stored.to_string())
    };

    for coffee in 1..=COFFEES_PER_CASE {
        let stored = coffees.get(coffee - 1).cloned().unwrap_or_default();
        ctx.doc.set_value(&coffee_field(coffee, "Name"), &stored.name);
        ctx.doc.set_value(
            &coffee_field(coffee, "Region"),
            &reconcile(Category::Region, &stored.region),
        );
        ctx.doc.set_value(
            &coffee_field(coffee, "Variety"),
            &reconcile(Category::Variety, &stored.variety),
        );
        ctx.doc.set_value(
            &coffee_field(coffee, "Process"),
            &reconcile(Category::Process, &stored.process),
        );
        ctx.doc
            .set_value(&coffee_field(coffee, "TastingNotes"), &stored.tasting_notes);
    }
}

fn fill_flags(ctx: &AppContext, questions: &EnabledQuestions) {
    for (key, enabled) in questions.flags() {
        ctx.doc
            .set_value(&flag_id(key), if enabled { "true" } else { "false" });
    }
}

pub fn cancel(ctx: &AppContext) {
    ctx.admin().editing_case = None;
    ctx.doc.set_visible(FORM, false);
}

fn read_form(ctx: &AppContext, existing: Option<&Case>) -> AppResult<CaseDraft> {
    let coffees = (1..=COFFEES_PER_CASE)
        .map(|coffee| Coffee {
            // Keep coffee ids so existing submissions still match
            id: existing
                .and_then(|case| case.coffees.get(coffee - 1))
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            name: ctx.doc.text_value(&coffee_field(coffee, "Name")),
            region: ctx.doc.text_value(&coffee_field(coffee, "Region")),
            variety: ctx.doc.text_value(&coffee_field(coffee, "Variety")),
            process: ctx.doc.text_value(&coffee_field(coffee, "Process")),
            tasting_notes: ctx.doc.text_value(&coffee_field(coffee, "TastingNotes")),
        })
        .collect();

    let mut enabled_questions = EnabledQuestions::none();
    for (key, _) in EnabledQuestions::default().flags() {
        enabled_questions.set(key, ctx.doc.checked(&flag_id(key)));
    }

    let draft = CaseDraft {
        name: ctx.doc.text_value(NAME),
        description: ctx.doc.text_value(DESCRIPTION),
        price: parse_number(&ctx.doc.text_value(PRICE), "price")?,
        is_active: ctx.doc.checked(ACTIVE),
        coffees,
        enabled_questions,
    };
    draft.validate()?;
    Ok(draft)
}

/// Create or update from the form, then reload the list.
pub async fn save(ctx: &AppContext) -> AppResult<()> {
    let result = async {
        let (editing, existing) = {
            let admin = ctx.admin();
            let editing = admin.editing_case.clone();
            let existing = editing
                .as_ref()
                .and_then(|id| admin.cases.iter().find(|c| &c.id == id).cloned());
            (editing, existing)
        };
        let draft = read_form(ctx, existing.as_ref())?;

        match editing {
            Some(id) => {
                let endpoint = format!("{}/{}", endpoints::ADMIN_CASES, id);
                let _: serde_json::Value = ctx.api.put(&endpoint, &draft).await?;
            }
            None => {
                let _: serde_json::Value = ctx.api.post(endpoints::ADMIN_CASES, &draft).await?;
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    report(ctx, result, "Caso guardado exitosamente")?;
    cancel(ctx);
    load_list(ctx).await
}

/// Delete after confirmation. Returns `false` when the admin declined.
pub async fn delete_case(ctx: &AppContext, id: &str) -> AppResult<bool> {
    if !ctx.doc.confirm("¿Estás seguro de que deseas eliminar este caso?") {
        return Ok(false);
    }

    let endpoint = format!("{}/{}", endpoints::ADMIN_CASES, id);
    let result: AppResult<MessageResponse> = ctx.api.delete(&endpoint).await;
    report(ctx, result, "Caso eliminado")?;

    load_list(ctx).await?;
    Ok(true)
}
