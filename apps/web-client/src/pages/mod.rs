//! Page controllers. Each one turns API data into view state and pushes
//! it through the `Document` port.

pub mod admin;
pub mod leaderboard;
pub mod order;
pub mod profile;
pub mod submit;
pub mod thankyou;

use brew_core::domain::{Catalog, CatalogOption, Category};
use brew_core::ports::{Document, SelectOption};
use brew_shared::dto::CatalogResponse;

use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::AppResult;

fn placeholder(category: Category) -> &'static str {
    match category {
        Category::Region => "Selecciona una región",
        Category::Variety => "Selecciona una variedad",
        Category::Process => "Selecciona un proceso",
        Category::BrewingMethod => "Selecciona un método",
    }
}

/// Fill every `<select>` bound to a catalog category: a placeholder entry
/// followed by the category's options.
pub fn populate_selects(doc: &dyn Document, catalog: &Catalog) {
    for category in Category::ALL {
        let mut options = vec![SelectOption::placeholder(placeholder(category))];
        options.extend(
            catalog
                .options(category)
                .iter()
                .map(|o| SelectOption::new(o.value.as_str(), o.label.as_str())),
        );

        for id in doc.selects_for(category) {
            doc.set_options(&id, &options);
        }
    }
}

/// Fetch the active catalog, fill the bound selects and keep a copy for
/// later reconciliation.
pub(crate) async fn load_catalog_selects(ctx: &AppContext) -> AppResult<Catalog> {
    let response: CatalogResponse<CatalogOption> = ctx.api.get(endpoints::CATALOG).await?;
    let catalog = Catalog::from_raw(response.catalog);

    populate_selects(ctx.doc.as_ref(), &catalog);
    ctx.set_catalog(catalog.clone());

    tracing::debug!(empty = catalog.is_empty(), "Catalog dropdowns populated");
    Ok(catalog)
}
