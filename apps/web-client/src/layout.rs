//! Element tree of the Brew Detective page for the headless document.

use brew_core::domain::Page;
use brew_core::ports::Document;
use brew_infra::InMemoryDocument;

use crate::auth_ui;
use crate::pages::admin::{cases, catalog, orders};
use crate::pages::{leaderboard, order, profile, submit, thankyou};

/// Build a document with every section, element and catalog binding the
/// client addresses.
pub fn standard_document() -> InMemoryDocument {
    let doc = InMemoryDocument::new();

    for page in Page::ALL {
        doc.add_section(page.section_id());
    }

    let groups = [
        auth_ui::ELEMENTS,
        leaderboard::ELEMENTS,
        profile::ELEMENTS,
        submit::ELEMENTS,
        thankyou::ELEMENTS,
        order::ELEMENTS,
        catalog::ELEMENTS,
        cases::ELEMENTS,
        orders::ELEMENTS,
    ];
    for id in groups.into_iter().flatten() {
        doc.add_element(id);
    }
    for id in submit::field_ids().iter().chain(cases::field_ids().iter()) {
        doc.add_element(id);
    }
    for (category, id) in submit::select_bindings()
        .into_iter()
        .chain(cases::select_bindings())
    {
        doc.bind_select(category, &id);
    }

    // Static selects
    doc.set_options(catalog::FILTER, &catalog::category_options(true));
    doc.set_options(catalog::CATEGORY, &catalog::category_options(false));
    doc.set_options(orders::FILTER, &orders::status_options(true));
    doc.set_options(orders::ORDER_STATUS, &orders::status_options(false));

    // Forms start closed
    for form in [catalog::FORM, cases::FORM, orders::FORM] {
        doc.set_visible(form, false);
    }

    doc
}
