//! Order page - WhatsApp call to action or a login prompt.

use brew_core::domain::UserSummary;

use crate::context::AppContext;

pub const AUTHENTICATED_BLOCK: &str = "orderAuthenticated";
pub const UNAUTHENTICATED_BLOCK: &str = "orderUnauthenticated";
pub const WHATSAPP_LINK: &str = "whatsappOrderLink";

pub(crate) const ELEMENTS: &[&str] = &[AUTHENTICATED_BLOCK, UNAUTHENTICATED_BLOCK, WHATSAPP_LINK];

/// Toggle the order page from session state alone. No network call.
pub fn render(ctx: &AppContext) {
    let user = ctx
        .session
        .user()
        .filter(|_| ctx.session.is_authenticated());

    match user {
        Some(user) => {
            ctx.doc.set_visible(AUTHENTICATED_BLOCK, true);
            ctx.doc.set_visible(UNAUTHENTICATED_BLOCK, false);
            let link = whatsapp_link(ctx.config.order_whatsapp_number.as_deref(), &user);
            ctx.doc.set_href(WHATSAPP_LINK, &link);
        }
        None => {
            ctx.doc.set_visible(AUTHENTICATED_BLOCK, false);
            ctx.doc.set_visible(UNAUTHENTICATED_BLOCK, true);
            ctx.doc.set_href(WHATSAPP_LINK, "");
        }
    }
}

/// `wa.me` deep link with the order message prefilled.
pub fn whatsapp_link(number: Option<&str>, user: &UserSummary) -> String {
    let text = format!(
        "¡Hola! Me gustaría ordenar un caso de Brew Detective.\n\nNombre: {}\nEmail: {}",
        user.display_name(),
        user.email
    );
    // wa.me wants %20 for spaces; a literal '+' is already %2B here
    let encoded: String = url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    format!("https://wa.me/{}?text={}", number.unwrap_or_default(), encoded)
}
