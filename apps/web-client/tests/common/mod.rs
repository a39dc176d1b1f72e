//! Shared harness: the real controllers over headless adapters.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use brew_core::domain::UserSummary;
use brew_core::ports::Method;
use brew_infra::{HeadlessBrowser, InMemoryDocument, InMemoryStorage, JwtTokenDecoder, StubTransport};
use web_client::{AppConfig, AppContext, Ports, layout};

pub const BASE_URL: &str = "https://api.test";

pub struct Harness {
    pub ctx: AppContext,
    pub doc: Arc<InMemoryDocument>,
    pub browser: Arc<HeadlessBrowser>,
    pub stub: Arc<StubTransport>,
    pub storage: Arc<InMemoryStorage>,
}

impl Harness {
    pub fn at(url: &str) -> Self {
        let doc = Arc::new(layout::standard_document());
        let browser = Arc::new(HeadlessBrowser::new(url));
        let stub = Arc::new(StubTransport::new());
        let storage = Arc::new(InMemoryStorage::new());

        let config = AppConfig {
            auth_notice_delay: Duration::from_millis(10),
            ..AppConfig::with_base_url(BASE_URL)
        };
        let ports = Ports {
            storage: storage.clone(),
            scratch: Arc::new(InMemoryStorage::new()),
            decoder: Arc::new(JwtTokenDecoder::new()),
            transport: stub.clone(),
            document: doc.clone(),
            browser: browser.clone(),
        };

        Self {
            ctx: AppContext::new(config, ports),
            doc,
            browser,
            stub,
            storage,
        }
    }

    pub fn new() -> Self {
        Self::at("/")
    }

    /// Store a valid token and a cached user.
    pub fn sign_in(&self, user: &UserSummary) {
        self.ctx.session.set_token(&token(3600)).unwrap();
        self.ctx.session.set_user(user).unwrap();
    }

    pub fn route(&self, method: Method, path: &str, status: u16, body: Value) {
        self.stub.route(method, path, status, body);
    }

    pub fn posts_to(&self, path: &str) -> usize {
        self.stub.requests_to(Method::Post, path).len()
    }
}

/// A signed token expiring `expires_in` seconds from now (negative for past).
pub fn token(expires_in: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + expires_in;
    encode(
        &Header::default(),
        &json!({
            "user_id": "u1",
            "email": "ana@example.com",
            "name": "Ana",
            "exp": exp,
        }),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

pub fn player() -> UserSummary {
    UserSummary {
        id: "u1".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        user_type: Some("user".into()),
        points: 1250,
        cases_count: 3,
        accuracy: 0.82,
        ..Default::default()
    }
}

pub fn admin() -> UserSummary {
    UserSummary {
        id: "a1".into(),
        name: "Admin".into(),
        email: "admin@example.com".into(),
        user_type: Some("admin".into()),
        ..Default::default()
    }
}

pub fn active_case(coffee_ids: &[&str]) -> Value {
    json!({
        "case": {
            "id": "case-1",
            "name": "El Misterio de Tarrazú",
            "description": "Cuatro cafés de Costa Rica",
            "coffees": coffee_ids
                .iter()
                .map(|id| json!({"id": id, "name": format!("Café {}", id)}))
                .collect::<Vec<_>>(),
            "enabled_questions": {
                "region": true, "variety": true, "process": true,
                "taste_note_1": true, "taste_note_2": true,
                "favorite_coffee": true, "brewing_method": true
            }
        }
    })
}

pub fn catalog() -> Value {
    json!({
        "catalog": {
            "region": [{"value": "sarchi", "label": "Sarchí"}],
            "variety": [{"value": "geisha", "label": "Geisha"}],
            "process": [{"value": "honey", "label": "Honey"}],
            "brewing_method": [{"value": "v60", "label": "V60"}]
        }
    })
}
