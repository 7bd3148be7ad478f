//! Landing endpoint pointing clients at the API docs.

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

pub const WELCOME_MESSAGE: &str = "Welcome to the Book Library API!";

pub struct HomeModule;

#[async_trait]
impl Module for HomeModule {
    fn name(&self) -> &'static str {
        "home"
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        let body = json!({
            "message": WELCOME_MESSAGE,
            "docs_url": ctx.settings.server.docs_url(),
        });

        Router::new().route("/", get(move || async move { Json(body) }))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Welcome message and docs link",
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": { "type": "string" },
                                                "docs_url": { "type": "string" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(HomeModule)
}
