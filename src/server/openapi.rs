//! OpenAPI document served at `/openapi.json`.

use axum::Json;
use schemars::schema_for;
use serde_json::{Value, json};

use crate::constants;
use crate::models::User;

fn detail_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": { "detail": { "type": "string" } },
                    "required": ["detail"]
                }
            }
        }
    })
}

fn user_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/User" } }
        }
    })
}

fn user_id_param() -> Value {
    json!({
        "name": "user_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn user_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/User" } }
        }
    })
}

/// Build the full document.
pub fn build() -> Value {
    let invalid = detail_response("Validation Error");
    let missing = detail_response("User not found.");

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": constants::API_TITLE,
            "description": constants::API_DESCRIPTION,
            "version": constants::VERSION,
        },
        "paths": {
            "/users/create_user/": {
                "post": {
                    "summary": "Create User",
                    "operationId": "create_user",
                    "requestBody": user_body(),
                    "responses": {
                        "200": user_response("Created user"),
                        "400": detail_response("User ID already exists."),
                        "422": invalid,
                    }
                }
            },
            "/users/": {
                "get": {
                    "summary": "Get Users",
                    "operationId": "get_users",
                    "responses": {
                        "200": {
                            "description": "All users in insertion order",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/User" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/users/get/{user_id}": {
                "get": {
                    "summary": "Get User",
                    "operationId": "get_user",
                    "parameters": [user_id_param()],
                    "responses": {
                        "200": user_response("The user"),
                        "404": missing,
                        "422": invalid,
                    }
                }
            },
            "/users/update_user/{user_id}": {
                "put": {
                    "summary": "Update User",
                    "operationId": "update_user",
                    "parameters": [user_id_param()],
                    "requestBody": user_body(),
                    "responses": {
                        "200": user_response("Updated user"),
                        "404": missing,
                        "422": invalid,
                    }
                }
            },
            "/users/delete_user/{user_id}": {
                "delete": {
                    "summary": "Delete User",
                    "operationId": "delete_user",
                    "parameters": [user_id_param()],
                    "responses": {
                        "200": user_response("Deleted user"),
                        "404": missing,
                        "422": invalid,
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "User": schema_for!(User).to_value(),
            }
        }
    })
}

/// `GET /openapi.json`
pub async fn document() -> Json<Value> {
    Json(build())
}
