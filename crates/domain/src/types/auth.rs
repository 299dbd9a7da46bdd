//! Authentication and user profile types

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Role assigned to an account by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoUsuario {
    #[default]
    User,
    Admin,
}

impl_wire_enum_conversions!(TipoUsuario {
    User => "USER",
    Admin => "ADMIN",
});

/// Authenticated user as returned by `/auth/me` and the login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
    #[serde(default)]
    pub tipo_usuario: TipoUsuario,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Body returned by login and register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    /// Token type, normally `Bearer`
    #[serde(default)]
    pub tipo: Option<String>,
    pub usuario: User,
    #[serde(default)]
    pub expira_em: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub confirmacao_senha: String,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_usuario: Option<TipoUsuario>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub senha_atual: String,
    pub nova_senha: String,
    pub confirmacao_senha: String,
}

/// Body of `POST /auth/refresh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh`
///
/// Only `token` is required. Backends that rotate refresh tokens also return
/// `refreshToken`; any other field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_from_backend_payload() {
        let json = r#"{
            "token": "access",
            "refreshToken": "refresh",
            "tipo": "Bearer",
            "usuario": {
                "id": 7,
                "nome": "Maria Souza",
                "email": "maria@example.com",
                "tipoUsuario": "ADMIN",
                "ativo": true,
                "createdAt": "2024-01-10T09:30:00",
                "updatedAt": "2024-02-01T12:00:00"
            },
            "expiraEm": "2024-02-01T13:00:00"
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "access");
        assert_eq!(response.refresh_token, "refresh");
        assert_eq!(response.usuario.tipo_usuario, TipoUsuario::Admin);
        assert_eq!(response.usuario.foto_url, None);
    }

    #[test]
    fn test_refresh_request_wire_name() {
        let body = serde_json::to_value(RefreshRequest { refresh_token: "r".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "refreshToken": "r" }));
    }

    #[test]
    fn test_refresh_response_ignores_extra_fields() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"token":"new","tipo":"Bearer","expiraEm":"x"}"#).unwrap();
        assert_eq!(response.token, "new");
        assert_eq!(response.refresh_token, None);
    }

    #[test]
    fn test_update_profile_skips_absent_fields() {
        let body = serde_json::to_value(UpdateProfileRequest {
            nome: Some("Novo Nome".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "nome": "Novo Nome" }));
    }
}
