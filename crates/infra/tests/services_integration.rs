//! Integration tests for the typed services
//!
//! Covers the session lifecycle, cache invalidation after mutations, filter
//! routing and local validation.

mod support;

use std::time::Duration;

use chrono::NaiveDate;
use fincontrol_common::auth::CredentialStore;
use fincontrol_common::testing::{fixtures, MockCredentialStore};
use fincontrol_domain::{
    Categoria, CategoriaRequest, DespesaFilter, DespesaRequest, LoginRequest, StatusPagamento,
    TipoCategoria,
};
use fincontrol_infra::api::{
    AuthService, CategoriaService, DashboardService, DespesaService, ParametroService,
};
use fincontrol_infra::http::{ApiError, RefreshError};
use serde_json::{json, Value};
use support::Harness;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn login_request() -> LoginRequest {
    LoginRequest { email: "maria@example.com".to_string(), senha: "segredo123".to_string() }
}

#[tokio::test]
async fn test_login_stores_credentials_and_caches_user() {
    let harness = Harness::new(MockCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "maria@example.com", "senha": "segredo123" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::auth_response_json("a1", "r1")),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::user_json(1)))
        .expect(0)
        .mount(&harness.server)
        .await;

    let auth = AuthService::new(harness.cached_context());
    let response = auth.login(&login_request()).await.unwrap();

    assert_eq!(response.usuario.nome, "Maria Silva");
    assert_eq!(harness.store.access_token().unwrap().as_deref(), Some("a1"));
    assert_eq!(harness.store.refresh_token().unwrap().as_deref(), Some("r1"));
    assert_eq!(harness.session.started(), 1);

    // Served from the cache seeded by the login
    let me = auth.me().await.unwrap();
    assert_eq!(me.email, "maria@example.com");
}

#[tokio::test]
async fn test_invalid_login_sends_nothing() {
    let harness = Harness::new(MockCredentialStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.server)
        .await;

    let auth = AuthService::new(harness.context());
    let err = auth
        .login(&LoginRequest { email: "maria@".to_string(), senha: "123".to_string() })
        .await
        .unwrap_err();

    let ApiError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(validation.first_message("email"), Some("Email inválido"));
    assert_eq!(validation.first_message("senha"), Some("Senha deve ter no mínimo 6 caracteres"));
}

#[tokio::test]
async fn test_logout_clears_session_even_when_backend_fails() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&harness.server)
        .await;

    let ctx = harness.cached_context();
    let auth = AuthService::new(ctx.clone());
    auth.logout().await;

    assert_eq!(harness.store.access_token().unwrap(), None);
    assert_eq!(harness.store.refresh_token().unwrap(), None);
    assert_eq!(harness.store.clear_calls(), 1);

    let cache = ctx.cache().unwrap();
    cache.sync().await;
    assert_eq!(cache.entry_count(), 0);
}

async fn mount_failed_refresh(harness: &Harness) {
    Mock::given(method("GET"))
        .and(path("/despesas/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("refresh expired"))
        .expect(1)
        .mount(&harness.server)
        .await;
}

fn nomes(categorias: &[Categoria]) -> Vec<&str> {
    categorias.iter().map(|c| c.nome.as_str()).collect()
}

#[tokio::test]
async fn test_next_login_does_not_see_previous_users_queries() {
    let harness = Harness::signed_in("a-old", "a-r").await;
    mount_failed_refresh(&harness).await;

    Mock::given(method("GET"))
        .and(path("/categorias"))
        .and(header("Authorization", "Bearer a-old"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([support::categoria_json(1, "A-secret")])),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categorias"))
        .and(header("Authorization", "Bearer b1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([support::categoria_json(2, "B-own")])),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(support::auth_response_json("b1", "b-r")),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let ctx = harness.cached_context();
    let categorias = CategoriaService::new(ctx.clone());
    let auth = AuthService::new(ctx);

    assert_eq!(nomes(&categorias.find_all().await.unwrap()), ["A-secret"]);

    let err = harness.client.get::<Value>("/despesas/1").await.unwrap_err();
    assert!(matches!(err, ApiError::RefreshFailed(RefreshError::Rejected { status: 401, .. })));
    assert_eq!(harness.session.calls(), 1);

    auth.login(&login_request()).await.unwrap();

    assert_eq!(nomes(&categorias.find_all().await.unwrap()), ["B-own"]);
}

#[tokio::test]
async fn test_session_expiry_clears_cached_queries() {
    let harness =
        Harness::clearing_cache_on_expiry(MockCredentialStore::signed_in("a-old", "a-r")).await;
    mount_failed_refresh(&harness).await;

    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([support::categoria_json(1, "Moradia")])),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let categorias = CategoriaService::new(harness.cached_context());
    categorias.find_all().await.unwrap();
    harness.cache.sync().await;
    assert_eq!(harness.cache.entry_count(), 1);

    harness.client.get::<Value>("/despesas/1").await.unwrap_err();

    harness.cache.sync().await;
    assert_eq!(harness.cache.entry_count(), 0);
    assert_eq!(harness.session.calls(), 1);
    assert_eq!(harness.session.last_path().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_check_session_with_expired_token_skips_backend() {
    let harness = Harness::signed_in(&fixtures::expired_jwt(), "r1").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::user_json(1)))
        .expect(0)
        .mount(&harness.server)
        .await;

    let auth = AuthService::new(harness.context());

    assert_eq!(auth.check_session().await, None);
    assert_eq!(harness.store.access_token().unwrap(), None);
}

#[tokio::test]
async fn test_check_session_restores_user() {
    let harness = Harness::signed_in(&fixtures::valid_jwt(), "r1").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::user_json(7)))
        .expect(1)
        .mount(&harness.server)
        .await;

    let auth = AuthService::new(harness.context());
    let user = auth.check_session().await.expect("session should be restored");

    assert_eq!(user.id, 7);
    assert_eq!(harness.store.clear_calls(), 0);
}

#[tokio::test]
async fn test_mutation_invalidates_cached_list() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([support::categoria_json(1, "Moradia")])),
        )
        .expect(2)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/categorias"))
        .and(body_json(json!({ "nome": "Mercado", "tipo": "DESPESA" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(support::categoria_json(2, "Mercado")),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let categorias = CategoriaService::new(harness.cached_context());

    assert_eq!(categorias.find_all().await.unwrap().len(), 1);
    assert_eq!(categorias.find_all().await.unwrap().len(), 1);

    let created = categorias
        .create(&CategoriaRequest {
            nome: "Mercado".to_string(),
            tipo: TipoCategoria::Despesa,
            ativa: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 2);

    categorias.find_all().await.unwrap();
}

#[tokio::test]
async fn test_list_loading_during_create_is_refetched() {
    let harness = Harness::signed_in("a1", "r1").await;

    // Answered before the create, delivered after it
    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([support::categoria_json(1, "Old")]))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            support::categoria_json(1, "Old"),
            support::categoria_json(2, "New"),
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/categorias"))
        .respond_with(ResponseTemplate::new(201).set_body_json(support::categoria_json(2, "New")))
        .expect(1)
        .mount(&harness.server)
        .await;

    let categorias = CategoriaService::new(harness.cached_context());
    let request =
        CategoriaRequest { nome: "New".to_string(), tipo: TipoCategoria::Despesa, ativa: None };

    let (listed, created) = tokio::join!(categorias.find_all(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        categorias.create(&request).await
    });

    assert_eq!(created.unwrap().id, 2);
    assert_eq!(nomes(&listed.unwrap()), ["Old", "New"]);
    // Served from the cache
    assert_eq!(nomes(&categorias.find_all().await.unwrap()), ["Old", "New"]);
}

#[tokio::test]
async fn test_despesa_filters_route_to_their_endpoints() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("GET"))
        .and(path("/despesas/status/PAGO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            support::despesa_json(1, "Luz"),
            support::despesa_json(2, "Agua"),
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/despesas/categoria/7"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(support::page_json(vec![support::despesa_json(3, "Feira")])),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/despesas"))
        .and(query_param("inicio", "2024-03-01"))
        .and(query_param("fim", "2024-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::page_json(vec![])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let despesas = DespesaService::new(harness.context());

    let by_status = despesas
        .list(&DespesaFilter { status: Some(StatusPagamento::Pago), ..DespesaFilter::default() })
        .await
        .unwrap();
    assert_eq!(by_status.content.len(), 2);
    assert_eq!(by_status.total_elements, 2);
    assert!(by_status.last);

    // Category wins over status
    let by_categoria = despesas
        .list(&DespesaFilter {
            categoria_id: Some(7),
            status: Some(StatusPagamento::Pago),
            ..DespesaFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_categoria.content[0].descricao, "Feira");

    let march = (
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );
    let by_periodo = despesas
        .list(&DespesaFilter { periodo: Some(march), ..DespesaFilter::default() })
        .await
        .unwrap();
    assert!(by_periodo.empty);
}

#[tokio::test]
async fn test_invalid_despesa_is_rejected_locally() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("POST"))
        .and(path("/despesas"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&harness.server)
        .await;

    let despesas = DespesaService::new(harness.context());
    let request = DespesaRequest::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), "Luz", 0.0);

    let err = despesas.create(&request).await.unwrap_err();
    assert_eq!(err.display_message("Erro ao salvar"), "Valor deve ser positivo");
}

#[tokio::test]
async fn test_parametro_keys_are_encoded() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("GET"))
        .and(path("/parametros/chave/tema%20escuro/valor"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ativo"))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/parametros/chave/tema%20escuro"))
        .and(query_param("valor", "inativo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "usuarioId": 1,
            "usuarioNome": "Maria Silva",
            "chave": "tema escuro",
            "valor": "inativo",
            "tipo": "STRING"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let parametros = ParametroService::new(harness.context());

    assert_eq!(parametros.valor("tema escuro").await.unwrap(), "ativo");
    let updated = parametros.update_valor("tema escuro", "inativo").await.unwrap();
    assert_eq!(updated.valor, "inativo");
}

#[tokio::test]
async fn test_dashboard_defaults() {
    let harness = Harness::signed_in("a1", "r1").await;

    Mock::given(method("GET"))
        .and(path("/dashboard/evolucao"))
        .and(query_param("meses", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/categorias-top"))
        .and(query_param("limite", "5"))
        .and(query_param("mes", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nome": "Moradia", "valor": 1500.0, "percentual": 45.0, "count": 2 }
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let dashboard = DashboardService::new(harness.context());

    assert!(dashboard.evolucao(None).await.unwrap().is_empty());
    let top = dashboard.top_categorias(None, Some(3), None).await.unwrap();
    assert_eq!(top[0].nome, "Moradia");
}
