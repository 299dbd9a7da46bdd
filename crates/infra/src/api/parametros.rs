//! User parameter endpoints (`/parametros`)
//!
//! Parameters are addressed either by id or by their `chave`. Keys are user
//! input, so they are percent-encoded before being placed in a path.

use std::collections::HashMap;

use fincontrol_domain::{Parametro, ParametroRequest, ParametroResumo, TipoParametro};
use tracing::instrument;

use super::{forms, segment, ServiceContext};
use crate::cache::{QueryKey, PARAMETROS_STALE_TIME};
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "parametros";
const INVALIDATES: &[&str] = &[RESOURCE];

#[derive(Clone)]
pub struct ParametroService {
    ctx: ServiceContext,
}

impl ParametroService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    fn chave_path(chave: &str) -> String {
        format!("/parametros/chave/{}", segment(chave))
    }

    async fn array(&self, key: QueryKey, request: ApiRequest) -> Result<Vec<Parametro>, ApiError> {
        self.ctx.query(key, Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn list(&self) -> Result<Vec<Parametro>, ApiError> {
        self.array(Self::key().push("list"), ApiRequest::get("/parametros")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Parametro, ApiError> {
        let request = ApiRequest::get(format!("/parametros/{id}"));
        self.ctx.query(Self::key().push(id), Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn find_by_chave(&self, chave: &str) -> Result<Parametro, ApiError> {
        let request = ApiRequest::get(Self::chave_path(chave));
        self.ctx.query(Self::key().push("chave").push(chave), Some(PARAMETROS_STALE_TIME), request).await
    }

    /// Raw value of a parameter, as the backend stores it
    ///
    /// # Errors
    /// Any error of the request
    pub async fn valor(&self, chave: &str) -> Result<String, ApiError> {
        let request = ApiRequest::get(format!("{}/valor", Self::chave_path(chave)));
        let key = Self::key().push("chave").push(chave).push("valor");
        self.ctx.query_text(key, Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn valor_integer(&self, chave: &str) -> Result<i64, ApiError> {
        let request = ApiRequest::get(format!("{}/valor-integer", Self::chave_path(chave)));
        let key = Self::key().push("chave").push(chave).push("valor-integer");
        self.ctx.query(key, Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn valor_boolean(&self, chave: &str) -> Result<bool, ApiError> {
        let request = ApiRequest::get(format!("{}/valor-boolean", Self::chave_path(chave)));
        let key = Self::key().push("chave").push(chave).push("valor-boolean");
        self.ctx.query(key, Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn valor_double(&self, chave: &str) -> Result<f64, ApiError> {
        let request = ApiRequest::get(format!("{}/valor-double", Self::chave_path(chave)));
        let key = Self::key().push("chave").push(chave).push("valor-double");
        self.ctx.query(key, Some(PARAMETROS_STALE_TIME), request).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form (a `JSON` value that does
    /// not parse included), otherwise any error of the request
    #[instrument(skip(self, request), fields(chave = %request.chave))]
    pub async fn create(&self, request: &ParametroRequest) -> Result<Parametro, ApiError> {
        forms::validate_parametro(request)?;
        self.ctx.mutate(ApiRequest::post("/parametros").json(request)?, INVALIDATES).await
    }

    #[instrument(skip(self, request), fields(chave = %request.chave))]
    pub async fn update(&self, id: i64, request: &ParametroRequest) -> Result<Parametro, ApiError> {
        forms::validate_parametro(request)?;
        self.ctx
            .mutate(ApiRequest::put(format!("/parametros/{id}")).json(request)?, INVALIDATES)
            .await
    }

    /// Replace only the value; it travels as the `valor` query parameter
    #[instrument(skip(self, valor))]
    pub async fn update_valor(&self, chave: &str, valor: &str) -> Result<Parametro, ApiError> {
        let request = ApiRequest::patch(Self::chave_path(chave)).query("valor", valor);
        self.ctx.mutate(request, INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(format!("/parametros/{id}")), INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_chave(&self, chave: &str) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(Self::chave_path(chave)), INVALIDATES).await
    }

    pub async fn find_by_tipo(&self, tipo: TipoParametro) -> Result<Vec<Parametro>, ApiError> {
        self.array(Self::key().push("tipo").push(tipo), ApiRequest::get(format!("/parametros/tipo/{tipo}")))
            .await
    }

    pub async fn find_com_descricao(&self) -> Result<Vec<Parametro>, ApiError> {
        self.array(Self::key().push("com-descricao"), ApiRequest::get("/parametros/com-descricao"))
            .await
    }

    pub async fn search_by_chave(&self, chave: &str) -> Result<Vec<Parametro>, ApiError> {
        let request = ApiRequest::get("/parametros/search").query("chave", chave);
        self.array(Self::key().push("search").push(chave), request).await
    }

    /// Most recently updated parameters
    pub async fn recentes(&self) -> Result<Vec<Parametro>, ApiError> {
        self.array(Self::key().push("recentes"), ApiRequest::get("/parametros/recentes")).await
    }

    pub async fn count(&self) -> Result<u64, ApiError> {
        self.ctx.query(Self::key().push("count"), None, ApiRequest::get("/parametros/count")).await
    }

    pub async fn count_by_tipo(&self, tipo: TipoParametro) -> Result<u64, ApiError> {
        let request = ApiRequest::get(format!("/parametros/count/tipo/{tipo}"));
        self.ctx.query(Self::key().push("count").push(tipo), None, request).await
    }

    pub async fn agrupar_por_tipo(&self) -> Result<HashMap<String, u64>, ApiError> {
        let request = ApiRequest::get("/parametros/agrupar-tipo");
        self.ctx.query(Self::key().push("agrupar-tipo"), None, request).await
    }

    pub async fn exists(&self, chave: &str) -> Result<bool, ApiError> {
        let request = ApiRequest::get(format!("/parametros/exists/{}", segment(chave)));
        self.ctx.query(Self::key().push("exists").push(chave), None, request).await
    }

    /// Every parameter as a `chave -> valor` map
    pub async fn map(&self) -> Result<HashMap<String, String>, ApiError> {
        let request = ApiRequest::get("/parametros/map");
        self.ctx.query(Self::key().push("map"), Some(PARAMETROS_STALE_TIME), request).await
    }

    pub async fn resumo(&self) -> Result<ParametroResumo, ApiError> {
        self.ctx.query(Self::key().push("resumo"), None, ApiRequest::get("/parametros/resumo")).await
    }
}
