//! Category endpoints (`/categorias`)

use std::collections::HashMap;

use fincontrol_domain::{Categoria, CategoriaRequest, CategoriaResumo, TipoCategoria};
use tracing::instrument;

use super::{forms, ServiceContext};
use crate::cache::{QueryKey, CATEGORIAS_STALE_TIME};
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "categorias";
const INVALIDATES: &[&str] = &[RESOURCE, "dashboard"];

#[derive(Clone)]
pub struct CategoriaService {
    ctx: ServiceContext,
}

impl CategoriaService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    async fn list(&self, key: QueryKey, path: &str) -> Result<Vec<Categoria>, ApiError> {
        self.ctx.query(key, Some(CATEGORIAS_STALE_TIME), ApiRequest::get(path)).await
    }

    async fn count_at(&self, key: QueryKey, path: &str) -> Result<u64, ApiError> {
        self.ctx.query(key, None, ApiRequest::get(path)).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &CategoriaRequest) -> Result<Categoria, ApiError> {
        forms::validate_categoria(request)?;
        self.ctx.mutate(ApiRequest::post("/categorias").json(request)?, INVALIDATES).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &CategoriaRequest) -> Result<Categoria, ApiError> {
        forms::validate_categoria(request)?;
        self.ctx
            .mutate(ApiRequest::put(format!("/categorias/{id}")).json(request)?, INVALIDATES)
            .await
    }

    /// # Errors
    /// Any error of the request
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(format!("/categorias/{id}")), INVALIDATES).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn ativar(&self, id: i64) -> Result<Categoria, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/categorias/{id}/ativar")), INVALIDATES).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn desativar(&self, id: i64) -> Result<Categoria, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/categorias/{id}/desativar")), INVALIDATES).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_by_id(&self, id: i64) -> Result<Categoria, ApiError> {
        let request = ApiRequest::get(format!("/categorias/{id}"));
        self.ctx.query(Self::key().push(id), Some(CATEGORIAS_STALE_TIME), request).await
    }

    /// Category with its expenses embedded
    ///
    /// # Errors
    /// Any error of the request
    pub async fn find_by_id_with_despesas(&self, id: i64) -> Result<Categoria, ApiError> {
        let request = ApiRequest::get(format!("/categorias/{id}/despesas"));
        self.ctx.query(Self::key().push(id).push("despesas"), None, request).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_all(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("list"), "/categorias").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_ativas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("ativas"), "/categorias/ativas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_by_tipo(&self, tipo: TipoCategoria) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("tipo").push(tipo), &format!("/categorias/tipo/{tipo}")).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_ativas_by_tipo(&self, tipo: TipoCategoria) -> Result<Vec<Categoria>, ApiError> {
        self.list(
            Self::key().push("tipo").push(tipo).push("ativas"),
            &format!("/categorias/tipo/{tipo}/ativas"),
        )
        .await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_despesa_ativas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("despesa").push("ativas"), "/categorias/despesa/ativas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_receita_ativas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("receita").push("ativas"), "/categorias/receita/ativas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_com_despesas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("com-despesas"), "/categorias/com-despesas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_sem_despesas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("sem-despesas"), "/categorias/sem-despesas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn find_mais_usadas(&self) -> Result<Vec<Categoria>, ApiError> {
        self.list(Self::key().push("mais-usadas"), "/categorias/mais-usadas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn search_by_nome(&self, nome: &str) -> Result<Vec<Categoria>, ApiError> {
        let request = ApiRequest::get("/categorias/search").query("nome", nome);
        self.ctx.query(Self::key().push("search").push(nome), None, request).await
    }

    /// # Errors
    /// Any error of the request
    pub async fn count(&self) -> Result<u64, ApiError> {
        self.count_at(Self::key().push("count"), "/categorias/count").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn count_ativas(&self) -> Result<u64, ApiError> {
        self.count_at(Self::key().push("count").push("ativas"), "/categorias/count/ativas").await
    }

    /// # Errors
    /// Any error of the request
    pub async fn count_by_tipo(&self, tipo: TipoCategoria) -> Result<u64, ApiError> {
        self.count_at(Self::key().push("count").push("tipo").push(tipo), &format!("/categorias/count/tipo/{tipo}"))
            .await
    }

    /// # Errors
    /// Any error of the request
    pub async fn count_despesas(&self, id: i64) -> Result<u64, ApiError> {
        self.count_at(
            Self::key().push(id).push("count-despesas"),
            &format!("/categorias/{id}/count-despesas"),
        )
        .await
    }

    /// Category count per type
    ///
    /// # Errors
    /// Any error of the request
    pub async fn agrupar_por_tipo(&self) -> Result<HashMap<String, u64>, ApiError> {
        self.ctx
            .query(Self::key().push("agrupar-tipo"), None, ApiRequest::get("/categorias/agrupar-tipo"))
            .await
    }

    /// # Errors
    /// Any error of the request
    pub async fn resumo(&self) -> Result<CategoriaResumo, ApiError> {
        self.ctx.query(Self::key().push("resumo"), None, ApiRequest::get("/categorias/resumo")).await
    }
}
