//! Income endpoints (`/receitas`)

use chrono::NaiveDate;
use fincontrol_domain::{Page, PageRequest, Receita, ReceitaRequest};
use tracing::instrument;

use super::{forms, period_pairs, ServiceContext};
use crate::cache::QueryKey;
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "receitas";
const INVALIDATES: &[&str] = &[RESOURCE, "dashboard"];

/// Income periods are listed newest first by `periodoInicio`
pub fn default_page() -> PageRequest {
    PageRequest::sorted_by("periodoInicio")
}

#[derive(Clone)]
pub struct ReceitaService {
    ctx: ServiceContext,
}

impl ReceitaService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    /// Paged income list, optionally restricted to a period
    ///
    /// # Errors
    /// Any error of the request
    pub async fn list(
        &self,
        page: &PageRequest,
        periodo: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Page<Receita>, ApiError> {
        let mut key =
            Self::key().push("list").push(page.page).push(page.size).push(page.sort_param());
        if let Some((inicio, fim)) = periodo {
            key = key.push(inicio).push(fim);
        }
        let request = ApiRequest::get("/receitas")
            .query_pairs(page.query_pairs())
            .query_pairs(period_pairs(periodo));
        self.ctx.query(key, None, request).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Receita, ApiError> {
        self.ctx.query(Self::key().push(id), None, ApiRequest::get(format!("/receitas/{id}"))).await
    }

    pub async fn find_by_id_with_despesas(&self, id: i64) -> Result<Receita, ApiError> {
        let request = ApiRequest::get(format!("/receitas/{id}/despesas"));
        self.ctx.query(Self::key().push(id).push("despesas"), None, request).await
    }

    pub async fn mais_recente(&self) -> Result<Receita, ApiError> {
        let request = ApiRequest::get("/receitas/mais-recente");
        self.ctx.query(Self::key().push("mais-recente"), None, request).await
    }

    pub async fn find_by_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<Receita>, ApiError> {
        let request =
            ApiRequest::get("/receitas/periodo").query_pairs(period_pairs(Some((inicio, fim))));
        self.ctx.query(Self::key().push("periodo").push(inicio).push(fim), None, request).await
    }

    pub async fn find_by_ano(&self, ano: i32) -> Result<Vec<Receita>, ApiError> {
        let request = ApiRequest::get(format!("/receitas/ano/{ano}"));
        self.ctx.query(Self::key().push("ano").push(ano), None, request).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &ReceitaRequest) -> Result<Receita, ApiError> {
        forms::validate_receita(request)?;
        self.ctx.mutate(ApiRequest::post("/receitas").json(request)?, INVALIDATES).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &ReceitaRequest) -> Result<Receita, ApiError> {
        forms::validate_receita(request)?;
        self.ctx.mutate(ApiRequest::put(format!("/receitas/{id}")).json(request)?, INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(format!("/receitas/{id}")), INVALIDATES).await
    }

    pub async fn total_por_periodo(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<f64, ApiError> {
        let request =
            ApiRequest::get("/receitas/total").query_pairs(period_pairs(Some((inicio, fim))));
        self.ctx.query(Self::key().push("total").push(inicio).push(fim), None, request).await
    }

    pub async fn media_mensal(&self) -> Result<f64, ApiError> {
        let request = ApiRequest::get("/receitas/media-mensal");
        self.ctx.query(Self::key().push("media-mensal"), None, request).await
    }

    pub async fn count(&self) -> Result<u64, ApiError> {
        self.ctx.query(Self::key().push("count"), None, ApiRequest::get("/receitas/count")).await
    }
}
