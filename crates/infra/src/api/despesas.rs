//! Expense endpoints (`/despesas`)

use std::collections::HashMap;

use chrono::NaiveDate;
use fincontrol_domain::{
    Despesa, DespesaFilter, DespesaRequest, DespesaResumoMensal, Page, PageRequest,
    StatusPagamento,
};
use tracing::{debug, instrument};

use super::{forms, period_pairs, ServiceContext};
use crate::cache::QueryKey;
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "despesas";
const INVALIDATES: &[&str] = &[RESOURCE, "dashboard"];

#[derive(Clone)]
pub struct DespesaService {
    ctx: ServiceContext,
}

impl DespesaService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    async fn array(&self, key: QueryKey, path: String) -> Result<Vec<Despesa>, ApiError> {
        self.ctx.query(key, None, ApiRequest::get(path)).await
    }

    async fn total(&self, path: &str, inicio: NaiveDate, fim: NaiveDate) -> Result<f64, ApiError> {
        let request = ApiRequest::get(path).query_pairs(period_pairs(Some((inicio, fim))));
        let key = Self::key().push(path).push(inicio).push(fim);
        self.ctx.query(key, None, request).await
    }

    /// List expenses
    ///
    /// Filters are exclusive and checked in order: a category lists that
    /// category's paged expenses, a status or income id lists every match as
    /// a single page, otherwise the paged list is restricted to the period
    /// when one is given.
    ///
    /// # Errors
    /// Any error of the request
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &DespesaFilter) -> Result<Page<Despesa>, ApiError> {
        if let Some(categoria_id) = filter.categoria_id {
            return self.list_by_categoria(categoria_id, &filter.page).await;
        }
        if let Some(status) = filter.status {
            return self.find_by_status(status).await.map(Page::single);
        }
        if let Some(receita_id) = filter.receita_id {
            return self.find_by_receita(receita_id).await.map(Page::single);
        }

        let mut key = Self::key()
            .push("list")
            .push(filter.page.page)
            .push(filter.page.size)
            .push(filter.page.sort_param());
        if let Some((inicio, fim)) = filter.periodo {
            key = key.push(inicio).push(fim);
        }
        let request = ApiRequest::get("/despesas")
            .query_pairs(filter.page.query_pairs())
            .query_pairs(period_pairs(filter.periodo));

        debug!(key = %key, "Listing expenses");
        self.ctx.query(key, None, request).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Despesa, ApiError> {
        self.ctx.query(Self::key().push(id), None, ApiRequest::get(format!("/despesas/{id}"))).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &DespesaRequest) -> Result<Despesa, ApiError> {
        forms::validate_despesa(request)?;
        self.ctx.mutate(ApiRequest::post("/despesas").json(request)?, INVALIDATES).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &DespesaRequest) -> Result<Despesa, ApiError> {
        forms::validate_despesa(request)?;
        self.ctx.mutate(ApiRequest::put(format!("/despesas/{id}")).json(request)?, INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(format!("/despesas/{id}")), INVALIDATES).await
    }

    pub async fn list_by_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
        page: &PageRequest,
    ) -> Result<Page<Despesa>, ApiError> {
        let request = ApiRequest::get("/despesas/periodo")
            .query_pairs(period_pairs(Some((inicio, fim))))
            .query_pairs(page.query_pairs());
        let key = Self::key()
            .push("periodo")
            .push(inicio)
            .push(fim)
            .push(page.page)
            .push(page.size)
            .push(page.sort_param());
        self.ctx.query(key, None, request).await
    }

    pub async fn list_by_categoria(
        &self,
        categoria_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Despesa>, ApiError> {
        let request = ApiRequest::get(format!("/despesas/categoria/{categoria_id}"))
            .query_pairs(page.query_pairs());
        let key = Self::key()
            .push("categoria")
            .push(categoria_id)
            .push(page.page)
            .push(page.size)
            .push(page.sort_param());
        self.ctx.query(key, None, request).await
    }

    pub async fn find_by_status(&self, status: StatusPagamento) -> Result<Vec<Despesa>, ApiError> {
        self.array(Self::key().push("status").push(status), format!("/despesas/status/{status}"))
            .await
    }

    pub async fn find_vencidas(&self) -> Result<Vec<Despesa>, ApiError> {
        self.array(Self::key().push("vencidas"), "/despesas/vencidas".to_string()).await
    }

    pub async fn find_parceladas(&self) -> Result<Vec<Despesa>, ApiError> {
        self.array(Self::key().push("parceladas"), "/despesas/parceladas".to_string()).await
    }

    pub async fn find_by_mes(&self, ano: i32, mes: u32) -> Result<Vec<Despesa>, ApiError> {
        self.array(Self::key().push("mes").push(ano).push(mes), format!("/despesas/mes/{ano}/{mes}"))
            .await
    }

    pub async fn find_by_receita(&self, receita_id: i64) -> Result<Vec<Despesa>, ApiError> {
        self.array(
            Self::key().push("receita").push(receita_id),
            format!("/despesas/receita/{receita_id}"),
        )
        .await
    }

    /// Mark as paid
    #[instrument(skip(self))]
    pub async fn marcar_como_paga(&self, id: i64) -> Result<Despesa, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/despesas/{id}/pagar")), INVALIDATES).await
    }

    /// Mark as pending again
    #[instrument(skip(self))]
    pub async fn marcar_como_pendente(&self, id: i64) -> Result<Despesa, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/despesas/{id}/pendente")), INVALIDATES).await
    }

    pub async fn total_por_periodo(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<f64, ApiError> {
        self.total("/despesas/total", inicio, fim).await
    }

    pub async fn total_pago_por_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<f64, ApiError> {
        self.total("/despesas/total/pagas", inicio, fim).await
    }

    pub async fn total_pendente_por_periodo(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<f64, ApiError> {
        self.total("/despesas/total/pendentes", inicio, fim).await
    }

    /// Expense totals per category name within the period
    pub async fn agrupar_por_categoria(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<HashMap<String, f64>, ApiError> {
        let request = ApiRequest::get("/despesas/agrupar-categoria")
            .query_pairs(period_pairs(Some((inicio, fim))));
        let key = Self::key().push("agrupar-categoria").push(inicio).push(fim);
        self.ctx.query(key, None, request).await
    }

    pub async fn count_by_status(&self, status: StatusPagamento) -> Result<u64, ApiError> {
        let request = ApiRequest::get(format!("/despesas/count/status/{status}"));
        self.ctx.query(Self::key().push("count").push(status), None, request).await
    }

    pub async fn media_mensal(&self) -> Result<f64, ApiError> {
        let request = ApiRequest::get("/despesas/media-mensal");
        self.ctx.query(Self::key().push("media-mensal"), None, request).await
    }

    pub async fn resumo_mensal(&self, ano: i32, mes: u32) -> Result<DespesaResumoMensal, ApiError> {
        let request = ApiRequest::get(format!("/despesas/resumo-mensal/{ano}/{mes}"));
        self.ctx.query(Self::key().push("resumo-mensal").push(ano).push(mes), None, request).await
    }
}
