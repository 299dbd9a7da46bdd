//! Savings goal endpoints (`/metas`)

use chrono::NaiveDate;
use fincontrol_domain::{
    Meta, MetaFilter, MetaRequest, MetaResumo, MetaTransacao, Page, PageRequest, StatusMeta,
    TipoMeta, TransacaoRequest,
};
use tracing::instrument;

use super::{forms, period_pairs, ServiceContext};
use crate::cache::QueryKey;
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "metas";
const INVALIDATES: &[&str] = &[RESOURCE, "dashboard"];

#[derive(Clone)]
pub struct MetaService {
    ctx: ServiceContext,
}

impl MetaService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    fn page_key(prefix: QueryKey, page: &PageRequest) -> QueryKey {
        prefix.push(page.page).push(page.size).push(page.sort_param())
    }

    async fn array(&self, key: QueryKey, request: ApiRequest) -> Result<Vec<Meta>, ApiError> {
        self.ctx.query(key, None, request).await
    }

    /// List goals
    ///
    /// A status filter lists that status paged; a type or deadline window
    /// lists every match as a single page; otherwise all goals are paged.
    ///
    /// # Errors
    /// Any error of the request
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &MetaFilter) -> Result<Page<Meta>, ApiError> {
        if let Some(status) = filter.status {
            return self.list_by_status(status, &filter.page).await;
        }
        if let Some(tipo) = filter.tipo {
            return self.find_by_tipo(tipo).await.map(Page::single);
        }
        if let Some((inicio, fim)) = filter.prazo {
            return self.find_by_prazo(inicio, fim).await.map(Page::single);
        }

        let request = ApiRequest::get("/metas").query_pairs(filter.page.query_pairs());
        self.ctx.query(Self::page_key(Self::key().push("list"), &filter.page), None, request).await
    }

    pub async fn list_by_status(
        &self,
        status: StatusMeta,
        page: &PageRequest,
    ) -> Result<Page<Meta>, ApiError> {
        let request =
            ApiRequest::get(format!("/metas/status/{status}")).query_pairs(page.query_pairs());
        let key = Self::page_key(Self::key().push("status").push(status), page);
        self.ctx.query(key, None, request).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Meta, ApiError> {
        self.ctx.query(Self::key().push(id), None, ApiRequest::get(format!("/metas/{id}"))).await
    }

    /// Goal with its full transaction history embedded
    pub async fn find_by_id_with_transacoes(&self, id: i64) -> Result<Meta, ApiError> {
        let request = ApiRequest::get(format!("/metas/{id}/transacoes"));
        self.ctx.query(Self::key().push(id).push("transacoes"), None, request).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form (a deadline before `today`
    /// included), otherwise any error of the request
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &MetaRequest, today: NaiveDate) -> Result<Meta, ApiError> {
        forms::validate_meta(request, today)?;
        self.ctx.mutate(ApiRequest::post("/metas").json(request)?, INVALIDATES).await
    }

    /// # Errors
    /// `ApiError::Validation` for an invalid form, otherwise any error of
    /// the request
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i64,
        request: &MetaRequest,
        today: NaiveDate,
    ) -> Result<Meta, ApiError> {
        forms::validate_meta(request, today)?;
        self.ctx.mutate(ApiRequest::put(format!("/metas/{id}")).json(request)?, INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.ctx.mutate_discarding(ApiRequest::delete(format!("/metas/{id}")), INVALIDATES).await
    }

    /// Add money to a goal
    ///
    /// # Errors
    /// `ApiError::Validation` for a non-positive amount, otherwise any error
    /// of the request
    #[instrument(skip(self, request))]
    pub async fn adicionar_aporte(
        &self,
        meta_id: i64,
        request: &TransacaoRequest,
    ) -> Result<Meta, ApiError> {
        forms::validate_transacao(request)?;
        let request = ApiRequest::post(format!("/metas/{meta_id}/aportes")).json(request)?;
        self.ctx.mutate(request, INVALIDATES).await
    }

    /// Withdraw money from a goal
    ///
    /// # Errors
    /// `ApiError::Validation` for a non-positive amount, otherwise any error
    /// of the request
    #[instrument(skip(self, request))]
    pub async fn adicionar_resgate(
        &self,
        meta_id: i64,
        request: &TransacaoRequest,
    ) -> Result<Meta, ApiError> {
        forms::validate_transacao(request)?;
        let request = ApiRequest::post(format!("/metas/{meta_id}/resgates")).json(request)?;
        self.ctx.mutate(request, INVALIDATES).await
    }

    /// Paged transaction history, newest first by default
    pub async fn transacoes(
        &self,
        meta_id: i64,
        page: &PageRequest,
    ) -> Result<Page<MetaTransacao>, ApiError> {
        let request = ApiRequest::get(format!("/metas/{meta_id}/transacoes/lista"))
            .query_pairs(page.query_pairs());
        let key = Self::page_key(Self::key().push(meta_id).push("transacoes").push("lista"), page);
        self.ctx.query(key, None, request).await
    }

    pub async fn em_andamento(&self) -> Result<Vec<Meta>, ApiError> {
        self.array(Self::key().push("em-andamento"), ApiRequest::get("/metas/em-andamento")).await
    }

    pub async fn concluidas(&self) -> Result<Vec<Meta>, ApiError> {
        self.array(Self::key().push("concluidas"), ApiRequest::get("/metas/concluidas")).await
    }

    pub async fn vencidas(&self) -> Result<Vec<Meta>, ApiError> {
        self.array(Self::key().push("vencidas"), ApiRequest::get("/metas/vencidas")).await
    }

    pub async fn proximas_vencimento(&self) -> Result<Vec<Meta>, ApiError> {
        self.array(
            Self::key().push("proximas-vencimento"),
            ApiRequest::get("/metas/proximas-vencimento"),
        )
        .await
    }

    pub async fn find_by_tipo(&self, tipo: TipoMeta) -> Result<Vec<Meta>, ApiError> {
        self.array(Self::key().push("tipo").push(tipo), ApiRequest::get(format!("/metas/tipo/{tipo}")))
            .await
    }

    pub async fn find_by_prazo(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<Vec<Meta>, ApiError> {
        let request = ApiRequest::get("/metas/prazo").query_pairs(period_pairs(Some((inicio, fim))));
        self.array(Self::key().push("prazo").push(inicio).push(fim), request).await
    }

    #[instrument(skip(self))]
    pub async fn cancelar(&self, id: i64) -> Result<Meta, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/metas/{id}/cancelar")), INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn pausar(&self, id: i64) -> Result<Meta, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/metas/{id}/pausar")), INVALIDATES).await
    }

    #[instrument(skip(self))]
    pub async fn retomar(&self, id: i64) -> Result<Meta, ApiError> {
        self.ctx.mutate(ApiRequest::patch(format!("/metas/{id}/retomar")), INVALIDATES).await
    }

    pub async fn resumo(&self) -> Result<MetaResumo, ApiError> {
        self.ctx.query(Self::key().push("resumo"), None, ApiRequest::get("/metas/resumo")).await
    }
}
