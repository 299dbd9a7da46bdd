//! Dashboard aggregates (`/dashboard`)
//!
//! Read-only. Every mutation elsewhere invalidates the `dashboard` prefix,
//! so the stale times here only matter between mutations.

use chrono::NaiveDate;
use fincontrol_domain::constants::{DEFAULT_EVOLUTION_MONTHS, DEFAULT_TOP_CATEGORIES};
use fincontrol_domain::{
    ComparativoResponse, DashboardResponse, EvolucaoMensal, Indicadores, SaldoResponse,
    TopCategoria,
};

use super::{period_pairs, ServiceContext};
use crate::cache::{QueryKey, COMPARATIVO_STALE_TIME, EVOLUCAO_STALE_TIME, SALDO_STALE_TIME};
use crate::http::{ApiError, ApiRequest};

const RESOURCE: &str = "dashboard";

#[derive(Clone)]
pub struct DashboardService {
    ctx: ServiceContext,
}

impl DashboardService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn key() -> QueryKey {
        QueryKey::new([RESOURCE])
    }

    /// Monthly overview; the backend picks the current month when `mes` or
    /// `ano` is omitted
    ///
    /// # Errors
    /// Any error of the request
    pub async fn dashboard(&self, mes: Option<u32>, ano: Option<i32>) -> Result<DashboardResponse, ApiError> {
        let mut key = Self::key().push("geral");
        let mut request = ApiRequest::get("/dashboard");
        if let Some(mes) = mes {
            key = key.push(format!("mes={mes}"));
            request = request.query("mes", mes);
        }
        if let Some(ano) = ano {
            key = key.push(format!("ano={ano}"));
            request = request.query("ano", ano);
        }
        self.ctx.query(key, None, request).await
    }

    pub async fn total_receitas(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<f64, ApiError> {
        let request =
            ApiRequest::get("/dashboard/receitas-totais").query_pairs(period_pairs(Some((inicio, fim))));
        self.ctx.query(Self::key().push("receitas-totais").push(inicio).push(fim), None, request).await
    }

    pub async fn total_despesas(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<f64, ApiError> {
        let request =
            ApiRequest::get("/dashboard/despesas-totais").query_pairs(period_pairs(Some((inicio, fim))));
        self.ctx.query(Self::key().push("despesas-totais").push(inicio).push(fim), None, request).await
    }

    /// Balance of the current month
    pub async fn saldo(&self) -> Result<SaldoResponse, ApiError> {
        self.ctx
            .query(Self::key().push("saldo"), Some(SALDO_STALE_TIME), ApiRequest::get("/dashboard/saldo"))
            .await
    }

    /// Compare two months
    pub async fn comparativo(
        &self,
        (mes1, ano1): (u32, i32),
        (mes2, ano2): (u32, i32),
    ) -> Result<ComparativoResponse, ApiError> {
        let request = ApiRequest::get("/dashboard/comparativo")
            .query("mes1", mes1)
            .query("ano1", ano1)
            .query("mes2", mes2)
            .query("ano2", ano2);
        let key = Self::key().push("comparativo").push(mes1).push(ano1).push(mes2).push(ano2);
        self.ctx.query(key, Some(COMPARATIVO_STALE_TIME), request).await
    }

    /// Income and expenses of the last `meses` months, six when `None`
    pub async fn evolucao(&self, meses: Option<u32>) -> Result<Vec<EvolucaoMensal>, ApiError> {
        let meses = meses.unwrap_or(DEFAULT_EVOLUTION_MONTHS);
        let request = ApiRequest::get("/dashboard/evolucao").query("meses", meses);
        self.ctx.query(Self::key().push("evolucao").push(meses), Some(EVOLUCAO_STALE_TIME), request).await
    }

    /// Categories with the highest spend, five when `limite` is `None`
    pub async fn top_categorias(
        &self,
        limite: Option<u32>,
        mes: Option<u32>,
        ano: Option<i32>,
    ) -> Result<Vec<TopCategoria>, ApiError> {
        let limite = limite.unwrap_or(DEFAULT_TOP_CATEGORIES);
        let mut key = Self::key().push("categorias-top").push(limite);
        let mut request = ApiRequest::get("/dashboard/categorias-top").query("limite", limite);
        if let Some(mes) = mes {
            key = key.push(format!("mes={mes}"));
            request = request.query("mes", mes);
        }
        if let Some(ano) = ano {
            key = key.push(format!("ano={ano}"));
            request = request.query("ano", ano);
        }
        self.ctx.query(key, None, request).await
    }

    pub async fn indicadores(&self) -> Result<Indicadores, ApiError> {
        let request = ApiRequest::get("/dashboard/indicadores");
        self.ctx.query(Self::key().push("indicadores"), None, request).await
    }
}
