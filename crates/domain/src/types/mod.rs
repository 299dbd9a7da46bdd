//! Domain types and models
//!
//! Every type mirrors the JSON contract of the finance backend. Field names
//! are Rust snake_case, the wire names are the backend's camelCase Portuguese
//! identifiers.

pub mod auth;
pub mod categoria;
pub mod dashboard;
pub mod despesa;
pub mod meta;
pub mod page;
pub mod parametro;
pub mod receita;

pub use auth::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshRequest, RefreshResponse,
    RegisterRequest, TipoUsuario, UpdateProfileRequest, User,
};
pub use categoria::{Categoria, CategoriaRequest, CategoriaResumo, DespesaResumo, TipoCategoria};
pub use dashboard::{
    CategoriaTotal, ComparativoResponse, DashboardResponse, EvolucaoMensal, Indicadores,
    PeriodoComparado, SaldoResponse, SaudeFinanceira, TopCategoria, VariacaoPeriodos,
};
pub use despesa::{Despesa, DespesaFilter, DespesaRequest, DespesaResumoMensal, StatusPagamento};
pub use meta::{
    Meta, MetaFilter, MetaRequest, MetaResumo, MetaTransacao, StatusMeta, TipoMeta,
    TipoTransacaoMeta, TransacaoRequest,
};
pub use page::{Page, PageRequest, SortDirection};
pub use parametro::{Parametro, ParametroRequest, ParametroResumo, TipoParametro};
pub use receita::{Receita, ReceitaRequest};
