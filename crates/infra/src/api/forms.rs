//! Form rules checked before a request is sent
//!
//! Field names are the wire names, so errors line up with both the request
//! body and the inputs of the form that produced it. Messages are shown to
//! users verbatim.

use chrono::NaiveDate;
use fincontrol_common::validation::{
    EmailValidator, RangeValidator, StringValidator, UrlValidator, ValidationResult, Validator,
};
use fincontrol_domain::constants::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_NOTES_LENGTH};
use fincontrol_domain::utils::validate_json;
use fincontrol_domain::{
    CategoriaRequest, ChangePasswordRequest, DespesaRequest, LoginRequest, MetaRequest,
    ParametroRequest, ReceitaRequest, RegisterRequest, TipoParametro, TransacaoRequest,
    UpdateProfileRequest,
};

const CHAVE_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";

fn email() -> StringValidator {
    StringValidator::new("Email").not_empty()
}

fn nome(min: usize) -> StringValidator {
    StringValidator::new("Nome").min_length(min).max_length(MAX_NAME_LENGTH)
}

fn positive(message: &str) -> RangeValidator<f64> {
    RangeValidator::new("Valor").greater_than(0.0).message(message)
}

fn non_negative(message: &str) -> RangeValidator<f64> {
    RangeValidator::new("Valor").min(0.0).message(message)
}

fn optional_text(label: &str, max: usize) -> StringValidator {
    StringValidator::new(label).max_length(max)
}

fn observacoes() -> StringValidator {
    StringValidator::new("Observações")
        .max_length(MAX_NOTES_LENGTH)
        .message(format!("Observações devem ter no máximo {MAX_NOTES_LENGTH} caracteres"))
}

fn validate_email(validator: &mut Validator, field: &str, value: &str) {
    validator.validate_field(field, value, &email());
    if !validator.has_error(field) {
        validator.validate_field(field, value, &EmailValidator::new());
    }
}

fn validate_confirmation(validator: &mut Validator, field: &str, password: &str, confirmation: &str) {
    validator.validate_field(
        field,
        confirmation,
        &StringValidator::new("Confirmação de senha")
            .not_empty()
            .message("Confirmação de senha é obrigatória"),
    );
    if !validator.has_error(field) {
        validator.ensure(password == confirmation, field, "As senhas não coincidem");
    }
}

/// # Errors
/// Returns the field errors of the login form
pub fn validate_login(request: &LoginRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validate_email(&mut validator, "email", &request.email);
    validator.validate_field("senha", &request.senha, &StringValidator::new("Senha").min_length(6));
    validator.finish()
}

/// # Errors
/// Returns the field errors of the registration form
pub fn validate_register(request: &RegisterRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator.validate_field("nome", &request.nome, &nome(3));
    validate_email(&mut validator, "email", &request.email);
    validator.validate_field(
        "senha",
        &request.senha,
        &StringValidator::new("Senha").min_length(6).max_length(50),
    );
    validate_confirmation(
        &mut validator,
        "confirmacaoSenha",
        &request.senha,
        &request.confirmacao_senha,
    );
    validator.finish()
}

/// # Errors
/// Returns the field errors of the change-password form
pub fn validate_change_password(request: &ChangePasswordRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator.validate_field(
        "senhaAtual",
        &request.senha_atual,
        &StringValidator::new("Senha atual").not_empty().message("Senha atual é obrigatória"),
    );
    validator.validate_field(
        "novaSenha",
        &request.nova_senha,
        &StringValidator::new("Nova senha").min_length(8),
    );
    validate_confirmation(
        &mut validator,
        "confirmacaoSenha",
        &request.nova_senha,
        &request.confirmacao_senha,
    );
    validator.finish()
}

/// An empty photo URL clears the photo and is accepted
///
/// # Errors
/// Returns the field errors of the profile form
pub fn validate_profile(request: &UpdateProfileRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator.validate_optional("nome", request.nome.as_deref(), &nome(3));
    validator.validate_optional(
        "fotoUrl",
        request.foto_url.as_deref().filter(|url| !url.is_empty()),
        &UrlValidator::new(),
    );
    validator.finish()
}

/// # Errors
/// Returns the field errors of the category form
pub fn validate_categoria(request: &CategoriaRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator.validate_field("nome", &request.nome, &nome(2));
    validator.finish()
}

/// # Errors
/// Returns the field errors of the expense form
pub fn validate_despesa(request: &DespesaRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator
        .validate_field(
            "descricao",
            &request.descricao,
            &StringValidator::new("Descrição").min_length(3).max_length(MAX_DESCRIPTION_LENGTH),
        )
        .validate_field("valor", &request.valor, &positive("Valor deve ser positivo"))
        .validate_field(
            "parcelaAtual",
            &request.parcela_atual,
            &RangeValidator::new("Parcela atual").min(1_u32),
        )
        .validate_field(
            "parcelaTotal",
            &request.parcela_total,
            &RangeValidator::new("Total de parcelas").min(1_u32),
        )
        .validate_optional("observacoes", request.observacoes.as_deref(), &observacoes());

    if !validator.has_error("parcelaAtual") && !validator.has_error("parcelaTotal") {
        validator.ensure(
            request.parcela_atual <= request.parcela_total,
            "parcelaAtual",
            "Parcela atual não pode ser maior que o total",
        );
    }
    validator.finish()
}

/// `today` is the caller's local date; a deadline of today is accepted
///
/// # Errors
/// Returns the field errors of the goal form
pub fn validate_meta(request: &MetaRequest, today: NaiveDate) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator
        .validate_field("nome", &request.nome, &nome(3))
        .validate_optional(
            "descricao",
            request.descricao.as_deref(),
            &optional_text("Descrição", MAX_NOTES_LENGTH),
        )
        .validate_field(
            "valorObjetivo",
            &request.valor_objetivo,
            &positive("Valor objetivo deve ser positivo"),
        )
        .validate_optional("observacoes", request.observacoes.as_deref(), &observacoes());

    if let Some(prazo) = request.prazo {
        validator.ensure(prazo >= today, "prazo", "Prazo deve ser uma data futura");
    }
    validator.finish()
}

/// Shared by contributions (aportes) and withdrawals (resgates)
///
/// # Errors
/// Returns the field errors of the transaction form
pub fn validate_transacao(request: &TransacaoRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator
        .validate_field("valor", &request.valor, &positive("Valor deve ser positivo"))
        .validate_optional(
            "descricao",
            request.descricao.as_deref(),
            &optional_text("Descrição", MAX_DESCRIPTION_LENGTH),
        );
    validator.finish()
}

/// Working days are unsigned on the wire and need no sign check
///
/// # Errors
/// Returns the field errors of the income form
pub fn validate_receita(request: &ReceitaRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator
        .validate_field("salario", &request.salario, &non_negative("Salário deve ser positivo"))
        .validate_field("auxilios", &request.auxilios, &non_negative("Auxílios devem ser positivos"))
        .validate_field(
            "servicosExtras",
            &request.servicos_extras,
            &non_negative("Serviços extras devem ser positivos"),
        )
        .ensure(
            request.periodo_fim >= request.periodo_inicio,
            "periodoFim",
            "Data final deve ser maior ou igual à data inicial",
        );
    validator.finish()
}

/// # Errors
/// Returns the field errors of the parameter form
pub fn validate_parametro(request: &ParametroRequest) -> ValidationResult<()> {
    let mut validator = Validator::new();

    let chave = StringValidator::new("Chave").min_length(2).max_length(MAX_NAME_LENGTH);
    validator.validate_field("chave", &request.chave, &chave);
    if !validator.has_error("chave") {
        if let Ok(pattern) = StringValidator::new("Chave").pattern(CHAVE_PATTERN) {
            let pattern = pattern
                .message("Chave deve conter apenas letras, números, ponto, hífen ou underscore");
            validator.validate_field("chave", &request.chave, &pattern);
        }
    }

    validator
        .validate_optional(
            "descricao",
            request.descricao.as_deref(),
            &optional_text("Descrição", MAX_DESCRIPTION_LENGTH),
        )
        .validate_field(
            "valor",
            &request.valor,
            &StringValidator::new("Valor").not_empty().message("Valor é obrigatório"),
        );

    if request.tipo == TipoParametro::Json && !validator.has_error("valor") {
        validator.ensure(validate_json(&request.valor), "valor", "JSON inválido");
    }
    validator.finish()
}

#[cfg(test)]
mod tests {
    use fincontrol_domain::{StatusPagamento, TipoCategoria, TipoMeta};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_login_email_messages() {
        let err = validate_login(&LoginRequest { email: String::new(), senha: "123".into() })
            .unwrap_err();
        assert_eq!(err.first_message("email"), Some("Email é obrigatório"));
        assert_eq!(err.field_errors("email").len(), 1);
        assert_eq!(err.first_message("senha"), Some("Senha deve ter no mínimo 6 caracteres"));

        let err = validate_login(&LoginRequest { email: "maria@".into(), senha: "123456".into() })
            .unwrap_err();
        assert_eq!(err.first_message("email"), Some("Email inválido"));
        assert_eq!(err.error_count(), 1);

        assert!(validate_login(&LoginRequest {
            email: "maria@example.com".into(),
            senha: "123456".into()
        })
        .is_ok());
    }

    #[test]
    fn test_register_password_mismatch() {
        let mut request = RegisterRequest {
            nome: "Maria".into(),
            email: "maria@example.com".into(),
            senha: "segredo1".into(),
            confirmacao_senha: "segredo2".into(),
        };
        let err = validate_register(&request).unwrap_err();
        assert_eq!(err.first_message("confirmacaoSenha"), Some("As senhas não coincidem"));

        request.confirmacao_senha = String::new();
        let err = validate_register(&request).unwrap_err();
        assert_eq!(
            err.first_message("confirmacaoSenha"),
            Some("Confirmação de senha é obrigatória")
        );
        assert_eq!(err.error_count(), 1);
    }

    #[test]
    fn test_change_password_rules() {
        let err = validate_change_password(&ChangePasswordRequest {
            senha_atual: String::new(),
            nova_senha: "curta".into(),
            confirmacao_senha: "curta".into(),
        })
        .unwrap_err();
        assert_eq!(err.first_message("senhaAtual"), Some("Senha atual é obrigatória"));
        assert_eq!(err.first_message("novaSenha"), Some("Nova senha deve ter no mínimo 8 caracteres"));
        assert!(err.first_message("confirmacaoSenha").is_none());
    }

    #[test]
    fn test_profile_accepts_empty_photo() {
        let request = UpdateProfileRequest { foto_url: Some(String::new()), ..Default::default() };
        assert!(validate_profile(&request).is_ok());

        let request = UpdateProfileRequest { foto_url: Some("foto".into()), ..Default::default() };
        let err = validate_profile(&request).unwrap_err();
        assert_eq!(err.first_message("fotoUrl"), Some("URL inválida"));
    }

    #[test]
    fn test_categoria_name_length() {
        let err = validate_categoria(&CategoriaRequest {
            nome: "A".into(),
            tipo: TipoCategoria::Despesa,
            ativa: None,
        })
        .unwrap_err();
        assert_eq!(err.first_message("nome"), Some("Nome deve ter no mínimo 2 caracteres"));
    }

    #[test]
    fn test_despesa_installments() {
        let mut request = DespesaRequest::new(date(2024, 3, 1), "Aluguel", 1500.0);
        request.parcela_atual = 4;
        request.parcela_total = 3;
        request.status = StatusPagamento::Pago;

        let err = validate_despesa(&request).unwrap_err();
        assert_eq!(
            err.first_message("parcelaAtual"),
            Some("Parcela atual não pode ser maior que o total")
        );

        request.parcela_atual = 0;
        let err = validate_despesa(&request).unwrap_err();
        assert_eq!(err.first_message("parcelaAtual"), Some("Parcela atual deve ser no mínimo 1"));
        assert_eq!(err.error_count(), 1);
    }

    #[test]
    fn test_despesa_value_and_notes() {
        let mut request = DespesaRequest::new(date(2024, 3, 1), "Ab", 0.0);
        request.observacoes = Some("x".repeat(501));

        let err = validate_despesa(&request).unwrap_err();
        assert_eq!(err.first_message("descricao"), Some("Descrição deve ter no mínimo 3 caracteres"));
        assert_eq!(err.first_message("valor"), Some("Valor deve ser positivo"));
        assert_eq!(
            err.first_message("observacoes"),
            Some("Observações devem ter no máximo 500 caracteres")
        );
    }

    #[test]
    fn test_meta_deadline() {
        let today = date(2024, 6, 15);
        let mut request = MetaRequest {
            nome: "Viagem".into(),
            descricao: None,
            tipo: TipoMeta::Economia,
            valor_objetivo: 5000.0,
            prazo: Some(date(2024, 6, 14)),
            status: None,
            observacoes: None,
        };

        let err = validate_meta(&request, today).unwrap_err();
        assert_eq!(err.first_message("prazo"), Some("Prazo deve ser uma data futura"));

        request.prazo = Some(today);
        assert!(validate_meta(&request, today).is_ok());

        request.valor_objetivo = -1.0;
        let err = validate_meta(&request, today).unwrap_err();
        assert_eq!(err.first_message("valorObjetivo"), Some("Valor objetivo deve ser positivo"));
    }

    #[test]
    fn test_transacao() {
        let err = validate_transacao(&TransacaoRequest {
            valor: 0.0,
            data: None,
            descricao: Some("d".repeat(256)),
        })
        .unwrap_err();
        assert_eq!(err.first_message("valor"), Some("Valor deve ser positivo"));
        assert_eq!(
            err.first_message("descricao"),
            Some("Descrição deve ter no máximo 255 caracteres")
        );
    }

    #[test]
    fn test_receita_period_and_values() {
        let request = ReceitaRequest {
            periodo_inicio: date(2024, 3, 31),
            periodo_fim: date(2024, 3, 1),
            dias_uteis: Some(21),
            salario: -10.0,
            auxilios: 0.0,
            servicos_extras: 0.0,
            observacoes: None,
        };

        let err = validate_receita(&request).unwrap_err();
        assert_eq!(err.first_message("salario"), Some("Salário deve ser positivo"));
        assert!(err.first_message("auxilios").is_none());
        assert_eq!(
            err.first_message("periodoFim"),
            Some("Data final deve ser maior ou igual à data inicial")
        );
    }

    #[test]
    fn test_parametro_key_and_json() {
        let mut request = ParametroRequest {
            chave: "tema escuro".into(),
            descricao: None,
            valor: "{".into(),
            tipo: TipoParametro::Json,
        };

        let err = validate_parametro(&request).unwrap_err();
        assert_eq!(
            err.first_message("chave"),
            Some("Chave deve conter apenas letras, números, ponto, hífen ou underscore")
        );
        assert_eq!(err.first_message("valor"), Some("JSON inválido"));

        request.chave = "ui.tema-escuro_v2".into();
        request.valor = r#"{"ativo": true}"#.into();
        assert!(validate_parametro(&request).is_ok());

        request.valor = String::new();
        request.tipo = TipoParametro::String;
        let err = validate_parametro(&request).unwrap_err();
        assert_eq!(err.first_message("valor"), Some("Valor é obrigatório"));
    }
}
