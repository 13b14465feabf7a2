// src/common/i18n.rs

// Catálogo de mensagens da API (en/pt).
// O idioma vem do extrator `Locale` (cabeçalho Accept-Language).
#[derive(Clone, Default)]
pub struct I18nStore;

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    pub fn message(&self, lang: &str, key: &str) -> &'static str {
        match lang {
            "pt" => Self::pt(key),
            _ => Self::en(key),
        }
    }

    fn en(key: &str) -> &'static str {
        match key {
            "validation" => "One or more fields are invalid.",
            "email_exists" => "This e-mail is already in use.",
            "invalid_credentials" => "Invalid e-mail or password.",
            "invalid_token" => "Missing or invalid authentication token.",
            "user_not_found" => "User not found.",
            "contract_not_found" => "Contract not found.",
            "store_not_found" => "Store not found.",
            "role_not_found" => "Role not found.",
            "seat_not_found" => "User does not have a seat in this contract.",
            "seat_exists" => "User already has a seat in this contract.",
            "access_denied" => "You do not have access to this resource.",
            "permission_denied" => "You do not have the required permission.",
            "store_limit" => "This contract has reached its store limit.",
            "insufficient_credits" => "Insufficient AI credits.",
            "unique_violation" => "A record with these values already exists.",
            "contract_header_missing" => "The x-contract-id header is required.",
            "contract_header_invalid" => "The x-contract-id header is not a valid UUID.",
            _ => "An unexpected error occurred.",
        }
    }

    fn pt(key: &str) -> &'static str {
        match key {
            "validation" => "Um ou mais campos são inválidos.",
            "email_exists" => "Este e-mail já está em uso.",
            "invalid_credentials" => "E-mail ou senha inválidos.",
            "invalid_token" => "Token de autenticação inválido ou ausente.",
            "user_not_found" => "Usuário não encontrado.",
            "contract_not_found" => "Contrato não encontrado.",
            "store_not_found" => "Loja não encontrada.",
            "role_not_found" => "Cargo não encontrado.",
            "seat_not_found" => "O usuário não possui assento neste contrato.",
            "seat_exists" => "O usuário já possui assento neste contrato.",
            "access_denied" => "Você não tem acesso a este recurso.",
            "permission_denied" => "Você não possui a permissão necessária.",
            "store_limit" => "Este contrato atingiu o limite de lojas.",
            "insufficient_credits" => "Créditos de IA insuficientes.",
            "unique_violation" => "Já existe um registro com esses valores.",
            "contract_header_missing" => "O cabeçalho x-contract-id é obrigatório.",
            "contract_header_invalid" => "O cabeçalho x-contract-id não é um UUID válido.",
            _ => "Ocorreu um erro inesperado.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(
            store.message("de", "invalid_token"),
            store.message("en", "invalid_token")
        );
    }

    #[test]
    fn unknown_key_has_generic_message() {
        let store = I18nStore::new();
        assert_eq!(store.message("pt", "nope"), "Ocorreu um erro inesperado.");
    }
}
