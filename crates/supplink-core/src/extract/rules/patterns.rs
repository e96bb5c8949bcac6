//! Common regex patterns and word lists for narration extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Category labels the upstream export prepends to the real supplier name.
///
/// A captured name equal to one of these is a description, not a supplier.
pub const CONTAMINATION_LABELS: &[&str] = &[
    "SERVICOS ANTIFRAUDE",
    "MATERIAL DE ESCRITORIO",
    "DESP VARIAVEIS DE VENDAS_LOJAS",
    "DESP VARIAVEIS DE VENDAS_TI",
    "DESP VARIAVEIS DE VENDAS_LOG",
    "DESP C/ CAMPANHAS _ MKT",
    "DESP C/ ACOES LOJA _ MKT",
    "DESP C/ SONORIZACAO & IDENTIDADE",
    "DESP C/ SERVICOS DE TRANSPORTE VALORES",
    "PUBLICIDADE E PROPAGANDA DIGITAL",
    "SERVICOS DE SEGURANCA E VIGILANCIA",
    "MANUTENCAO DE EQUIPAMENTOS",
    "LOCACAO DE EQUIPAMENTOS / UTENSILIOS",
    "SUPRIMENTOS DE INFORMATICA",
    "EQUIPAMENTOS DE INFORMATICA",
    "SERVICOS PRESTADOS _ RESTRITO",
    "IMPOSTOS E TAXAS ESTADUAIS",
    "ENERGIA ELETRICA",
    "INTERNET",
    "CONDOMINIO E OUTROS",
    "CESTA DE NATAL",
    "FRETE SOBRE VENDAS",
    "SERVICOS TEC&CONTEUDO _ MKT",
];

/// Formal legal-entity terminations.
pub const PJ_SUFFIXES: &[&str] = &[
    "LTDA.",
    "LTDA",
    "S.A.",
    "S.A",
    "S/A",
    "ME",
    "EPP",
    "EIRELI",
    "MEI",
    "MICROEMPRESA",
    "EMPRESA INDIVIDUAL",
];

/// Words that suggest a business rather than a person. Compared accent-folded.
pub const ENTERPRISE_INDICATORS: &[&str] = &[
    "AGENCIA",
    "ASSOCIACAO",
    "AUTOMACAO",
    "BANCO",
    "CIA",
    "COMERCIAL",
    "COMERCIO",
    "COMPANHIA",
    "CONSTRUTORA",
    "CONSULTORIA",
    "COOPERATIVA",
    "CORP",
    "COSMETICOS",
    "DISTRIBUICAO",
    "DISTRIBUIDORA",
    "EDITORA",
    "EMPREENDIMENTOS",
    "ENGENHARIA",
    "EVENTOS",
    "EXPORTADORA",
    "FARMACIA",
    "FUNDACAO",
    "GRAFICA",
    "GROUP",
    "GRUPO",
    "HOTEL",
    "IMPORTADORA",
    "INC",
    "INDUSTRIA",
    "INDUSTRIAL",
    "INFORMATICA",
    "INSTITUTO",
    "LABORATORIO",
    "LIMITADA",
    "LLC",
    "LOGISTICA",
    "PARTICIPACOES",
    "RESTAURANTE",
    "SEGUROS",
    "SERVICOS",
    "SISTEMAS",
    "SOLUCOES",
    "TECHNOLOGY",
    "TECNOLOGIA",
    "TELECOM",
    "TRANSPORTADORA",
    "TRANSPORTES",
];

/// Portuguese connectives that never make a name on their own.
pub const CONNECTIVES: &[&str] = &[
    "DE", "DO", "DA", "DOS", "DAS", "E", "&", "COM", "PARA", "EM", "NO", "NA", "NOS", "NAS", "A",
    "O", "AS", "OS",
];

/// Suffix alternation shared by the PJ rules.
const SUFFIX_ALT: &str = r"LTDA\.?|S\.A\.?|S/A|EIRELI|EPP|ME";

lazy_static! {
    // "- 123 NAME - 123 NAME": the ERP writes the document and name twice.
    // Equality of the halves is checked in code (no back-references).
    pub static ref REPEATED_SPAN: Regex = Regex::new(
        r"(?i)-\s+(\d+)\s*[:;]?\s*([^-]+?)\s*-\s+(\d+)\s*[:;]?\s*([^-]+?)\s*(?:-|$)"
    ).unwrap();

    // "- 123 NAME LTDA"
    pub static ref SINGLE_PJ: Regex = Regex::new(&format!(
        r"(?i)-\s+(\d+)\s*[:;]?\s*([^-]*?\b(?:{SUFFIX_ALT})(?:\s[^-]*?)?)\s*(?:-|$)"
    )).unwrap();

    // "12.345.678/0001-90 NAME"
    pub static ref TAX_ID_PREFIXED: Regex = Regex::new(
        r"(?i)(\d{2}\.\d{3}\.\d{3}(?:/\d{4}-\d{2})?)\s*[-:]?\s*([^-\d][^-]*?)\s*(?:-|$)"
    ).unwrap();

    // "- - 123 NAME" at the end of the narration
    pub static ref DOUBLE_DASH: Regex = Regex::new(
        r"(?i)-\s*-\s*(\d+)\s+([^-]+?)\s*$"
    ).unwrap();

    // "LABEL NAME LTDA 123 - 123 LABEL NAME LTDA"
    pub static ref CONTAMINATED_REPEATED: Regex = Regex::new(
        r"(?i)([^-\d]+?)\s+(\d{3,})\s*-\s*(\d{3,})\s+([^-\d]+?)\s*$"
    ).unwrap();

    // "- 123 NAME - LTDA": the suffix was split off by a dash
    pub static ref SPLIT_SUFFIX: Regex = Regex::new(&format!(
        r"(?i)-\s+(\d+)\s+([^-]+?)\s*-\s*({SUFFIX_ALT})\s*(?:-|$)"
    )).unwrap();

    // "ENERGIA ELETRICA - 4567 NAME"
    pub static ref CONTAMINATED_PREFIX: Regex = {
        let mut labels: Vec<&str> = CONTAMINATION_LABELS.to_vec();
        labels.sort_by_key(|l| std::cmp::Reverse(l.len()));
        let alternation = labels
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"(?i)(?:{alternation})\s*[-:_]?\s*(?:(\d+)\s+)?([^-\d][^-]*?)\s*(?:-|$)"
        )).unwrap()
    };

    // "- 123: FIRST LAST"
    pub static ref SINGLE_PF: Regex = Regex::new(
        r"(?i)-\s+(\d+)\s*[:;]?\s*(\p{L}[\p{L}\s]{3,40}?)\s*(?:-|$)"
    ).unwrap();

    // Formal suffix as a standalone term (also matches "S A" left by sanitizing "S/A")
    pub static ref FORMAL_SUFFIX: Regex = Regex::new(
        r"(?i)(?:^|[\s\-.])(?:LTDA\.?|S\.A\.?|S/A|S\sA|ME|EPP|EIRELI|MEI|MICROEMPRESA|EMPRESA\sINDIVIDUAL)(?:[\s\-.]|$)"
    ).unwrap();

    // Sanitizer: "12.345.678" or "12.345.678/0001-90" at the start
    pub static ref TAX_ID_PREFIX: Regex = Regex::new(
        r"^\d{2}\.\d{3}\.\d{3}(?:/\d{4}-\d{2})?[\s\-:/]*"
    ).unwrap();

    // Sanitizer: everything from the first noise keyword on is dropped
    pub static ref NOISE_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:REEMBOLSO|REFERENTE|REF|DESPESAS?|DESP|CUSTOS?|PAGAMENTO|PAGTO|PGTO|VALOR|VLR)\b"
    ).unwrap();

    // Sanitizer boilerplate, applied in order
    pub static ref BOILERPLATE: Vec<Regex> = vec![
        Regex::new(r"(?i)^(?:DESP|MATERIAL|SERVICOS|PUBLICIDADE)\s+\w*\s*").unwrap(),
        Regex::new(r"(?i)^\w*\s*\((?:DANFE|NFSERV|CTE)\)\s*").unwrap(),
        Regex::new(r"(?i)^(?:VARIAVEIS|CAMPANHAS|ACOES)\s+\w*\s*").unwrap(),
        Regex::new(r"(?i)^INTEGRA[CÇ][AÃ]O\b[^:]*:\s*").unwrap(),
        Regex::new(r"(?i)^ESTORNO\b[\s\-:]*").unwrap(),
    ];

    // Document number right after a legal-entity suffix
    pub static ref DOC_AFTER_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:LTDA|S\.A|S/A|EIRELI|EPP|ME)\.?\s+(\d{4,10})\b"
    ).unwrap();

    // Document number delimited by ':' or ';'
    pub static ref DOC_DELIMITED: Regex = Regex::new(
        r"[:;]\s*(\d{4,8})\b|\b(\d{4,8})\s*[:;]"
    ).unwrap();

    // Any 4-8 digit number
    pub static ref DOC_FREE: Regex = Regex::new(
        r"\b(\d{4,8})\b"
    ).unwrap();
}
